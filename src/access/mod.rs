pub mod grant;
pub mod path;
pub mod policy;
pub mod role;

use grant::AccessGrant;
use policy::RoutePolicy;
use role::Role;
use crate::request::{AccessRequest, Checked, Pending};

pub use role::{
    has_admin_access, has_moderator_access, has_role_or_higher, is_admin, is_moderator, rank,
    RoleInput,
};

/// Result of enforcement evaluation.
#[derive(Debug)]
pub enum Decision {
    Allow(AccessGrant),
    /// `required` is `None` when the path itself was rejected.
    Deny { required: Option<Role> },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow(_))
    }
}

/// Evaluate a pending request against the route policy.
///
/// Returns the transitioned request (now `Checked`) and the decision.
/// The path is normalized first; paths with a second spelling (`//`, `..`,
/// encoded separators) are denied before the policy is consulted.
pub fn evaluate(
    request: AccessRequest<Pending>,
    policy: &RoutePolicy,
) -> (AccessRequest<Checked>, Decision) {
    let role = request.session.role();

    let decision = match path::normalize(&request.path) {
        None => Decision::Deny { required: None },
        Some(route) => match policy.required_role(route) {
            None => Decision::Allow(AccessGrant::new(None)),
            Some(required) if has_role_or_higher(role, required) => {
                Decision::Allow(AccessGrant::new(Some(required)))
            }
            Some(required) => Decision::Deny {
                required: Some(required),
            },
        },
    };

    match &decision {
        Decision::Allow(grant) => {
            tracing::debug!(path = %request.path, role = ?role, tier = ?grant.tier(), "access allowed");
        }
        Decision::Deny { required } => {
            tracing::info!(path = %request.path, role = ?role, required = ?required, "access denied");
        }
    }

    (request.transition(), decision)
}
