use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::access::role::{self, Role, RoleInput};
use crate::bounded::read_bounded;
use crate::error::AccessError;

const MAX_SESSION_BYTES: u64 = 16 * 1024;

/// Session record as handed over by the identity provider.
///
/// Read-only. The role is never trusted beyond the three known literals:
/// anything else deserializes to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    #[serde(default, rename = "userId", alias = "user_id")]
    user_id: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default, deserialize_with = "fail_closed_role")]
    role: Option<Role>,
}

/// Accepts any JSON value for `role`. Non-string and unknown values map to `None`.
fn fail_closed_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let role = raw.as_str().and_then(Role::from_token);
    if role.is_none() && !raw.is_null() {
        tracing::warn!("unrecognized session role treated as absent");
    }
    Ok(role)
}

impl Session {
    pub fn new(user_id: &str, role: impl RoleInput) -> Self {
        Self {
            user_id: Some(user_id.to_owned()),
            username: None,
            role: role.resolve(),
        }
    }

    /// No user, no role.
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            username: None,
            role: None,
        }
    }

    pub fn with_username(mut self, username: &str) -> Self {
        self.username = Some(username.to_owned());
        self
    }

    /// Parse a session record. Malformed JSON is an error; a bad role is not.
    pub fn from_json(content: &str) -> Result<Self, AccessError> {
        serde_json::from_str(content).map_err(|e| AccessError::SessionParse(e.to_string()))
    }

    /// Read a session record from disk (at most 16 KiB), e.g. one exported
    /// by the identity provider for offline checks.
    pub fn load(path: &Path) -> Result<Self, AccessError> {
        let content = read_bounded(path, MAX_SESSION_BYTES)
            .map_err(|e| AccessError::SessionParse(format!("{}: {e}", path.display())))?;
        Self::from_json(&content)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// No user and no role. A record carrying only a role is not anonymous.
    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none() && self.role.is_none()
    }

    pub fn is_admin(&self) -> bool {
        role::is_admin(self.role)
    }

    pub fn is_moderator(&self) -> bool {
        role::is_moderator(self.role)
    }

    pub fn has_role_or_higher(&self, required: Role) -> bool {
        role::has_role_or_higher(self.role, required)
    }
}
