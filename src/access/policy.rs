use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use regex::RegexSet;
use serde::Deserialize;

use super::role::Role;
use crate::bounded::read_bounded;
use crate::error::AccessError;

const MAX_POLICY_BYTES: u64 = 64 * 1024;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyFile {
    #[serde(default)]
    routes: HashMap<String, RouteConfig>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RouteConfig {
    #[serde(default, rename = "description")]
    _description: Option<String>,
    role: Role,
    patterns: Vec<String>,
}

/// Maps request paths to the lowest role allowed to reach them.
/// Paths no route matches are public.
pub struct RoutePolicy {
    route_count: usize,
    tiers: Vec<CompiledTier>, // Ordered: Admin, Moderator, User (highest first)
}

struct CompiledTier {
    role: Role,
    patterns: RegexSet,
}

impl std::fmt::Debug for RoutePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutePolicy")
            .field("route_count", &self.route_count)
            .field("tier_count", &self.tiers.len())
            .finish()
    }
}

impl FromStr for RoutePolicy {
    type Err = AccessError;

    /// Parse and compile a route policy from a TOML string.
    fn from_str(content: &str) -> Result<Self, AccessError> {
        let file: PolicyFile =
            toml::from_str(content).map_err(|e| AccessError::PolicyLoad(e.to_string()))?;
        compile(file)
    }
}

impl RoutePolicy {
    /// Load a policy file of at most 64 KiB.
    pub fn load(path: &Path) -> Result<Self, AccessError> {
        let policy: RoutePolicy = read_bounded(path, MAX_POLICY_BYTES)
            .map_err(|e| AccessError::PolicyLoad(format!("{}: {e}", path.display())))?
            .parse()?;

        tracing::info!(path = %path.display(), routes = policy.route_count, "route policy loaded");
        Ok(policy)
    }

    pub fn route_count(&self) -> usize {
        self.route_count
    }

    /// Highest role whose patterns match `path`. `None` means public.
    ///
    /// Matching is case-insensitive. `path` must already be normalized
    /// (see [`super::path::normalize`]); `access::evaluate` does this.
    pub fn required_role(&self, path: &str) -> Option<Role> {
        self.tiers
            .iter()
            .find(|ct| ct.patterns.is_match(path))
            .map(|ct| ct.role)
    }
}

fn compile(file: PolicyFile) -> Result<RoutePolicy, AccessError> {
    // Group routes by required role, merging patterns for same-role routes.
    let mut by_role: HashMap<Role, Vec<String>> = HashMap::new();

    for (route_name, route) in &file.routes {
        if route.patterns.is_empty() {
            return Err(AccessError::PolicyValidation(format!(
                "route '{route_name}': patterns must not be empty"
            )));
        }
        by_role
            .entry(route.role)
            .or_default()
            .extend(route.patterns.iter().cloned());
    }

    let mut tiers = Vec::new();
    for role in Role::ALL.into_iter().rev() {
        if let Some(patterns) = by_role.remove(&role) {
            let regex_set = regex::RegexSetBuilder::new(&patterns)
                .size_limit(1 << 20)
                .nest_limit(50)
                .case_insensitive(true)
                .build()
                .map_err(|e| AccessError::PolicyValidation(format!("role '{role}': {e}")))?;
            tiers.push(CompiledTier {
                role,
                patterns: regex_set,
            });
        }
    }

    Ok(RoutePolicy {
        route_count: file.routes.len(),
        tiers,
    })
}
