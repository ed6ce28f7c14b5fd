use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AccessError;

/// Account roles ordered by privilege.
/// Variant order defines the `Ord` derivation: User < Moderator < Admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Moderator,
    Admin,
}

/// Rank of an absent or unrecognized role. Satisfies no requirement.
pub const NO_RANK: u8 = 0;

impl Role {
    /// Every role, lowest privilege first.
    pub const ALL: [Role; 3] = [Role::User, Role::Moderator, Role::Admin];

    pub const fn rank(self) -> u8 {
        match self {
            Role::User => 1,
            Role::Moderator => 2,
            Role::Admin => 3,
        }
    }

    /// Literal form used by session records and policy files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Moderator => "MODERATOR",
            Role::Admin => "ADMIN",
        }
    }

    /// Fail-closed lookup: anything but an exact role literal is `None`.
    pub fn from_token(token: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.as_str() == token)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    /// Strict parse for configuration and CLI input. The evaluator never uses this.
    fn from_str(s: &str) -> Result<Self, AccessError> {
        Role::from_token(s).ok_or_else(|| AccessError::UnknownRole(s.to_owned()))
    }
}

/// Anything a caller may hold as "the current role": a typed role, a raw
/// token from a session record, or nothing at all.
///
/// Resolution is total. Unrecognized strings resolve to `None`, the same as
/// an absent role. A bare `None` literal needs a type hint
/// (`None::<Role>`), since several `Option` types qualify.
pub trait RoleInput {
    fn resolve(self) -> Option<Role>;
}

impl RoleInput for Role {
    fn resolve(self) -> Option<Role> {
        Some(self)
    }
}

impl RoleInput for &Role {
    fn resolve(self) -> Option<Role> {
        Some(*self)
    }
}

impl RoleInput for Option<Role> {
    fn resolve(self) -> Option<Role> {
        self
    }
}

impl RoleInput for &Option<Role> {
    fn resolve(self) -> Option<Role> {
        *self
    }
}

impl RoleInput for Option<&Role> {
    fn resolve(self) -> Option<Role> {
        self.copied()
    }
}

impl RoleInput for &str {
    fn resolve(self) -> Option<Role> {
        Role::from_token(self)
    }
}

impl RoleInput for Option<&str> {
    fn resolve(self) -> Option<Role> {
        self.and_then(Role::from_token)
    }
}

impl RoleInput for String {
    fn resolve(self) -> Option<Role> {
        Role::from_token(&self)
    }
}

impl RoleInput for &String {
    fn resolve(self) -> Option<Role> {
        Role::from_token(self)
    }
}

impl RoleInput for Option<String> {
    fn resolve(self) -> Option<Role> {
        self.as_deref().and_then(Role::from_token)
    }
}

impl RoleInput for &Option<String> {
    fn resolve(self) -> Option<Role> {
        self.as_deref().and_then(Role::from_token)
    }
}

/// Numeric rank of `role`: USER=1, MODERATOR=2, ADMIN=3, anything else 0.
pub fn rank(role: impl RoleInput) -> u8 {
    role.resolve().map_or(NO_RANK, Role::rank)
}

/// True only for `Admin`.
pub fn is_admin(role: impl RoleInput) -> bool {
    role.resolve() == Some(Role::Admin)
}

/// True for `Moderator` and `Admin`.
pub fn is_moderator(role: impl RoleInput) -> bool {
    matches!(role.resolve(), Some(Role::Moderator | Role::Admin))
}

/// True iff `role` ranks at or above `required`. Absent roles never pass,
/// not even for `Role::User`.
pub fn has_role_or_higher(role: impl RoleInput, required: Role) -> bool {
    rank(role) >= required.rank()
}

pub fn has_admin_access(role: impl RoleInput) -> bool {
    is_admin(role)
}

pub fn has_moderator_access(role: impl RoleInput) -> bool {
    is_moderator(role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ordering() {
        assert!(Role::User < Role::Moderator);
        assert!(Role::Moderator < Role::Admin);
        assert!(Role::User < Role::Admin);
    }

    #[test]
    fn rank_table() {
        assert_eq!(rank(Role::User), 1);
        assert_eq!(rank(Role::Moderator), 2);
        assert_eq!(rank(Role::Admin), 3);
        assert_eq!(rank(None::<Role>), 0);
        assert_eq!(rank("bogus"), 0);
    }

    #[test]
    fn rank_agrees_with_ord() {
        for a in Role::ALL {
            for b in Role::ALL {
                assert_eq!(a.cmp(&b), a.rank().cmp(&b.rank()));
            }
        }
    }

    #[test]
    fn has_role_or_higher_is_reflexive() {
        for role in Role::ALL {
            assert!(has_role_or_higher(role, role), "{role} should satisfy itself");
        }
    }

    #[test]
    fn has_role_or_higher_is_monotonic() {
        for high in Role::ALL {
            for low in Role::ALL.into_iter().filter(|r| *r < high) {
                assert!(has_role_or_higher(high, low));
                assert!(!has_role_or_higher(low, high));
            }
        }
    }

    #[test]
    fn admin_satisfies_moderator() {
        assert!(has_role_or_higher("ADMIN", Role::Moderator));
    }

    #[test]
    fn user_does_not_satisfy_admin() {
        assert!(!has_role_or_higher("USER", Role::Admin));
    }

    #[test]
    fn absent_role_fails_lowest_tier() {
        assert!(!has_role_or_higher(None::<&str>, Role::User));
        assert!(!has_role_or_higher(None::<Role>, Role::User));
    }

    #[test]
    fn unrecognized_role_fails_lowest_tier() {
        assert!(!has_role_or_higher("bogus", Role::User));
        assert!(!has_role_or_higher(String::new(), Role::User));
    }

    #[test]
    fn is_admin_only_for_admin() {
        assert!(is_admin(Role::Admin));
        assert!(is_admin("ADMIN"));
        assert!(!is_admin("MODERATOR"));
        assert!(!is_admin("USER"));
        assert!(!is_admin(None::<Role>));
        assert!(!is_admin(None::<String>));
        assert!(!is_admin("admin"));
        assert!(!is_admin("ADMIN "));
    }

    #[test]
    fn is_moderator_includes_admin() {
        assert!(is_moderator("MODERATOR"));
        assert!(is_moderator("ADMIN"));
        assert!(!is_moderator("USER"));
        assert!(!is_moderator(None::<&str>));
        assert!(!is_moderator("superuser"));
    }

    #[test]
    fn aliases_match_predicates() {
        assert!(has_moderator_access(Role::Moderator));
        assert!(!has_admin_access(Some(Role::Moderator)));
        for role in Role::ALL {
            assert_eq!(has_admin_access(role), is_admin(role));
            assert_eq!(has_moderator_access(role), is_moderator(role));
        }
    }

    #[test]
    fn no_role_and_user_are_distinct_inputs() {
        let anonymous: Option<Role> = None;
        let user = Some(Role::User);
        assert_ne!(anonymous, user);
        assert!(has_role_or_higher(user, Role::User));
        assert!(!has_role_or_higher(anonymous, Role::User));
        assert!(!is_moderator(anonymous) && !is_moderator(user));
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        assert_eq!("MODERATOR".parse::<Role>().unwrap(), Role::Moderator);
        let err = "root".parse::<Role>().unwrap_err();
        assert!(matches!(err, AccessError::UnknownRole(ref s) if s == "root"));
    }

    #[test]
    fn serde_uses_upper_case_literals() {
        assert_eq!(serde_json::to_string(&Role::Moderator).unwrap(), "\"MODERATOR\"");
        let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}
