use super::role::Role;

/// Unforgeable access grant. Proof that a request passed the route policy.
///
/// Construction is double-locked:
/// 1. `Seal` is a private type, so struct literals fail outside this file.
/// 2. `new()` is `pub(super)`, so only `access/` can mint grants.
///
/// No `Clone`, `Copy`, `Default`, or `From`. A grant is consumed on use.
///
/// ```compile_fail
/// use carta_access::access::grant::AccessGrant;
/// use carta_access::Role;
///
/// let _grant = AccessGrant::new(Some(Role::Admin));
/// ```
pub struct AccessGrant {
    tier: Option<Role>,
    _seal: Seal,
}

struct Seal;

impl AccessGrant {
    pub(super) fn new(tier: Option<Role>) -> Self {
        Self { tier, _seal: Seal }
    }

    /// Role the route required. `None` for public routes.
    pub fn tier(&self) -> Option<Role> {
        self.tier
    }
}

impl std::fmt::Debug for AccessGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGrant").field("tier", &self.tier).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_carries_tier() {
        assert_eq!(AccessGrant::new(None).tier(), None);
        for role in Role::ALL {
            assert_eq!(AccessGrant::new(Some(role)).tier(), Some(role));
        }
    }

    #[test]
    fn grant_is_consumed() {
        let grant = AccessGrant::new(Some(Role::Admin));
        let _tier = consume(grant);
        // `grant` has moved; using it again would not compile.
    }

    fn consume(grant: AccessGrant) -> Option<Role> {
        grant.tier
    }
}
