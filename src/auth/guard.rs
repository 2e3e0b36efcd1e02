//! Access guards
//!
//! `route_decision` is the gate every protected command consults after the
//! session bootstrap. `edge_check` runs before dispatch, with nothing but
//! the stored token to look at.

use crate::auth::claims;
use crate::auth::store::TokenStore;

/// What a protected surface should do for the current session flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Bootstrap still running: show progress, never deny
    Wait,
    /// No administrator session: refuse and point at login
    Deny,
    /// Administrator session active
    Allow,
}

/// Decide what to do with a protected surface
///
/// While the session is still resolving the answer is always `Wait`,
/// whatever the authentication flag says.
pub fn route_decision(is_loading: bool, is_authenticated: bool) -> GuardDecision {
    if is_loading {
        GuardDecision::Wait
    } else if is_authenticated {
        GuardDecision::Allow
    } else {
        GuardDecision::Deny
    }
}

/// Inverse guard for the login surface: true when an already signed-in
/// user should be sent straight to the catalog
pub fn login_redirect(is_loading: bool, is_authenticated: bool) -> bool {
    !is_loading && is_authenticated
}

/// Cheap pre-dispatch check: a token exists and has the JWT shape
///
/// No decoding and no network. Anything subtler than a missing or
/// malformed token is the validation endpoint's job.
pub fn edge_check(store: &TokenStore) -> bool {
    match store.load() {
        Some(token) => claims::has_jwt_shape(&token),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_always_waits() {
        assert_eq!(route_decision(true, false), GuardDecision::Wait);
        assert_eq!(route_decision(true, true), GuardDecision::Wait);
    }

    #[test]
    fn test_settled_states() {
        assert_eq!(route_decision(false, true), GuardDecision::Allow);
        assert_eq!(route_decision(false, false), GuardDecision::Deny);
    }

    #[test]
    fn test_login_redirect_waits_for_bootstrap() {
        assert!(!login_redirect(true, true));
        assert!(!login_redirect(true, false));
        assert!(login_redirect(false, true));
        assert!(!login_redirect(false, false));
    }

    #[test]
    fn test_edge_check_needs_a_shaped_token() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().join("token"), dir.path().join("mirror"));

        assert!(!edge_check(&store));

        store.save("only.two").unwrap();
        assert!(!edge_check(&store));

        store.save("a.b.c").unwrap();
        assert!(edge_check(&store));
    }
}
