//! Access decision for protected views.
//!
//! A pure decision table over the session state: nothing is cached, every
//! command re-evaluates against the latest store values.

use crate::session::{resolve_role, Role, SessionStore};

/// Where unauthenticated actors are sent.
pub const LOGIN_PATH: &str = "/auth/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// The session is still being restored; show a neutral wait state and
    /// make no redirect decision yet.
    Wait,
    /// Not authenticated: go to the login view.
    RedirectToLogin,
    /// Authenticated but the role is not allowed here: go to that role's
    /// own dashboard.
    Redirect(&'static str),
    /// Render the requested content.
    Allow,
}

/// Decide whether the current actor may see a view restricted to
/// `allowed_roles`. `None` means any authenticated role is fine.
pub fn evaluate(session: &SessionStore, allowed_roles: Option<&[Role]>) -> RouteDecision {
    if session.is_loading() {
        return RouteDecision::Wait;
    }

    let Some(user) = session.user() else {
        return RouteDecision::RedirectToLogin;
    };

    if let Some(allowed) = allowed_roles {
        let role = resolve_role(user);
        if !allowed.contains(&role) {
            return RouteDecision::Redirect(role.dashboard_path());
        }
    }

    RouteDecision::Allow
}
