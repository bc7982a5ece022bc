//! Session lifecycle: who is the current actor, and are they authenticated.
//!
//! [`SessionStore`] is the only owner of the current user and of the token
//! lifecycle. Role resolution lives here too, so every consumer (the route
//! guard, post-login redirects, the CLI banner) derives the role the same
//! way instead of re-reading raw fields.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::api::types::{LoginRequest, RegisterRequest, User};
use crate::api::{ApiError, Gateway};

/// Retries after the first failed restoration attempt (3 attempts total).
const RESTORE_RETRIES: u32 = 2;

/// Base delay for restoration backoff: 1s, then 2s.
const RESTORE_BACKOFF_BASE: Duration = Duration::from_secs(1);

/// The closed set of roles the storefront knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Admin,
    Warehouse,
    Staff,
}

impl Role {
    /// Parse an explicit role field. Anything unrecognized is `None`; the
    /// caller decides the fallback.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "customer" => Some(Role::Customer),
            "admin" => Some(Role::Admin),
            "warehouse" => Some(Role::Warehouse),
            "staff" => Some(Role::Staff),
            _ => None,
        }
    }

    /// Legacy numeric role identifiers still sent by older deployments.
    pub fn from_legacy_id(id: i64) -> Role {
        match id {
            1 => Role::Admin,
            2 => Role::Staff,
            3 => Role::Customer,
            4 => Role::Warehouse,
            _ => Role::Customer,
        }
    }

    /// The role's own default dashboard path, used both by the route guard
    /// and for post-login navigation.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Customer => "/customer/dashboard",
            Role::Admin => "/admin/dashboard",
            Role::Warehouse => "/warehouse/dashboard",
            Role::Staff => "/staff/dashboard",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
            Role::Warehouse => "warehouse",
            Role::Staff => "staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single authoritative role derivation: explicit field when present
/// and recognized, else the legacy numeric mapping, else customer.
pub fn resolve_role(user: &User) -> Role {
    if let Some(role) = user.role.as_deref() {
        if let Some(role) = Role::parse(role) {
            return role;
        }
        debug!(role, "Unrecognized role field, falling back");
        return Role::Customer;
    }
    user.role_id.map(Role::from_legacy_id).unwrap_or(Role::Customer)
}

/// Pure backoff schedule for session restoration: `base << attempt`.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base * 2u32.pow(attempt)
}

pub struct SessionStore {
    gateway: Arc<dyn Gateway>,
    user: Option<User>,
    // Shared so observers (a status line, tests) can watch it while an
    // async restore is in flight.
    loading: Arc<AtomicBool>,
    backoff_base: Duration,
}

impl SessionStore {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            user: None,
            loading: Arc::new(AtomicBool::new(true)),
            backoff_base: RESTORE_BACKOFF_BASE,
        }
    }

    /// Shrink the retry backoff (tests).
    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    pub(crate) fn loading_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.loading)
    }

    /// Resolved role of the current user; `None` means guest.
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(resolve_role)
    }

    /// Role name for display, `"guest"` when unauthenticated.
    pub fn role_name(&self) -> &'static str {
        self.role().map(|r| r.as_str()).unwrap_or("guest")
    }

    /// Attempt to re-establish a session from the persisted token.
    ///
    /// Transport failures are retried up to [`RESTORE_RETRIES`] times with
    /// exponential backoff; any other failure clears the token immediately.
    /// The loading flag drops as soon as the first attempt resolves, so
    /// retries happen without re-entering the loading state. Never fails:
    /// the outcome is only the resulting authenticated/unauthenticated state.
    pub async fn restore(&mut self) {
        let Some(token) = self.gateway.stored_token() else {
            self.loading.store(false, Ordering::SeqCst);
            return;
        };

        self.gateway.set_token(&token);

        for attempt in 0..=RESTORE_RETRIES {
            let result = self.gateway.get_user().await;
            if attempt == 0 {
                self.loading.store(false, Ordering::SeqCst);
            }
            match result {
                Ok(user) => {
                    debug!(user = %user.email, "Session restored");
                    self.user = Some(user);
                    return;
                }
                Err(e) if e.is_network() && attempt < RESTORE_RETRIES => {
                    let delay = backoff_delay(self.backoff_base, attempt);
                    warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "Session restore hit a network error, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    warn!(error = %e, "Session restore failed, clearing stored token");
                    break;
                }
            }
        }

        self.gateway.clear_token();
        self.user = None;
    }

    /// Authenticate with credentials. On failure the error is propagated so
    /// the caller can keep its prompt open; `ApiError::user_message` carries
    /// the server's message when one was given.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, ApiError> {
        self.loading.store(true, Ordering::SeqCst);
        let result = self
            .gateway
            .login(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await;
        self.loading.store(false, Ordering::SeqCst);

        match result {
            Ok(auth) => {
                self.gateway.set_token(&auth.token);
                info!(user = %auth.user.name, "Logged in");
                self.user = Some(auth.user.clone());
                Ok(auth.user)
            }
            Err(e) => {
                warn!(error = %e, "Login failed");
                Err(e)
            }
        }
    }

    /// Create an account and log straight in. The confirmation password is
    /// implicitly the same password.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<User, ApiError> {
        self.loading.store(true, Ordering::SeqCst);
        let result = self
            .gateway
            .register(&RegisterRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                password_confirmation: password.to_string(),
                role: role.map(str::to_string),
            })
            .await;
        self.loading.store(false, Ordering::SeqCst);

        match result {
            Ok(auth) => {
                self.gateway.set_token(&auth.token);
                info!(user = %auth.user.name, "Account created");
                self.user = Some(auth.user.clone());
                Ok(auth.user)
            }
            Err(e) => {
                warn!(error = %e, "Registration failed");
                Err(e)
            }
        }
    }

    /// End the session. The server call is best-effort; local state is
    /// cleared no matter what, so logout never fails.
    pub async fn logout(&mut self) {
        if let Err(e) = self.gateway.logout().await {
            debug!(error = %e, "Server-side logout failed, clearing local session anyway");
        }
        self.gateway.clear_token();
        self.user = None;
        info!("Logged out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{
        network, test_auth_response, test_user, MockGateway, ProfileScript,
    };
    use std::sync::atomic::Ordering;

    fn store(gateway: MockGateway) -> (Arc<MockGateway>, SessionStore) {
        let gateway = Arc::new(gateway);
        let session = SessionStore::new(gateway.clone() as Arc<dyn Gateway>)
            .with_backoff_base(Duration::from_millis(1));
        (gateway, session)
    }

    #[test]
    fn test_role_legacy_id_mapping() {
        assert_eq!(Role::from_legacy_id(1), Role::Admin);
        assert_eq!(Role::from_legacy_id(2), Role::Staff);
        assert_eq!(Role::from_legacy_id(3), Role::Customer);
        assert_eq!(Role::from_legacy_id(4), Role::Warehouse);
        assert_eq!(Role::from_legacy_id(99), Role::Customer);
    }

    #[test]
    fn test_resolve_role_explicit_field_wins() {
        let user = test_user(Some("warehouse"), Some(1));
        assert_eq!(resolve_role(&user), Role::Warehouse);
    }

    #[test]
    fn test_resolve_role_falls_back_to_legacy_id() {
        assert_eq!(resolve_role(&test_user(None, Some(2))), Role::Staff);
        assert_eq!(resolve_role(&test_user(None, Some(9))), Role::Customer);
        assert_eq!(resolve_role(&test_user(None, None)), Role::Customer);
    }

    #[test]
    fn test_resolve_role_unrecognized_field_defaults_to_customer() {
        assert_eq!(resolve_role(&test_user(Some("superuser"), None)), Role::Customer);
    }

    #[test]
    fn test_backoff_schedule() {
        let base = Duration::from_secs(1);
        assert_eq!(backoff_delay(base, 0), Duration::from_secs(1));
        assert_eq!(backoff_delay(base, 1), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_restore_without_token_makes_no_calls() {
        let (gateway, mut session) = store(MockGateway::new());
        assert!(session.is_loading());

        session.restore().await;

        assert!(!session.is_loading());
        assert!(!session.is_authenticated());
        assert_eq!(session.role_name(), "guest");
        assert_eq!(gateway.get_user_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_restore_success() {
        let (_, mut session) = store(
            MockGateway::new()
                .with_stored_token("tok-old")
                .with_profile(ProfileScript::User(test_user(Some("admin"), None))),
        );

        session.restore().await;

        assert!(session.is_authenticated());
        assert!(!session.is_loading());
        assert_eq!(session.role(), Some(Role::Admin));
    }

    #[tokio::test]
    async fn test_restore_retries_network_failures_three_times_then_clears() {
        let (gateway, mut session) = store(
            MockGateway::new()
                .with_stored_token("tok-old")
                .with_profile(ProfileScript::NetworkError),
        );
        *gateway.loading_probe.lock() = Some(session.loading_handle());

        session.restore().await;

        assert_eq!(gateway.get_user_calls.load(Ordering::SeqCst), 3);
        // Loading drops once the first attempt resolves; the retries run
        // with it already down.
        assert_eq!(*gateway.loading_seen.lock(), vec![true, false, false]);
        assert!(!session.is_loading());
        assert!(!session.is_authenticated());
        assert_eq!(gateway.stored_token(), None);
        assert_eq!(*gateway.active.lock(), None);
    }

    #[tokio::test]
    async fn test_restore_rejection_clears_immediately_without_retry() {
        let (gateway, mut session) = store(
            MockGateway::new()
                .with_stored_token("tok-expired")
                .with_profile(ProfileScript::Rejected),
        );

        session.restore().await;

        assert_eq!(gateway.get_user_calls.load(Ordering::SeqCst), 1);
        assert!(!session.is_loading());
        assert!(!session.is_authenticated());
        assert_eq!(gateway.stored_token(), None);
    }

    #[tokio::test]
    async fn test_login_persists_token_and_sets_user() {
        let gateway = MockGateway::new();
        *gateway.login_response.lock() =
            Some(Ok(test_auth_response(test_user(None, Some(4)))));
        let (gateway, mut session) = store(gateway);

        let user = session.login("test@example.com", "secret").await.unwrap();

        assert!(session.is_authenticated());
        assert!(!session.is_loading());
        assert_eq!(user.role_id, Some(4));
        assert_eq!(gateway.stored_token(), Some("tok-fresh".to_string()));
        // Post-login navigation target for a legacy warehouse account
        assert_eq!(session.role(), Some(Role::Warehouse));
        assert_eq!(session.role().unwrap().dashboard_path(), "/warehouse/dashboard");
    }

    #[tokio::test]
    async fn test_login_failure_propagates_server_message() {
        let (gateway, mut session) = store(MockGateway::new());

        let err = session.login("test@example.com", "wrong").await.unwrap_err();

        assert_eq!(
            err.user_message("Please check your credentials"),
            "Invalid credentials"
        );
        assert!(!session.is_authenticated());
        assert_eq!(gateway.stored_token(), None);
    }

    #[tokio::test]
    async fn test_register_logs_straight_in() {
        let gateway = MockGateway::new();
        *gateway.register_response.lock() =
            Some(Ok(test_auth_response(test_user(Some("customer"), None))));
        let (gateway, mut session) = store(gateway);

        session
            .register("Ada", "ada@example.com", "secret", None)
            .await
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(gateway.stored_token(), Some("tok-fresh".to_string()));
    }

    #[tokio::test]
    async fn test_logout_swallows_server_errors() {
        let gateway = MockGateway::new()
            .with_stored_token("tok")
            .with_profile(ProfileScript::User(test_user(Some("staff"), None)));
        *gateway.logout_error.lock() = Some(network());
        let (gateway, mut session) = store(gateway);
        session.restore().await;
        assert!(session.is_authenticated());

        session.logout().await;

        assert!(!session.is_authenticated());
        assert_eq!(gateway.stored_token(), None);
    }

    #[tokio::test]
    async fn test_logout_when_already_logged_out_is_a_no_op() {
        let (_, mut session) = store(MockGateway::new());
        session.restore().await;

        session.logout().await;

        assert!(!session.is_authenticated());
    }
}
