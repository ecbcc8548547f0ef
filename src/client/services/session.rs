use std::sync::Arc;

use log::{info, warn};
use serde_json::Value;

use crate::client::models::types::{AuthResponse, User};
use crate::client::services::api_client::{ApiClient, ApiError};
use crate::client::utils::session_store::CredentialStore;

/// Current authenticated identity. The access token is also held here as a
/// read-only snapshot; the credential of record lives in the store and the
/// client's cookie jar.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i64,
    pub email: String,
    pub access_token: Option<String>,
}

/// `Unknown` holds until the startup session check settles; the GUI gates
/// rendering on it.
#[derive(Debug, Clone, Default)]
pub enum SessionPhase {
    #[default]
    Unknown,
    Anonymous,
    Authenticated(Session),
}

/// Owns the session lifecycle and is the sole writer of the credential
/// (store and client token cell alike). Auth failures never propagate as
/// raw errors into the view layer; callers get a `Result` and decide how
/// to display it.
pub struct SessionManager {
    api: Arc<ApiClient>,
    store: Box<dyn CredentialStore>,
    phase: SessionPhase,
}

impl SessionManager {
    pub fn new(api: Arc<ApiClient>, store: Box<dyn CredentialStore>) -> Self {
        Self {
            api,
            store,
            phase: SessionPhase::Unknown,
        }
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.phase, SessionPhase::Authenticated(_))
    }

    pub fn current_email(&self) -> Option<String> {
        match &self.phase {
            SessionPhase::Authenticated(s) => Some(s.email.clone()),
            _ => None,
        }
    }

    /// Startup "who am I" check. Attaches any persisted token, then asks
    /// the backend; any failure settles to `Anonymous`. Returns whether the
    /// session was restored.
    pub async fn restore(&mut self) -> bool {
        if let Some(token) = self.store.load() {
            self.api.set_token(&token);
        }
        match self.fetch_current_user().await {
            Ok(user) => {
                info!("session restored for {}", user.email);
                self.phase = SessionPhase::Authenticated(Session {
                    user_id: user.id,
                    email: user.email,
                    access_token: self.api.token(),
                });
                true
            }
            Err(err) => {
                if err.status != 0 {
                    info!("no active session ({})", err.status);
                } else {
                    warn!("session check failed: {}", err);
                }
                self.api.clear_token();
                self.phase = SessionPhase::Anonymous;
                false
            }
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response: AuthResponse = self.api.post_json("/auth/login", &body).await?;
        self.enter_authenticated(response);
        Ok(())
    }

    /// Same contract as login. The password/confirmation match is left to
    /// the form; only server-reported errors are surfaced here.
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "confirm_password": confirm_password,
        });
        let response: AuthResponse = self.api.post_json("/auth/register", &body).await?;
        self.enter_authenticated(response);
        Ok(())
    }

    /// Fail-safe: local credential state is cleared and the phase drops to
    /// `Anonymous` no matter what the logout call does.
    pub async fn logout(&mut self) {
        if let Err(err) = self.api.post_empty::<Value>("/auth/logout").await {
            warn!("logout call failed, clearing local session anyway: {}", err);
        }
        self.clear_credentials();
        self.phase = SessionPhase::Anonymous;
        info!("logged out");
    }

    /// Reaction to an auth-class error observed on any call while a session
    /// was believed active.
    pub fn handle_auth_loss(&mut self) {
        if self.is_authenticated() {
            warn!("authentication lost, dropping to anonymous");
            self.clear_credentials();
            self.phase = SessionPhase::Anonymous;
        }
    }

    fn enter_authenticated(&mut self, response: AuthResponse) {
        if let Some(token) = &response.access_token {
            self.api.set_token(token);
            if let Err(err) = self.store.save(token) {
                // non-fatal: the cookie jar still carries the session
                warn!("could not persist access token: {}", err);
            }
        }
        info!("authenticated as {}", response.user.email);
        self.phase = SessionPhase::Authenticated(Session {
            user_id: response.user.id,
            email: response.user.email,
            access_token: response.access_token,
        });
    }

    fn clear_credentials(&mut self) {
        self.api.clear_token();
        if let Err(err) = self.store.clear() {
            warn!("could not clear stored credential: {}", err);
        }
    }

    /// The backend returns the user object at the top level; older builds
    /// wrapped it in a `user` field. Accept both.
    async fn fetch_current_user(&self) -> Result<User, ApiError> {
        let value: Value = self.api.get("/auth/me").await?;
        let user_value = value.get("user").cloned().unwrap_or(value);
        serde_json::from_value(user_value).map_err(|e| ApiError {
            message: format!("failed to decode response body: {}", e),
            status: 0,
            payload: Value::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct MemoryStore {
        token: Mutex<Option<String>>,
    }

    impl CredentialStore for MemoryStore {
        fn save(&self, token: &str) -> anyhow::Result<()> {
            *self.token.lock().unwrap() = Some(token.to_string());
            Ok(())
        }
        fn load(&self) -> Option<String> {
            self.token.lock().unwrap().clone()
        }
        fn clear(&self) -> anyhow::Result<()> {
            *self.token.lock().unwrap() = None;
            Ok(())
        }
    }

    fn manager(base_url: &str) -> (SessionManager, Arc<ApiClient>) {
        let api = Arc::new(ApiClient::new(base_url, Duration::from_secs(5)).unwrap());
        let mgr = SessionManager::new(api.clone(), Box::<MemoryStore>::default());
        (mgr, api)
    }

    #[tokio::test]
    async fn starts_unknown() {
        let (mgr, _) = manager("http://127.0.0.1:9");
        assert!(matches!(mgr.phase(), SessionPhase::Unknown));
    }

    #[tokio::test]
    async fn login_success_authenticates_and_stores_token() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/auth/login")
            .with_status(200)
            .with_body(
                r#"{"access_token":"tok123","user":{"id":7,"email":"a@b.com","is_active":true}}"#,
            )
            .create_async()
            .await;

        let (mut mgr, api) = manager(&server.url());
        mgr.login("a@b.com", "pw").await.unwrap();

        assert!(mgr.is_authenticated());
        assert_eq!(mgr.current_email().as_deref(), Some("a@b.com"));
        assert_eq!(api.token().as_deref(), Some("tok123"));
        assert_eq!(mgr.store.load().as_deref(), Some("tok123"));
    }

    #[tokio::test]
    async fn login_failure_keeps_prior_state_and_returns_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/auth/login")
            .with_status(401)
            .with_body(r#"{"error":"Invalid credentials"}"#)
            .create_async()
            .await;

        let (mut mgr, api) = manager(&server.url());
        let err = mgr.login("a@b.com", "wrong").await.unwrap_err();
        assert_eq!(err.message, "Invalid credentials");
        assert_eq!(err.status, 401);
        assert!(matches!(mgr.phase(), SessionPhase::Unknown));
        assert!(api.token().is_none());
    }

    #[tokio::test]
    async fn register_uses_register_endpoint() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/auth/register")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"email":"n@b.com","confirm_password":"pw"}"#.to_string(),
            ))
            .with_status(200)
            .with_body(r#"{"access_token":"fresh","user":{"id":9,"email":"n@b.com"}}"#)
            .create_async()
            .await;

        let (mut mgr, _) = manager(&server.url());
        mgr.register("n@b.com", "pw", "pw").await.unwrap();
        assert!(mgr.is_authenticated());
        m.assert_async().await;
    }

    #[tokio::test]
    async fn restore_with_valid_token_authenticates() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/auth/me")
            .match_header("authorization", "Bearer saved")
            .with_status(200)
            .with_body(r#"{"id":3,"email":"c@d.com","is_active":true}"#)
            .create_async()
            .await;

        let (mut mgr, _) = manager(&server.url());
        mgr.store.save("saved").unwrap();
        assert!(mgr.restore().await);
        assert_eq!(mgr.current_email().as_deref(), Some("c@d.com"));
    }

    #[tokio::test]
    async fn restore_accepts_wrapped_user_shape() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/auth/me")
            .with_status(200)
            .with_body(r#"{"user":{"id":4,"email":"w@d.com"}}"#)
            .create_async()
            .await;

        let (mut mgr, _) = manager(&server.url());
        assert!(mgr.restore().await);
        assert_eq!(mgr.current_email().as_deref(), Some("w@d.com"));
    }

    #[tokio::test]
    async fn restore_failure_settles_anonymous() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/auth/me")
            .with_status(401)
            .with_body(r#"{"error":"Not authenticated"}"#)
            .create_async()
            .await;

        let (mut mgr, _) = manager(&server.url());
        assert!(!mgr.restore().await);
        assert!(matches!(mgr.phase(), SessionPhase::Anonymous));
    }

    #[tokio::test]
    async fn logout_is_fail_safe_on_transport_failure() {
        // nothing listens here: the logout call fails at transport level
        let (mut mgr, api) = manager("http://127.0.0.1:9");
        api.set_token("tok");
        mgr.store.save("tok").unwrap();
        mgr.phase = SessionPhase::Authenticated(Session {
            user_id: 1,
            email: "a@b.com".to_string(),
            access_token: Some("tok".to_string()),
        });

        mgr.logout().await;

        assert!(matches!(mgr.phase(), SessionPhase::Anonymous));
        assert!(api.token().is_none());
        assert!(mgr.store.load().is_none());
    }

    #[tokio::test]
    async fn auth_loss_clears_credentials() {
        let (mut mgr, api) = manager("http://127.0.0.1:9");
        api.set_token("tok");
        mgr.store.save("tok").unwrap();
        mgr.phase = SessionPhase::Authenticated(Session {
            user_id: 1,
            email: "a@b.com".to_string(),
            access_token: Some("tok".to_string()),
        });

        mgr.handle_auth_loss();

        assert!(matches!(mgr.phase(), SessionPhase::Anonymous));
        assert!(api.token().is_none());
        assert!(mgr.store.load().is_none());
    }
}
