//! Who is logged in and what they may do.
//!
//! `Session` is created once in `App` and handed to the shell, the route
//! guards and every page as a prop. It is a pair of signal handles, so
//! copying it is free and every copy sees the same state.

use contracts::system::auth::{
    is_permitted, route_access, LoginRequest, PermissionMode, RouteAccess, UserProfile,
};
use leptos::prelude::*;

use super::{api, storage};
use crate::shared::api::{ApiClient, ApiError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthStatus {
    /// First `/login/profile` call still in flight
    #[default]
    Checking,
    Authenticated,
    Anonymous,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub status: AuthStatus,
    pub profile: Option<UserProfile>,
}

impl SessionState {
    pub fn authenticated(profile: UserProfile) -> Self {
        Self {
            status: AuthStatus::Authenticated,
            profile: Some(profile),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            status: AuthStatus::Anonymous,
            profile: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }

    pub fn permissions(&self) -> &[String] {
        self.profile
            .as_ref()
            .map(|p| p.permissions.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_permissions(&self, required: &[&str], mode: PermissionMode) -> bool {
        self.is_authenticated() && is_permitted(self.permissions(), required, mode)
    }

    /// `None` while the session is still being checked
    pub fn access(&self, required: &[&str], mode: PermissionMode) -> Option<RouteAccess> {
        match self.status {
            AuthStatus::Checking => None,
            _ => Some(route_access(
                self.is_authenticated(),
                self.permissions(),
                required,
                mode,
            )),
        }
    }
}

#[derive(Clone, Copy)]
pub struct Session {
    state: RwSignal<SessionState>,
    api: StoredValue<ApiClient>,
}

impl Session {
    pub fn new(api: ApiClient) -> Self {
        Self {
            state: RwSignal::new(SessionState::default()),
            api: StoredValue::new(api),
        }
    }

    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    pub fn status(&self) -> AuthStatus {
        self.state.with(|s| s.status)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(SessionState::is_authenticated)
    }

    pub fn user_name(&self) -> String {
        self.state
            .with(|s| s.profile.as_ref().map(|p| p.name.clone()))
            .unwrap_or_default()
    }

    pub fn role(&self) -> String {
        self.state
            .with(|s| s.profile.as_ref().map(|p| p.role.clone()))
            .unwrap_or_default()
    }

    pub fn permissions(&self) -> Vec<String> {
        self.state.with(|s| s.permissions().to_vec())
    }

    /// Reactive: re-evaluated when the profile changes
    pub fn has_permissions(&self, required: &[&str], mode: PermissionMode) -> bool {
        self.state.with(|s| s.has_permissions(required, mode))
    }

    pub fn access(&self, required: &[&str], mode: PermissionMode) -> Option<RouteAccess> {
        self.state.with(|s| s.access(required, mode))
    }

    /// Ask the API who we are. Any failure leaves the session anonymous.
    pub async fn load_profile(&self) -> Result<UserProfile, ApiError> {
        match api::fetch_profile(&self.api()).await {
            Ok(profile) => {
                log::info!("session: {}", profile_summary(&profile));
                self.state.set(SessionState::authenticated(profile.clone()));
                Ok(profile)
            }
            Err(err) => {
                log::info!("session: no active session ({})", err.category());
                self.state.set(SessionState::anonymous());
                Err(err)
            }
        }
    }

    /// Validate locally, `POST /login`, then load the profile.
    ///
    /// Blank credentials never reach the network. The error is the message to
    /// show under the form.
    pub async fn login(&self, request: LoginRequest) -> Result<UserProfile, String> {
        request.validate().map_err(str::to_string)?;

        let response = api::login(&self.api(), &request)
            .await
            .map_err(|err| login_error_message(&err))?;
        if let Some(token) = response.token.as_deref().filter(|t| !t.is_empty()) {
            storage::save_access_token(token);
        }
        let profile = self
            .load_profile()
            .await
            .map_err(|err| format!("No se pudo cargar tu perfil: {}", err))?;
        log::info!("login accepted for user #{}", profile.user_id);
        Ok(profile)
    }

    /// `POST /login/logout`; on success the session is reset and the stored
    /// token removed. On failure nothing changes.
    pub async fn handle_logout(&self) -> Result<(), ApiError> {
        api::logout(&self.api()).await?;
        storage::clear_tokens();
        self.state.set(SessionState::anonymous());
        log::info!("logged out");
        Ok(())
    }

    /// Drop the session after the API rejected our credentials mid-use.
    /// Guards then redirect to the login page.
    pub fn expire_if_unauthorized(&self, err: &ApiError) {
        if err.is_unauthorized() && self.state.with_untracked(SessionState::is_authenticated) {
            log::warn!("session expired");
            storage::clear_tokens();
            self.state.set(SessionState::anonymous());
        }
    }
}

/// Console line for a loaded profile. Ids only, no name or email.
fn profile_summary(profile: &UserProfile) -> String {
    format!(
        "user #{} ({}) with {} permission(s)",
        profile.user_id,
        profile.role,
        profile.permissions.len()
    )
}

fn login_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Unauthorized | ApiError::Status { status: 400..=403, .. } => {
            "Correo o contraseña incorrectos.".to_string()
        }
        other => format!("No se pudo iniciar sesión: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::auth::permissions::*;

    fn profile(permissions: &[&str]) -> UserProfile {
        UserProfile {
            user_id: 7,
            name: "Ana López".into(),
            role: "approver".into(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_profile_summary_omits_personal_data() {
        let line = profile_summary(&profile(&[CREATE_REQUEST, VIEW_REQUESTS]));
        assert_eq!(line, "user #7 (approver) with 2 permission(s)");
        assert!(!line.contains("Ana"));
    }

    #[test]
    fn test_checking_has_no_verdict() {
        let state = SessionState::default();
        assert_eq!(state.status, AuthStatus::Checking);
        assert_eq!(state.access(&[VIEW_REQUESTS], PermissionMode::All), None);
        assert!(!state.has_permissions(&[], PermissionMode::All));
    }

    #[test]
    fn test_access_verdicts() {
        let state = SessionState::authenticated(profile(&[CREATE_REQUEST]));
        assert_eq!(
            state.access(&[APPROVE_REQUEST], PermissionMode::All),
            Some(RouteAccess::Forbidden)
        );
        assert_eq!(
            state.access(&[CREATE_REQUEST], PermissionMode::All),
            Some(RouteAccess::Granted)
        );
        assert_eq!(
            SessionState::anonymous().access(&[], PermissionMode::All),
            Some(RouteAccess::Unauthenticated)
        );
    }

    #[test]
    fn test_has_permissions_any() {
        let state = SessionState::authenticated(profile(&[CHECK_BUDGETS]));
        assert!(state.has_permissions(&[APPROVE_REQUEST, CHECK_BUDGETS], PermissionMode::Any));
        assert!(!state.has_permissions(&[APPROVE_REQUEST, CHECK_BUDGETS], PermissionMode::All));
    }

    #[test]
    fn test_login_error_message() {
        assert_eq!(
            login_error_message(&ApiError::Unauthorized),
            "Correo o contraseña incorrectos."
        );
        let msg = login_error_message(&ApiError::Network("timeout".into()));
        assert!(msg.starts_with("No se pudo iniciar sesión"));
    }
}
