use serde::{Deserialize, Serialize};

/// Permission names as issued by `/login/profile`
pub mod permissions {
    pub const CREATE_REQUEST: &str = "create_request";
    pub const VIEW_REQUESTS: &str = "view_requests";
    pub const APPROVE_REQUEST: &str = "approve_request";
    /// SOI: register spend and approve refunds
    pub const CHECK_BUDGETS: &str = "check_budgets";
    pub const UPLOAD_VOUCHERS: &str = "upload_vouchers";
    pub const ASSIGN_TRAVEL_AGENCY: &str = "assign_travel_agency";
    pub const VIEW_HISTORY: &str = "view_history";
}

pub const EMPTY_CREDENTIALS_MESSAGE: &str = "Por favor, completa todos los campos.";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Both fields are required; nothing is sent to the server otherwise
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(EMPTY_CREDENTIALS_MESSAGE);
        }
        Ok(())
    }
}

/// `POST /login` answer. The session cookie is the primary credential;
/// some deployments also hand out a bearer token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// How a list of required permissions is matched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PermissionMode {
    /// Every required permission must be held
    #[default]
    All,
    /// One of them is enough
    Any,
}

/// Outcome of checking a guarded route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Granted,
    /// Not logged in: send to the login page
    Unauthenticated,
    /// Logged in but lacking permissions: send to the unauthorized page
    Forbidden,
}

/// An empty requirement list is always satisfied
pub fn is_permitted<S: AsRef<str>>(held: &[S], required: &[&str], mode: PermissionMode) -> bool {
    if required.is_empty() {
        return true;
    }
    let holds = |p: &&str| held.iter().any(|h| h.as_ref() == *p);
    match mode {
        PermissionMode::All => required.iter().all(holds),
        PermissionMode::Any => required.iter().any(holds),
    }
}

pub fn route_access<S: AsRef<str>>(
    is_authenticated: bool,
    held: &[S],
    required: &[&str],
    mode: PermissionMode,
) -> RouteAccess {
    if !is_authenticated {
        RouteAccess::Unauthenticated
    } else if is_permitted(held, required, mode) {
        RouteAccess::Granted
    } else {
        RouteAccess::Forbidden
    }
}

#[cfg(test)]
mod tests {
    use super::permissions::*;
    use super::*;

    #[test]
    fn test_require_all_denies_partial_holder() {
        let held = vec![CREATE_REQUEST.to_string()];
        assert_eq!(
            route_access(true, &held, &[APPROVE_REQUEST], PermissionMode::All),
            RouteAccess::Forbidden
        );
    }

    #[test]
    fn test_any_mode() {
        let held = vec![CHECK_BUDGETS.to_string()];
        assert!(is_permitted(&held, &[APPROVE_REQUEST, CHECK_BUDGETS], PermissionMode::Any));
        assert!(!is_permitted(&held, &[APPROVE_REQUEST, CHECK_BUDGETS], PermissionMode::All));
    }

    #[test]
    fn test_unauthenticated_wins_over_permissions() {
        let held: Vec<String> = vec![];
        assert_eq!(
            route_access(false, &held, &[], PermissionMode::All),
            RouteAccess::Unauthenticated
        );
        assert_eq!(route_access(true, &held, &[], PermissionMode::All), RouteAccess::Granted);
    }

    #[test]
    fn test_login_requires_both_fields() {
        let empty = LoginRequest::default();
        assert_eq!(empty.validate(), Err(EMPTY_CREDENTIALS_MESSAGE));

        let no_password = LoginRequest {
            email: "ana@empresa.mx".into(),
            password: String::new(),
        };
        assert!(no_password.validate().is_err());

        let ok = LoginRequest {
            email: "ana@empresa.mx".into(),
            password: "secreto".into(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_profile_tolerates_missing_permissions() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"user_id": 4, "name": "Ana"}"#).unwrap();
        assert!(profile.permissions.is_empty());
        assert_eq!(profile.role, "");
    }
}
