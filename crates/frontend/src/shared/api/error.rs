use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failure of a call to the Monarca API.
///
/// Messages are user-facing (Spanish); pages put them into toasts as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// HTTP 401
    #[error("tu sesión no es válida o ha expirado")]
    Unauthorized,
    /// Any other non-2xx answer
    #[error("el servidor respondió {status}: {message}")]
    Status { status: u16, message: String },
    /// The request left the browser but no response came back
    #[error("no hubo respuesta del servidor ({0})")]
    Network(String),
    /// The request could not be built or serialized
    #[error("no se pudo preparar la solicitud ({0})")]
    Request(String),
    /// The response body did not match the expected shape
    #[error("respuesta inesperada del servidor ({0})")]
    Decode(String),
}

impl ApiError {
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }
        let message = server_message(body).unwrap_or_else(|| "sin detalle".to_string());
        ApiError::Status { status, message }
    }

    /// Bucket used by the client's failure log
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::Unauthorized | ApiError::Status { .. } => "status",
            ApiError::Network(_) => "network",
            ApiError::Request(_) | ApiError::Decode(_) => "request",
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

const MAX_MESSAGE_LEN: usize = 200;

/// Human readable error text from an error body.
///
/// Understands `{"message": ".."}` and `{"error": ".."}`; a short plain-text
/// body is used verbatim.
pub fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        return ["message", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string);
    }
    if body.starts_with('<') || body.chars().count() > MAX_MESSAGE_LEN {
        return None;
    }
    Some(body.to_string())
}

/// Decode a successful response body. An empty body decodes as JSON `null`,
/// so endpoints without payload can be read as `()` or `Option<T>`.
pub fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_401_is_unauthorized() {
        let err = ApiError::from_status(401, r#"{"message":"expired"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.category(), "status");
    }

    #[test]
    fn test_status_message_from_body() {
        assert_eq!(
            ApiError::from_status(409, r#"{"message":"La solicitud ya fue aprobada"}"#),
            ApiError::Status {
                status: 409,
                message: "La solicitud ya fue aprobada".into()
            }
        );
        assert_eq!(
            ApiError::from_status(500, "<html>boom</html>"),
            ApiError::Status {
                status: 500,
                message: "sin detalle".into()
            }
        );
    }

    #[test]
    fn test_server_message_variants() {
        assert_eq!(server_message(r#"{"error":"forbidden"}"#), Some("forbidden".into()));
        assert_eq!(server_message(r#"{"code":3}"#), None);
        assert_eq!(server_message("Bad gateway"), Some("Bad gateway".into()));
        assert_eq!(server_message("   "), None);
    }

    #[test]
    fn test_decode_empty_body() {
        assert!(decode_body::<()>("").is_ok());
        let nothing: Option<Vec<i64>> = decode_body("  ").unwrap();
        assert_eq!(nothing, None);
        let list: Vec<i64> = decode_body("[1,2]").unwrap();
        assert_eq!(list, vec![1, 2]);
    }

    #[test]
    fn test_decode_error() {
        let result: Result<Vec<i64>, ApiError> = decode_body("{\"a\":1}");
        assert!(matches!(result, Err(ApiError::Decode(_))));
        assert_eq!(result.unwrap_err().category(), "request");
    }
}
