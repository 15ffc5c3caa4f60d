use leptos::prelude::*;

use crate::shared::api::ApiError;
use crate::shared::storage;
use crate::shared::toast::ToastService;
use crate::system::auth::session::Session;

const TUTORIAL_KEY: &str = "monarca_show_tutorial";

pub const APP_NAME: &str = "Monarca";

/// UI state shared by the shell and the pages
#[derive(Clone, Copy)]
pub struct AppState {
    pub page_title: RwSignal<String>,
    pub show_tutorial: RwSignal<bool>,
    pub left_open: RwSignal<bool>,
    pub toasts: ToastService,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            page_title: RwSignal::new(APP_NAME.to_string()),
            show_tutorial: RwSignal::new(storage::get_flag(TUTORIAL_KEY).unwrap_or(true)),
            left_open: RwSignal::new(true),
            toasts: ToastService::new(),
        }
    }

    pub fn set_page_title(&self, title: impl Into<String>) {
        let title = title.into();
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.set_title(&document_title(&title));
        }
        self.page_title.set(title);
    }

    pub fn toggle_tutorial(&self) {
        let next = !self.show_tutorial.get_untracked();
        self.show_tutorial.set(next);
        storage::set_flag(TUTORIAL_KEY, next);
    }

    pub fn dismiss_tutorial(&self) {
        self.show_tutorial.set(false);
        storage::set_flag(TUTORIAL_KEY, false);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|open| *open = !*open);
    }

    /// Error toast for a failed API call: "No se pudo {action}: {err}".
    /// A 401 also ends the session so the guards send the user to login.
    pub fn report_error(&self, session: Session, action: &str, err: &ApiError) {
        self.toasts.error(failure_message(action, err));
        session.expire_if_unauthorized(err);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn failure_message(action: &str, err: &ApiError) -> String {
    format!("No se pudo {}: {}", action, err)
}

fn document_title(page_title: &str) -> String {
    if page_title.is_empty() || page_title == APP_NAME {
        APP_NAME.to_string()
    } else {
        format!("{} | {}", page_title, APP_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message() {
        let err = ApiError::Status {
            status: 409,
            message: "La solicitud ya fue aprobada".into(),
        };
        assert_eq!(
            failure_message("aprobar la solicitud", &err),
            "No se pudo aprobar la solicitud: el servidor respondió 409: La solicitud ya fue aprobada"
        );
    }

    #[test]
    fn test_document_title() {
        assert_eq!(document_title("Mis solicitudes"), "Mis solicitudes | Monarca");
        assert_eq!(document_title(""), "Monarca");
    }
}
