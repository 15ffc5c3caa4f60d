use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::layout::app_state::AppState;
use crate::routes::routes::AppRoutes;
use crate::shared::api::ApiClient;
use crate::shared::config::AppConfig;
use crate::shared::toast::ToastHost;
use crate::system::auth::session::Session;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();
    log::info!("api base: {}", config.api_base);

    let session = Session::new(ApiClient::new(config.api_base));
    let app = AppState::new();

    // an existing cookie/token may still be valid
    spawn_local(async move {
        let _ = session.load_profile().await;
    });

    view! {
        <AppRoutes session=session app=app />
        <ToastHost service=app.toasts />
    }
}
