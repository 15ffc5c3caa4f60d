//! Top bar: sidebar toggle, page title, tutorial toggle, user and logout.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::layout::app_state::{AppState, APP_NAME};
use crate::shared::icons::icon;
use crate::system::auth::session::Session;

#[component]
pub fn TopHeader(session: Session, app: AppState) -> impl IntoView {
    let navigate = use_navigate();
    let logging_out = RwSignal::new(false);

    let logout = move |_| {
        if logging_out.get_untracked() {
            return;
        }
        logging_out.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match session.handle_logout().await {
                Ok(()) => navigate("/", Default::default()),
                Err(err) => app.report_error(session, "cerrar la sesión", &err),
            }
            logging_out.set(false);
        });
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| app.toggle_left()
                    title=move || if app.left_open.get() { "Ocultar menú" } else { "Mostrar menú" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">{APP_NAME}</span>
                <span class="top-header__page-title">{move || app.page_title.get()}</span>
            </div>

            <div class="top-header__actions">
                <button
                    class="top-header__icon-btn"
                    class:top-header__icon-btn--active=move || app.show_tutorial.get()
                    on:click=move |_| app.toggle_tutorial()
                    title=move || if app.show_tutorial.get() { "Ocultar ayuda" } else { "Mostrar ayuda" }
                >
                    {icon("help")}
                </button>

                <div class="top-header__user">
                    {icon("user")}
                    <span>{move || session.user_name()}</span>
                </div>

                <button
                    class="top-header__icon-btn"
                    on:click=logout
                    disabled=move || logging_out.get()
                    title="Cerrar sesión"
                >
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
