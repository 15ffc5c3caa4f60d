use contracts::system::auth::LoginRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;
use thaw::*;

use crate::layout::app_state::{AppState, APP_NAME};
use crate::system::auth::session::{AuthStatus, Session};

#[component]
pub fn LoginPage(session: Session, app: AppState) -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error_message = RwSignal::new(Option::<String>::None);
    let is_loading = RwSignal::new(false);

    app.set_page_title("Iniciar sesión");

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let request = LoginRequest {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        if let Err(message) = request.validate() {
            error_message.set(Some(message.to_string()));
            return;
        }

        is_loading.set(true);
        error_message.set(None);
        spawn_local(async move {
            match session.login(request).await {
                Ok(profile) => app.toasts.success(format!("Bienvenido, {}", profile.name)),
                Err(message) => error_message.set(Some(message)),
            }
            is_loading.set(false);
        });
    };

    view! {
        <Show when=move || session.status() != AuthStatus::Authenticated fallback=|| view! { <Redirect path="/dashboard" /> }>
            <div class="login-container">
                <div class="login-box">
                    <h1>{APP_NAME}</h1>
                    <h2>"Solicitudes de viaje"</h2>

                    <Show when=move || error_message.get().is_some()>
                        <MessageBar intent=MessageBarIntent::Error>
                            {move || error_message.get().unwrap_or_default()}
                        </MessageBar>
                    </Show>

                    <form on:submit=on_submit novalidate>
                        <div class="form-group">
                            <label for="email">"Correo electrónico"</label>
                            <input
                                type="email"
                                id="email"
                                placeholder="nombre@empresa.com"
                                prop:value=move || email.get()
                                on:input=move |ev| email.set(event_target_value(&ev))
                                disabled=move || is_loading.get()
                            />
                        </div>

                        <div class="form-group">
                            <label for="password">"Contraseña"</label>
                            <input
                                type="password"
                                id="password"
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                                disabled=move || is_loading.get()
                            />
                        </div>

                        <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                            {move || if is_loading.get() { "Entrando..." } else { "Iniciar sesión" }}
                        </button>
                    </form>
                </div>
            </div>
        </Show>
    }
}
