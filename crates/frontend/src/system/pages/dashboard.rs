use leptos::prelude::*;
use leptos_router::components::A;

use crate::layout::app_state::AppState;
use crate::routes::menu::visible_mosaics;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};
use crate::system::auth::session::Session;

/// Landing page: one tile per screen the user may open
#[component]
pub fn DashboardPage(session: Session, app: AppState) -> impl IntoView {
    app.set_page_title("Inicio");
    let mosaics = Memo::new(move |_| visible_mosaics(&session.permissions()));

    view! {
        <PageFrame page_id="sys_dashboard--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <h1>{move || format!("Hola, {}", session.user_name())}</h1>
                <span class="page__subtitle">{move || session.role()}</span>
            </div>
            <div class="page__content mosaic-grid">
                <For
                    each=move || mosaics.get()
                    key=|m| m.path
                    children=|m| {
                        view! {
                            <A href=m.path>
                                <div class="mosaic">
                                    <div class="mosaic__icon">{icon(m.icon)}</div>
                                    <div class="mosaic__title">{m.title}</div>
                                    <div class="mosaic__description">{m.description}</div>
                                </div>
                            </A>
                        }
                    }
                />
                <Show when=move || mosaics.with(Vec::is_empty)>
                    <p class="mosaic-grid__empty">
                        "Tu perfil no tiene opciones asignadas. Contacta a tu administrador."
                    </p>
                </Show>
            </div>
        </PageFrame>
    }
}
