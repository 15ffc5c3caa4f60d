use leptos::prelude::*;
use leptos_router::components::A;

use crate::layout::app_state::AppState;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_SYSTEM};

#[component]
pub fn UnauthorizedPage(app: AppState) -> impl IntoView {
    app.set_page_title("Acceso denegado");

    view! {
        <PageFrame page_id="sys_unauthorized--system" category=PAGE_CAT_SYSTEM>
            <div class="page__content page__content--center">
                {icon("alert")}
                <h1>"Acceso denegado"</h1>
                <p>"Tu perfil no tiene permiso para ver esta página."</p>
                <A href="/dashboard">"Volver al inicio"</A>
            </div>
        </PageFrame>
    }
}
