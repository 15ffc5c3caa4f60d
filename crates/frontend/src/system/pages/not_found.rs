use leptos::prelude::*;
use leptos_router::components::A;

use crate::layout::app_state::AppState;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_SYSTEM};

#[component]
pub fn NotFoundPage(app: AppState) -> impl IntoView {
    app.set_page_title("Página no encontrada");

    view! {
        <PageFrame page_id="sys_not_found--system" category=PAGE_CAT_SYSTEM>
            <div class="page__content page__content--center">
                <h1>"404"</h1>
                <p>"La página que buscas no existe."</p>
                <A href="/">"Ir al inicio"</A>
            </div>
        </PageFrame>
    }
}
