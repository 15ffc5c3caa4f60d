pub mod sidebar;

use leptos::prelude::*;

use crate::layout::app_state::AppState;

#[component]
pub fn Left(app: AppState, children: Children) -> impl IntoView {
    view! {
        <div data-zone="left" class="left" class:hidden=move || !app.left_open.get()>
            {children()}
        </div>
    }
}
