//! Permission-filtered navigation.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::routes::menu::{visible_mosaics, Mosaic};
use crate::shared::icons::icon;
use crate::system::auth::session::Session;

const DASHBOARD: Mosaic = Mosaic {
    path: "/dashboard",
    title: "Inicio",
    description: "",
    icon: "grid",
    permissions: &[],
};

/// `/requests/12` belongs to `/requests`, `/requests/new` only to itself
fn is_active(current: &str, item: &str) -> bool {
    current == item
        || (item == "/requests"
            && current.starts_with("/requests/")
            && current != "/requests/new")
}

#[component]
pub fn Sidebar(session: Session) -> impl IntoView {
    let location = use_location();
    let items = Memo::new(move |_| {
        let mut items = vec![DASHBOARD];
        items.extend(visible_mosaics(&session.permissions()));
        items
    });

    view! {
        <nav class="app-sidebar__content">
            <For
                each=move || items.get()
                key=|item| item.path
                children=move |item| {
                    view! {
                        <A href=item.path>
                            <div
                                class="app-sidebar__item"
                                class:app-sidebar__item--active=move || {
                                    location.pathname.with(|p| is_active(p, item.path))
                                }
                            >
                                <div class="app-sidebar__item-content">
                                    {icon(item.icon)}
                                    <span>{item.title}</span>
                                </div>
                            </div>
                        </A>
                    }
                }
            />
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_active() {
        assert!(is_active("/requests", "/requests"));
        assert!(is_active("/requests/12", "/requests"));
        assert!(!is_active("/requests/new", "/requests"));
        assert!(is_active("/requests/new", "/requests/new"));
        assert!(!is_active("/history", "/requests"));
    }
}
