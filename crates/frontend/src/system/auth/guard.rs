use contracts::system::auth::{PermissionMode, RouteAccess};
use leptos::prelude::*;
use leptos_router::components::Redirect;
use thaw::*;

use super::session::Session;

pub const LOGIN_PATH: &str = "/";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Renders `children` only for a logged-in user holding `permissions`.
///
/// Anonymous users go to the login page, users lacking a permission to
/// `/unauthorized`. A spinner is shown until the session check settles.
#[component]
pub fn RequirePermissions(
    session: Session,
    /// Empty: any authenticated user
    #[prop(optional)]
    permissions: Vec<&'static str>,
    #[prop(optional)] mode: PermissionMode,
    children: ChildrenFn,
) -> impl IntoView {
    let verdict = Memo::new(move |_| session.access(&permissions, mode));

    move || match verdict.get() {
        None => view! {
            <div class="page-loading">
                <Spinner />
                <span>"Verificando sesión..."</span>
            </div>
        }
        .into_any(),
        Some(RouteAccess::Granted) => children().into_any(),
        Some(RouteAccess::Unauthenticated) => view! { <Redirect path=LOGIN_PATH /> }.into_any(),
        Some(RouteAccess::Forbidden) => view! { <Redirect path=UNAUTHORIZED_PATH /> }.into_any(),
    }
}
