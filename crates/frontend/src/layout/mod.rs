pub mod app_state;
pub mod left;
pub mod top_header;
pub mod tutorial;

use leptos::prelude::*;

use app_state::AppState;
use left::{sidebar::Sidebar, Left};
use top_header::TopHeader;
use tutorial::TutorialBanner;

use crate::system::auth::session::Session;

/// Frame around every signed-in page.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                   |
/// +------------------------------------------+
/// |  Sidebar  |  TutorialBanner              |
/// |           |  page                        |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(session: Session, app: AppState, children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <TopHeader session=session app=app />
            <div class="app-body">
                <Left app=app>
                    <Sidebar session=session />
                </Left>
                <div class="app-main" data-zone="center">
                    <TutorialBanner app=app />
                    {children()}
                </div>
            </div>
        </div>
    }
}
