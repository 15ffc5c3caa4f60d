use contracts::system::auth::PermissionMode;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::domain::a001_travel_request::ui::approvals::ApprovalsPage;
use crate::domain::a001_travel_request::ui::details::RequestDetailsPage;
use crate::domain::a001_travel_request::ui::form::RequestFormPage;
use crate::domain::a001_travel_request::ui::history::HistoryPage;
use crate::domain::a001_travel_request::ui::list::MyRequestsPage;
use crate::domain::a001_travel_request::ui::refunds::RefundsPage;
use crate::domain::a002_voucher::ui::upload::VoucherUploadPage;
use crate::domain::a003_travel_agency::ui::bookings::BookingsPage;
use crate::layout::app_state::AppState;
use crate::layout::Shell;
use crate::system::auth::guard::RequirePermissions;
use crate::system::auth::session::Session;
use crate::system::pages::dashboard::DashboardPage;
use crate::system::pages::login::LoginPage;
use crate::system::pages::not_found::NotFoundPage;
use crate::system::pages::unauthorized::UnauthorizedPage;

/// Permissions each guarded screen asks for. Holding any one of them is enough.
pub mod required {
    use contracts::system::auth::permissions::*;

    pub const SIGNED_IN: &[&str] = &[];
    pub const MY_REQUESTS: &[&str] = &[VIEW_REQUESTS];
    /// Reached from "my requests" and from the history list
    pub const REQUEST_DETAILS: &[&str] = &[VIEW_REQUESTS, VIEW_HISTORY];
    pub const REQUEST_FORM: &[&str] = &[CREATE_REQUEST];
    pub const APPROVALS: &[&str] = &[APPROVE_REQUEST];
    pub const VOUCHERS: &[&str] = &[UPLOAD_VOUCHERS];
    pub const REFUNDS: &[&str] = &[CHECK_BUDGETS];
    pub const BOOKINGS: &[&str] = &[ASSIGN_TRAVEL_AGENCY];
    pub const HISTORY: &[&str] = &[VIEW_HISTORY];
}

/// Guard + shell around a page
fn protected<F, V>(
    session: Session,
    app: AppState,
    permissions: &'static [&'static str],
    page: F,
) -> impl IntoView
where
    F: Fn() -> V + Copy + Send + Sync + 'static,
    V: IntoView + 'static,
{
    view! {
        <RequirePermissions
            session=session
            permissions=permissions.to_vec()
            mode=PermissionMode::Any
        >
            <Shell session=session app=app>
                {page()}
            </Shell>
        </RequirePermissions>
    }
}

#[component]
pub fn AppRoutes(session: Session, app: AppState) -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=move || view! { <NotFoundPage app=app /> }>
                <Route path=path!("/") view=move || view! { <LoginPage session=session app=app /> } />
                <Route
                    path=path!("/dashboard")
                    view=move || protected(session, app, required::SIGNED_IN, move || view! {
                        <DashboardPage session=session app=app />
                    })
                />
                <Route
                    path=path!("/requests")
                    view=move || protected(session, app, required::MY_REQUESTS, move || view! {
                        <MyRequestsPage session=session app=app />
                    })
                />
                <Route
                    path=path!("/requests/new")
                    view=move || protected(session, app, required::REQUEST_FORM, move || view! {
                        <RequestFormPage session=session app=app />
                    })
                />
                <Route
                    path=path!("/requests/:id")
                    view=move || protected(session, app, required::REQUEST_DETAILS, move || view! {
                        <RequestDetailsPage session=session app=app />
                    })
                />
                <Route
                    path=path!("/requests/:id/edit")
                    view=move || protected(session, app, required::REQUEST_FORM, move || view! {
                        <RequestFormPage session=session app=app edit=true />
                    })
                />
                <Route
                    path=path!("/requests/:id/vouchers")
                    view=move || protected(session, app, required::VOUCHERS, move || view! {
                        <VoucherUploadPage session=session app=app />
                    })
                />
                <Route
                    path=path!("/approvals")
                    view=move || protected(session, app, required::APPROVALS, move || view! {
                        <ApprovalsPage session=session app=app />
                    })
                />
                <Route
                    path=path!("/refunds")
                    view=move || protected(session, app, required::REFUNDS, move || view! {
                        <RefundsPage session=session app=app />
                    })
                />
                <Route
                    path=path!("/bookings")
                    view=move || protected(session, app, required::BOOKINGS, move || view! {
                        <BookingsPage session=session app=app />
                    })
                />
                <Route
                    path=path!("/history")
                    view=move || protected(session, app, required::HISTORY, move || view! {
                        <HistoryPage session=session app=app />
                    })
                />
                <Route
                    path=path!("/unauthorized")
                    view=move || protected(session, app, required::SIGNED_IN, move || view! {
                        <UnauthorizedPage app=app />
                    })
                />
            </Routes>
        </Router>
    }
}

#[cfg(test)]
mod tests {
    use super::required;
    use crate::routes::menu::MOSAICS;

    #[test]
    fn test_mosaics_point_at_routes_they_can_open() {
        for mosaic in MOSAICS {
            let route: &[&str] = match mosaic.path {
                "/requests/new" => required::REQUEST_FORM,
                "/requests" => required::MY_REQUESTS,
                "/approvals" => required::APPROVALS,
                "/refunds" => required::REFUNDS,
                "/bookings" => required::BOOKINGS,
                "/history" => required::HISTORY,
                other => panic!("mosaic without route: {}", other),
            };
            assert!(
                mosaic.permissions.iter().all(|p| route.contains(p)),
                "{} asks for {:?}",
                mosaic.path,
                route
            );
        }
    }
}
