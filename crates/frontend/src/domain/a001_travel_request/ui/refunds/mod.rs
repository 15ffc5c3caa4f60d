//! SOI refund approvals: requests whose vouchers were checked and now wait
//! for the budget holder.

use std::collections::HashSet;

use contracts::domain::a001_travel_request::TravelRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::json;
use thaw::*;

use super::approvals::toggle_index;
use super::folio_column;
use crate::domain::a001_travel_request::api;
use crate::domain::a001_travel_request::rows::{keys, request_row};
use crate::domain::a002_voucher::rows::voucher_row;
use crate::domain::a002_voucher::ui::voucher_columns;
use crate::layout::app_state::AppState;
use crate::shared::components::data_table::{Column, DataTable, Expansion, Row};
use crate::shared::format::format_money;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::system::auth::session::Session;

const TOGGLE: &str = "toggle";
const VOUCHERS_TOTAL: &str = "vouchers_total";
const BALANCE: &str = "balance";

/// What is left once the advance is set against the checked expenses.
/// Positive: the company owes the traveller. Negative: the traveller returns money.
pub fn refund_balance(advance: f64, vouchers_total: f64) -> f64 {
    vouchers_total - advance
}

pub fn balance_text(balance: f64) -> String {
    if balance > 0.0 {
        format!("{} a reembolsar", format_money(balance))
    } else if balance < 0.0 {
        format!("{} a devolver", format_money(-balance))
    } else {
        "Sin diferencia".to_string()
    }
}

fn refund_row(request: &TravelRequest) -> Row {
    let total = request.vouchers_total();
    let mut row = request_row(request);
    row.insert(VOUCHERS_TOTAL.into(), json!(format_money(total)));
    row.insert(
        BALANCE.into(),
        json!(balance_text(refund_balance(request.advance_money, total))),
    );
    row
}

#[component]
pub fn RefundsPage(session: Session, app: AppState) -> impl IntoView {
    app.set_page_title("Reembolsos");

    let requests: RwSignal<Option<Vec<TravelRequest>>> = RwSignal::new(None);
    let expanded = RwSignal::new(HashSet::<usize>::new());
    let busy: RwSignal<Option<i64>> = RwSignal::new(None);

    let load = move || {
        spawn_local(async move {
            match api::fetch_refunds_to_approve(&session.api()).await {
                Ok(list) => {
                    expanded.set(HashSet::new());
                    requests.set(Some(list));
                }
                Err(err) => {
                    app.report_error(session, "cargar los reembolsos", &err);
                    requests.set(Some(Vec::new()));
                }
            }
        });
    };
    load();

    let approve = move |id: i64| {
        if busy.get_untracked().is_some() {
            return;
        }
        busy.set(Some(id));
        spawn_local(async move {
            match api::approve_refund(&session.api(), id).await {
                Ok(()) => {
                    app.toasts.success(format!("Reembolso de la solicitud #{} aprobado", id));
                    load();
                }
                Err(err) => app.report_error(session, "aprobar el reembolso", &err),
            }
            busy.set(None);
        });
    };

    let columns = move || {
        vec![
            Column::new(TOGGLE, "").render(move |ctx| {
                let index = ctx.row_index;
                view! {
                    <button
                        class="table__toggle"
                        title="Ver comprobantes"
                        on:click=move |_| expanded.update(|set| toggle_index(set, index))
                    >
                        {move || {
                            if expanded.with(|set| set.contains(&index)) {
                                icon("chevron-down")
                            } else {
                                icon("chevron-right")
                            }
                        }}
                    </button>
                }
                .into_any()
            }),
            folio_column(),
            Column::new(keys::REQUESTER, "Solicitante"),
            Column::new(keys::MOTIVE, "Motivo"),
            Column::new(keys::ADVANCE, "Anticipo").class("text-right"),
            Column::new(VOUCHERS_TOTAL, "Comprobado").class("text-right"),
            Column::new(BALANCE, "Diferencia"),
            Column::new(keys::ACTIONS, "").class("table__cell--actions").render(move |ctx| {
                let Some(id) = ctx.value.get_untracked().as_i64() else {
                    return ().into_any();
                };
                view! {
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| approve(id)
                        loading=Signal::derive(move || busy.get() == Some(id))
                        disabled=Signal::derive(move || busy.get().is_some())
                    >
                        {icon("check")}
                        " Aprobar reembolso"
                    </Button>
                }
                .into_any()
            }),
        ]
    };

    let expansion = Expansion {
        expanded: expanded.into(),
        render_expanded_row: Callback::new(move |index: usize| {
            let vouchers = requests.with_untracked(|list| {
                list.as_ref()
                    .and_then(|l| l.get(index))
                    .map(|r| r.vouchers.iter().map(voucher_row).collect::<Vec<_>>())
                    .unwrap_or_default()
            });
            view! {
                <DataTable
                    columns=voucher_columns()
                    initial_data=vouchers
                    placeholder="-"
                    empty_message="Sin comprobantes."
                />
            }
            .into_any()
        }),
    };

    view! {
        <PageFrame page_id="a001_travel_request--refunds" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("dollar-sign")}
                    <h1 class="page__title">"Reembolsos por aprobar"</h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load()>
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || match requests.get() {
                    None => view! { <div class="page-loading"><Spinner /></div> }.into_any(),
                    Some(list) => view! {
                        <DataTable
                            columns=columns()
                            initial_data={list.iter().map(refund_row).collect::<Vec<_>>()}
                            expansion=expansion
                            placeholder="-"
                            empty_message="No hay reembolsos pendientes."
                            table_id="a001-refunds-table"
                        />
                    }
                    .into_any(),
                }}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refund_balance() {
        assert_eq!(refund_balance(1000.0, 1250.5), 250.5);
        assert_eq!(refund_balance(1000.0, 800.0), -200.0);
    }

    #[test]
    fn test_balance_text() {
        assert_eq!(balance_text(250.5), "$250.50 a reembolsar");
        assert_eq!(balance_text(-200.0), "$200.00 a devolver");
        assert_eq!(balance_text(0.0), "Sin diferencia");
    }
}
