use leptos::prelude::*;
use serde_json::Value;
use thaw::*;

use super::model::{self, Row, DEFAULT_PLACEHOLDER};
use super::state::TableState;
use super::{CellContext, Column, Expansion};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::icons::icon;

#[component]
pub fn DataTable(
    /// Column schema, rendered in order
    columns: Vec<Column>,
    /// Rows present when the table mounts
    #[prop(optional)]
    initial_data: Vec<Row>,
    /// Receives the whole row sequence after every edit or append
    #[prop(optional)]
    on_data_change: Option<Callback<Vec<Row>>>,
    /// Show the "add row" control
    #[prop(optional)]
    allow_append: bool,
    #[prop(optional, into)]
    append_label: Option<String>,
    /// Text for absent / null cells without a renderer
    #[prop(optional)]
    placeholder: Option<&'static str>,
    /// Enables pagination with this page size
    #[prop(optional)]
    items_per_page: Option<usize>,
    /// Page size owned by the caller; keeps the user's choice across remounts
    #[prop(optional)]
    page_size: Option<RwSignal<usize>>,
    #[prop(optional)]
    expansion: Option<Expansion>,
    /// Shown in place of the body when there are no rows
    #[prop(optional, into)]
    empty_message: Option<String>,
    #[prop(optional)]
    table_id: Option<&'static str>,
) -> impl IntoView {
    let placeholder = placeholder.unwrap_or(DEFAULT_PLACEHOLDER);
    let column_count = columns.len();
    let state = TableState::new(columns, initial_data, items_per_page, on_data_change);
    let state = match page_size {
        Some(size) if state.is_paginated() => state.with_page_size(size),
        _ => state,
    };
    let TableState { columns, rows, page, per_page, .. } = state;
    let paginated = state.is_paginated();

    let total_rows = Memo::new(move |_| rows.with(Vec::len));
    let total_pages = Memo::new(move |_| state.pagination().total_pages(total_rows.get()));
    let current_page =
        Memo::new(move |_| state.pagination().clamp_page(page.get(), total_rows.get()));
    let visible = Memo::new(move |_| {
        state
            .pagination()
            .page_range(current_page.get(), total_rows.get())
            .collect::<Vec<usize>>()
    });

    let render_row = move |index: usize| {
        let cells = columns.with_value(|cols| {
            cols.iter()
                .map(|col| {
                    let value = {
                        let key = col.key.clone();
                        Signal::derive(move || rows.with(|r| model::cell_value(r, index, &key)))
                    };
                    let content = match col.render_cell {
                        Some(render) => {
                            let key = col.key.clone();
                            let set = Callback::new(move |v: Value| {
                                state.set_cell(index, &key, v);
                            });
                            render.run(CellContext {
                                value,
                                set,
                                row_index: index,
                            })
                        }
                        None => {
                            (move || model::cell_text(&value.get(), placeholder)).into_any()
                        }
                    };
                    view! {
                        <TableCell class=col.class.unwrap_or("")>
                            <TableCellLayout>{content}</TableCellLayout>
                        </TableCell>
                    }
                })
                .collect_view()
        });

        let expanded_row = expansion.map(|exp| {
            move || {
                exp.expanded.with(|set| set.contains(&index)).then(|| {
                    view! {
                        <TableRow class="data-table__expanded-row">
                            <TableCell attr:colspan=column_count.to_string()>
                                {exp.render_expanded_row.run(index)}
                            </TableCell>
                        </TableRow>
                    }
                })
            }
        });

        view! {
            <TableRow>{cells}</TableRow>
            {expanded_row}
        }
    };

    view! {
        <div class="data-table">
            {paginated.then(|| view! {
                <div class="data-table__toolbar">
                    <PaginationControls
                        current_page=current_page
                        total_pages=total_pages
                        total_count=total_rows
                        page_size=per_page
                        on_page_change=Callback::new(move |p: usize| page.set(p))
                        on_page_size_change=Callback::new(move |size: usize| state.set_page_size(size))
                    />
                </div>
            })}

            <Table attr:id=table_id.unwrap_or_default() attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        {columns.with_value(|cols| {
                            cols.iter()
                                .map(|col| {
                                    let header = col.header.clone();
                                    view! { <TableHeaderCell>{header}</TableHeaderCell> }
                                })
                                .collect_view()
                        })}
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For each=move || visible.get() key=|index| *index children=render_row />
                    {move || {
                        let message = empty_message.clone()?;
                        (total_rows.get() == 0).then(|| view! {
                            <TableRow class="data-table__empty">
                                <TableCell attr:colspan=column_count.to_string()>
                                    <TableCellLayout>{message}</TableCellLayout>
                                </TableCell>
                            </TableRow>
                        })
                    }}
                </TableBody>
            </Table>

            {allow_append.then(|| {
                let label = append_label.unwrap_or_else(|| "Agregar fila".to_string());
                view! {
                    <div class="data-table__footer">
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| state.append()>
                            {icon("plus")}
                            {format!(" {}", label)}
                        </Button>
                    </div>
                }
            })}
        </div>
    }
}
