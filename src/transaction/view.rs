//! Maud views for the transactions page.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, currency_rounded_with_tooltip,
        format_currency,
    },
    navigation::NavBar,
    revenue::TransactionRecord,
};

use super::handlers::TransactionsQuery;

/// The counters shown above the table. Computed over the whole snapshot,
/// not the filtered rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct TransactionsSummary {
    pub total_revenue: f64,
    pub completed: usize,
    pub pending: usize,
}

const STATUS_OPTIONS: [&str; 3] = ["All", "Paid", "Pending"];

/// Renders the full transactions page.
pub(super) fn transactions_view(
    nav_bar: NavBar,
    summary: &TransactionsSummary,
    rows: &[TransactionRecord],
    query: &TransactionsQuery,
) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-semibold mb-4 self-start" { "Transactions" }

            (summary_view(summary))
            (filter_form(query))
            (transactions_table(rows, query))
        }
    );

    base("Transactions", &[], &content)
}

fn summary_view(summary: &TransactionsSummary) -> Markup {
    html!(
        div class="grid grid-cols-3 gap-4 mb-4 w-full" {
            (counter_card("Total Revenue", currency_rounded_with_tooltip(summary.total_revenue)))
            (counter_card("Completed", html!( (summary.completed) )))
            (counter_card("Pending", html!( (summary.pending) )))
        }
    )
}

fn counter_card(label: &str, value: Markup) -> Markup {
    html!(
        div
            class="flex flex-col items-center justify-center bg-white
                dark:bg-gray-800 border border-gray-200 dark:border-gray-700
                rounded-lg p-4 shadow-md"
        {
            div class="text-xs text-gray-600 dark:text-gray-400 mb-1" { (label) }
            div class="text-xl font-bold" { (value) }
        }
    )
}

/// Renders the status dropdown and name search.
///
/// `hx-sync="this:replace"` aborts an in-flight table request when the
/// filter changes again, so only the latest selection's response is applied.
fn filter_form(query: &TransactionsQuery) -> Markup {
    let selected_status = query.status.as_deref().unwrap_or("All");

    html!(
        form
            hx-get=(endpoints::TRANSACTIONS_TABLE)
            hx-target="#transactions-table"
            hx-swap="outerHTML"
            hx-trigger="change, keyup changed delay:300ms from:find input"
            hx-sync="this:replace"
            class="flex flex-col sm:flex-row gap-4 mb-4 w-full"
        {
            div class="flex-1"
            {
                label for="status" class=(FORM_LABEL_STYLE) { "Status" }

                select
                    name="status"
                    id="status"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for option in STATUS_OPTIONS {
                        option value=(option) selected[option == selected_status] { (option) }
                    }
                }
            }

            div class="flex-1"
            {
                label for="search" class=(FORM_LABEL_STYLE) { "Search" }

                input
                    type="search"
                    name="search"
                    id="search"
                    placeholder="Member or customer name"
                    class=(FORM_TEXT_INPUT_STYLE)
                    value=(query.search.as_deref().unwrap_or_default());
            }
        }
    )
}

/// Renders the table section, including the export link for the current
/// filter selection.
pub(super) fn transactions_table(rows: &[TransactionRecord], query: &TransactionsQuery) -> Markup {
    html!(
        section id="transactions-table" class="w-full" {
            div class="flex justify-end mb-2" {
                a href=(export_url(query)) class=(LINK_STYLE) { "Export Data" }
            }

            div class="relative overflow-x-auto shadow-md sm:rounded-lg" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Plan" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                        }
                    }

                    tbody {
                        @if rows.is_empty() {
                            tr class=(TABLE_ROW_STYLE) {
                                td class=(TABLE_CELL_STYLE) colspan="5" {
                                    "No transactions match the current filter."
                                }
                            }
                        }

                        @for record in rows {
                            tr class=(TABLE_ROW_STYLE) {
                                td class=(TABLE_CELL_STYLE) {
                                    @match record.date {
                                        Some(date) => { (date) }
                                        None => { "—" }
                                    }
                                }
                                td class=(TABLE_CELL_STYLE) { (record.name) }
                                td class=(TABLE_CELL_STYLE) { (record.plan) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(record.amount)) }
                                td class=(TABLE_CELL_STYLE) { (status_badge(&record.status)) }
                            }
                        }
                    }
                }
            }
        }
    )
}

fn export_url(query: &TransactionsQuery) -> String {
    let params = [
        ("status", query.status.as_deref().unwrap_or("All")),
        ("search", query.search.as_deref().unwrap_or_default()),
    ];

    match serde_urlencoded::to_string(params) {
        Ok(encoded) => format!("{}?{}", endpoints::TRANSACTIONS_EXPORT, encoded),
        Err(error) => {
            tracing::error!("Could not encode export URL query: {error}");
            endpoints::TRANSACTIONS_EXPORT.to_owned()
        }
    }
}

fn status_badge(status: &str) -> Markup {
    let style = if status.eq_ignore_ascii_case("paid") {
        "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold \
        text-green-800 bg-green-100 rounded-full dark:bg-green-900 dark:text-green-300"
    } else if status.eq_ignore_ascii_case("pending") {
        "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold \
        text-yellow-800 bg-yellow-100 rounded-full dark:bg-yellow-900 dark:text-yellow-300"
    } else {
        "inline-flex items-center px-2.5 py-0.5 text-xs font-semibold \
        text-gray-800 bg-gray-100 rounded-full dark:bg-gray-700 dark:text-gray-300"
    };

    html!( span class=(style) { (status) } )
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::revenue::{RecordId, TransactionRecord};

    use super::{TransactionsQuery, transactions_table};

    fn create_test_record(name: &str, status: &str) -> TransactionRecord {
        TransactionRecord {
            id: RecordId::WalkIn(1),
            name: name.to_owned(),
            amount: 150.0,
            date: Some(date!(2025 - 06 - 04)),
            status: status.to_owned(),
            plan: "Walk-in".to_owned(),
        }
    }

    #[test]
    fn table_renders_rows() {
        let rows = vec![create_test_record("Pedro Penduko", "Paid")];

        let html = transactions_table(&rows, &TransactionsQuery::default()).into_string();

        assert!(html.contains("Pedro Penduko"));
        assert!(html.contains("₱150.00"));
        assert!(html.contains("Paid"));
    }

    #[test]
    fn table_shows_placeholder_for_missing_date() {
        let mut record = create_test_record("Pedro Penduko", "Paid");
        record.date = None;

        let html = transactions_table(&[record], &TransactionsQuery::default()).into_string();

        assert!(html.contains("—"));
    }

    #[test]
    fn table_shows_empty_message_with_no_rows() {
        let html = transactions_table(&[], &TransactionsQuery::default()).into_string();

        assert!(html.contains("No transactions match the current filter."));
    }

    #[test]
    fn export_link_carries_the_current_filter() {
        let query = TransactionsQuery {
            status: Some("Paid".to_owned()),
            search: Some("juan".to_owned()),
        };

        let html = transactions_table(&[], &query).into_string();

        assert!(html.contains("status=Paid"));
        assert!(html.contains("search=juan"));
    }
}
