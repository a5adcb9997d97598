//! Route handler and view for the members page.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::{
    AppState, Error, endpoints,
    html::base,
    navigation::NavBar,
    revenue::{PlanBreakdown, classify_plans, count_with_status},
    store::member_snapshot,
};

/// The state needed for the members page.
#[derive(Debug, Clone)]
pub struct MembersState {
    /// The database connection for reading member records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for MembersState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

struct MemberCounts {
    total: usize,
    active: usize,
    plans: PlanBreakdown,
}

/// Display the members page.
pub async fn get_members_page(State(state): State<MembersState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let members = member_snapshot(&connection)
        .inspect_err(|error| tracing::error!("could not get member records: {error}"))?;

    let counts = MemberCounts {
        total: members.len(),
        active: count_with_status(&members, "Active"),
        plans: classify_plans(&members),
    };

    let nav_bar = NavBar::new(endpoints::MEMBERS_VIEW);

    Ok(members_view(nav_bar, &counts).into_response())
}

fn members_view(nav_bar: NavBar, counts: &MemberCounts) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-semibold mb-4 self-start" { "Members" }

            div class="grid grid-cols-1 sm:grid-cols-2 gap-4 mb-4 w-full" {
                (member_card("Total Members", counts.total))
                (member_card("Active Members", counts.active))
            }

            div
                class="bg-white dark:bg-gray-800 border border-gray-200
                    dark:border-gray-700 rounded-lg p-4 shadow-md w-full"
            {
                h3 class="text-lg font-semibold mb-3" { "Plan Breakdown" }

                (plan_row("VIP", counts.plans.vip))
                (plan_row("Non-VIP", counts.plans.non_vip))
                (plan_row("Walk-in", counts.plans.walk_in))
            }
        }
    );

    base("Members", &[], &content)
}

fn member_card(label: &str, value: usize) -> Markup {
    html!(
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                dark:border-gray-700 rounded-lg p-4 shadow-md"
        {
            div class="text-sm text-gray-600 dark:text-gray-400 mb-1" { (label) }
            div class="text-3xl font-bold" { (value) }
        }
    )
}

fn plan_row(label: &str, count: usize) -> Markup {
    html!(
        div class="flex justify-between py-1 text-sm" {
            span class="text-gray-600 dark:text-gray-400" { (label) }
            span class="font-semibold" { (count) }
        }
    )
}
