//! The quick overview cards at the top of the dashboard.

use maud::{Markup, html};

use crate::html::currency_rounded_with_tooltip;

/// The figures shown in the overview cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct OverviewCards {
    /// Sum of every payment on record.
    pub total_revenue: f64,
    /// Members whose membership status is "Active".
    pub active_members: usize,
    /// Payment records dated today.
    pub todays_sales: usize,
}

pub(super) fn overview_cards_view(cards: &OverviewCards) -> Markup {
    html! {
        div class="grid grid-cols-1 sm:grid-cols-3 gap-4 mb-4" {
            (stat_card("Total Revenue", currency_rounded_with_tooltip(cards.total_revenue)))
            (stat_card("Active Members", html!( (cards.active_members) )))
            (stat_card("Today's Sales", html!( (cards.todays_sales) )))
        }
    }
}

fn stat_card(label: &str, value: Markup) -> Markup {
    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md"
        {
            div class="text-sm text-gray-600 dark:text-gray-400 mb-1" { (label) }
            div class="text-3xl font-bold" { (value) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{OverviewCards, overview_cards_view};

    #[test]
    fn renders_all_three_cards() {
        let cards = OverviewCards {
            total_revenue: 45890.0,
            active_members: 342,
            todays_sales: 42,
        };

        let html = overview_cards_view(&cards).into_string();

        assert!(html.contains("Total Revenue"));
        assert!(html.contains("₱45,890"));
        assert!(html.contains("Active Members"));
        assert!(html.contains("342"));
        assert!(html.contains("Today's Sales") || html.contains("Today&#39;s Sales"));
        assert!(html.contains("42"));
    }
}
