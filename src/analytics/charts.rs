//! Chart generation for the analytics page.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisType, Tooltip, Trigger},
    series::{Bar, Pie},
};

use crate::{
    dashboard::charts::{currency_formatter, currency_tooltip},
    revenue::{TransactionRecord, classify_plans, sum_by_month, sum_by_year},
};

use super::handlers::RangePreset;

pub(super) fn revenue_chart(records: &[TransactionRecord], preset: RangePreset) -> Chart {
    let (labels, values) = match preset {
        RangePreset::ByYear => sum_by_year(records),
        RangePreset::SixMonths | RangePreset::TwelveMonths => sum_by_month(records),
    };

    Chart::new()
        .title(
            Title::new()
                .text("Revenue & Members")
                .subtext(preset.label()),
        )
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Revenue").data(values))
}

pub(super) fn membership_chart(records: &[TransactionRecord]) -> Chart {
    let breakdown = classify_plans(records);

    Chart::new()
        .title(Title::new().text("Membership Distribution"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().left("center").top("bottom"))
        .series(Pie::new().radius("55%").data(vec![
            (breakdown.vip as f64, "VIP"),
            (breakdown.non_vip as f64, "Non-VIP"),
            (breakdown.walk_in as f64, "Walk-in"),
        ]))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::revenue::{RecordId, TransactionRecord};

    use super::{RangePreset, membership_chart, revenue_chart};

    fn create_test_record(id: i64, plan: &str, date: time::Date) -> TransactionRecord {
        TransactionRecord {
            id: RecordId::Membership(id),
            name: format!("Member #{id}"),
            amount: 1000.0,
            date: Some(date),
            status: "Paid".to_owned(),
            plan: plan.to_owned(),
        }
    }

    #[test]
    fn month_presets_use_calendar_month_labels() {
        let records = vec![create_test_record(1, "VIP", date!(2025 - 03 - 10))];

        let options = revenue_chart(&records, RangePreset::SixMonths).to_string();

        assert!(options.contains("Jan"));
        assert!(options.contains("Dec"));
    }

    #[test]
    fn year_preset_uses_observed_years() {
        let records = vec![
            create_test_record(1, "VIP", date!(2023 - 03 - 10)),
            create_test_record(2, "VIP", date!(2025 - 04 - 11)),
        ];

        let options = revenue_chart(&records, RangePreset::ByYear).to_string();

        assert!(options.contains("2023"));
        assert!(options.contains("2025"));
        assert!(!options.contains("2024"));
    }

    #[test]
    fn membership_chart_includes_all_three_plans() {
        let records = vec![
            create_test_record(1, "VIP", date!(2025 - 03 - 10)),
            create_test_record(2, "Non-VIP", date!(2025 - 03 - 11)),
            create_test_record(3, "Walk-in", date!(2025 - 03 - 12)),
        ];

        let options = membership_chart(&records).to_string();

        assert!(options.contains("VIP"));
        assert!(options.contains("Non-VIP"));
        assert!(options.contains("Walk-in"));
    }
}
