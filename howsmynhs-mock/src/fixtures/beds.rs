use howsmynhs_core::{Metric, MetricTable, NhsError, RowLabel};

use super::row;

const QUARTERS: [&str; 6] = ["3/2019", "6/2019", "9/2019", "12/2019", "3/2020", "6/2020"];

fn quarterly(values: [Option<f64>; 6]) -> Vec<howsmynhs_core::Cell> {
    row(QUARTERS.len(), |i| values[i])
}

/// Quarterly overnight beds, oldest quarter first.
///
/// Names are lowercase, as in the published KH03 returns, and need
/// normalising before they match the A&E table.
///
/// # Errors
/// Never in practice; the table shape is static.
pub fn beds_table() -> Result<MetricTable, NhsError> {
    let rows = vec![
        RowLabel::from("england"),
        RowLabel::from("bedford hospital nhs trust"),
        RowLabel::from("luton and dunstable university hospital nhs foundation trust"),
        RowLabel::from("bedfordshire hospitals nhs foundation trust"),
        RowLabel::from("small community hospital nhs trust"),
        RowLabel::from("kingston hospital nhs foundation trust"),
        RowLabel::from("closing hospital nhs trust"),
        RowLabel::Metadata("Source: KH03 bed availability and occupancy".into()),
    ];
    let beds = vec![
        quarterly([
            Some(100_000.0),
            Some(99_500.0),
            Some(99_000.0),
            Some(98_800.0),
            Some(98_500.0),
            Some(98_000.0),
        ]),
        quarterly([Some(400.0), Some(400.0), Some(390.0), Some(385.0), None, None]),
        quarterly([Some(650.0), Some(640.0), Some(640.0), Some(630.0), None, None]),
        quarterly([None, None, None, None, Some(1000.0), Some(990.0)]),
        quarterly([Some(40.0); 6]),
        quarterly([
            Some(300.0),
            Some(320.0),
            Some(340.0),
            Some(360.0),
            Some(380.0),
            Some(420.0),
        ]),
        quarterly([
            Some(80.0),
            Some(60.0),
            Some(40.0),
            Some(20.0),
            Some(10.0),
            Some(0.0),
        ]),
        quarterly([None; 6]),
    ];
    MetricTable::new(
        rows,
        QUARTERS.iter().map(ToString::to_string).collect(),
        vec![(Metric::Beds, beds)],
    )
}
