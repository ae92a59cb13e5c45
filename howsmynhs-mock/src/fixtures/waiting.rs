use howsmynhs_core::{Metric, MetricTable, NhsError, RowLabel};

use super::{BEDFORD, BEDFORDSHIRE, KINGSTON, LUTON, SMALL, SPARSE, row};

const MONTHS: usize = 12;
const MERGED_FROM: usize = 10;

#[allow(clippy::cast_precision_loss)]
fn f(i: usize) -> f64 {
    i as f64
}

/// Monthly A&E attendances and four-hour waits for 2019.
///
/// # Errors
/// Never in practice; the table shape is static.
pub fn waiting_table() -> Result<MetricTable, NhsError> {
    let periods = (1..=MONTHS).map(|m| format!("{m}/2019")).collect();
    let rows = vec![
        RowLabel::from("England"),
        RowLabel::from(BEDFORD),
        RowLabel::from(LUTON),
        RowLabel::from(BEDFORDSHIRE),
        RowLabel::from(SMALL),
        RowLabel::from(KINGSTON),
        RowLabel::from(SPARSE),
        RowLabel::Metadata("Source: NHS England A&E Attendances and Emergency Admissions".into()),
    ];
    let attendance = vec![
        row(MONTHS, |i| Some(2_000_000.0 + 10_000.0 * f(i))),
        row(MONTHS, |i| (i < MERGED_FROM).then_some(7000.0)),
        row(MONTHS, |i| (i < MERGED_FROM).then_some(9000.0)),
        row(MONTHS, |i| (i >= MERGED_FROM).then_some(16_500.0)),
        row(MONTHS, |_| Some(1200.0)),
        row(MONTHS, |_| Some(9000.0)),
        row(MONTHS, |i| (i < 5).then_some(5000.0)),
        row(MONTHS, |_| None),
    ];
    let waiting = vec![
        row(MONTHS, |i| Some(300_000.0 + 20_000.0 * f(i))),
        row(MONTHS, |i| (i < MERGED_FROM).then(|| 400.0 + 10.0 * f(i))),
        row(MONTHS, |i| (i < MERGED_FROM).then(|| 600.0 + 20.0 * f(i))),
        row(MONTHS, |i| {
            (i >= MERGED_FROM).then(|| 1400.0 + 30.0 * f(i - MERGED_FROM))
        }),
        row(MONTHS, |_| Some(4.0)),
        row(MONTHS, |i| Some(900.0 - 30.0 * f(i))),
        row(MONTHS, |i| (i < 5).then_some(50.0)),
        row(MONTHS, |_| None),
    ];
    MetricTable::new(
        rows,
        periods,
        vec![(Metric::Attendance, attendance), (Metric::Waiting, waiting)],
    )
}
