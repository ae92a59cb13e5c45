use howsmynhs_core::{Cell, Metric, MetricTable, NhsError, RowLabel};

fn daily(values: [Option<f64>; 10]) -> Vec<Cell> {
    values.into_iter().map(Cell::from).collect()
}

/// Daily deaths for the first ten days of April 2020.
///
/// # Errors
/// Never in practice; the table shape is static.
pub fn deaths_table() -> Result<MetricTable, NhsError> {
    let periods = (1..=10).map(|d| format!("2020-04-{d:02}")).collect();
    let rows = vec![
        RowLabel::from("england"),
        RowLabel::from("kingston hospital nhs foundation trust"),
        RowLabel::from("bedfordshire hospitals nhs foundation trust"),
    ];
    let england = std::array::from_fn(|i| {
        #[allow(clippy::cast_precision_loss)]
        let day = i as f64;
        Some(100.0 + 10.0 * day)
    });
    let deaths = vec![
        daily(england),
        daily([
            Some(1.0),
            Some(0.0),
            Some(2.0),
            Some(3.0),
            None,
            Some(1.0),
            Some(0.0),
            Some(0.0),
            Some(2.0),
            Some(1.0),
        ]),
        daily([
            Some(2.0),
            Some(2.0),
            Some(1.0),
            Some(0.0),
            Some(3.0),
            Some(1.0),
            Some(1.0),
            Some(0.0),
            Some(0.0),
            Some(1.0),
        ]),
    ];
    MetricTable::new(rows, periods, vec![(Metric::Deaths, deaths)])
}
