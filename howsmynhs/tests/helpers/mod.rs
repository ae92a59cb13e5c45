#![allow(dead_code)]

use howsmynhs::{Cell, Engine, EngineConfig, Metric, MetricTable, RowLabel};
use howsmynhs_mock::MockSource;

pub async fn mock_engine() -> Engine {
    Engine::from_source(&MockSource::new(), EngineConfig::default())
        .await
        .expect("mock engine builds")
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

pub fn row(values: &[Option<f64>]) -> Vec<Cell> {
    values.iter().copied().map(Cell::from).collect()
}

pub fn labels(names: &[&str]) -> Vec<RowLabel> {
    names.iter().map(|n| RowLabel::from(*n)).collect()
}

/// Four quarters of beds for the national row only.
pub fn national_beds() -> MetricTable {
    MetricTable::new(
        labels(&["England"]),
        ["3/2020", "6/2020", "9/2020", "12/2020"]
            .map(String::from)
            .to_vec(),
        vec![(
            Metric::Beds,
            vec![row(&[Some(100.0), Some(99.0), Some(98.0), Some(97.0)])],
        )],
    )
    .expect("valid bed table")
}
