use howsmynhs_core::{
    BED_CHANGE_THRESHOLD, Cell, ChangeOptions, MergerRegistry, Metric, NhsError, Polarity,
    RowLabel, bed_change_distribution, change_distribution,
};
use proptest::prelude::*;

fn arb_table() -> impl Strategy<Value = Vec<Vec<Option<u16>>>> {
    (2usize..12).prop_flat_map(|periods| {
        proptest::collection::vec(
            proptest::collection::vec(proptest::option::of(0u16..2000), periods),
            1..30,
        )
    })
}

fn to_grid(rows: &[Vec<Option<u16>>]) -> Vec<Vec<Cell>> {
    rows.iter()
        .map(|r| r.iter().map(|v| Cell::from(v.map(f64::from))).collect())
        .collect()
}

#[test]
fn successor_is_measured_on_its_reconciled_series() {
    let names: Vec<RowLabel> = ["England", "A", "B", "AB"].into_iter().map(RowLabel::from).collect();
    let grid = to_grid(&[
        vec![Some(1000), Some(900), Some(800)],
        vec![Some(400), None, None],
        vec![Some(300), None, None],
        vec![None, None, Some(500)],
    ]);
    let registry = MergerRegistry::new([("AB", ["A", "B"])]).unwrap();
    let (more, same, fewer) =
        bed_change_distribution(&names, &grid, &registry, BED_CHANGE_THRESHOLD).unwrap();
    // AB goes from 700 to 500
    assert_eq!((more, same, fewer), (0.0, 0.0, 100.0));
}

#[test]
fn polarity_reads_buckets_per_metric() {
    let names: Vec<RowLabel> = ["A", "B"].into_iter().map(RowLabel::from).collect();
    let grid = to_grid(&[vec![Some(100), Some(400)], vec![Some(100), Some(110)]]);
    let d = change_distribution(
        Metric::Waiting,
        &names,
        &grid,
        &MergerRegistry::default(),
        &ChangeOptions::default(),
    )
    .unwrap();
    assert_eq!(d.worse(Metric::Waiting.polarity()), 50.0);
    assert_eq!(d.better(Polarity::IncreaseIsBetter), 50.0);
    assert_eq!(d.same, 50.0);
}

#[test]
fn empty_corpus_reports_the_statistic() {
    let err = change_distribution(
        Metric::Deaths,
        &[],
        &[],
        &MergerRegistry::default(),
        &ChangeOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err, NhsError::no_qualifying("covid change distribution"));
}

proptest! {
    #[test]
    fn percentages_sum_to_one_hundred(rows in arb_table(), threshold in 0.0f64..500.0) {
        let names: Vec<RowLabel> = (0..rows.len()).map(|i| RowLabel::from(format!("T{i}").as_str())).collect();
        let grid = to_grid(&rows);
        let qualifying = rows
            .iter()
            .filter(|r| r.iter().filter(|v| v.is_some()).count() >= 2)
            .count();
        match bed_change_distribution(&names, &grid, &MergerRegistry::default(), threshold) {
            Ok((more, same, fewer)) => {
                prop_assert!(qualifying > 0);
                prop_assert!((more + same + fewer - 100.0).abs() < 1e-6);
                prop_assert!(more >= 0.0 && same >= 0.0 && fewer >= 0.0);
            }
            Err(NhsError::NoQualifyingEntities { .. }) => prop_assert_eq!(qualifying, 0),
            Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
        }
    }
}
