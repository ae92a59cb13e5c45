mod helpers;

use helpers::{labels, national_beds, row};
use howsmynhs::{
    Availability, Engine, EngineConfig, MergerRegistry, Metric, MetricTable, NhsError, PageBlocks,
};
use howsmynhs_mock::dynamic::{DynamicMockSource, MockBehavior};

fn ae_table(periods: &[&str]) -> MetricTable {
    let n = periods.len();
    let full = vec![Some(10.0); n];
    let mut late = full.clone();
    late[0] = None;
    let blank = vec![None; n];
    MetricTable::new(
        labels(&["England", "A", "B", "AB"]),
        periods.iter().map(ToString::to_string).collect(),
        vec![
            (
                Metric::Attendance,
                vec![row(&full), row(&full), row(&late), row(&blank)],
            ),
            (
                Metric::Waiting,
                vec![row(&full), row(&full), row(&late), row(&blank)],
            ),
        ],
    )
    .unwrap()
}

fn registry() -> MergerRegistry {
    MergerRegistry::new([("AB", ["A", "B"])]).unwrap()
}

#[test]
fn partial_months_are_dropped_from_merged_waiting_by_default() {
    let engine = Engine::builder()
        .waiting_table(ae_table(&["1/2020", "2/2020", "3/2020"]))
        .beds_table(national_beds())
        .registry(registry())
        .build()
        .unwrap();
    let obs = engine.observed(Metric::Waiting, "AB").unwrap();
    assert_eq!(obs.periods, ["2/2020", "3/2020"]);
    assert_eq!(obs.values, [20.0, 20.0]);
}

#[test]
fn any_source_keeps_partial_months() {
    let engine = Engine::builder()
        .waiting_table(ae_table(&["1/2020", "2/2020", "3/2020"]))
        .beds_table(national_beds())
        .registry(registry())
        .waiting_availability(Availability::AnySource)
        .build()
        .unwrap();
    let obs = engine.observed(Metric::Waiting, "AB").unwrap();
    assert_eq!(obs.values, [10.0, 20.0, 20.0]);
    assert_eq!(obs.len(), 3);
}

#[test]
fn malformed_period_fails_the_build() {
    let err = Engine::builder()
        .waiting_table(ae_table(&["1/2020", "13/2020"]))
        .beds_table(national_beds())
        .registry(registry())
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, NhsError::Format { label, .. } if label == "13/2020"));
}

#[test]
fn missing_grid_and_bad_config_are_rejected() {
    let err = Engine::builder()
        .waiting_table(national_beds())
        .beds_table(national_beds())
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, NhsError::InvalidTable(_)));

    let err = Engine::builder()
        .waiting_table(ae_table(&["1/2020"]))
        .beds_table(national_beds())
        .smoothing_window(0)
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, NhsError::InvalidArg(_)));
}

#[test]
fn too_few_months_to_smooth() {
    let engine = Engine::builder()
        .waiting_table(ae_table(&["1/2020", "2/2020"]))
        .beds_table(national_beds())
        .registry(registry())
        .build()
        .unwrap();
    let err = engine.waiting_summary("A").unwrap_err();
    assert!(matches!(err, NhsError::InsufficientData { needed: 3, .. }));
    assert!(!err.is_integrity_failure());
}

#[tokio::test]
async fn source_failures_are_tagged_with_the_source_name() {
    let (src, ctrl) = DynamicMockSource::new_with_controller("nhs-files").unwrap();
    ctrl.set_beds(MockBehavior::Fail(NhsError::InvalidArg("connection reset".into())))
        .await;
    let err = Engine::from_source(&*src, EngineConfig::default())
        .await
        .err()
        .unwrap();
    match err {
        NhsError::Source { source_name, msg } => {
            assert_eq!(source_name, "nhs-files");
            assert!(msg.contains("connection reset"));
        }
        other => panic!("expected Source, got {other:?}"),
    }
}

#[tokio::test]
async fn shape_errors_pass_through_untagged() {
    let (src, ctrl) = DynamicMockSource::new_with_controller("nhs-files").unwrap();
    ctrl.set_waiting(MockBehavior::Fail(NhsError::format("x/2020", "bad month")))
        .await;
    let err = Engine::from_source(&*src, EngineConfig::default())
        .await
        .err()
        .unwrap();
    assert_eq!(err, NhsError::format("x/2020", "bad month"));
}

#[tokio::test]
async fn a_source_without_deaths_builds_pages_without_them() {
    let (src, ctrl) = DynamicMockSource::new_with_controller("nhs-files").unwrap();
    ctrl.set_deaths(MockBehavior::Return(None)).await;
    let engine = Engine::from_source(&*src, EngineConfig::default())
        .await
        .unwrap();
    assert!(engine.table(Metric::Deaths).is_err());
    let report = engine.build_pages().await;
    assert!(report.warnings.is_empty());
    assert!(report.pages.iter().all(|p| p.deaths.is_none()));
}

fn year_of_months(waiting_months: usize) -> MetricTable {
    let periods: Vec<String> = (1..=12).map(|m| format!("{m}/2020")).collect();
    let attendance = vec![Some(5000.0); 12];
    let waiting: Vec<Option<f64>> = (0..12)
        .map(|i| (i < waiting_months).then_some(300.0))
        .collect();
    MetricTable::new(
        labels(&["England", "T"]),
        periods,
        vec![
            (Metric::Attendance, vec![row(&attendance), row(&attendance)]),
            (Metric::Waiting, vec![row(&[Some(300.0); 12]), row(&waiting)]),
        ],
    )
    .unwrap()
}

#[test]
fn known_mergers_without_data_stay_off_the_homepage() {
    let engine = Engine::builder()
        .waiting_table(year_of_months(12))
        .beds_table(national_beds())
        .build()
        .unwrap();
    assert!(!engine.registry().is_empty());
    assert_eq!(engine.entities(), ["England", "T"]);
    let names: Vec<String> = engine
        .homepage_index()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, ["England", "T"]);
}

#[test]
fn successor_without_a_row_is_listed_when_a_predecessor_has_one() {
    let ae = ae_table(&["1/2020", "2/2020", "3/2020"]);
    let ae = MetricTable::new(
        labels(&["England", "A"]),
        ae.periods().to_vec(),
        vec![
            (Metric::Attendance, ae.grid(Metric::Attendance).unwrap()[..2].to_vec()),
            (Metric::Waiting, ae.grid(Metric::Waiting).unwrap()[..2].to_vec()),
        ],
    )
    .unwrap();
    let registry = MergerRegistry::new([("AB", ["A"]), ("Elsewhere", ["Z"])]).unwrap();
    let engine = Engine::builder()
        .waiting_table(ae)
        .beds_table(national_beds())
        .registry(registry)
        .build()
        .unwrap();
    assert_eq!(engine.entities(), ["England", "AB"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn too_few_waiting_months_only_drops_the_waiting_block() {
    let national = national_beds();
    let beds = MetricTable::new(
        labels(&["England", "T"]),
        national.periods().to_vec(),
        vec![(
            Metric::Beds,
            vec![
                national.grid(Metric::Beds).unwrap()[0].clone(),
                row(&[Some(50.0), Some(50.0), Some(48.0), Some(47.0)]),
            ],
        )],
    )
    .unwrap();
    let engine = Engine::builder()
        .waiting_table(year_of_months(2))
        .beds_table(beds)
        .registry(MergerRegistry::default())
        .build()
        .unwrap();
    assert_eq!(engine.page_blocks("T"), PageBlocks::WAITING | PageBlocks::BEDS);

    let page = engine.page("T").unwrap();
    assert_eq!(page.blocks, PageBlocks::BEDS);
    assert!(page.waiting.is_none());
    assert!(page.beds.is_some());

    let report = engine.build_pages().await;
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    let names: Vec<&str> = report.pages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["England", "T"]);
}
