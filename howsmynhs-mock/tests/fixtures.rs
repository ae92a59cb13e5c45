use howsmynhs_core::{Metric, TableSource, normalize_table};
use howsmynhs_mock::MockSource;
use howsmynhs_mock::fixtures::{
    BEDFORD, BEDFORDSHIRE, CLOSING, KINGSTON, LUTON, SPARSE, beds_table, deaths_table, registry,
    waiting_table,
};

#[tokio::test]
async fn mock_serves_every_table() {
    let src = MockSource::new();
    assert_eq!(src.name(), "howsmynhs-mock");
    let waiting = src.waiting().await.unwrap();
    assert_eq!(waiting.periods().len(), 12);
    assert!(waiting.grid(Metric::Attendance).is_ok());
    assert!(waiting.grid(Metric::Waiting).is_ok());
    assert!(src.beds().await.unwrap().grid(Metric::Beds).is_ok());
    assert!(src.deaths().await.unwrap().is_some());
    let reg = src.registry().await.unwrap();
    assert_eq!(reg.predecessors(BEDFORDSHIRE).unwrap(), [BEDFORD, LUTON]);
}

#[tokio::test]
async fn without_deaths_serves_no_deaths_table() {
    let src = MockSource::without_deaths();
    assert!(src.deaths().await.unwrap().is_none());
}

#[test]
fn bed_names_match_waiting_names_once_normalised() {
    let waiting = waiting_table().unwrap();
    let beds = normalize_table(beds_table().unwrap());
    for name in [BEDFORD, LUTON, BEDFORDSHIRE, KINGSTON, "England"] {
        assert!(waiting.contains(name), "{name} missing from A&E table");
        assert!(beds.contains(name), "{name} missing from bed table");
    }
    assert!(beds.contains(CLOSING));
    assert!(!beds.contains(SPARSE));
}

#[test]
fn predecessors_stop_reporting_when_the_successor_starts() {
    let waiting = waiting_table().unwrap();
    assert_eq!(waiting.present_count(Metric::Waiting, BEDFORD), 10);
    assert_eq!(waiting.present_count(Metric::Waiting, LUTON), 10);
    assert_eq!(waiting.present_count(Metric::Waiting, BEDFORDSHIRE), 2);
    assert_eq!(waiting.present_count(Metric::Attendance, SPARSE), 5);
}

#[test]
fn deaths_and_registry_fixtures_are_valid() {
    let deaths = normalize_table(deaths_table().unwrap());
    assert_eq!(deaths.periods().first().map(String::as_str), Some("2020-04-01"));
    assert_eq!(deaths.present_count(Metric::Deaths, KINGSTON), 9);
    let reg = registry().unwrap();
    assert!(reg.is_retired(BEDFORD));
    assert!(reg.is_successor(BEDFORDSHIRE));
}
