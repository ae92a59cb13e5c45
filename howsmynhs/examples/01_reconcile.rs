use howsmynhs::{Availability, Metric};
use howsmynhs_core::{normalize_table, reconcile};
use howsmynhs_mock::fixtures::{self, BEDFORDSHIRE};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load the fixture bed table and registry.
    let beds = normalize_table(fixtures::beds_table()?);
    let registry = fixtures::registry()?;
    let preds = registry.predecessors(BEDFORDSHIRE).unwrap_or_default();

    println!("{BEDFORDSHIRE} was formed from:");
    for p in preds {
        println!(" - {p}");
    }

    // 2. Fold the predecessors' history into the successor under both rules.
    let grid = beds.grid(Metric::Beds)?;
    for availability in [Availability::AnySource, Availability::AllPredecessors] {
        let series = reconcile(grid, beds.rows(), BEDFORDSHIRE, &registry, availability)?;
        println!("\n## {availability:?}");
        for ((period, cell), shown) in beds.periods().iter().zip(&series.values).zip(&series.mask) {
            match cell.value() {
                Some(v) if *shown => println!(" - {period}: {v}"),
                _ => println!(" - {period}: (not shown)"),
            }
        }
    }

    Ok(())
}
