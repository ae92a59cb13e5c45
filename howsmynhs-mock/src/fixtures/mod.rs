//! Deterministic tables shaped like the published NHS England releases.
//!
//! One merger is modelled: Bedford and Luton & Dunstable report until the
//! merger, Bedfordshire Hospitals reports after it.

use howsmynhs_core::{Cell, MergerRegistry, NhsError};

mod beds;
mod deaths;
mod waiting;

pub use beds::beds_table;
pub use deaths::deaths_table;
pub use waiting::waiting_table;

/// Successor of the modelled merger.
pub const BEDFORDSHIRE: &str = "Bedfordshire Hospitals NHS Foundation Trust";
/// First predecessor of [`BEDFORDSHIRE`].
pub const BEDFORD: &str = "Bedford Hospital NHS Trust";
/// Second predecessor of [`BEDFORDSHIRE`].
pub const LUTON: &str = "Luton And Dunstable University Hospital NHS Foundation Trust";
/// Busy A&E whose four-hour waits have fallen; gains beds.
pub const KINGSTON: &str = "Kingston Hospital NHS Foundation Trust";
/// Small A&E with almost nobody waiting and a flat bed count.
pub const SMALL: &str = "Small Community Hospital NHS Trust";
/// A&E with too few months on record for a page.
pub const SPARSE: &str = "Sparse Hospital NHS Trust";
/// Bed-only trust that closed every bed.
pub const CLOSING: &str = "Closing Hospital NHS Trust";

/// Registry with the single modelled merger.
///
/// # Errors
/// Never in practice; the registry is statically valid.
pub fn registry() -> Result<MergerRegistry, NhsError> {
    MergerRegistry::new([(BEDFORDSHIRE, [BEDFORD, LUTON])])
}

/// `n` cells built from `f(i)`; `None` marks a missing period.
fn row(n: usize, f: impl Fn(usize) -> Option<f64>) -> Vec<Cell> {
    (0..n).map(|i| Cell::from(f(i))).collect()
}
