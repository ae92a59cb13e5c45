use howsmynhs_core::{Metric, PageBlocks};

use crate::Engine;

impl Engine {
    /// Blocks the page of `name` carries.
    ///
    /// - A&E: the trust, or any of its predecessors, has at least the
    ///   configured number of recorded attendance months.
    /// - Beds: same rule over recorded bed periods.
    /// - Deaths: the trust has a row in the deaths table.
    ///
    /// Retired trusts get no blocks.
    #[must_use]
    pub fn page_blocks(&self, name: &str) -> PageBlocks {
        if self.registry().is_retired(name) {
            return PageBlocks::empty();
        }
        let min = &self.config().eligibility;
        let mut blocks = PageBlocks::empty();
        blocks.set(
            PageBlocks::WAITING,
            self.recorded_points(Metric::Attendance, name) >= min.min_waiting_points,
        );
        blocks.set(
            PageBlocks::BEDS,
            self.recorded_points(Metric::Beds, name) >= min.min_bed_points,
        );
        blocks.set(
            PageBlocks::DEATHS,
            self.table(Metric::Deaths)
                .is_ok_and(|(table, _)| table.contains(name)),
        );
        blocks
    }
}
