//! Mock table sources for tests and examples.
//!
//! - [`MockSource`] serves the deterministic tables in [`fixtures`].
//! - [`dynamic::DynamicMockSource`] lets a test switch each table load to
//!   succeed, fail or hang while the engine is running.
#![warn(missing_docs)]

use async_trait::async_trait;
use howsmynhs_core::{MergerRegistry, MetricTable, NhsError, TableSource};

pub mod dynamic;
pub mod fixtures;

/// Mock source for CI-safe examples. Serves deterministic data from static fixtures.
pub struct MockSource {
    with_deaths: bool,
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSource {
    /// Source serving every fixture table.
    #[must_use]
    pub const fn new() -> Self {
        Self { with_deaths: true }
    }

    /// Source without a deaths table, like releases before April 2020.
    #[must_use]
    pub const fn without_deaths() -> Self {
        Self { with_deaths: false }
    }
}

#[async_trait]
impl TableSource for MockSource {
    fn name(&self) -> &'static str {
        "howsmynhs-mock"
    }

    async fn waiting(&self) -> Result<MetricTable, NhsError> {
        fixtures::waiting_table()
    }

    async fn beds(&self) -> Result<MetricTable, NhsError> {
        fixtures::beds_table()
    }

    async fn deaths(&self) -> Result<Option<MetricTable>, NhsError> {
        if self.with_deaths {
            fixtures::deaths_table().map(Some)
        } else {
            Ok(None)
        }
    }

    async fn registry(&self) -> Result<MergerRegistry, NhsError> {
        fixtures::registry()
    }
}
