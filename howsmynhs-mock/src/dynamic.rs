//! A source whose table loads are driven by a test at runtime.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use howsmynhs_core::{MergerRegistry, MetricTable, NhsError, TableSource};

use crate::fixtures;

/// Instruction for how a table load should behave.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(NhsError),
    /// Hang indefinitely (simulate a stalled download).
    Hang,
}

struct InternalState {
    waiting: MockBehavior<MetricTable>,
    beds: MockBehavior<MetricTable>,
    deaths: MockBehavior<Option<MetricTable>>,
    registry: MockBehavior<MergerRegistry>,
    calls: usize,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior of the A&E table load.
    pub async fn set_waiting(&self, behavior: MockBehavior<MetricTable>) {
        self.state.lock().await.waiting = behavior;
    }

    /// Set the behavior of the bed table load.
    pub async fn set_beds(&self, behavior: MockBehavior<MetricTable>) {
        self.state.lock().await.beds = behavior;
    }

    /// Set the behavior of the deaths table load.
    pub async fn set_deaths(&self, behavior: MockBehavior<Option<MetricTable>>) {
        self.state.lock().await.deaths = behavior;
    }

    /// Set the behavior of the registry load.
    pub async fn set_registry(&self, behavior: MockBehavior<MergerRegistry>) {
        self.state.lock().await.registry = behavior;
    }

    /// Number of table loads served so far.
    pub async fn calls(&self) -> usize {
        self.state.lock().await.calls
    }
}

/// A source that defers all behavior to an external controller.
///
/// Every table starts as the matching fixture.
pub struct DynamicMockSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockSource {
    /// Create a new dynamic mock source and its controller.
    ///
    /// # Errors
    /// Returns any error building the fixture tables.
    pub fn new_with_controller(
        name: &'static str,
    ) -> Result<(Arc<dyn TableSource>, DynamicMockController), NhsError> {
        let state = Arc::new(Mutex::new(InternalState {
            waiting: MockBehavior::Return(fixtures::waiting_table()?),
            beds: MockBehavior::Return(fixtures::beds_table()?),
            deaths: MockBehavior::Return(Some(fixtures::deaths_table()?)),
            registry: MockBehavior::Return(fixtures::registry()?),
            calls: 0,
        }));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        Ok((me as Arc<dyn TableSource>, controller))
    }

    async fn serve<T, F>(&self, pick: F) -> Result<T, NhsError>
    where
        F: FnOnce(&InternalState) -> MockBehavior<T>,
    {
        // Acquire behavior snapshot without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls += 1;
            pick(&guard)
        };
        match behavior {
            MockBehavior::Return(v) => Ok(v),
            MockBehavior::Fail(e) => Err(e),
            MockBehavior::Hang => std::future::pending().await,
        }
    }
}

#[async_trait]
impl TableSource for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn waiting(&self) -> Result<MetricTable, NhsError> {
        self.serve(|s| s.waiting.clone()).await
    }

    async fn beds(&self) -> Result<MetricTable, NhsError> {
        self.serve(|s| s.beds.clone()).await
    }

    async fn deaths(&self) -> Result<Option<MetricTable>, NhsError> {
        self.serve(|s| s.deaths.clone()).await
    }

    async fn registry(&self) -> Result<MergerRegistry, NhsError> {
        self.serve(|s| s.registry.clone()).await
    }
}
