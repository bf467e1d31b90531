use super::analytics::AnalyticsEvent;
use super::calculation::SavedCalculation;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence port for saved calculations.
///
/// Every lookup is scoped to an owner: a record belonging to someone else is
/// indistinguishable from a missing one.
#[async_trait]
pub trait CalculationStore: Send + Sync {
    /// Inserts or replaces a record keyed by its id.
    async fn store(&self, calculation: SavedCalculation) -> Result<()>;
    async fn get(&self, owner: &str, id: Uuid) -> Result<Option<SavedCalculation>>;
    /// All records of `owner`, newest first.
    async fn list(&self, owner: &str) -> Result<Vec<SavedCalculation>>;
    /// Returns `true` if a record was removed.
    async fn delete(&self, owner: &str, id: Uuid) -> Result<bool>;
}

/// Telemetry port accepting fire-and-forget usage events.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    async fn record(&self, event: AnalyticsEvent) -> Result<()>;
}

pub type CalculationStoreBox = Box<dyn CalculationStore>;
pub type TelemetrySinkBox = Box<dyn TelemetrySink>;
pub type CalculationStoreFactory = Box<dyn Fn() -> CalculationStoreBox + Send + Sync>;
