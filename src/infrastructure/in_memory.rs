use crate::domain::analytics::AnalyticsEvent;
use crate::domain::calculation::SavedCalculation;
use crate::domain::ports::{CalculationStore, TelemetrySink};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// A thread-safe in-memory store for saved calculations.
///
/// Uses `Arc<RwLock<HashMap<Uuid, SavedCalculation>>>` to allow shared concurrent access.
/// Ideal for testing or single-run CLI sessions where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryCalculationStore {
    calculations: Arc<RwLock<HashMap<Uuid, SavedCalculation>>>,
}

impl InMemoryCalculationStore {
    /// Creates a new, empty in-memory calculation store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CalculationStore for InMemoryCalculationStore {
    async fn store(&self, calculation: SavedCalculation) -> Result<()> {
        let mut calculations = self.calculations.write().await;
        calculations.insert(calculation.id, calculation);
        Ok(())
    }

    async fn get(&self, owner: &str, id: Uuid) -> Result<Option<SavedCalculation>> {
        let calculations = self.calculations.read().await;
        Ok(calculations.get(&id).filter(|c| c.owner == owner).cloned())
    }

    async fn list(&self, owner: &str) -> Result<Vec<SavedCalculation>> {
        let calculations = self.calculations.read().await;
        let mut owned: Vec<SavedCalculation> = calculations
            .values()
            .filter(|c| c.owner == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn delete(&self, owner: &str, id: Uuid) -> Result<bool> {
        let mut calculations = self.calculations.write().await;
        match calculations.get(&id) {
            Some(c) if c.owner == owner => {
                calculations.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Telemetry sink that keeps every event in memory.
#[derive(Default, Clone)]
pub struct InMemoryTelemetry {
    events: Arc<RwLock<Vec<AnalyticsEvent>>>,
}

impl InMemoryTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl TelemetrySink for InMemoryTelemetry {
    async fn record(&self, event: AnalyticsEvent) -> Result<()> {
        self.events.write().await.push(event);
        Ok(())
    }
}

/// Telemetry sink that writes each event to the `tracing` log.
#[derive(Default, Clone, Copy)]
pub struct LogTelemetry;

#[async_trait]
impl TelemetrySink for LogTelemetry {
    async fn record(&self, event: AnalyticsEvent) -> Result<()> {
        let kind = event.kind().unwrap_or("unknown");
        let payload = serde_json::to_string(&event)?;
        info!(target: "loancalc::analytics", kind, %payload, "analytics event");
        Ok(())
    }
}
