use crate::config::Config;
use crate::domain::analytics::AnalyticsEvent;
use crate::domain::calculation::{CalculationUpdate, NewCalculation, SavedCalculation};
use crate::domain::history::History;
use crate::domain::loan::{AmortizationEntry, LoanSummary};
use crate::domain::ports::{CalculationStoreBox, TelemetrySinkBox};
use crate::domain::validation::LoanInput;
use crate::error::{LoanError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

/// Request to calculate a loan from raw text inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculateRequest {
    pub input: LoanInput,
    #[serde(default)]
    pub options: CalculateOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateOptions {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub include_amortization: bool,
}

/// A summary stamped with when and in which currency it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    #[serde(flatten)]
    pub summary: LoanSummary,
    pub timestamp: DateTime<Utc>,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResponse {
    pub calculation: CalculationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amortization: Option<Vec<AmortizationEntry>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationList {
    pub calculations: Vec<SavedCalculation>,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime_ms: u64,
    pub environment: String,
}

/// Entry point for everything a client can ask of the calculator.
///
/// `LoanService` validates and computes loans, manages saved calculations
/// through the [`CalculationStore`](crate::domain::ports::CalculationStore)
/// port and forwards usage events to the
/// [`TelemetrySink`](crate::domain::ports::TelemetrySink) port.
pub struct LoanService {
    config: Config,
    store: CalculationStoreBox,
    telemetry: TelemetrySinkBox,
    history: RwLock<History>,
    started: Instant,
}

impl LoanService {
    /// Creates a new `LoanService` instance.
    ///
    /// # Arguments
    ///
    /// * `config` - Runtime settings (environment, version, limits).
    /// * `store` - The store for saved calculations.
    /// * `telemetry` - The sink receiving analytics events.
    pub fn new(config: Config, store: CalculationStoreBox, telemetry: TelemetrySinkBox) -> Self {
        Self {
            config,
            store,
            telemetry,
            history: RwLock::new(History::default()),
            started: Instant::now(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validates the text input and computes the loan.
    ///
    /// The schedule is only generated when `include_amortization` is set.
    pub async fn calculate(&self, request: &CalculateRequest) -> Result<CalculationResponse> {
        let terms = request.input.parse_with(&self.config.limits)?;
        let summary = terms.summary()?;
        let amortization = if request.options.include_amortization {
            Some(terms.schedule()?)
        } else {
            None
        };

        self.history.write().await.push(summary);
        info!(
            principal = summary.principal,
            payments = summary.number_of_payments,
            monthly_payment = summary.monthly_payment,
            "loan calculated"
        );

        let currency = request
            .options
            .currency
            .clone()
            .unwrap_or_else(|| self.config.currency.clone());

        Ok(CalculationResponse {
            calculation: CalculationResult {
                summary,
                timestamp: Utc::now(),
                currency,
            },
            amortization,
        })
    }

    /// Calculations performed by this service, most recent first.
    pub async fn recent(&self) -> Vec<LoanSummary> {
        self.history.read().await.iter().copied().collect()
    }

    pub async fn save(&self, owner: &str, calculation: NewCalculation) -> Result<SavedCalculation> {
        let record = calculation.into_record(owner, Utc::now())?;
        self.store.store(record.clone()).await?;
        info!(id = %record.id, owner, "calculation saved");
        Ok(record)
    }

    pub async fn list(&self, owner: &str) -> Result<CalculationList> {
        let calculations = self.store.list(owner).await?;
        let count = calculations.len();
        Ok(CalculationList {
            calculations,
            count,
        })
    }

    pub async fn get(&self, owner: &str, id: Uuid) -> Result<SavedCalculation> {
        self.store
            .get(owner, id)
            .await?
            .ok_or(LoanError::NotFound(id))
    }

    pub async fn update(
        &self,
        owner: &str,
        id: Uuid,
        update: CalculationUpdate,
    ) -> Result<SavedCalculation> {
        update.validate()?;
        let mut record = self.get(owner, id).await?;
        record.apply(update, Utc::now())?;
        self.store.store(record.clone()).await?;
        info!(id = %id, owner, "calculation updated");
        Ok(record)
    }

    pub async fn delete(&self, owner: &str, id: Uuid) -> Result<Uuid> {
        if !self.store.delete(owner, id).await? {
            return Err(LoanError::NotFound(id));
        }
        info!(id = %id, owner, "calculation deleted");
        Ok(id)
    }

    /// Accepts a client-supplied analytics payload.
    ///
    /// Rejects anything that is not a JSON object; sink failures are returned
    /// to the caller.
    pub async fn record_event(&self, payload: serde_json::Value) -> Result<()> {
        let mut event = AnalyticsEvent::from_value(payload)?;
        event.enrich(Utc::now(), &self.config.environment, &self.config.version);
        self.telemetry.record(event).await
    }

    /// Fire-and-forget variant of [`record_event`](Self::record_event) for
    /// events produced internally. Failures are logged and dropped.
    pub async fn track(&self, mut event: AnalyticsEvent) {
        event.enrich(Utc::now(), &self.config.environment, &self.config.version);
        if let Err(e) = self.telemetry.record(event).await {
            warn!(error = %e, "analytics tracking failed");
        }
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            status: HealthStatus::Healthy,
            timestamp: Utc::now(),
            version: self.config.version.clone(),
            uptime_ms: self.started.elapsed().as_millis() as u64,
            environment: self.config.environment.clone(),
        }
    }
}
