use crate::domain::loan::LoanSummary;
use crate::error::{LoanError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;
use uuid::Uuid;

/// An anonymous usage event.
///
/// Events are free-form JSON objects; no field other than the server-side
/// enrichment is guaranteed. Nothing identifying a person is ever added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalyticsEvent(Map<String, Value>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Random session identifier that is not linked to any user.
pub fn new_session_id() -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("sess_{}", &raw[..13])
}

impl AnalyticsEvent {
    /// Accepts a client payload, which must be a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(LoanError::InvalidData("Invalid analytics data".to_string())),
        }
    }

    fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self(Map::new()),
        }
    }

    /// Usage record for a completed calculation. Money is rounded to whole
    /// units so individual loans cannot be reconstructed.
    pub fn calculation(summary: &LoanSummary, session_id: &str, now: DateTime<Utc>) -> Self {
        Self::from_json(json!({
            "type": "calculation",
            "principal": summary.principal.round(),
            "interestRate": summary.annual_rate_percent,
            "termYears": summary.term_years,
            "monthlyPayment": summary.monthly_payment.round(),
            "totalInterest": summary.total_interest.round(),
            "timestamp": timestamp(now),
            "sessionId": session_id,
        }))
    }

    pub fn export(
        format: ExportFormat,
        schedule_length: usize,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self::from_json(json!({
            "type": "export",
            "exportType": format,
            "scheduleLength": schedule_length,
            "timestamp": timestamp(now),
            "sessionId": session_id,
        }))
    }

    pub fn page_view(referrer: Option<&str>, session_id: &str, now: DateTime<Utc>) -> Self {
        Self::from_json(json!({
            "type": "pageview",
            "referrer": referrer.unwrap_or("direct"),
            "timestamp": timestamp(now),
            "sessionId": session_id,
        }))
    }

    /// Adds the server-side fields. Existing client values for these keys are
    /// overwritten.
    pub fn enrich(&mut self, now: DateTime<Utc>, environment: &str, version: &str) {
        self.0
            .insert("serverTimestamp".to_string(), Value::from(timestamp(now)));
        self.0
            .insert("environment".to_string(), Value::from(environment));
        self.0.insert("version".to_string(), Value::from(version));
    }

    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
