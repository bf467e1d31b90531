use crate::domain::loan::LoanTerms;
use crate::error::{LoanError, Result};
use crate::format::{format_number, parse_currency};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Policy bounds applied to user-supplied loan inputs.
///
/// These are product limits rather than mathematical ones; the engine itself
/// accepts any finite input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanLimits {
    pub max_amount: f64,
    pub max_rate: f64,
    pub max_term: f64,
}

impl Default for LoanLimits {
    fn default() -> Self {
        Self {
            max_amount: 10_000_000.0,
            max_rate: 50.0,
            max_term: 50.0,
        }
    }
}

/// Field-level outcome of validating the three loan inputs.
///
/// A `None` field is valid. All three fields are always checked so callers
/// can display every problem at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub amount: Option<String>,
    pub rate: Option<String>,
    pub term: Option<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.amount.is_none() && self.rate.is_none() && self.term.is_none()
    }

    pub fn into_field_errors(self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for (field, message) in [("amount", self.amount), ("rate", self.rate), ("term", self.term)]
        {
            if let Some(message) = message {
                errors.insert(field, message);
            }
        }
        errors
    }
}

/// Human-readable messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.insert(field, message);
        errors
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Raw text inputs as typed by a user or sent by a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub rate: String,
    #[serde(default)]
    pub term: String,
}

impl LoanInput {
    pub fn new(amount: impl Into<String>, rate: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            rate: rate.into(),
            term: term.into(),
        }
    }

    pub fn validate(&self) -> ValidationResult {
        validate_loan_inputs(&self.amount, &self.rate, &self.term)
    }

    /// Validates the text fields and converts them into typed terms.
    pub fn parse(&self) -> Result<LoanTerms> {
        self.parse_with(&LoanLimits::default())
    }

    pub fn parse_with(&self, limits: &LoanLimits) -> Result<LoanTerms> {
        let result = limits.validate(&self.amount, &self.rate, &self.term);
        if !result.is_valid() {
            return Err(LoanError::Validation(result.into_field_errors()));
        }
        // Validation guarantees all three parse.
        match (
            parse_currency(&self.amount),
            parse_number(&self.rate),
            parse_number(&self.term),
        ) {
            (Some(principal), Some(rate), Some(term)) => Ok(LoanTerms::new(principal, rate, term)),
            _ => Err(LoanError::Validation(result.into_field_errors())),
        }
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Checks the three loan inputs against the default [`LoanLimits`].
pub fn validate_loan_inputs(amount: &str, rate: &str, term: &str) -> ValidationResult {
    LoanLimits::default().validate(amount, rate, term)
}

impl LoanLimits {
    pub fn validate(&self, amount: &str, rate: &str, term: &str) -> ValidationResult {
        ValidationResult {
            amount: self.check_amount(amount),
            rate: self.check_rate(rate),
            term: self.check_term(term),
        }
    }

    fn check_amount(&self, text: &str) -> Option<String> {
        if is_blank(text) {
            return Some("Loan amount is required".to_string());
        }
        match parse_currency(text) {
            Some(value) if value.is_finite() && value > 0.0 => {
                if value > self.max_amount {
                    Some(format!(
                        "Amount cannot exceed ${}",
                        format_number(self.max_amount, 0)
                    ))
                } else {
                    None
                }
            }
            _ => Some("Please enter a valid positive amount".to_string()),
        }
    }

    fn check_rate(&self, text: &str) -> Option<String> {
        if is_blank(text) {
            return Some("Interest rate is required".to_string());
        }
        match parse_number(text) {
            Some(value) if value.is_finite() && value >= 0.0 => {
                if value > self.max_rate {
                    Some(format!(
                        "Interest rate seems unusually high (>{}%)",
                        self.max_rate
                    ))
                } else {
                    None
                }
            }
            _ => Some("Please enter a valid rate (0 or higher)".to_string()),
        }
    }

    fn check_term(&self, text: &str) -> Option<String> {
        if is_blank(text) {
            return Some("Loan term is required".to_string());
        }
        match parse_number(text) {
            Some(value) if value.is_finite() && value > 0.0 => {
                if value > self.max_term {
                    Some(format!("Loan term cannot exceed {} years", self.max_term))
                } else {
                    None
                }
            }
            _ => Some("Please enter a valid positive number of years".to_string()),
        }
    }
}
