use crate::domain::loan::LoanSummary;
use crate::domain::validation::FieldErrors;
use crate::error::{LoanError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named loan calculation saved by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCalculation {
    pub id: Uuid,
    /// The user the record belongs to. Stores only ever return records to
    /// their owner.
    pub owner: String,
    pub name: String,
    pub calculation: LoanSummary,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for saving a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCalculation {
    pub name: String,
    pub calculation: LoanSummary,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl NewCalculation {
    pub fn new(name: impl Into<String>, calculation: LoanSummary) -> Self {
        Self {
            name: name.into(),
            calculation,
            tags: Vec::new(),
            is_favorite: false,
        }
    }

    /// Validates the request and stamps it into a record for `owner`.
    pub fn into_record(self, owner: &str, now: DateTime<Utc>) -> Result<SavedCalculation> {
        let mut errors = FieldErrors::default();
        let name = self.name.trim();
        if name.is_empty() {
            errors.insert("name", "Name is required");
        }
        if !self.calculation.is_well_formed() {
            errors.insert("calculation", INVALID_CALCULATION);
        }
        if !errors.is_empty() {
            return Err(LoanError::Validation(errors));
        }

        Ok(SavedCalculation {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            name: name.to_string(),
            calculation: self.calculation,
            tags: self.tags,
            is_favorite: self.is_favorite,
            created_at: now,
            updated_at: now,
        })
    }
}

const INVALID_CALCULATION: &str =
    "Calculation must contain valid principal, rate, term, and payment fields";

/// Partial update of a saved calculation. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub calculation: Option<LoanSummary>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
}

impl CalculationUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.calculation.is_none()
            && self.tags.is_none()
            && self.is_favorite.is_none()
    }

    /// Checks the provided fields without applying them.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(LoanError::Validation(FieldErrors::single(
                "update",
                "No valid fields to update",
            )));
        }
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(LoanError::Validation(FieldErrors::single(
                "name",
                "Invalid name field",
            )));
        }
        if let Some(calculation) = &self.calculation
            && !calculation.is_well_formed()
        {
            return Err(LoanError::Validation(FieldErrors::single(
                "calculation",
                INVALID_CALCULATION,
            )));
        }
        Ok(())
    }
}

impl SavedCalculation {
    /// Applies a validated update and bumps `updated_at`.
    pub fn apply(&mut self, update: CalculationUpdate, now: DateTime<Utc>) -> Result<()> {
        update.validate()?;
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(calculation) = update.calculation {
            self.calculation = calculation;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(is_favorite) = update.is_favorite {
            self.is_favorite = is_favorite;
        }
        self.updated_at = now;
        Ok(())
    }
}
