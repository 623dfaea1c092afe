use chrono::NaiveDate;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum_macros::EnumString;
use utoipa::ToSchema;

pub const MAX_DESCRIPTION_CHARS: usize = 360;
pub const MAX_BUDGET: f64 = 100_000.0;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl Status {
    /// Fixed display order of the status groups.
    pub const ORDER: [Status; 4] = [
        Status::Draft,
        Status::Submitted,
        Status::Approved,
        Status::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Submitted => "submitted",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificationRequest {
    /// Server-assigned, epoch-millis based.
    #[schema(example = 1735689600000i64)]
    pub id: i64,
    #[schema(example = 1)]
    pub employee_id: i64,
    #[schema(example = "Alice")]
    pub employee_name: String,
    #[schema(example = "AWS Solutions Architect certification")]
    pub description: String,
    #[schema(example = 500.0)]
    pub estimated_budget: f64,
    #[schema(example = "2026-09-01", format = "date", value_type = String)]
    pub expected_date: NaiveDate,
    pub status: Status,
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum ValidationError {
    #[display(fmt = "Description is required")]
    DescriptionRequired,
    #[display(fmt = "Description must be at most {} characters", "MAX_DESCRIPTION_CHARS")]
    DescriptionTooLong,
    #[display(fmt = "Budget must be a positive number")]
    BudgetNotPositive,
    #[display(fmt = "Budget must not exceed {}", "MAX_BUDGET")]
    BudgetTooLarge,
    #[display(fmt = "Date must be today or later")]
    DateInPast,
}

impl std::error::Error for ValidationError {}

/// Submission invariants, shared by the client repository (pre-flight) and
/// the create handler (authoritative). Dates compare at day granularity.
pub fn validate_submission(
    description: &str,
    estimated_budget: f64,
    expected_date: NaiveDate,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(ValidationError::DescriptionRequired);
    }
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooLong);
    }
    if !(estimated_budget > 0.0) {
        return Err(ValidationError::BudgetNotPositive);
    }
    if estimated_budget > MAX_BUDGET {
        return Err(ValidationError::BudgetTooLarge);
    }
    if expected_date < today {
        return Err(ValidationError::DateInPast);
    }
    Ok(())
}
