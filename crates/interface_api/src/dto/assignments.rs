//! Customer assignment DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_assignment::CustomerAssignment;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAssignmentRequest {
    pub agent_id: Uuid,
    pub customer_id: Uuid,
    pub territory: Option<String>,
    #[validate(length(min = 1))]
    pub company: String,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub is_exclusive: bool,
    pub override_percentage: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub id: Uuid,
    pub agent_id: Uuid,
    pub customer_id: Uuid,
    pub territory: Option<String>,
    pub company: String,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
    pub priority: i32,
    pub is_exclusive: bool,
    pub override_percentage: Option<Decimal>,
    pub status: String,
}

impl From<&CustomerAssignment> for AssignmentResponse {
    fn from(a: &CustomerAssignment) -> Self {
        Self {
            id: a.id.into(),
            agent_id: a.agent.into(),
            customer_id: a.customer.into(),
            territory: a.territory.as_ref().map(|t| t.to_string()),
            company: a.company.to_string(),
            effective_from: a.window.from,
            effective_to: a.window.to,
            priority: a.priority,
            is_exclusive: a.is_exclusive,
            override_percentage: a.override_percentage,
            status: format!("{:?}", a.status),
        }
    }
}
