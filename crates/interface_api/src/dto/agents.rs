//! Agent DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_agent::SalesAgent;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAgentRequest {
    #[validate(length(min = 1))]
    pub agent_code: String,
    #[validate(length(min = 1))]
    pub agent_name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub company: String,
    pub joining_date: NaiveDate,
    pub commission_on_payment: Option<bool>,
    pub auto_create_entries: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub id: Uuid,
    pub agent_code: String,
    pub agent_name: String,
    pub email: Option<String>,
    pub company: String,
    pub status: String,
    pub enable_commission: bool,
    pub commission_on_payment: bool,
    pub joining_date: NaiveDate,
    pub termination_date: Option<NaiveDate>,
}

impl From<&SalesAgent> for AgentResponse {
    fn from(agent: &SalesAgent) -> Self {
        Self {
            id: (agent.id).into(),
            agent_code: agent.agent_code.clone(),
            agent_name: agent.agent_name.clone(),
            email: agent.email.clone(),
            company: agent.company.to_string(),
            status: format!("{:?}", agent.status),
            enable_commission: agent.enable_commission,
            commission_on_payment: agent.commission_on_payment,
            joining_date: agent.joining_date,
            termination_date: agent.termination_date,
        }
    }
}
