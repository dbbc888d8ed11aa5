//! Agent directory
//!
//! An in-memory view over agent master records, loaded by the caller for
//! one pipeline invocation. The settlement service consults it to gate
//! entry creation on agent status and commission flags.

use core_kernel::AgentId;

use crate::agent::SalesAgent;

/// Lookup table of agent master records
#[derive(Debug, Clone, Default)]
pub struct AgentDirectory {
    agents: Vec<SalesAgent>,
}

impl AgentDirectory {
    /// Creates an empty directory
    pub fn new() -> Self {
        Self { agents: Vec::new() }
    }

    /// Creates a directory from loaded agent records
    pub fn from_agents(agents: Vec<SalesAgent>) -> Self {
        Self { agents }
    }

    /// Adds an agent to the directory
    pub fn insert(&mut self, agent: SalesAgent) {
        self.agents.push(agent);
    }

    /// Looks up an agent by id
    pub fn get(&self, id: &AgentId) -> Option<&SalesAgent> {
        self.agents.iter().find(|a| &a.id == id)
    }

    /// Returns true if the agent exists, is active, and accrues commission
    pub fn accrues_commission(&self, id: &AgentId) -> bool {
        self.get(id).map_or(false, SalesAgent::accrues_commission)
    }

    /// Iterates over all agents
    pub fn iter(&self) -> impl Iterator<Item = &SalesAgent> {
        self.agents.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentStatus;
    use chrono::NaiveDate;
    use core_kernel::CompanyCode;

    #[test]
    fn test_directory_lookup_and_gating() {
        let mut active = SalesAgent::new(
            "AGT-0001",
            "Active Agent",
            CompanyCode::from("ACME"),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        );
        let mut suspended = SalesAgent::new(
            "AGT-0002",
            "Suspended Agent",
            CompanyCode::from("ACME"),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        );
        suspended.status = AgentStatus::Suspended;
        active.email = Some("active@example.com".to_string());

        let active_id = active.id;
        let suspended_id = suspended.id;
        let directory = AgentDirectory::from_agents(vec![active, suspended]);

        assert!(directory.accrues_commission(&active_id));
        assert!(!directory.accrues_commission(&suspended_id));
        assert!(!directory.accrues_commission(&AgentId::new()));
        assert_eq!(directory.get(&active_id).unwrap().agent_code, "AGT-0001");
    }
}
