//! Sales agent persistence

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgPool;
use sqlx::FromRow;
use uuid::Uuid;

use core_kernel::{AgentId, CompanyCode};
use domain_agent::{AgentDirectory, SalesAgent, StatementFrequency};

use crate::error::DatabaseError;
use crate::repositories::codes;

#[derive(FromRow)]
struct AgentRow {
    id: Uuid,
    agent_code: String,
    agent_name: String,
    email: Option<String>,
    company: String,
    status: String,
    enable_commission: bool,
    commission_on_payment: bool,
    auto_create_entries: bool,
    send_statements: bool,
    statement_frequency: String,
    joining_date: NaiveDate,
    termination_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AgentRow {
    fn into_domain(self) -> Result<SalesAgent, DatabaseError> {
        Ok(SalesAgent {
            id: AgentId::from(self.id),
            agent_code: self.agent_code,
            agent_name: self.agent_name,
            email: self.email,
            company: CompanyCode::from(self.company),
            status: codes::agent_status_from(&self.status)?,
            enable_commission: self.enable_commission,
            commission_on_payment: self.commission_on_payment,
            auto_create_entries: self.auto_create_entries,
            send_statements: self.send_statements,
            statement_frequency: codes::frequency_from(&self.statement_frequency)?,
            joining_date: self.joining_date,
            termination_date: self.termination_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository over the sales_agents table
#[derive(Clone)]
pub struct AgentRepository {
    pool: PgPool,
}

impl AgentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, agent: &SalesAgent) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO sales_agents (
                id, agent_code, agent_name, email, company, status,
                enable_commission, commission_on_payment, auto_create_entries,
                send_statements, statement_frequency, joining_date,
                termination_date, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(Uuid::from(agent.id))
        .bind(&agent.agent_code)
        .bind(&agent.agent_name)
        .bind(&agent.email)
        .bind(agent.company.as_str())
        .bind(codes::agent_status_code(agent.status))
        .bind(agent.enable_commission)
        .bind(agent.commission_on_payment)
        .bind(agent.auto_create_entries)
        .bind(agent.send_statements)
        .bind(codes::frequency_code(agent.statement_frequency))
        .bind(agent.joining_date)
        .bind(agent.termination_date)
        .bind(agent.created_at)
        .bind(agent.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn update(&self, agent: &SalesAgent) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE sales_agents SET
                agent_name = $2, email = $3, status = $4,
                enable_commission = $5, commission_on_payment = $6,
                auto_create_entries = $7, send_statements = $8,
                statement_frequency = $9, termination_date = $10, updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(agent.id))
        .bind(&agent.agent_name)
        .bind(&agent.email)
        .bind(codes::agent_status_code(agent.status))
        .bind(agent.enable_commission)
        .bind(agent.commission_on_payment)
        .bind(agent.auto_create_entries)
        .bind(agent.send_statements)
        .bind(codes::frequency_code(agent.statement_frequency))
        .bind(agent.termination_date)
        .bind(agent.updated_at)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(agent.id.to_string()));
        }
        Ok(())
    }

    pub async fn fetch(&self, id: AgentId) -> Result<SalesAgent, DatabaseError> {
        let row: AgentRow = sqlx::query_as("SELECT * FROM sales_agents WHERE id = $1")
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(id.to_string()))?;
        row.into_domain()
    }

    pub async fn list(&self) -> Result<Vec<SalesAgent>, DatabaseError> {
        let rows: Vec<AgentRow> = sqlx::query_as("SELECT * FROM sales_agents ORDER BY agent_code")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(AgentRow::into_domain).collect()
    }

    /// Loads every agent into an in-memory directory for one pipeline run
    pub async fn load_directory(&self) -> Result<AgentDirectory, DatabaseError> {
        Ok(AgentDirectory::from_agents(self.list().await?))
    }

    /// Agents opted into statements at the given cadence
    pub async fn statement_recipients(
        &self,
        frequency: StatementFrequency,
    ) -> Result<Vec<SalesAgent>, DatabaseError> {
        let rows: Vec<AgentRow> = sqlx::query_as(
            r#"
            SELECT * FROM sales_agents
            WHERE send_statements AND statement_frequency = $1 AND email IS NOT NULL
            ORDER BY agent_code
            "#,
        )
        .bind(codes::frequency_code(frequency))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(AgentRow::into_domain).collect()
    }
}
