//! Customer assignment persistence

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgPool;
use sqlx::FromRow;
use uuid::Uuid;

use core_kernel::{AgentId, AssignmentId, CompanyCode, CustomerId, Territory};
use domain_assignment::{AssignmentBook, CustomerAssignment};

use crate::error::DatabaseError;
use crate::repositories::codes;
use crate::repositories::rules::window_from;

#[derive(FromRow)]
struct AssignmentRow {
    id: Uuid,
    agent_id: Uuid,
    customer_id: Uuid,
    territory: Option<String>,
    company: String,
    effective_from: NaiveDate,
    effective_to: Option<NaiveDate>,
    priority: i32,
    is_exclusive: bool,
    override_percentage: Option<Decimal>,
    status: String,
    created_at: DateTime<Utc>,
}

impl AssignmentRow {
    fn into_domain(self) -> Result<CustomerAssignment, DatabaseError> {
        Ok(CustomerAssignment {
            id: AssignmentId::from(self.id),
            agent: AgentId::from(self.agent_id),
            customer: CustomerId::from(self.customer_id),
            territory: self.territory.map(Territory::from),
            company: CompanyCode::from(self.company),
            window: window_from(self.effective_from, self.effective_to)?,
            priority: self.priority,
            is_exclusive: self.is_exclusive,
            override_percentage: self.override_percentage,
            status: codes::assignment_status_from(&self.status)?,
            created_at: self.created_at,
        })
    }
}

/// Repository over the customer_assignments table
#[derive(Clone)]
pub struct AssignmentRepository {
    pool: PgPool,
}

impl AssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, assignment: &CustomerAssignment) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO customer_assignments (
                id, agent_id, customer_id, territory, company,
                effective_from, effective_to, priority, is_exclusive,
                override_percentage, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(Uuid::from(assignment.id))
        .bind(Uuid::from(assignment.agent))
        .bind(Uuid::from(assignment.customer))
        .bind(assignment.territory.as_ref().map(|t| t.as_str().to_string()))
        .bind(assignment.company.as_str())
        .bind(assignment.window.from)
        .bind(assignment.window.to)
        .bind(assignment.priority)
        .bind(assignment.is_exclusive)
        .bind(assignment.override_percentage)
        .bind(codes::assignment_status_code(assignment.status))
        .bind(assignment.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn fetch(&self, id: AssignmentId) -> Result<CustomerAssignment, DatabaseError> {
        let row: AssignmentRow =
            sqlx::query_as("SELECT * FROM customer_assignments WHERE id = $1")
                .bind(Uuid::from(id))
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| DatabaseError::NotFound(id.to_string()))?;
        row.into_domain()
    }

    pub async fn set_status(
        &self,
        id: AssignmentId,
        status: domain_assignment::AssignmentStatus,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE customer_assignments SET status = $2 WHERE id = $1")
            .bind(Uuid::from(id))
            .bind(codes::assignment_status_code(status))
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(id.to_string()));
        }
        Ok(())
    }

    pub async fn list_for_company(
        &self,
        company: &CompanyCode,
    ) -> Result<Vec<CustomerAssignment>, DatabaseError> {
        let rows: Vec<AssignmentRow> = sqlx::query_as(
            "SELECT * FROM customer_assignments WHERE company = $1 ORDER BY created_at",
        )
        .bind(company.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(AssignmentRow::into_domain).collect()
    }

    /// Loads the company's assignments into a book, re-running exclusivity
    /// validation on the way in.
    pub async fn load_book(&self, company: &CompanyCode) -> Result<AssignmentBook, DatabaseError> {
        let mut book = AssignmentBook::new();
        for assignment in self.list_for_company(company).await? {
            book.insert(assignment)
                .map_err(|e| DatabaseError::Inconsistent(e.to_string()))?;
        }
        Ok(book)
    }
}
