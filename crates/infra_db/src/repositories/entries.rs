//! Commission entry persistence
//!
//! Entries and their line items are written together; updates touch only
//! the mutable header fields since line items are immutable once the
//! entry exists.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgPool;
use sqlx::FromRow;
use uuid::Uuid;

use core_kernel::{
    AgentId, CompanyCode, CustomerId, EntryId, InvoiceId, ItemGroup, Money, RuleId,
};
use domain_settlement::{CommissionEntry, CommissionLineItem};

use crate::error::DatabaseError;
use crate::repositories::codes;

#[derive(FromRow)]
struct EntryRow {
    id: Uuid,
    agent_id: Uuid,
    invoice_id: Uuid,
    customer_id: Uuid,
    company: String,
    posting_date: NaiveDate,
    currency: String,
    total_commission: Decimal,
    paid_amount: Decimal,
    payment_status: String,
    invoice_payment_status: String,
    commission_on_payment: bool,
    doc_status: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct ItemRow {
    item_code: String,
    item_group: String,
    qty: Decimal,
    base_amount: Decimal,
    commission_percentage: Option<Decimal>,
    rule_id: Option<Uuid>,
    commission_amount: Decimal,
}

impl ItemRow {
    fn into_domain(self) -> CommissionLineItem {
        CommissionLineItem {
            item_code: self.item_code,
            item_group: ItemGroup::from(self.item_group),
            qty: self.qty,
            base_amount: self.base_amount,
            commission_percentage: self.commission_percentage,
            rule: self.rule_id.map(RuleId::from),
            commission_amount: self.commission_amount,
        }
    }
}

impl EntryRow {
    fn into_domain(self, items: Vec<CommissionLineItem>) -> Result<CommissionEntry, DatabaseError> {
        let currency = codes::currency_from(&self.currency)?;
        Ok(CommissionEntry {
            id: EntryId::from(self.id),
            agent: AgentId::from(self.agent_id),
            invoice: InvoiceId::from(self.invoice_id),
            customer: CustomerId::from(self.customer_id),
            company: CompanyCode::from(self.company),
            posting_date: self.posting_date,
            currency,
            items,
            total_commission: Money::new(self.total_commission, currency),
            paid_amount: Money::new(self.paid_amount, currency),
            payment_status: codes::payment_status_from(&self.payment_status)?,
            invoice_payment_status: codes::invoice_status_from(&self.invoice_payment_status)?,
            commission_on_payment: self.commission_on_payment,
            doc_status: codes::doc_status_from(self.doc_status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository over the commission_entries tables
#[derive(Clone)]
pub struct EntryRepository {
    pool: PgPool,
}

impl EntryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, entry: &CommissionEntry) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;
        Self::insert_with(&mut *tx, entry).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Writes the entry and its items on an existing transaction, so a
    /// caller can batch several entry writes atomically
    pub async fn insert_with(
        conn: &mut sqlx::PgConnection,
        entry: &CommissionEntry,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO commission_entries (
                id, agent_id, invoice_id, customer_id, company, posting_date,
                currency, total_commission, paid_amount, payment_status,
                invoice_payment_status, commission_on_payment, doc_status,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(Uuid::from(entry.id))
        .bind(Uuid::from(entry.agent))
        .bind(Uuid::from(entry.invoice))
        .bind(Uuid::from(entry.customer))
        .bind(entry.company.as_str())
        .bind(entry.posting_date)
        .bind(entry.currency.code())
        .bind(entry.total_commission.amount())
        .bind(entry.paid_amount.amount())
        .bind(codes::payment_status_code(entry.payment_status))
        .bind(codes::invoice_status_code(entry.invoice_payment_status))
        .bind(entry.commission_on_payment)
        .bind(entry.doc_status.code())
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .execute(&mut *conn)
        .await?;

        for item in &entry.items {
            sqlx::query(
                r#"
                INSERT INTO commission_entry_items (
                    id, entry_id, item_code, item_group, qty, base_amount,
                    commission_percentage, rule_id, commission_amount
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(Uuid::from(entry.id))
            .bind(&item.item_code)
            .bind(item.item_group.as_str())
            .bind(item.qty)
            .bind(item.base_amount)
            .bind(item.commission_percentage)
            .bind(item.rule.map(Uuid::from))
            .bind(item.commission_amount)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// Persists the mutable header fields after a state transition
    pub async fn update(&self, entry: &CommissionEntry) -> Result<(), DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        Self::update_with(&mut *conn, entry).await
    }

    /// Header update on an existing transaction
    pub async fn update_with(
        conn: &mut sqlx::PgConnection,
        entry: &CommissionEntry,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE commission_entries SET
                paid_amount = $2, payment_status = $3,
                invoice_payment_status = $4, doc_status = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(entry.id))
        .bind(entry.paid_amount.amount())
        .bind(codes::payment_status_code(entry.payment_status))
        .bind(codes::invoice_status_code(entry.invoice_payment_status))
        .bind(entry.doc_status.code())
        .bind(entry.updated_at)
        .execute(&mut *conn)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(entry.id.to_string()));
        }
        Ok(())
    }

    async fn load_items(&self, entry_id: Uuid) -> Result<Vec<CommissionLineItem>, DatabaseError> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            "SELECT item_code, item_group, qty, base_amount, commission_percentage,
                    rule_id, commission_amount
             FROM commission_entry_items WHERE entry_id = $1",
        )
        .bind(entry_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ItemRow::into_domain).collect())
    }

    async fn hydrate(&self, row: EntryRow) -> Result<CommissionEntry, DatabaseError> {
        let items = self.load_items(row.id).await?;
        row.into_domain(items)
    }

    pub async fn fetch(&self, id: EntryId) -> Result<CommissionEntry, DatabaseError> {
        let row: EntryRow = sqlx::query_as("SELECT * FROM commission_entries WHERE id = $1")
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(id.to_string()))?;
        self.hydrate(row).await
    }

    pub async fn list_for_invoice(
        &self,
        invoice: InvoiceId,
    ) -> Result<Vec<CommissionEntry>, DatabaseError> {
        let rows: Vec<EntryRow> =
            sqlx::query_as("SELECT * FROM commission_entries WHERE invoice_id = $1")
                .bind(Uuid::from(invoice))
                .fetch_all(&self.pool)
                .await?;
        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            entries.push(self.hydrate(row).await?);
        }
        Ok(entries)
    }

    pub async fn list_for_agent(
        &self,
        agent: AgentId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<CommissionEntry>, DatabaseError> {
        let rows: Vec<EntryRow> = sqlx::query_as(
            r#"
            SELECT * FROM commission_entries
            WHERE agent_id = $1
              AND ($2::date IS NULL OR posting_date >= $2)
              AND ($3::date IS NULL OR posting_date <= $3)
            ORDER BY posting_date
            "#,
        )
        .bind(Uuid::from(agent))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            entries.push(self.hydrate(row).await?);
        }
        Ok(entries)
    }

    pub async fn list_for_company(
        &self,
        company: &CompanyCode,
    ) -> Result<Vec<CommissionEntry>, DatabaseError> {
        let rows: Vec<EntryRow> = sqlx::query_as(
            "SELECT * FROM commission_entries WHERE company = $1 ORDER BY posting_date",
        )
        .bind(company.as_str())
        .fetch_all(&self.pool)
        .await?;
        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            entries.push(self.hydrate(row).await?);
        }
        Ok(entries)
    }

    /// Entries still owed commission, across the whole system
    pub async fn list_payable(&self) -> Result<Vec<CommissionEntry>, DatabaseError> {
        let rows: Vec<EntryRow> = sqlx::query_as(
            "SELECT * FROM commission_entries
             WHERE payment_status IN ('Due', 'Partially Paid')
             ORDER BY posting_date",
        )
        .fetch_all(&self.pool)
        .await?;
        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            entries.push(self.hydrate(row).await?);
        }
        Ok(entries)
    }

    /// Submitted, non-terminal entries, used by the daily refresh job.
    /// Partially paid entries stay in scope so their invoice payment
    /// status keeps tracking the invoice.
    pub async fn list_open(&self) -> Result<Vec<CommissionEntry>, DatabaseError> {
        let rows: Vec<EntryRow> = sqlx::query_as(
            "SELECT * FROM commission_entries
             WHERE payment_status IN ('Pending', 'Due', 'Partially Paid')
             ORDER BY posting_date",
        )
        .fetch_all(&self.pool)
        .await?;
        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            entries.push(self.hydrate(row).await?);
        }
        Ok(entries)
    }
}
