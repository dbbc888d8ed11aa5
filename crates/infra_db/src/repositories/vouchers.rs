//! Payment voucher persistence

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgPool;
use sqlx::FromRow;
use uuid::Uuid;

use core_kernel::{AgentId, CompanyCode, DocStatus, EntryId, Money, VoucherId};
use domain_settlement::{PaymentVoucher, VoucherLine};

use crate::error::DatabaseError;
use crate::repositories::codes;

#[derive(FromRow)]
struct VoucherRow {
    id: Uuid,
    agent_id: Uuid,
    company: String,
    posting_date: NaiveDate,
    currency: String,
    doc_status: i16,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct LineRow {
    entry_id: Uuid,
    amount: Decimal,
}

/// Repository over the payment_vouchers tables
#[derive(Clone)]
pub struct VoucherRepository {
    pool: PgPool,
}

impl VoucherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, voucher: &PaymentVoucher) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO payment_vouchers (
                id, agent_id, company, posting_date, currency, doc_status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::from(voucher.id))
        .bind(Uuid::from(voucher.agent))
        .bind(voucher.company.as_str())
        .bind(voucher.posting_date)
        .bind(voucher.currency.code())
        .bind(voucher.doc_status.code())
        .bind(voucher.created_at)
        .execute(&mut *tx)
        .await?;

        for line in &voucher.lines {
            sqlx::query(
                r#"
                INSERT INTO payment_voucher_lines (id, voucher_id, entry_id, amount)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(Uuid::from(voucher.id))
            .bind(Uuid::from(line.entry))
            .bind(line.amount.amount())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn set_doc_status(
        &self,
        id: VoucherId,
        status: DocStatus,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE payment_vouchers SET doc_status = $2 WHERE id = $1")
            .bind(Uuid::from(id))
            .bind(status.code())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(id.to_string()));
        }
        Ok(())
    }

    pub async fn fetch(&self, id: VoucherId) -> Result<PaymentVoucher, DatabaseError> {
        let row: VoucherRow = sqlx::query_as("SELECT * FROM payment_vouchers WHERE id = $1")
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(id.to_string()))?;

        let currency = codes::currency_from(&row.currency)?;
        let line_rows: Vec<LineRow> = sqlx::query_as(
            "SELECT entry_id, amount FROM payment_voucher_lines WHERE voucher_id = $1",
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(PaymentVoucher {
            id: VoucherId::from(row.id),
            agent: AgentId::from(row.agent_id),
            company: CompanyCode::from(row.company),
            posting_date: row.posting_date,
            currency,
            lines: line_rows
                .into_iter()
                .map(|l| VoucherLine {
                    entry: EntryId::from(l.entry_id),
                    amount: Money::new(l.amount, currency),
                })
                .collect(),
            doc_status: codes::doc_status_from(row.doc_status)?,
            created_at: row.created_at,
        })
    }
}
