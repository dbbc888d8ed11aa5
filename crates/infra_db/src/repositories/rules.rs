//! Commission rule persistence
//!
//! A rule spans three tables: the header, one rate row per item group,
//! and tier rows hanging off tiered rates. Writes happen in one
//! transaction so a rule is never half-stored.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgPool;
use sqlx::FromRow;
use uuid::Uuid;

use core_kernel::{AgentId, CompanyCode, EffectiveWindow, ItemGroup, RuleId};
use domain_rules::{CommissionRule, ItemGroupRate, RuleSet, TierRate, TierSchedule};

use crate::error::DatabaseError;
use crate::repositories::codes;

#[derive(FromRow)]
struct RuleRow {
    id: Uuid,
    agent_id: Uuid,
    company: String,
    status: String,
    method: String,
    effective_from: NaiveDate,
    effective_to: Option<NaiveDate>,
    minimum_amount: Option<Decimal>,
    maximum_amount: Option<Decimal>,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct RateRow {
    id: Uuid,
    item_group: String,
    commission_percentage: Decimal,
    fixed_amount: Decimal,
}

#[derive(FromRow)]
struct TierRow {
    from_amount: Decimal,
    to_amount: Option<Decimal>,
    commission_percentage: Decimal,
}

pub(super) fn window_from(
    from: NaiveDate,
    to: Option<NaiveDate>,
) -> Result<EffectiveWindow, DatabaseError> {
    match to {
        Some(to) => EffectiveWindow::bounded(from, to)
            .map_err(|e| DatabaseError::Inconsistent(e.to_string())),
        None => Ok(EffectiveWindow::open(from)),
    }
}

/// Repository over the commission rule tables
#[derive(Clone)]
pub struct RuleRepository {
    pool: PgPool,
}

impl RuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, rule: &CommissionRule) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO commission_rules (
                id, agent_id, company, status, method,
                effective_from, effective_to, minimum_amount, maximum_amount, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(Uuid::from(rule.id))
        .bind(Uuid::from(rule.agent))
        .bind(rule.company.as_str())
        .bind(codes::rule_status_code(rule.status))
        .bind(codes::method_code(rule.method))
        .bind(rule.window.from)
        .bind(rule.window.to)
        .bind(rule.minimum_amount)
        .bind(rule.maximum_amount)
        .bind(rule.created_at)
        .execute(&mut *tx)
        .await?;

        for rate in &rule.rates {
            let rate_id = Uuid::new_v4();
            sqlx::query(
                r#"
                INSERT INTO commission_rule_rates (
                    id, rule_id, item_group, commission_percentage, fixed_amount
                )
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(rate_id)
            .bind(Uuid::from(rule.id))
            .bind(rate.item_group.as_str())
            .bind(rate.commission_percentage)
            .bind(rate.fixed_amount)
            .execute(&mut *tx)
            .await?;

            if let Some(schedule) = &rate.tiers {
                for tier in schedule.tiers() {
                    sqlx::query(
                        r#"
                        INSERT INTO commission_rule_tiers (
                            id, rate_id, from_amount, to_amount, commission_percentage
                        )
                        VALUES ($1, $2, $3, $4, $5)
                        "#,
                    )
                    .bind(Uuid::new_v4())
                    .bind(rate_id)
                    .bind(tier.from_amount)
                    .bind(tier.to_amount)
                    .bind(tier.commission_percentage)
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn set_status(
        &self,
        id: RuleId,
        status: domain_rules::RuleStatus,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE commission_rules SET status = $2 WHERE id = $1")
            .bind(Uuid::from(id))
            .bind(codes::rule_status_code(status))
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn hydrate(&self, row: RuleRow) -> Result<CommissionRule, DatabaseError> {
        let rate_rows: Vec<RateRow> = sqlx::query_as(
            "SELECT id, item_group, commission_percentage, fixed_amount
             FROM commission_rule_rates WHERE rule_id = $1",
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        let mut rates = Vec::with_capacity(rate_rows.len());
        for rate_row in rate_rows {
            let tier_rows: Vec<TierRow> = sqlx::query_as(
                "SELECT from_amount, to_amount, commission_percentage
                 FROM commission_rule_tiers WHERE rate_id = $1 ORDER BY from_amount",
            )
            .bind(rate_row.id)
            .fetch_all(&self.pool)
            .await?;

            let tiers = if tier_rows.is_empty() {
                None
            } else {
                let schedule = TierSchedule::new(
                    tier_rows
                        .into_iter()
                        .map(|t| TierRate::new(t.from_amount, t.to_amount, t.commission_percentage))
                        .collect(),
                )
                .map_err(|e| DatabaseError::Inconsistent(e.to_string()))?;
                Some(schedule)
            };

            rates.push(ItemGroupRate {
                item_group: ItemGroup::from(rate_row.item_group),
                commission_percentage: rate_row.commission_percentage,
                fixed_amount: rate_row.fixed_amount,
                tiers,
            });
        }

        Ok(CommissionRule {
            id: RuleId::from(row.id),
            agent: AgentId::from(row.agent_id),
            company: CompanyCode::from(row.company),
            status: codes::rule_status_from(&row.status)?,
            method: codes::method_from(&row.method)?,
            window: window_from(row.effective_from, row.effective_to)?,
            minimum_amount: row.minimum_amount,
            maximum_amount: row.maximum_amount,
            rates,
            created_at: row.created_at,
        })
    }

    pub async fn fetch(&self, id: RuleId) -> Result<CommissionRule, DatabaseError> {
        let row: RuleRow = sqlx::query_as("SELECT * FROM commission_rules WHERE id = $1")
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(id.to_string()))?;
        self.hydrate(row).await
    }

    pub async fn list_for_company(
        &self,
        company: &CompanyCode,
    ) -> Result<Vec<CommissionRule>, DatabaseError> {
        let rows: Vec<RuleRow> = sqlx::query_as(
            "SELECT * FROM commission_rules WHERE company = $1 ORDER BY effective_from",
        )
        .bind(company.as_str())
        .fetch_all(&self.pool)
        .await?;

        let mut rules = Vec::with_capacity(rows.len());
        for row in rows {
            rules.push(self.hydrate(row).await?);
        }
        Ok(rules)
    }

    /// Loads the company's rules into a RuleSet. Overlap validation runs
    /// again on load so corrupted data cannot enter the pipeline.
    pub async fn load_rule_set(&self, company: &CompanyCode) -> Result<RuleSet, DatabaseError> {
        let mut set = RuleSet::new();
        for rule in self.list_for_company(company).await? {
            set.insert(rule)
                .map_err(|e| DatabaseError::Inconsistent(e.to_string()))?;
        }
        Ok(set)
    }
}
