//! Scheduled jobs
//!
//! The host scheduler (cron, systemd timers) invokes these through thin
//! binaries or an admin endpoint. Each job takes its repositories as
//! arguments so it can run against a test pool.

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{info, warn};

use core_kernel::{CompanyCode, InvoiceId, NotificationSender, PortError};
use domain_agent::{CommissionStatement, StatementFrequency};
use domain_settlement::{summarize_by_agent, InvoiceSnapshot, PaymentStatus};
use infra_db::{AgentRepository, DatabaseError, EntryRepository};

/// Read access to invoice state held by the host ERP
#[async_trait]
pub trait InvoiceSource: Send + Sync {
    async fn fetch(&self, id: InvoiceId) -> Result<Option<InvoiceSnapshot>, PortError>;
}

/// Result of the daily entry refresh
#[derive(Debug, Default)]
pub struct RefreshOutcome {
    pub refreshed: usize,
    pub unchanged: usize,
    pub failed: usize,
}

/// Daily job: re-checks open entries against current invoice state.
///
/// Payment hooks normally keep entries current; this job catches updates
/// the hooks missed. One failing entry does not stop the rest.
pub async fn refresh_open_entries(
    entries: &EntryRepository,
    invoices: &dyn InvoiceSource,
) -> Result<RefreshOutcome, DatabaseError> {
    let open = entries.list_open().await?;
    let mut outcome = RefreshOutcome::default();

    for mut entry in open {
        let invoice = match invoices.fetch(entry.invoice).await {
            Ok(Some(invoice)) => invoice,
            Ok(None) => {
                warn!(entry = %entry.id, invoice = %entry.invoice, "invoice no longer exists");
                outcome.failed += 1;
                continue;
            }
            Err(err) => {
                warn!(entry = %entry.id, error = %err, "invoice lookup failed");
                outcome.failed += 1;
                continue;
            }
        };

        let before = entry.payment_status;
        entry.record_invoice_payment(&invoice);
        if entry.payment_status == before {
            outcome.unchanged += 1;
            continue;
        }
        match entries.update(&entry).await {
            Ok(()) => outcome.refreshed += 1,
            Err(err) => {
                warn!(entry = %entry.id, error = %err, "entry refresh failed");
                outcome.failed += 1;
            }
        }
    }

    info!(
        refreshed = outcome.refreshed,
        unchanged = outcome.unchanged,
        failed = outcome.failed,
        "open entry refresh complete"
    );
    Ok(outcome)
}

/// Periodic job: emails commission statements to opted-in agents.
///
/// Returns how many statements went out. Agents with no entries in the
/// period are skipped.
pub async fn send_commission_statements(
    agents: &AgentRepository,
    entries: &EntryRepository,
    notifier: &dyn NotificationSender,
    frequency: StatementFrequency,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<usize, DatabaseError> {
    let recipients = agents.statement_recipients(frequency).await?;
    let mut sent = 0;

    for agent in recipients {
        let Some(email) = agent.email.clone() else {
            continue;
        };
        let agent_entries = entries.list_for_agent(agent.id, Some(from), Some(to)).await?;
        if agent_entries.is_empty() {
            continue;
        }

        let mut pending = rust_decimal::Decimal::ZERO;
        let mut due = rust_decimal::Decimal::ZERO;
        let mut paid = rust_decimal::Decimal::ZERO;
        for entry in &agent_entries {
            paid += entry.paid_amount.amount();
            match entry.payment_status {
                PaymentStatus::Pending => pending += entry.total_commission.amount(),
                PaymentStatus::Due | PaymentStatus::PartiallyPaid => {
                    due += entry.outstanding().amount()
                }
                _ => {}
            }
        }

        let statement =
            CommissionStatement::new(&agent, from, to, agent_entries.len(), pending, due, paid);
        if let Err(err) = notifier
            .send(&[email], &statement.subject(), &statement.body())
            .await
        {
            warn!(agent = %agent.id, error = %err, "statement delivery failed");
            continue;
        }
        sent += 1;
    }

    info!(sent, frequency = ?frequency, "commission statements sent");
    Ok(sent)
}

/// Monthly job: mails a per-agent commission summary to the back office
pub async fn send_monthly_summary(
    entries: &EntryRepository,
    notifier: &dyn NotificationSender,
    company: &CompanyCode,
    recipients: &[String],
    from: NaiveDate,
    to: NaiveDate,
) -> Result<(), DatabaseError> {
    if recipients.is_empty() {
        return Ok(());
    }

    let all = entries.list_for_company(company).await?;
    let in_period: Vec<_> = all
        .into_iter()
        .filter(|e| e.posting_date >= from && e.posting_date <= to)
        .collect();
    let summaries = summarize_by_agent(&in_period);

    let mut body = format!(
        "Commission summary for {} from {} to {}\n\n",
        company, from, to
    );
    for s in &summaries {
        body.push_str(&format!(
            "Agent {}: {} entries, total {} {}, due {}, paid {}\n",
            s.agent, s.entry_count, s.total_commission, s.currency, s.due_amount, s.paid_amount
        ));
    }
    if summaries.is_empty() {
        body.push_str("No commission activity in this period.\n");
    }

    let subject = format!("Monthly commission report - {company}");
    if let Err(err) = notifier.send(recipients, &subject, &body).await {
        warn!(error = %err, "monthly summary delivery failed");
    }
    Ok(())
}
