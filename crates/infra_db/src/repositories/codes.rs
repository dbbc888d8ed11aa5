//! Text codes for domain enums
//!
//! Statuses are stored as TEXT so the tables stay readable from psql and
//! the ERP's report builder. Unknown codes surface as Inconsistent, never
//! a panic.

use domain_agent::{AgentStatus, StatementFrequency};
use domain_assignment::AssignmentStatus;
use domain_rules::{CalculationMethod, RuleStatus};
use domain_settlement::{InvoicePaymentStatus, PaymentStatus};

use crate::error::DatabaseError;

pub fn agent_status_code(status: AgentStatus) -> &'static str {
    match status {
        AgentStatus::Active => "Active",
        AgentStatus::Inactive => "Inactive",
        AgentStatus::Suspended => "Suspended",
        AgentStatus::Terminated => "Terminated",
    }
}

pub fn agent_status_from(code: &str) -> Result<AgentStatus, DatabaseError> {
    match code {
        "Active" => Ok(AgentStatus::Active),
        "Inactive" => Ok(AgentStatus::Inactive),
        "Suspended" => Ok(AgentStatus::Suspended),
        "Terminated" => Ok(AgentStatus::Terminated),
        other => Err(DatabaseError::Inconsistent(format!(
            "unknown agent status {other}"
        ))),
    }
}

pub fn frequency_code(frequency: StatementFrequency) -> &'static str {
    match frequency {
        StatementFrequency::Weekly => "Weekly",
        StatementFrequency::Monthly => "Monthly",
        StatementFrequency::Quarterly => "Quarterly",
    }
}

pub fn frequency_from(code: &str) -> Result<StatementFrequency, DatabaseError> {
    match code {
        "Weekly" => Ok(StatementFrequency::Weekly),
        "Monthly" => Ok(StatementFrequency::Monthly),
        "Quarterly" => Ok(StatementFrequency::Quarterly),
        other => Err(DatabaseError::Inconsistent(format!(
            "unknown statement frequency {other}"
        ))),
    }
}

pub fn rule_status_code(status: RuleStatus) -> &'static str {
    match status {
        RuleStatus::Active => "Active",
        RuleStatus::Inactive => "Inactive",
    }
}

pub fn rule_status_from(code: &str) -> Result<RuleStatus, DatabaseError> {
    match code {
        "Active" => Ok(RuleStatus::Active),
        "Inactive" => Ok(RuleStatus::Inactive),
        other => Err(DatabaseError::Inconsistent(format!(
            "unknown rule status {other}"
        ))),
    }
}

pub fn method_code(method: CalculationMethod) -> &'static str {
    match method {
        CalculationMethod::Percentage => "Percentage",
        CalculationMethod::FixedAmount => "Fixed Amount",
        CalculationMethod::Tiered => "Tiered",
        CalculationMethod::Custom => "Custom",
    }
}

pub fn method_from(code: &str) -> Result<CalculationMethod, DatabaseError> {
    match code {
        "Percentage" => Ok(CalculationMethod::Percentage),
        "Fixed Amount" => Ok(CalculationMethod::FixedAmount),
        "Tiered" => Ok(CalculationMethod::Tiered),
        "Custom" => Ok(CalculationMethod::Custom),
        other => Err(DatabaseError::Inconsistent(format!(
            "unknown calculation method {other}"
        ))),
    }
}

pub fn assignment_status_code(status: AssignmentStatus) -> &'static str {
    match status {
        AssignmentStatus::Active => "Active",
        AssignmentStatus::Inactive => "Inactive",
    }
}

pub fn assignment_status_from(code: &str) -> Result<AssignmentStatus, DatabaseError> {
    match code {
        "Active" => Ok(AssignmentStatus::Active),
        "Inactive" => Ok(AssignmentStatus::Inactive),
        other => Err(DatabaseError::Inconsistent(format!(
            "unknown assignment status {other}"
        ))),
    }
}

pub fn payment_status_code(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Pending => "Pending",
        PaymentStatus::Due => "Due",
        PaymentStatus::PartiallyPaid => "Partially Paid",
        PaymentStatus::Paid => "Paid",
        PaymentStatus::Cancelled => "Cancelled",
    }
}

pub fn payment_status_from(code: &str) -> Result<PaymentStatus, DatabaseError> {
    match code {
        "Pending" => Ok(PaymentStatus::Pending),
        "Due" => Ok(PaymentStatus::Due),
        "Partially Paid" => Ok(PaymentStatus::PartiallyPaid),
        "Paid" => Ok(PaymentStatus::Paid),
        "Cancelled" => Ok(PaymentStatus::Cancelled),
        other => Err(DatabaseError::Inconsistent(format!(
            "unknown payment status {other}"
        ))),
    }
}

pub fn invoice_status_code(status: InvoicePaymentStatus) -> &'static str {
    match status {
        InvoicePaymentStatus::Unpaid => "Unpaid",
        InvoicePaymentStatus::PartiallyPaid => "Partially Paid",
        InvoicePaymentStatus::Paid => "Paid",
    }
}

pub fn invoice_status_from(code: &str) -> Result<InvoicePaymentStatus, DatabaseError> {
    match code {
        "Unpaid" => Ok(InvoicePaymentStatus::Unpaid),
        "Partially Paid" => Ok(InvoicePaymentStatus::PartiallyPaid),
        "Paid" => Ok(InvoicePaymentStatus::Paid),
        other => Err(DatabaseError::Inconsistent(format!(
            "unknown invoice payment status {other}"
        ))),
    }
}

pub fn currency_from(code: &str) -> Result<core_kernel::Currency, DatabaseError> {
    code.parse()
        .map_err(|_| DatabaseError::Inconsistent(format!("unknown currency {code}")))
}

pub fn doc_status_from(code: i16) -> Result<core_kernel::DocStatus, DatabaseError> {
    core_kernel::DocStatus::from_code(code)
        .ok_or_else(|| DatabaseError::Inconsistent(format!("unknown doc status {code}")))
}
