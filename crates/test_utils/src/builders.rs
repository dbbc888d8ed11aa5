//! Fluent builders for domain objects

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{
    AgentId, CompanyCode, Currency, CustomerId, EffectiveWindow, ItemGroup, Territory,
};
use domain_agent::{SalesAgent, StatementFrequency};
use domain_assignment::CustomerAssignment;
use domain_rules::{CalculationMethod, CommissionRule, ItemGroupRate, TierSchedule};
use domain_settlement::{InvoiceLine, InvoiceSnapshot};

fn default_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Builds sales agents with sensible defaults
pub struct AgentBuilder {
    agent: SalesAgent,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            agent: SalesAgent::new(
                "AGT-0001",
                "Test Agent",
                CompanyCode::from("ACME"),
                default_date(),
            ),
        }
    }

    pub fn id(mut self, id: AgentId) -> Self {
        self.agent.id = id;
        self
    }

    pub fn code(mut self, code: &str) -> Self {
        self.agent.agent_code = code.to_string();
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.agent.email = Some(email.to_string());
        self
    }

    pub fn commission_disabled(mut self) -> Self {
        self.agent.enable_commission = false;
        self
    }

    pub fn earns_regardless_of_payment(mut self) -> Self {
        self.agent.commission_on_payment = false;
        self
    }

    pub fn manual_entries(mut self) -> Self {
        self.agent.auto_create_entries = false;
        self
    }

    pub fn with_statements(mut self, frequency: StatementFrequency) -> Self {
        self.agent.send_statements = true;
        self.agent.statement_frequency = frequency;
        self
    }

    pub fn build(self) -> SalesAgent {
        self.agent
    }
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds commission rules with sensible defaults
pub struct RuleBuilder {
    rule: CommissionRule,
}

impl RuleBuilder {
    pub fn percentage(agent: AgentId, item_group: &str, pct: Decimal) -> Self {
        Self {
            rule: CommissionRule::new(
                agent,
                CompanyCode::from("ACME"),
                CalculationMethod::Percentage,
                EffectiveWindow::open(default_date()),
                vec![ItemGroupRate::percentage(ItemGroup::from(item_group), pct)],
            ),
        }
    }

    pub fn fixed(agent: AgentId, item_group: &str, per_unit: Decimal) -> Self {
        Self {
            rule: CommissionRule::new(
                agent,
                CompanyCode::from("ACME"),
                CalculationMethod::FixedAmount,
                EffectiveWindow::open(default_date()),
                vec![ItemGroupRate::fixed(ItemGroup::from(item_group), per_unit)],
            ),
        }
    }

    pub fn tiered(agent: AgentId, item_group: &str, tiers: TierSchedule) -> Self {
        Self {
            rule: CommissionRule::new(
                agent,
                CompanyCode::from("ACME"),
                CalculationMethod::Tiered,
                EffectiveWindow::open(default_date()),
                vec![ItemGroupRate::tiered(ItemGroup::from(item_group), tiers)],
            ),
        }
    }

    pub fn window(mut self, window: EffectiveWindow) -> Self {
        self.rule.window = window;
        self
    }

    pub fn bounds(mut self, minimum: Option<Decimal>, maximum: Option<Decimal>) -> Self {
        self.rule.minimum_amount = minimum;
        self.rule.maximum_amount = maximum;
        self
    }

    pub fn add_rate(mut self, rate: ItemGroupRate) -> Self {
        self.rule.rates.push(rate);
        self
    }

    pub fn build(self) -> CommissionRule {
        self.rule
    }
}

/// Builds customer assignments with sensible defaults
pub struct AssignmentBuilder {
    assignment: CustomerAssignment,
}

impl AssignmentBuilder {
    pub fn new(agent: AgentId, customer: CustomerId) -> Self {
        Self {
            assignment: CustomerAssignment::new(
                agent,
                customer,
                CompanyCode::from("ACME"),
                EffectiveWindow::open(default_date()),
            ),
        }
    }

    pub fn territory(mut self, territory: &str) -> Self {
        self.assignment.territory = Some(Territory::from(territory));
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.assignment.priority = priority;
        self
    }

    pub fn exclusive(mut self) -> Self {
        self.assignment.is_exclusive = true;
        self
    }

    pub fn override_percentage(mut self, pct: Decimal) -> Self {
        self.assignment.override_percentage = Some(pct);
        self
    }

    pub fn window(mut self, window: EffectiveWindow) -> Self {
        self.assignment.window = window;
        self
    }

    pub fn build(self) -> CustomerAssignment {
        self.assignment
    }
}

/// Builds invoice snapshots with sensible defaults
pub struct InvoiceBuilder {
    invoice: InvoiceSnapshot,
}

impl InvoiceBuilder {
    pub fn new(customer: CustomerId) -> Self {
        Self {
            invoice: InvoiceSnapshot {
                id: core_kernel::InvoiceId::new(),
                customer,
                territory: None,
                company: CompanyCode::from("ACME"),
                posting_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                currency: Currency::USD,
                grand_total: dec!(0),
                outstanding_amount: dec!(0),
                lines: Vec::new(),
            },
        }
    }

    pub fn posting_date(mut self, date: NaiveDate) -> Self {
        self.invoice.posting_date = date;
        self
    }

    pub fn territory(mut self, territory: &str) -> Self {
        self.invoice.territory = Some(Territory::from(territory));
        self
    }

    /// Adds a line and grows the totals accordingly
    pub fn line(mut self, item_code: &str, item_group: &str, qty: Decimal, base: Decimal) -> Self {
        self.invoice.lines.push(InvoiceLine {
            item_code: item_code.to_string(),
            item_group: ItemGroup::from(item_group),
            qty,
            base_amount: base,
        });
        self.invoice.grand_total += base;
        self.invoice.outstanding_amount += base;
        self
    }

    /// Marks part of the invoice as paid
    pub fn paid(mut self, amount: Decimal) -> Self {
        self.invoice.outstanding_amount -= amount;
        self
    }

    pub fn build(self) -> InvoiceSnapshot {
        self.invoice
    }
}
