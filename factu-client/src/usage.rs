//! Plan usage presenter
//!
//! Turns plan limits and consumption counters into percentages, colour
//! bands and alerts, and decides what the plan screen offers next.

use rust_decimal::Decimal;
use shared::models::{Limit, MyPlan, Plan, PlanResource, SubscriptionInfo};

/// Percentage at which a resource counts as near its limit
pub const NEAR_LIMIT_PERCENT: f64 = 80.0;
/// Percentage at which the limit is reached
pub const LIMIT_REACHED_PERCENT: f64 = 100.0;

const WARNING_PERCENT: f64 = 70.0;
const CRITICAL_PERCENT: f64 = 90.0;

/// Share of `limit` consumed by `usage`, in `[0, 100]`.
///
/// Unlimited is always 0. A zero limit is always 100.
pub fn usage_percent(usage: u64, limit: Limit) -> f64 {
    match limit {
        Limit::Unlimited => 0.0,
        Limit::Max(0) => 100.0,
        Limit::Max(max) => ((usage as f64 * 100.0) / max as f64).min(100.0),
    }
}

/// Render a limit for display
pub fn format_limit(limit: Limit) -> String {
    match limit {
        Limit::Unlimited => "Unlimited".to_string(),
        Limit::Max(n) => n.to_string(),
    }
}

/// Colour band of a usage bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageBand {
    Nominal,
    Warning,
    Critical,
}

impl UsageBand {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= CRITICAL_PERCENT {
            UsageBand::Critical
        } else if percent >= WARNING_PERCENT {
            UsageBand::Warning
        } else {
            UsageBand::Nominal
        }
    }
}

/// Per-resource alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageAlert {
    NearLimit,
    LimitReached,
}

impl UsageAlert {
    pub fn from_percent(percent: f64) -> Option<Self> {
        if percent >= LIMIT_REACHED_PERCENT {
            Some(UsageAlert::LimitReached)
        } else if percent >= NEAR_LIMIT_PERCENT {
            Some(UsageAlert::NearLimit)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UsageAlert::NearLimit => "Near limit",
            UsageAlert::LimitReached => "Limit reached",
        }
    }
}

/// One usage bar
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceUsage {
    pub resource: PlanResource,
    pub used: u64,
    pub limit: Limit,
    pub percent: f64,
    pub band: UsageBand,
    pub alert: Option<UsageAlert>,
}

impl ResourceUsage {
    pub fn new(resource: PlanResource, used: u64, limit: Limit) -> Self {
        let percent = usage_percent(used, limit);
        Self {
            resource,
            used,
            limit,
            percent,
            band: UsageBand::from_percent(percent),
            alert: UsageAlert::from_percent(percent),
        }
    }

    /// `used / limit` as shown next to the bar
    pub fn summary(&self) -> String {
        format!("{} / {}", self.used, format_limit(self.limit))
    }
}

/// Usage of every tracked resource of the current plan
#[derive(Debug, Clone, PartialEq)]
pub struct UsageReport {
    pub plan_name: String,
    pub resources: Vec<ResourceUsage>,
    /// Some limited resource is at or above [`NEAR_LIMIT_PERCENT`]
    pub near_limit: bool,
}

impl UsageReport {
    pub fn from_plan(plan: &MyPlan) -> Self {
        let resources: Vec<ResourceUsage> = PlanResource::ALL
            .into_iter()
            .map(|r| ResourceUsage::new(r, plan.usage.get(r), plan.limits.get(r)))
            .collect();
        let near_limit = resources
            .iter()
            .any(|r| !r.limit.is_unlimited() && r.percent >= NEAR_LIMIT_PERCENT);
        Self {
            plan_name: plan.plan_name.clone(),
            resources,
            near_limit,
        }
    }

    pub fn get(&self, resource: PlanResource) -> Option<&ResourceUsage> {
        self.resources.iter().find(|r| r.resource == resource)
    }
}

/// Plans worth offering as an upgrade: visible, active and priced above
/// the current plan, ordered by `orden` then price.
pub fn upgrade_candidates(plans: &[Plan], current_price: Decimal) -> Vec<&Plan> {
    let mut candidates: Vec<&Plan> = plans
        .iter()
        .filter(|p| p.is_active && p.visible_en_web && p.price > current_price)
        .collect();
    candidates.sort_by(|a, b| {
        a.sort_order
            .cmp(&b.sort_order)
            .then_with(|| a.price.cmp(&b.price))
    });
    candidates
}

/// Primary action of the plan screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAction {
    /// Free plan: pick a paid plan
    Upgrade,
    /// Paid and renewing: cancel at period end
    Cancel,
    /// Cancelled at period end: undo the cancellation
    Reactivate,
    /// Paid plan without a live subscription
    Subscribe,
}

impl PlanAction {
    pub fn resolve(plan: &MyPlan, subscription: Option<&SubscriptionInfo>) -> Self {
        if plan.is_free() {
            return PlanAction::Upgrade;
        }
        match subscription {
            Some(sub) if sub.has_subscription && sub.cancel_at_period_end => PlanAction::Reactivate,
            Some(sub) if sub.is_active() => PlanAction::Cancel,
            _ => PlanAction::Subscribe,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlanAction::Upgrade => "Upgrade plan",
            PlanAction::Cancel => "Cancel subscription",
            PlanAction::Reactivate => "Reactivate subscription",
            PlanAction::Subscribe => "Subscribe",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{FREE_PLAN_ID, OrganizationUsage, PlanCapabilities, PlanLimits, SubscriptionStatus};

    fn my_plan(plan_id: &str, limits: PlanLimits, usage: OrganizationUsage) -> MyPlan {
        MyPlan {
            plan_id: plan_id.into(),
            plan_name: "Plan".into(),
            plan_price: Decimal::ZERO,
            plan_period: "mensual".into(),
            limits,
            usage,
            capabilities: PlanCapabilities::default(),
            history_days: None,
        }
    }

    fn limits(max: i64) -> PlanLimits {
        PlanLimits {
            invoices: max.into(),
            users: max.into(),
            products: max.into(),
            terminals: max.into(),
            customers: max.into(),
        }
    }

    #[test]
    fn test_unlimited_is_zero() {
        assert_eq!(usage_percent(0, Limit::Unlimited), 0.0);
        assert_eq!(usage_percent(1_000_000, Limit::from(-1)), 0.0);
    }

    #[test]
    fn test_zero_limit_is_full() {
        assert_eq!(usage_percent(0, Limit::Max(0)), 100.0);
        assert_eq!(usage_percent(7, Limit::Max(0)), 100.0);
    }

    #[test]
    fn test_percent_is_clamped() {
        assert_eq!(usage_percent(45, Limit::Max(50)), 90.0);
        assert_eq!(usage_percent(80, Limit::Max(50)), 100.0);
        assert_eq!(UsageBand::from_percent(usage_percent(45, Limit::Max(50))), UsageBand::Critical);
    }

    #[test]
    fn test_bands_and_alerts() {
        assert_eq!(UsageBand::from_percent(69.9), UsageBand::Nominal);
        assert_eq!(UsageBand::from_percent(70.0), UsageBand::Warning);
        assert_eq!(UsageBand::from_percent(89.9), UsageBand::Warning);
        assert_eq!(UsageAlert::from_percent(79.0), None);
        assert_eq!(UsageAlert::from_percent(80.0), Some(UsageAlert::NearLimit));
        assert_eq!(UsageAlert::from_percent(100.0), Some(UsageAlert::LimitReached));
    }

    #[test]
    fn test_report_near_limit() {
        let usage = OrganizationUsage {
            invoices_this_month: 40,
            ..Default::default()
        };
        let report = UsageReport::from_plan(&my_plan("basico", limits(50), usage));
        assert!(report.near_limit);
        let invoices = report.get(PlanResource::Invoices).unwrap();
        assert_eq!(invoices.alert, Some(UsageAlert::NearLimit));
        assert_eq!(invoices.summary(), "40 / 50");

        let report = UsageReport::from_plan(&my_plan("pro", limits(-1), usage));
        assert!(!report.near_limit);
        assert_eq!(report.get(PlanResource::Invoices).unwrap().summary(), "40 / Unlimited");
    }

    #[test]
    fn test_upgrade_candidates() {
        let plan = |id: &str, price: i64, orden: i32, visible: bool| Plan {
            id: id.into(),
            name: id.into(),
            price: Decimal::new(price, 0),
            sort_order: orden,
            visible_en_web: visible,
            ..Default::default()
        };
        let plans = vec![
            plan("gratis", 0, 0, true),
            plan("pro", 30, 3, true),
            plan("basico", 10, 2, true),
            plan("oculto", 50, 4, false),
            plan("igual", 10, 1, true),
        ];
        let ids: Vec<&str> = upgrade_candidates(&plans, Decimal::new(10, 0))
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["pro"]);

        let ids: Vec<&str> = upgrade_candidates(&plans, Decimal::ZERO)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["igual", "basico", "pro"]);
    }

    #[test]
    fn test_plan_action() {
        let free = my_plan(FREE_PLAN_ID, limits(10), OrganizationUsage::default());
        let paid = my_plan("pro", limits(10), OrganizationUsage::default());
        let active = SubscriptionInfo {
            has_subscription: true,
            status: Some(SubscriptionStatus::Active),
            ..Default::default()
        };
        let cancelled = SubscriptionInfo {
            cancel_at_period_end: true,
            ..active.clone()
        };

        assert_eq!(PlanAction::resolve(&free, Some(&active)), PlanAction::Upgrade);
        assert_eq!(PlanAction::resolve(&paid, Some(&active)), PlanAction::Cancel);
        assert_eq!(PlanAction::resolve(&paid, Some(&cancelled)), PlanAction::Reactivate);
        assert_eq!(PlanAction::resolve(&paid, None), PlanAction::Subscribe);
    }
}
