use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// How often a subscription rebills. `OneTime` subscriptions never rebill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "billing_cycle", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingCycle {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    OneTime,
}

impl BillingCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingCycle::Daily => "DAILY",
            BillingCycle::Weekly => "WEEKLY",
            BillingCycle::Monthly => "MONTHLY",
            BillingCycle::Quarterly => "QUARTERLY",
            BillingCycle::Yearly => "YEARLY",
            BillingCycle::OneTime => "ONE_TIME",
        }
    }

    /// Whether this cycle produces a next billing date at all.
    pub fn is_recurring(&self) -> bool {
        !matches!(self, BillingCycle::OneTime)
    }

    /// Compute the next billing date: one cycle increment after `start`.
    ///
    /// Calendar increments (monthly, quarterly, yearly) clamp to the last
    /// valid day of the target month, so Jan 31 + 1 month lands on Feb 29 in
    /// a leap year and Feb 28 otherwise. Returns `None` for `OneTime`.
    pub fn next_billing_date(&self, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            BillingCycle::Daily => Some(start + Duration::days(1)),
            BillingCycle::Weekly => Some(start + Duration::days(7)),
            BillingCycle::Monthly => start.checked_add_months(Months::new(1)),
            BillingCycle::Quarterly => start.checked_add_months(Months::new(3)),
            BillingCycle::Yearly => start.checked_add_months(Months::new(12)),
            BillingCycle::OneTime => None,
        }
    }
}

impl std::fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BillingCycle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DAILY" => Ok(BillingCycle::Daily),
            "WEEKLY" => Ok(BillingCycle::Weekly),
            "MONTHLY" => Ok(BillingCycle::Monthly),
            "QUARTERLY" => Ok(BillingCycle::Quarterly),
            "YEARLY" => Ok(BillingCycle::Yearly),
            "ONE_TIME" => Ok(BillingCycle::OneTime),
            _ => Err(format!(
                "Invalid billing cycle: {}. Must be one of DAILY, WEEKLY, MONTHLY, QUARTERLY, YEARLY, ONE_TIME",
                s
            )),
        }
    }
}
