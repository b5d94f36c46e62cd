//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible
//! defaults. Use the closure parameter to override specific fields as needed.

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::{
    application::use_cases::customers::CustomerProfile,
    application::use_cases::subscriptions::{SubscriptionAlertProfile, SubscriptionProfile},
    domain::entities::{
        billing_cycle::BillingCycle,
        subscription::SubscriptionStatus,
        subscription_alert::{AlertStatus, AlertType},
    },
};

/// Create a test customer with sensible defaults.
pub fn create_test_customer(
    organization_id: Uuid,
    overrides: impl FnOnce(&mut CustomerProfile),
) -> CustomerProfile {
    let mut customer = CustomerProfile {
        id: Uuid::new_v4(),
        organization_id,
        name: "Dana Fischer".to_string(),
        email: Some("dana@example.com".to_string()),
        phone: Some("+1 555 0100".to_string()),
        created_at: Some(test_datetime()),
        updated_at: Some(test_datetime()),
    };
    overrides(&mut customer);
    customer
}

/// Create a test subscription with sensible defaults. No end date by
/// default, so no expiration alerts apply unless a test sets one.
pub fn create_test_subscription(
    organization_id: Uuid,
    customer_id: Uuid,
    overrides: impl FnOnce(&mut SubscriptionProfile),
) -> SubscriptionProfile {
    let start = test_datetime();

    let mut subscription = SubscriptionProfile {
        id: Uuid::new_v4(),
        organization_id,
        customer_id,
        name: "Premium Care Plan".to_string(),
        billing_cycle: BillingCycle::Monthly,
        start_date: start,
        end_date: None,
        next_billing_date: BillingCycle::Monthly.next_billing_date(start),
        alert_days: vec![30, 15, 7],
        status: SubscriptionStatus::Active,
        created_at: Some(start),
        updated_at: Some(start),
    };
    overrides(&mut subscription);
    subscription
}

/// Create a test expiration alert with sensible defaults.
pub fn create_test_alert(
    organization_id: Uuid,
    subscription_id: Uuid,
    overrides: impl FnOnce(&mut SubscriptionAlertProfile),
) -> SubscriptionAlertProfile {
    let mut alert = SubscriptionAlertProfile {
        id: Uuid::new_v4(),
        subscription_id,
        organization_id,
        alert_type: AlertType::Expiration,
        scheduled_for: test_datetime_offset_days(30),
        status: AlertStatus::Pending,
        subject: "Subscription Expiring in 30 Days".to_string(),
        message: "Your subscription \"Premium Care Plan\" will expire on February 14, 2024."
            .to_string(),
        recipient_email: Some("dana@example.com".to_string()),
        recipient_phone: None,
        created_at: Some(test_datetime()),
    };
    overrides(&mut alert);
    alert
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Returns a consistent test datetime (2024-01-15 12:00:00 UTC).
pub fn test_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
}

/// Returns a test datetime offset by the given number of days.
pub fn test_datetime_offset_days(days: i64) -> DateTime<Utc> {
    test_datetime() + Duration::days(days)
}
