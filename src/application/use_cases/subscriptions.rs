use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::{alert_templates, validators::is_valid_alert_days},
    application::use_cases::customers::{CustomerProfile, CustomerRepo},
    domain::entities::{
        billing_cycle::BillingCycle,
        subscription::SubscriptionStatus,
        subscription_alert::{AlertStatus, AlertType},
    },
};

/// Lead times applied when a subscription is created without an explicit
/// `alert_days` list: warn 30, 15, and 7 days before expiry.
pub const DEFAULT_ALERT_DAYS: [i32; 3] = [30, 15, 7];

/// Build the batch of pending expiration alerts for a subscription.
///
/// One alert per lead time, firing `days` days before `end_date`. Lead times
/// whose fire time is not strictly after `now` are silently dropped — the
/// warning window has already passed, which is a policy no-op rather than an
/// error. Duplicate lead times produce duplicate alerts. Without an
/// `end_date` there is nothing to warn about and the batch is empty.
///
/// The customer's contact details are copied into each alert as a snapshot;
/// later changes to the customer record do not rewrite queued alerts.
pub fn build_expiration_alerts(
    subscription_name: &str,
    end_date: Option<DateTime<Utc>>,
    alert_days: &[i32],
    now: DateTime<Utc>,
    recipient_email: Option<&str>,
    recipient_phone: Option<&str>,
) -> Vec<NewSubscriptionAlert> {
    let Some(end_date) = end_date else {
        return Vec::new();
    };

    alert_days
        .iter()
        .filter_map(|&days| {
            let scheduled_for = end_date - Duration::days(i64::from(days));
            if scheduled_for <= now {
                return None;
            }

            let (subject, message) =
                alert_templates::expiration_alert_text(subscription_name, end_date, days);

            Some(NewSubscriptionAlert {
                alert_type: AlertType::Expiration,
                scheduled_for,
                status: AlertStatus::Pending,
                subject,
                message,
                recipient_email: recipient_email.map(str::to_string),
                recipient_phone: recipient_phone.map(str::to_string),
            })
        })
        .collect()
}

// ============================================================================
// Profile Types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionProfile {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub billing_cycle: BillingCycle,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub next_billing_date: Option<DateTime<Utc>>,
    pub alert_days: Vec<i32>,
    pub status: SubscriptionStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionAlertProfile {
    pub id: Uuid,
    pub subscription_id: Uuid,
    pub organization_id: Uuid,
    pub alert_type: AlertType,
    pub scheduled_for: DateTime<Utc>,
    pub status: AlertStatus,
    pub subject: String,
    pub message: String,
    pub recipient_email: Option<String>,
    pub recipient_phone: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionWithAlerts {
    pub subscription: SubscriptionProfile,
    pub alerts: Vec<SubscriptionAlertProfile>,
}

// ============================================================================
// Input Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubscriptionInput {
    pub customer_id: Uuid,
    pub name: String,
    pub billing_cycle: BillingCycle,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    /// Defaults to [30, 15, 7] when omitted.
    pub alert_days: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubscriptionInput {
    pub name: Option<String>,
    pub billing_cycle: Option<BillingCycle>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub alert_days: Option<Vec<i32>>,
    pub status: Option<SubscriptionStatus>,
}

/// Alert value object produced by the scheduler; ids and timestamps are
/// assigned by the persistence layer on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscriptionAlert {
    pub alert_type: AlertType,
    pub scheduled_for: DateTime<Utc>,
    pub status: AlertStatus,
    pub subject: String,
    pub message: String,
    pub recipient_email: Option<String>,
    pub recipient_phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub customer_id: Uuid,
    pub name: String,
    pub billing_cycle: BillingCycle,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub next_billing_date: Option<DateTime<Utc>>,
    pub alert_days: Vec<i32>,
    pub status: SubscriptionStatus,
}

/// Full column state written on update. The use case resolves partial input
/// against the stored row before handing this to the repo, so implementations
/// write every field as-is.
#[derive(Debug, Clone)]
pub struct SubscriptionUpdate {
    pub name: String,
    pub billing_cycle: BillingCycle,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub next_billing_date: Option<DateTime<Utc>>,
    pub alert_days: Vec<i32>,
    pub status: SubscriptionStatus,
}

// ============================================================================
// Repository Traits
// ============================================================================

#[async_trait]
pub trait SubscriptionRepo: Send + Sync {
    async fn get_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> AppResult<Option<SubscriptionProfile>>;

    async fn list_by_organization(
        &self,
        organization_id: Uuid,
    ) -> AppResult<Vec<SubscriptionProfile>>;

    async fn create(
        &self,
        organization_id: Uuid,
        input: &NewSubscription,
    ) -> AppResult<SubscriptionProfile>;

    async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        update: &SubscriptionUpdate,
    ) -> AppResult<SubscriptionProfile>;

    /// Delete the subscription and all of its alerts.
    async fn delete(&self, organization_id: Uuid, id: Uuid) -> AppResult<()>;
}

#[async_trait]
pub trait SubscriptionAlertRepo: Send + Sync {
    async fn list_by_subscription(
        &self,
        organization_id: Uuid,
        subscription_id: Uuid,
    ) -> AppResult<Vec<SubscriptionAlertProfile>>;

    /// Delete the subscription's PENDING alerts and insert `alerts` in their
    /// place, atomically. SENT and FAILED alerts are never touched. A reader
    /// must not be able to observe the deleted-but-not-reinserted state.
    async fn replace_pending(
        &self,
        organization_id: Uuid,
        subscription_id: Uuid,
        alerts: &[NewSubscriptionAlert],
    ) -> AppResult<Vec<SubscriptionAlertProfile>>;
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct SubscriptionUseCases {
    subscription_repo: Arc<dyn SubscriptionRepo>,
    alert_repo: Arc<dyn SubscriptionAlertRepo>,
    customer_repo: Arc<dyn CustomerRepo>,
}

impl SubscriptionUseCases {
    pub fn new(
        subscription_repo: Arc<dyn SubscriptionRepo>,
        alert_repo: Arc<dyn SubscriptionAlertRepo>,
        customer_repo: Arc<dyn CustomerRepo>,
    ) -> Self {
        Self {
            subscription_repo,
            alert_repo,
            customer_repo,
        }
    }

    /// Fetch the customer whose contact details get snapshotted into alerts.
    /// Scoped to the organization, like every other read.
    async fn get_customer_snapshot(
        &self,
        organization_id: Uuid,
        customer_id: Uuid,
    ) -> AppResult<CustomerProfile> {
        self.customer_repo
            .get_by_id(organization_id, customer_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn create_subscription(
        &self,
        organization_id: Uuid,
        input: CreateSubscriptionInput,
    ) -> AppResult<SubscriptionWithAlerts> {
        if input.name.trim().is_empty() {
            return Err(AppError::InvalidInput("Subscription name must not be empty".into()));
        }

        let alert_days = input
            .alert_days
            .unwrap_or_else(|| DEFAULT_ALERT_DAYS.to_vec());
        if !is_valid_alert_days(&alert_days) {
            return Err(AppError::InvalidInput(
                "alert_days must be positive day counts (at most 3650, at most 50 entries)".into(),
            ));
        }

        if let Some(end_date) = input.end_date {
            if end_date <= input.start_date {
                return Err(AppError::InvalidInput("end_date must be after start_date".into()));
            }
        }

        let customer = self
            .get_customer_snapshot(organization_id, input.customer_id)
            .await?;

        let next_billing_date = input.billing_cycle.next_billing_date(input.start_date);

        let subscription = self
            .subscription_repo
            .create(
                organization_id,
                &NewSubscription {
                    customer_id: input.customer_id,
                    name: input.name,
                    billing_cycle: input.billing_cycle,
                    start_date: input.start_date,
                    end_date: input.end_date,
                    next_billing_date,
                    alert_days,
                    status: SubscriptionStatus::Active,
                },
            )
            .await?;

        let batch = build_expiration_alerts(
            &subscription.name,
            subscription.end_date,
            &subscription.alert_days,
            Utc::now(),
            customer.email.as_deref(),
            customer.phone.as_deref(),
        );
        let alerts = self
            .alert_repo
            .replace_pending(organization_id, subscription.id, &batch)
            .await?;

        tracing::info!(
            organization_id = %organization_id,
            subscription_id = %subscription.id,
            alert_count = alerts.len(),
            "Created subscription"
        );

        Ok(SubscriptionWithAlerts { subscription, alerts })
    }

    pub async fn update_subscription(
        &self,
        organization_id: Uuid,
        id: Uuid,
        input: UpdateSubscriptionInput,
    ) -> AppResult<SubscriptionProfile> {
        let existing = self
            .subscription_repo
            .get_by_id(organization_id, id)
            .await?
            .ok_or(AppError::NotFound)?;

        if let Some(name) = &input.name {
            if name.trim().is_empty() {
                return Err(AppError::InvalidInput("Subscription name must not be empty".into()));
            }
        }
        if let Some(days) = &input.alert_days {
            if !is_valid_alert_days(days) {
                return Err(AppError::InvalidInput(
                    "alert_days must be positive day counts (at most 3650, at most 50 entries)"
                        .into(),
                ));
            }
        }

        // Resolve partial input against the stored row. Absent fields keep
        // their stored values.
        let billing_cycle = input.billing_cycle.unwrap_or(existing.billing_cycle);
        let start_date = input.start_date.unwrap_or(existing.start_date);
        let end_date = input.end_date.or(existing.end_date);
        let alert_days = input.alert_days.unwrap_or_else(|| existing.alert_days.clone());
        let name = input.name.unwrap_or_else(|| existing.name.clone());
        let status = input.status.unwrap_or(existing.status);

        if let Some(end) = end_date {
            if end <= start_date {
                return Err(AppError::InvalidInput("end_date must be after start_date".into()));
            }
        }

        // The next billing date is a function of cycle and start date; it only
        // moves when one of them does.
        let cycle_changed =
            billing_cycle != existing.billing_cycle || start_date != existing.start_date;
        let next_billing_date = if cycle_changed {
            billing_cycle.next_billing_date(start_date)
        } else {
            existing.next_billing_date
        };

        let alerts_changed =
            alert_days != existing.alert_days || end_date != existing.end_date;

        let updated = self
            .subscription_repo
            .update(
                organization_id,
                id,
                &SubscriptionUpdate {
                    name,
                    billing_cycle,
                    start_date,
                    end_date,
                    next_billing_date,
                    alert_days,
                    status,
                },
            )
            .await?;

        // Full replace of the pending set, only when its inputs moved.
        // Updates to unrelated fields leave alerts completely untouched.
        if alerts_changed {
            let customer = self
                .get_customer_snapshot(organization_id, updated.customer_id)
                .await?;

            let batch = build_expiration_alerts(
                &updated.name,
                updated.end_date,
                &updated.alert_days,
                Utc::now(),
                customer.email.as_deref(),
                customer.phone.as_deref(),
            );
            let alerts = self
                .alert_repo
                .replace_pending(organization_id, id, &batch)
                .await?;

            tracing::debug!(
                organization_id = %organization_id,
                subscription_id = %id,
                alert_count = alerts.len(),
                "Replaced pending expiration alerts"
            );
        }

        Ok(updated)
    }

    pub async fn get_subscription(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> AppResult<SubscriptionProfile> {
        self.subscription_repo
            .get_by_id(organization_id, id)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn list_subscriptions(
        &self,
        organization_id: Uuid,
    ) -> AppResult<Vec<SubscriptionProfile>> {
        self.subscription_repo.list_by_organization(organization_id).await
    }

    pub async fn delete_subscription(&self, organization_id: Uuid, id: Uuid) -> AppResult<()> {
        // Surface a 404 for unknown ids rather than silently succeeding.
        self.subscription_repo
            .get_by_id(organization_id, id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.subscription_repo.delete(organization_id, id).await
    }

    /// Alerts for a subscription, soonest first — the order the dispatch side
    /// reads them in.
    pub async fn list_alerts(
        &self,
        organization_id: Uuid,
        subscription_id: Uuid,
    ) -> AppResult<Vec<SubscriptionAlertProfile>> {
        self.subscription_repo
            .get_by_id(organization_id, subscription_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut alerts = self
            .alert_repo
            .list_by_subscription(organization_id, subscription_id)
            .await?;
        alerts.sort_by_key(|a| a.scheduled_for);
        Ok(alerts)
    }
}
