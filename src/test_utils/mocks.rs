//! In-memory mock implementations for the repository traits.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::{
    app_error::AppResult,
    application::use_cases::customers::{CreateCustomerInput, CustomerProfile, CustomerRepo},
    application::use_cases::subscriptions::{
        NewSubscription, NewSubscriptionAlert, SubscriptionAlertProfile, SubscriptionAlertRepo,
        SubscriptionProfile, SubscriptionRepo, SubscriptionUpdate,
    },
};

// ============================================================================
// InMemoryCustomerRepo
// ============================================================================

#[derive(Default)]
pub struct InMemoryCustomerRepo {
    pub customers: Mutex<HashMap<Uuid, CustomerProfile>>,
}

impl InMemoryCustomerRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customers(customers: Vec<CustomerProfile>) -> Self {
        let map: HashMap<Uuid, CustomerProfile> =
            customers.into_iter().map(|c| (c.id, c)).collect();
        Self {
            customers: Mutex::new(map),
        }
    }
}

#[async_trait]
impl CustomerRepo for InMemoryCustomerRepo {
    async fn get_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> AppResult<Option<CustomerProfile>> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .get(&id)
            .filter(|c| c.organization_id == organization_id)
            .cloned())
    }

    async fn list_by_organization(
        &self,
        organization_id: Uuid,
    ) -> AppResult<Vec<CustomerProfile>> {
        let mut result: Vec<_> = self
            .customers
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.organization_id == organization_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    async fn create(
        &self,
        organization_id: Uuid,
        input: &CreateCustomerInput,
    ) -> AppResult<CustomerProfile> {
        let now = chrono::Utc::now();
        let customer = CustomerProfile {
            id: Uuid::new_v4(),
            organization_id,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.customers
            .lock()
            .unwrap()
            .insert(customer.id, customer.clone());
        Ok(customer)
    }
}

// ============================================================================
// InMemorySubscriptionRepo
// ============================================================================

#[derive(Default)]
pub struct InMemorySubscriptionRepo {
    pub subscriptions: Mutex<HashMap<Uuid, SubscriptionProfile>>,
}

impl InMemorySubscriptionRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subscriptions(subscriptions: Vec<SubscriptionProfile>) -> Self {
        let map: HashMap<Uuid, SubscriptionProfile> =
            subscriptions.into_iter().map(|s| (s.id, s)).collect();
        Self {
            subscriptions: Mutex::new(map),
        }
    }
}

#[async_trait]
impl SubscriptionRepo for InMemorySubscriptionRepo {
    async fn get_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> AppResult<Option<SubscriptionProfile>> {
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .get(&id)
            .filter(|s| s.organization_id == organization_id)
            .cloned())
    }

    async fn list_by_organization(
        &self,
        organization_id: Uuid,
    ) -> AppResult<Vec<SubscriptionProfile>> {
        let mut result: Vec<_> = self
            .subscriptions
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.organization_id == organization_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    async fn create(
        &self,
        organization_id: Uuid,
        input: &NewSubscription,
    ) -> AppResult<SubscriptionProfile> {
        let now = chrono::Utc::now();
        let subscription = SubscriptionProfile {
            id: Uuid::new_v4(),
            organization_id,
            customer_id: input.customer_id,
            name: input.name.clone(),
            billing_cycle: input.billing_cycle,
            start_date: input.start_date,
            end_date: input.end_date,
            next_billing_date: input.next_billing_date,
            alert_days: input.alert_days.clone(),
            status: input.status,
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.subscriptions
            .lock()
            .unwrap()
            .insert(subscription.id, subscription.clone());
        Ok(subscription)
    }

    async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        update: &SubscriptionUpdate,
    ) -> AppResult<SubscriptionProfile> {
        let mut subscriptions = self.subscriptions.lock().unwrap();
        let subscription = subscriptions
            .get_mut(&id)
            .filter(|s| s.organization_id == organization_id)
            .ok_or(crate::app_error::AppError::NotFound)?;

        subscription.name = update.name.clone();
        subscription.billing_cycle = update.billing_cycle;
        subscription.start_date = update.start_date;
        subscription.end_date = update.end_date;
        subscription.next_billing_date = update.next_billing_date;
        subscription.alert_days = update.alert_days.clone();
        subscription.status = update.status;
        subscription.updated_at = Some(chrono::Utc::now());

        Ok(subscription.clone())
    }

    async fn delete(&self, organization_id: Uuid, id: Uuid) -> AppResult<()> {
        let mut subscriptions = self.subscriptions.lock().unwrap();
        if subscriptions
            .get(&id)
            .is_some_and(|s| s.organization_id == organization_id)
        {
            subscriptions.remove(&id);
        }
        Ok(())
    }
}

// ============================================================================
// InMemorySubscriptionAlertRepo
// ============================================================================

#[derive(Default)]
pub struct InMemorySubscriptionAlertRepo {
    pub alerts: Mutex<HashMap<Uuid, SubscriptionAlertProfile>>,
}

impl InMemorySubscriptionAlertRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an alert directly, bypassing the scheduler (e.g. a SENT record
    /// from an earlier schedule).
    pub fn insert(&self, alert: SubscriptionAlertProfile) {
        self.alerts.lock().unwrap().insert(alert.id, alert);
    }
}

#[async_trait]
impl SubscriptionAlertRepo for InMemorySubscriptionAlertRepo {
    async fn list_by_subscription(
        &self,
        organization_id: Uuid,
        subscription_id: Uuid,
    ) -> AppResult<Vec<SubscriptionAlertProfile>> {
        Ok(self
            .alerts
            .lock()
            .unwrap()
            .values()
            .filter(|a| {
                a.organization_id == organization_id && a.subscription_id == subscription_id
            })
            .cloned()
            .collect())
    }

    async fn replace_pending(
        &self,
        organization_id: Uuid,
        subscription_id: Uuid,
        alerts: &[NewSubscriptionAlert],
    ) -> AppResult<Vec<SubscriptionAlertProfile>> {
        let mut map = self.alerts.lock().unwrap();

        map.retain(|_, a| {
            !(a.organization_id == organization_id
                && a.subscription_id == subscription_id
                && a.status.is_pending())
        });

        let now = chrono::Utc::now();
        let mut created = Vec::with_capacity(alerts.len());
        for alert in alerts {
            let profile = SubscriptionAlertProfile {
                id: Uuid::new_v4(),
                subscription_id,
                organization_id,
                alert_type: alert.alert_type,
                scheduled_for: alert.scheduled_for,
                status: alert.status,
                subject: alert.subject.clone(),
                message: alert.message.clone(),
                recipient_email: alert.recipient_email.clone(),
                recipient_phone: alert.recipient_phone.clone(),
                created_at: Some(now),
            };
            map.insert(profile.id, profile.clone());
            created.push(profile);
        }

        Ok(created)
    }
}
