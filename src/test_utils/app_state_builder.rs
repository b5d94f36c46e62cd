//! Builder for an AppState wired to in-memory mocks, for route tests.

use std::sync::Arc;

use axum::http::HeaderValue;

use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::customers::{CustomerProfile, CustomerUseCases},
    application::use_cases::subscriptions::{
        SubscriptionAlertProfile, SubscriptionProfile, SubscriptionUseCases,
    },
    infra::config::AppConfig,
    test_utils::mocks::{
        InMemoryCustomerRepo, InMemorySubscriptionAlertRepo, InMemorySubscriptionRepo,
    },
};

#[derive(Default)]
pub struct TestAppStateBuilder {
    customers: Vec<CustomerProfile>,
    subscriptions: Vec<SubscriptionProfile>,
    alerts: Vec<SubscriptionAlertProfile>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customer(mut self, customer: CustomerProfile) -> Self {
        self.customers.push(customer);
        self
    }

    pub fn with_subscription(mut self, subscription: SubscriptionProfile) -> Self {
        self.subscriptions.push(subscription);
        self
    }

    pub fn with_alert(mut self, alert: SubscriptionAlertProfile) -> Self {
        self.alerts.push(alert);
        self
    }

    pub fn build(self) -> AppState {
        let customer_repo = Arc::new(InMemoryCustomerRepo::with_customers(self.customers));
        let subscription_repo = Arc::new(InMemorySubscriptionRepo::with_subscriptions(
            self.subscriptions,
        ));
        let alert_repo = Arc::new(InMemorySubscriptionAlertRepo::new());
        for alert in self.alerts {
            alert_repo.insert(alert);
        }

        let subscription_use_cases = SubscriptionUseCases::new(
            subscription_repo,
            alert_repo,
            customer_repo.clone(),
        );
        let customer_use_cases = CustomerUseCases::new(customer_repo);

        AppState {
            config: Arc::new(test_config()),
            subscription_use_cases: Arc::new(subscription_use_cases),
            customer_use_cases: Arc::new(customer_use_cases),
        }
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        cors_origin: HeaderValue::from_static("http://localhost:3000"),
        database_url: String::new(),
    }
}
