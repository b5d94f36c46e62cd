use std::sync::Arc;

use crate::{
    application::use_cases::customers::CustomerUseCases,
    application::use_cases::subscriptions::SubscriptionUseCases,
    infra::config::AppConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub subscription_use_cases: Arc<SubscriptionUseCases>,
    pub customer_use_cases: Arc<CustomerUseCases>,
}
