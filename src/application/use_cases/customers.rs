use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::validators::is_valid_email,
};

/// Customer contact record. Subscriptions snapshot `email`/`phone` into their
/// alerts at generation time rather than referencing this row.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerProfile {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerInput {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[async_trait]
pub trait CustomerRepo: Send + Sync {
    async fn get_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> AppResult<Option<CustomerProfile>>;

    async fn list_by_organization(&self, organization_id: Uuid)
    -> AppResult<Vec<CustomerProfile>>;

    async fn create(
        &self,
        organization_id: Uuid,
        input: &CreateCustomerInput,
    ) -> AppResult<CustomerProfile>;
}

#[derive(Clone)]
pub struct CustomerUseCases {
    customer_repo: Arc<dyn CustomerRepo>,
}

impl CustomerUseCases {
    pub fn new(customer_repo: Arc<dyn CustomerRepo>) -> Self {
        Self { customer_repo }
    }

    pub async fn create_customer(
        &self,
        organization_id: Uuid,
        input: CreateCustomerInput,
    ) -> AppResult<CustomerProfile> {
        if input.name.trim().is_empty() {
            return Err(AppError::InvalidInput("Customer name must not be empty".into()));
        }
        if let Some(email) = &input.email {
            if !is_valid_email(email) {
                return Err(AppError::InvalidInput(format!("Invalid email address: {}", email)));
            }
        }
        if let Some(phone) = &input.phone {
            if phone.trim().is_empty() {
                return Err(AppError::InvalidInput("Phone number must not be empty".into()));
            }
        }

        self.customer_repo.create(organization_id, &input).await
    }

    pub async fn get_customer(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> AppResult<CustomerProfile> {
        self.customer_repo
            .get_by_id(organization_id, id)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn list_customers(&self, organization_id: Uuid) -> AppResult<Vec<CustomerProfile>> {
        self.customer_repo.list_by_organization(organization_id).await
    }
}
