use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppResult,
    application::use_cases::customers::{CreateCustomerInput, CustomerProfile},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{org_id}/customers", post(create_customer))
        .route("/{org_id}/customers", get(list_customers))
        .route("/{org_id}/customers/{customer_id}", get(get_customer))
}

#[derive(Serialize)]
struct CustomerResponse {
    id: Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl From<CustomerProfile> for CustomerResponse {
    fn from(customer: CustomerProfile) -> Self {
        CustomerResponse {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            created_at: customer.created_at,
        }
    }
}

async fn create_customer(
    State(app_state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Json(input): Json<CreateCustomerInput>,
) -> AppResult<impl IntoResponse> {
    let customer = app_state
        .customer_use_cases
        .create_customer(org_id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}

async fn list_customers(
    State(app_state): State<AppState>,
    Path(org_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let customers = app_state.customer_use_cases.list_customers(org_id).await?;

    let response: Vec<CustomerResponse> =
        customers.into_iter().map(CustomerResponse::from).collect();
    Ok(Json(response))
}

async fn get_customer(
    State(app_state): State<AppState>,
    Path((org_id, customer_id)): Path<(Uuid, Uuid)>,
) -> AppResult<impl IntoResponse> {
    let customer = app_state
        .customer_use_cases
        .get_customer(org_id, customer_id)
        .await?;

    Ok(Json(CustomerResponse::from(customer)))
}
