//! Subscription routes: CRUD plus the expiration-alert read side.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppResult,
    application::use_cases::subscriptions::{
        CreateSubscriptionInput, SubscriptionAlertProfile, SubscriptionProfile,
        UpdateSubscriptionInput,
    },
    domain::entities::{
        billing_cycle::BillingCycle,
        subscription::SubscriptionStatus,
        subscription_alert::{AlertStatus, AlertType},
    },
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{org_id}/subscriptions", post(create_subscription))
        .route("/{org_id}/subscriptions", get(list_subscriptions))
        .route(
            "/{org_id}/subscriptions/{subscription_id}",
            get(get_subscription),
        )
        .route(
            "/{org_id}/subscriptions/{subscription_id}",
            patch(update_subscription),
        )
        .route(
            "/{org_id}/subscriptions/{subscription_id}",
            delete(delete_subscription),
        )
        .route(
            "/{org_id}/subscriptions/{subscription_id}/alerts",
            get(list_alerts),
        )
}

// ============================================================================
// Types
// ============================================================================

#[derive(Serialize)]
struct SubscriptionResponse {
    id: Uuid,
    customer_id: Uuid,
    name: String,
    billing_cycle: BillingCycle,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    next_billing_date: Option<DateTime<Utc>>,
    alert_days: Vec<i32>,
    status: SubscriptionStatus,
    created_at: Option<DateTime<Utc>>,
}

impl From<SubscriptionProfile> for SubscriptionResponse {
    fn from(subscription: SubscriptionProfile) -> Self {
        SubscriptionResponse {
            id: subscription.id,
            customer_id: subscription.customer_id,
            name: subscription.name,
            billing_cycle: subscription.billing_cycle,
            start_date: subscription.start_date,
            end_date: subscription.end_date,
            next_billing_date: subscription.next_billing_date,
            alert_days: subscription.alert_days,
            status: subscription.status,
            created_at: subscription.created_at,
        }
    }
}

#[derive(Serialize)]
struct AlertResponse {
    id: Uuid,
    alert_type: AlertType,
    scheduled_for: DateTime<Utc>,
    status: AlertStatus,
    subject: String,
    message: String,
    recipient_email: Option<String>,
    recipient_phone: Option<String>,
}

impl From<SubscriptionAlertProfile> for AlertResponse {
    fn from(alert: SubscriptionAlertProfile) -> Self {
        AlertResponse {
            id: alert.id,
            alert_type: alert.alert_type,
            scheduled_for: alert.scheduled_for,
            status: alert.status,
            subject: alert.subject,
            message: alert.message,
            recipient_email: alert.recipient_email,
            recipient_phone: alert.recipient_phone,
        }
    }
}

#[derive(Serialize)]
struct CreateSubscriptionResponse {
    subscription: SubscriptionResponse,
    alerts: Vec<AlertResponse>,
}

// ============================================================================
// Handlers
// ============================================================================

async fn create_subscription(
    State(app_state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Json(input): Json<CreateSubscriptionInput>,
) -> AppResult<impl IntoResponse> {
    let created = app_state
        .subscription_use_cases
        .create_subscription(org_id, input)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateSubscriptionResponse {
            subscription: SubscriptionResponse::from(created.subscription),
            alerts: created.alerts.into_iter().map(AlertResponse::from).collect(),
        }),
    ))
}

async fn list_subscriptions(
    State(app_state): State<AppState>,
    Path(org_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let subscriptions = app_state
        .subscription_use_cases
        .list_subscriptions(org_id)
        .await?;

    let response: Vec<SubscriptionResponse> = subscriptions
        .into_iter()
        .map(SubscriptionResponse::from)
        .collect();
    Ok(Json(response))
}

async fn get_subscription(
    State(app_state): State<AppState>,
    Path((org_id, subscription_id)): Path<(Uuid, Uuid)>,
) -> AppResult<impl IntoResponse> {
    let subscription = app_state
        .subscription_use_cases
        .get_subscription(org_id, subscription_id)
        .await?;

    Ok(Json(SubscriptionResponse::from(subscription)))
}

async fn update_subscription(
    State(app_state): State<AppState>,
    Path((org_id, subscription_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateSubscriptionInput>,
) -> AppResult<impl IntoResponse> {
    let subscription = app_state
        .subscription_use_cases
        .update_subscription(org_id, subscription_id, input)
        .await?;

    Ok(Json(SubscriptionResponse::from(subscription)))
}

async fn delete_subscription(
    State(app_state): State<AppState>,
    Path((org_id, subscription_id)): Path<(Uuid, Uuid)>,
) -> AppResult<impl IntoResponse> {
    app_state
        .subscription_use_cases
        .delete_subscription(org_id, subscription_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn list_alerts(
    State(app_state): State<AppState>,
    Path((org_id, subscription_id)): Path<(Uuid, Uuid)>,
) -> AppResult<impl IntoResponse> {
    let alerts = app_state
        .subscription_use_cases
        .list_alerts(org_id, subscription_id)
        .await?;

    let response: Vec<AlertResponse> = alerts.into_iter().map(AlertResponse::from).collect();
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use chrono::Duration;
    use serde_json::json;

    use crate::test_utils::{TestAppStateBuilder, create_test_customer};

    struct TestContext {
        server: TestServer,
        org_id: Uuid,
        customer_id: Uuid,
    }

    fn test_context() -> TestContext {
        let org_id = Uuid::new_v4();
        let customer = create_test_customer(org_id, |_| {});
        let customer_id = customer.id;

        let app_state = TestAppStateBuilder::new().with_customer(customer).build();
        TestContext {
            server: TestServer::new(router().with_state(app_state)).unwrap(),
            org_id,
            customer_id,
        }
    }

    fn create_payload(ctx: &TestContext) -> serde_json::Value {
        json!({
            "customer_id": ctx.customer_id,
            "name": "Premium Care Plan",
            "billing_cycle": "MONTHLY",
            "start_date": Utc::now(),
            "end_date": Utc::now() + Duration::days(90),
        })
    }

    async fn create_subscription_id(ctx: &TestContext) -> Uuid {
        let response = ctx
            .server
            .post(&format!("/{}/subscriptions", ctx.org_id))
            .json(&create_payload(ctx))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        body["subscription"]["id"].as_str().unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn create_subscription_returns_computed_schedule() {
        let ctx = test_context();

        let response = ctx
            .server
            .post(&format!("/{}/subscriptions", ctx.org_id))
            .json(&create_payload(&ctx))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: serde_json::Value = response.json();

        assert_eq!(body["subscription"]["billing_cycle"], "MONTHLY");
        assert_eq!(body["subscription"]["status"], "ACTIVE");
        assert!(body["subscription"]["next_billing_date"].is_string());
        assert_eq!(body["subscription"]["alert_days"], json!([30, 15, 7]));

        let alerts = body["alerts"].as_array().unwrap();
        assert_eq!(alerts.len(), 3);
        for alert in alerts {
            assert_eq!(alert["alert_type"], "EXPIRATION");
            assert_eq!(alert["status"], "PENDING");
            assert_eq!(alert["recipient_email"], "dana@example.com");
        }
    }

    #[tokio::test]
    async fn create_subscription_rejects_malformed_billing_cycle() {
        let ctx = test_context();
        let mut payload = create_payload(&ctx);
        payload["billing_cycle"] = json!("FORTNIGHTLY");

        let response = ctx
            .server
            .post(&format!("/{}/subscriptions", ctx.org_id))
            .json(&payload)
            .await;

        // Rejected during deserialization, before any computation runs
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn create_subscription_rejects_missing_start_date() {
        let ctx = test_context();
        let mut payload = create_payload(&ctx);
        payload.as_object_mut().unwrap().remove("start_date");

        let response = ctx
            .server
            .post(&format!("/{}/subscriptions", ctx.org_id))
            .json(&payload)
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn create_subscription_rejects_invalid_alert_days() {
        let ctx = test_context();
        let mut payload = create_payload(&ctx);
        payload["alert_days"] = json!([30, -1]);

        let response = ctx
            .server
            .post(&format!("/{}/subscriptions", ctx.org_id))
            .json(&payload)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn get_missing_subscription_returns_not_found() {
        let ctx = test_context();

        let response = ctx
            .server
            .get(&format!("/{}/subscriptions/{}", ctx.org_id, Uuid::new_v4()))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn alerts_are_listed_soonest_first() {
        let ctx = test_context();
        let subscription_id = create_subscription_id(&ctx).await;

        let response = ctx
            .server
            .get(&format!(
                "/{}/subscriptions/{}/alerts",
                ctx.org_id, subscription_id
            ))
            .await;

        response.assert_status_ok();
        let alerts: serde_json::Value = response.json();
        let alerts = alerts.as_array().unwrap();
        assert_eq!(alerts.len(), 3);

        let scheduled: Vec<&str> = alerts
            .iter()
            .map(|a| a["scheduled_for"].as_str().unwrap())
            .collect();
        let mut sorted = scheduled.clone();
        sorted.sort();
        assert_eq!(scheduled, sorted);

        // 30-day lead fires first
        assert_eq!(alerts[0]["subject"], "Subscription Expiring in 30 Days");
    }

    #[tokio::test]
    async fn renaming_does_not_touch_alerts() {
        let ctx = test_context();
        let subscription_id = create_subscription_id(&ctx).await;
        let alerts_path = format!("/{}/subscriptions/{}/alerts", ctx.org_id, subscription_id);

        let before: serde_json::Value = ctx.server.get(&alerts_path).await.json();

        let response = ctx
            .server
            .patch(&format!("/{}/subscriptions/{}", ctx.org_id, subscription_id))
            .json(&json!({ "name": "Renamed Plan" }))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "Renamed Plan");

        let after: serde_json::Value = ctx.server.get(&alerts_path).await.json();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn shrinking_alert_days_replaces_the_pending_set() {
        let ctx = test_context();
        let subscription_id = create_subscription_id(&ctx).await;

        let response = ctx
            .server
            .patch(&format!("/{}/subscriptions/{}", ctx.org_id, subscription_id))
            .json(&json!({ "alert_days": [7] }))
            .await;
        response.assert_status_ok();

        let alerts: serde_json::Value = ctx
            .server
            .get(&format!(
                "/{}/subscriptions/{}/alerts",
                ctx.org_id, subscription_id
            ))
            .await
            .json();
        let alerts = alerts.as_array().unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0]["subject"], "Subscription Expiring in 7 Days");
    }

    #[tokio::test]
    async fn delete_subscription_removes_it() {
        let ctx = test_context();
        let subscription_id = create_subscription_id(&ctx).await;
        let path = format!("/{}/subscriptions/{}", ctx.org_id, subscription_id);

        let response = ctx.server.delete(&path).await;
        response.assert_status(StatusCode::NO_CONTENT);

        let response = ctx.server.get(&path).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn subscriptions_are_invisible_across_organizations() {
        let ctx = test_context();
        let subscription_id = create_subscription_id(&ctx).await;

        let response = ctx
            .server
            .get(&format!(
                "/{}/subscriptions/{}",
                Uuid::new_v4(),
                subscription_id
            ))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}
