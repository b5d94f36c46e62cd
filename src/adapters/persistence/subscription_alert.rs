use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::subscriptions::{
        NewSubscriptionAlert, SubscriptionAlertProfile, SubscriptionAlertRepo,
    },
};

fn row_to_profile(row: &sqlx::postgres::PgRow) -> SubscriptionAlertProfile {
    SubscriptionAlertProfile {
        id: row.get("id"),
        subscription_id: row.get("subscription_id"),
        organization_id: row.get("organization_id"),
        alert_type: row.get("alert_type"),
        scheduled_for: row.get("scheduled_for"),
        status: row.get("status"),
        subject: row.get("subject"),
        message: row.get("message"),
        recipient_email: row.get("recipient_email"),
        recipient_phone: row.get("recipient_phone"),
        created_at: row.get("created_at"),
    }
}

const SELECT_COLS: &str = r#"
    id, subscription_id, organization_id, alert_type, scheduled_for, status,
    subject, message, recipient_email, recipient_phone, created_at
"#;

#[async_trait]
impl SubscriptionAlertRepo for PostgresPersistence {
    async fn list_by_subscription(
        &self,
        organization_id: Uuid,
        subscription_id: Uuid,
    ) -> AppResult<Vec<SubscriptionAlertProfile>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM subscription_alerts
            WHERE organization_id = $1 AND subscription_id = $2
            ORDER BY scheduled_for ASC
            "#,
            SELECT_COLS
        ))
        .bind(organization_id)
        .bind(subscription_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.iter().map(row_to_profile).collect())
    }

    async fn replace_pending(
        &self,
        organization_id: Uuid,
        subscription_id: Uuid,
        alerts: &[NewSubscriptionAlert],
    ) -> AppResult<Vec<SubscriptionAlertProfile>> {
        // Delete-then-insert must not be observable halfway: a concurrent
        // reader either sees the old pending set or the new one.
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        sqlx::query(
            r#"
            DELETE FROM subscription_alerts
            WHERE organization_id = $1 AND subscription_id = $2 AND status = 'pending'
            "#,
        )
        .bind(organization_id)
        .bind(subscription_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::from)?;

        let mut created = Vec::with_capacity(alerts.len());
        for alert in alerts {
            let row = sqlx::query(&format!(
                r#"
                INSERT INTO subscription_alerts
                    (id, subscription_id, organization_id, alert_type, scheduled_for,
                     status, subject, message, recipient_email, recipient_phone)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING {}
                "#,
                SELECT_COLS
            ))
            .bind(Uuid::new_v4())
            .bind(subscription_id)
            .bind(organization_id)
            .bind(alert.alert_type)
            .bind(alert.scheduled_for)
            .bind(alert.status)
            .bind(&alert.subject)
            .bind(&alert.message)
            .bind(&alert.recipient_email)
            .bind(&alert.recipient_phone)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::from)?;
            created.push(row_to_profile(&row));
        }

        tx.commit().await.map_err(AppError::from)?;
        Ok(created)
    }
}
