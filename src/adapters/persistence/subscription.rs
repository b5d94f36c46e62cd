use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::subscriptions::{
        NewSubscription, SubscriptionProfile, SubscriptionRepo, SubscriptionUpdate,
    },
};

fn row_to_profile(row: &sqlx::postgres::PgRow) -> SubscriptionProfile {
    SubscriptionProfile {
        id: row.get("id"),
        organization_id: row.get("organization_id"),
        customer_id: row.get("customer_id"),
        name: row.get("name"),
        billing_cycle: row.get("billing_cycle"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        next_billing_date: row.get("next_billing_date"),
        alert_days: row.get("alert_days"),
        status: row.get("status"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

const SELECT_COLS: &str = r#"
    id, organization_id, customer_id, name, billing_cycle, start_date, end_date,
    next_billing_date, alert_days, status, created_at, updated_at
"#;

#[async_trait]
impl SubscriptionRepo for PostgresPersistence {
    async fn get_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> AppResult<Option<SubscriptionProfile>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM subscriptions WHERE organization_id = $1 AND id = $2",
            SELECT_COLS
        ))
        .bind(organization_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.as_ref().map(row_to_profile))
    }

    async fn list_by_organization(
        &self,
        organization_id: Uuid,
    ) -> AppResult<Vec<SubscriptionProfile>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM subscriptions WHERE organization_id = $1 ORDER BY created_at DESC",
            SELECT_COLS
        ))
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.iter().map(row_to_profile).collect())
    }

    async fn create(
        &self,
        organization_id: Uuid,
        input: &NewSubscription,
    ) -> AppResult<SubscriptionProfile> {
        let id = Uuid::new_v4();
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO subscriptions
                (id, organization_id, customer_id, name, billing_cycle, start_date,
                 end_date, next_billing_date, alert_days, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            SELECT_COLS
        ))
        .bind(id)
        .bind(organization_id)
        .bind(input.customer_id)
        .bind(&input.name)
        .bind(input.billing_cycle)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.next_billing_date)
        .bind(&input.alert_days)
        .bind(input.status)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_profile(&row))
    }

    async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        update: &SubscriptionUpdate,
    ) -> AppResult<SubscriptionProfile> {
        // The use case resolves partial input against the stored row, so
        // every column is written as-is (next_billing_date may become NULL
        // when the cycle changes to one-time).
        let row = sqlx::query(&format!(
            r#"
            UPDATE subscriptions SET
                name = $3,
                billing_cycle = $4,
                start_date = $5,
                end_date = $6,
                next_billing_date = $7,
                alert_days = $8,
                status = $9,
                updated_at = CURRENT_TIMESTAMP
            WHERE organization_id = $1 AND id = $2
            RETURNING {}
            "#,
            SELECT_COLS
        ))
        .bind(organization_id)
        .bind(id)
        .bind(&update.name)
        .bind(update.billing_cycle)
        .bind(update.start_date)
        .bind(update.end_date)
        .bind(update.next_billing_date)
        .bind(&update.alert_days)
        .bind(update.status)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_profile(&row))
    }

    async fn delete(&self, organization_id: Uuid, id: Uuid) -> AppResult<()> {
        // Alerts and subscription go together; neither survives without the
        // other, so both deletes share one transaction.
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        sqlx::query(
            "DELETE FROM subscription_alerts WHERE organization_id = $1 AND subscription_id = $2",
        )
        .bind(organization_id)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::from)?;

        sqlx::query("DELETE FROM subscriptions WHERE organization_id = $1 AND id = $2")
            .bind(organization_id)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from)?;

        tx.commit().await.map_err(AppError::from)?;
        Ok(())
    }
}
