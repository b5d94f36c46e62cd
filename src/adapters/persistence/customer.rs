use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::customers::{CreateCustomerInput, CustomerProfile, CustomerRepo},
};

fn row_to_profile(row: &sqlx::postgres::PgRow) -> CustomerProfile {
    CustomerProfile {
        id: row.get("id"),
        organization_id: row.get("organization_id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

const SELECT_COLS: &str = "id, organization_id, name, email, phone, created_at, updated_at";

#[async_trait]
impl CustomerRepo for PostgresPersistence {
    async fn get_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> AppResult<Option<CustomerProfile>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM customers WHERE organization_id = $1 AND id = $2",
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
    ) -> AppResult<Vec<CustomerProfile>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM customers WHERE organization_id = $1 ORDER BY created_at DESC",
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
        input: &CreateCustomerInput,
    ) -> AppResult<CustomerProfile> {
        let id = Uuid::new_v4();
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO customers (id, organization_id, name, email, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            SELECT_COLS
        ))
        .bind(id)
        .bind(organization_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_profile(&row))
    }
}
