pub mod customers;
pub mod subscriptions;

use axum::Router;

use crate::adapters::http::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/organizations",
        customers::router().merge(subscriptions::router()),
    )
}
