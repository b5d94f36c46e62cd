use crate::{
    adapters::{http::app_state::AppState, persistence::PostgresPersistence},
    infra::{config::AppConfig, db::init_db},
    use_cases::{
        customers::{CustomerRepo, CustomerUseCases},
        subscriptions::{SubscriptionAlertRepo, SubscriptionRepo, SubscriptionUseCases},
    },
};
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env();

    let pool = init_db(&config.database_url).await?;
    let postgres_arc = Arc::new(PostgresPersistence::new(pool));

    let subscription_repo = postgres_arc.clone() as Arc<dyn SubscriptionRepo>;
    let alert_repo = postgres_arc.clone() as Arc<dyn SubscriptionAlertRepo>;
    let customer_repo = postgres_arc.clone() as Arc<dyn CustomerRepo>;

    let subscription_use_cases =
        SubscriptionUseCases::new(subscription_repo, alert_repo, customer_repo.clone());
    let customer_use_cases = CustomerUseCases::new(customer_repo);

    Ok(AppState {
        config: Arc::new(config),
        subscription_use_cases: Arc::new(subscription_use_cases),
        customer_use_cases: Arc::new(customer_use_cases),
    })
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fieldops_api=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don't show target (module path)
        .with_level(true) // show log level
        .pretty(); // human-friendly, with colors

    // File (structured JSON logs)
    let file = File::create("app.log").expect("cannot create log file");
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
