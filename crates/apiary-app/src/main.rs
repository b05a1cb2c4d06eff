use std::sync::Arc;

use salvo::conn::TcpListener;
use salvo::{Listener, Router};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

use apiary_app::app::api::routes;
use apiary_app::config::ConfigHandler;
use apiary_app::group_handler::GroupServiceHandler;
use apiary_app::user_store_handler::UserStoreHandler;
use apiary_core::config::load_config;
use apiary_db::db::DbProvider;
use apiary_db::db::connection::create_pool;
use apiary_db::db::migrate::run_migrations;
use apiary_service::auth::casbin::init_casbin;
use apiary_service::group::{GroupOptions, GroupPorts, GroupService};
use apiary_service::store::pg::PgStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Apiary group service");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    run_migrations(&config.database.url).await?;

    let pool = create_pool(&config.database).await?;

    tracing::info!("Database connection pool created.");

    let provider: Arc<dyn DbProvider> = Arc::new(pool);
    let store = Arc::new(PgStore::new(provider));
    let enforcer = Arc::new(init_casbin().await?);

    let service = GroupService::new(
        GroupPorts::from_store(Arc::clone(&store), enforcer),
        GroupOptions::from(&config.groups),
    );

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(ConfigHandler {
            settings: config.clone(),
        })
        .hoop(UserStoreHandler { users: store })
        .hoop(GroupServiceHandler {
            service: Arc::new(service),
        })
        .push(routes());

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
