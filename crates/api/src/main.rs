use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use radiohub_core::events::EventPublisher;
use radiohub_core::stream::StreamSource;
use radiohub_icecast::{IcecastClient, IcecastConfig};
use radiohub_worker::{ListenerTrackingJob, Scheduler, TrackerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use radiohub_api::config::ServerConfig;
use radiohub_api::mount_cache::MountStatsCache;
use radiohub_api::router::build_app_router;
use radiohub_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "radiohub_api=debug,radiohub_worker=info,tower_http=debug".into()
    });
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    let icecast_config = IcecastConfig::from_env();
    let tracker_config = TrackerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = radiohub_db::create_pool(&database_url, radiohub_db::max_connections_from_env())
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    radiohub_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    radiohub_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Event bus ---
    let event_bus = Arc::new(radiohub_events::EventBus::default());
    let logger_handle = tokio::spawn(radiohub_events::EventLogger::run(event_bus.subscribe()));
    tracing::info!("Event bus created");

    // --- Icecast ---
    tracing::info!(
        url = %icecast_config.base_url,
        mount = %icecast_config.mount,
        "Using Icecast admin interface"
    );
    let icecast = IcecastClient::new(icecast_config).expect("Failed to build Icecast HTTP client");
    let stream_source: Arc<dyn StreamSource> = Arc::new(icecast);

    // --- Listener tracking ---
    let scheduler = if tracker_config.enabled {
        let publisher: Arc<dyn EventPublisher> = event_bus.clone();
        let job = ListenerTrackingJob::new(pool.clone(), Arc::clone(&stream_source), publisher);
        Some(Scheduler::start(Arc::new(job), tracker_config.interval))
    } else {
        tracing::info!("Listener tracking disabled (SCHEDULER_ENABLED=false)");
        None
    };

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
        mount_stats: MountStatsCache::new(
            stream_source,
            Duration::from_secs(config.radio_cache_ttl_secs),
        ),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    if let Some(scheduler) = scheduler {
        let deadline = Duration::from_secs(config.shutdown_timeout_secs);
        if let Err(e) = scheduler.stop(deadline).await {
            tracing::error!(error = %e, "Listener tracking did not stop in time");
        }
    }

    // Dropping the last sender closes the channel and ends the logger.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), logger_handle).await;
    tracing::info!("Event services shut down");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
