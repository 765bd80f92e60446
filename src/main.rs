//! classroom-phases HTTP server.

use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use classroom_phases::adapters::http::middleware::AuthState;
use classroom_phases::adapters::http::HttpSettings;
use classroom_phases::adapters::{
    postgres, InMemoryClassRoomRepository, InMemoryCourseRepository, JwtConfig,
    JwtSessionValidator, PostgresClassRoomRepository, PostgresCourseRepository, SystemClock,
};
use classroom_phases::app::{build_router, seed_demo_course, AppPorts};
use classroom_phases::config::{AppConfig, AuthConfig, DatabaseConfig, StorageBackend};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        backend = ?config.database.backend,
        "classroom-phases starting"
    );

    let ports = storage_ports(&config.database).await?;
    if config.seed_demo_course {
        seed_demo_course(ports.courses.as_ref()).await?;
    }

    let settings = HttpSettings {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins_list(),
    };
    let app = build_router(&ports, session_validator(&config.auth), &settings);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured level; production logs JSON.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

async fn storage_ports(config: &DatabaseConfig) -> Result<AppPorts, Box<dyn Error>> {
    let clock = Arc::new(SystemClock);
    match config.backend {
        StorageBackend::Memory => Ok(AppPorts::new(
            Arc::new(InMemoryCourseRepository::new()),
            Arc::new(InMemoryClassRoomRepository::new()),
            clock,
        )),
        StorageBackend::Postgres => {
            let pool = postgres::connect(config).await?;
            if config.run_migrations {
                postgres::migrate(&pool).await?;
                tracing::info!("Database migrations applied");
            }
            Ok(AppPorts::new(
                Arc::new(PostgresCourseRepository::new(pool.clone())),
                Arc::new(PostgresClassRoomRepository::new(pool)),
                clock,
            ))
        }
    }
}

fn session_validator(config: &AuthConfig) -> AuthState {
    let mut jwt = JwtConfig::new(config.jwt_secret.clone());
    if let Some(issuer) = &config.issuer {
        jwt = jwt.with_issuer(issuer.clone());
    }
    if let Some(audience) = &config.audience {
        jwt = jwt.with_audience(audience.clone());
    }
    Arc::new(JwtSessionValidator::new(jwt))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
