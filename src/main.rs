use axum_extra::extract::cookie::Key;
use mimalloc::MiMalloc;
use student_roster::auth::CookiePolicy;
use student_roster::config::{AdminConfig, Config};
use student_roster::db::{self, AccountStorage};
use student_roster::{RosterState, roster_router};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        listen_addr = %cfg.basic.listen_addr,
        database_url = %cfg.basic.database_url,
        loglevel = %cfg.basic.loglevel,
        insecure_cookie = cfg.basic.insecure_cookie,
        session_ttl_minutes = cfg.basic.session_ttl_minutes,
        admin_email = %cfg.admin.email
    );

    let key = match cfg.cookie_key()? {
        Some(key) => key,
        None => {
            warn!("no secret_key configured; sessions will not survive a restart");
            Key::generate()
        }
    };

    let cookies = CookiePolicy::from_config(&cfg.basic)?;

    let pool = db::connect(&cfg.basic.database_url).await?;
    seed_admin(&AccountStorage::new(pool.clone()), &cfg.admin).await?;

    let state = RosterState::new(pool, key, cookies);
    let app = roster_router(state);

    let listener = TcpListener::bind(&cfg.basic.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.basic.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

async fn seed_admin(
    accounts: &AccountStorage,
    admin: &AdminConfig,
) -> Result<(), student_roster::RosterError> {
    if admin.password == AdminConfig::default().password {
        warn!(email = %admin.email, "admin account uses the default password");
    }
    accounts.ensure_admin(&admin.email, &admin.password).await?;
    Ok(())
}

/// Wait for a shutdown signal (SIGTERM or SIGINT/Ctrl-C).
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
