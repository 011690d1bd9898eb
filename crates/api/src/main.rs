use anyhow::Context;

use flowdeck_api::{app, config::AppConfig, seed::Seed};
use flowdeck_auth::RolePermissions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env()?;
    flowdeck_observability::init(config.log_format);

    if config.uses_dev_secret() {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
    }

    let services = app::AppServices::in_memory(config.cloud_platform_id, RolePermissions::builtin())?;

    if let Some(path) = &config.seed_path {
        Seed::from_path(path)?.apply(&services)?;
    }

    let app = app::build_app(config.jwt_secret.clone(), services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        cloud_platform_id = %config.cloud_platform_id,
        "listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
