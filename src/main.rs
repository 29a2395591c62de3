//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use fixease::{
    common::error::expose_internal_errors,
    config::{AppConfig, AppState},
    routes::build_router,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,sqlx=warn")),
        )
        .with_target(false)
        .compact()
        .init();

    // Pânico em qualquer task derruba o processo: o operador reinicia.
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("💥 Pânico não tratado: {}", info);
        std::process::exit(1);
    }));

    if let Err(e) = run().await {
        tracing::error!("❌ Falha fatal: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    expose_internal_errors(!config.is_production());

    let port = config.port;
    let app_state = AppState::new(config).await?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let app = build_router(app_state);

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    tracing::info!("📚 Swagger UI em http://localhost:{}/swagger-ui", port);

    axum::serve(listener, app).await?;
    Ok(())
}
