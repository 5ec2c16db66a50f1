use movies_admin::{AppState, config::Config, db, db::ConnectionFactory, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movies_admin=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;
    let connections = ConnectionFactory::per_request(config.database.clone());

    if config.create_table {
        let conn = connections.open().await?;
        let created = db::create_schema(&conn).await;
        connections.release(conn).await;
        created?;
        tracing::info!("movies table ready");
    }

    let app = router(AppState::new(connections));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
