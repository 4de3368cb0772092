use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quill_observability::init();

    let database_url = std::env::var("QUILL_DATABASE_URL").unwrap_or_else(|_| {
        tracing::warn!("QUILL_DATABASE_URL not set; using sqlite:quill.db");
        "sqlite:quill.db".to_string()
    });
    let addr = std::env::var("QUILL_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let pool = quill_storage::connect(&database_url)
        .await
        .context("opening database")?;
    let app = quill_api::app::build_app(pool).await;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
