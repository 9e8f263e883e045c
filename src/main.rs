#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), String> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let (app, options) = unisell::server::app()?;
    let addr = options.site_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("failed to bind {addr}: {e}"))?;

    tracing::info!(%addr, api = unisell::config::api_base(), "unisell listening");
    axum::serve(listener, app).await.map_err(|e| format!("server failed: {e}"))
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // Client-only builds hydrate through `unisell::hydrate`.
}
