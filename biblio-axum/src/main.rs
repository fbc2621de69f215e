use std::sync::Arc;

use anyhow::Result;

use biblio_auth::hasher::BcryptHasher;
use biblio_core::config::RoutingConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let routing = RoutingConfig::from_env();
    let state = biblio_axum::AppState::new(routing, Arc::new(BcryptHasher::default()));
    let app = biblio_axum::build(state);

    let addr =
        std::env::var("BIBLIO__HTTP__BIND").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    println!("[biblio] listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
