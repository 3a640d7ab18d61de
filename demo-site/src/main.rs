mod handlers;
mod server;

use dotenvy::dotenv;

use resqlink_axum::{AppState, resqlink_router};

use handlers::pages;
use server::{PORT, init_tracing, serve_http};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    init_tracing("demo_site");

    let session = resqlink_axum::init().await?;
    let state = AppState::new(session.clone());
    state.spawn_sign_in_listener();

    // Pages render a loader until this finishes
    tokio::spawn(async move { session.initialize().await });

    let app = pages(state.clone()).nest("/api", resqlink_router(state));

    serve_http(*PORT, app).await?;
    Ok(())
}
