pub mod extract;
mod handlers;
pub mod response;
mod routes;
pub mod validation;

pub use routes::create_router;

use sqlx::{Pool, Sqlite};
use std::net::SocketAddr;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
}

pub async fn run_server(pool: Pool<Sqlite>, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(AppState { db: pool });

    let addr = format!("{}:{}", host, port).parse::<SocketAddr>()?;
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
