//! Service entry point: configuration, tracing, database, schema, server.

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblio::app::{AppState, build_app};
use biblio::config::Config;
use biblio::db::Database;
use biblio::graphql::build_schema;
use biblio::services::{AuthConfig, AuthService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "biblio=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!("Starting biblio");

    let db = Database::connect(&config.database_url, config.database_max_connections).await?;
    db.migrate().await?;
    tracing::info!("Database connected");

    let auth = AuthService::new(
        db.clone(),
        AuthConfig {
            jwt_secret: config.jwt_secret.clone(),
            signup_password: config.signup_password.clone(),
            bcrypt_cost: config.bcrypt_cost,
        },
    );

    let schema = build_schema(db, auth.clone());
    tracing::info!("GraphQL schema built");

    let state = AppState { schema, auth };
    let app = build_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
