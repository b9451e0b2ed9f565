mod config;

use std::net::SocketAddr;

use axum::http::{
    Method,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use murmur_api::{AppStateInner, router};
use murmur_auth::{CredentialHasher, TokenService};

use crate::config::Config;

/// Used when `RUST_LOG` is unset. Names every workspace crate that logs.
const DEFAULT_LOG_FILTER: &str =
    "murmur=debug,murmur_api=debug,murmur_auth=debug,murmur_store=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let config = Config::from_env()?;

    // Signing key is fixed for the life of the process.
    let tokens = TokenService::new(&config.jwt_secret, config.token_ttl);
    let state = AppStateInner::new(tokens, CredentialHasher::default());

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.cors_origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true);

    let app = router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!(
        "Murmur listening on {} (tokens valid {}h)",
        addr,
        config.token_ttl.num_hours()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_workspace_crates() {
        let targets: Vec<&str> = DEFAULT_LOG_FILTER
            .split(',')
            .filter_map(|directive| directive.split('=').next())
            .collect();
        for target in ["murmur", "murmur_api", "murmur_auth", "murmur_store", "tower_http"] {
            assert!(targets.contains(&target), "{target} missing from default filter");
        }
        assert!(DEFAULT_LOG_FILTER.parse::<tracing_subscriber::EnvFilter>().is_ok());
    }
}
