//! # Order Verify RS
//!
//! Verifies LemonSqueezy orders and issues short-lived access tokens.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export LS_API_KEY=...
//! export LS_TOKEN_SECRET=$(openssl rand -hex 32)
//!
//! # Run the server
//! verify-order
//! ```

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use verify_api::{routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging (LOG_FORMAT=json for structured output)
    let json = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let (json_layer, text_layer) = if json {
        (Some(fmt::layer().json()), None)
    } else {
        (None, Some(fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(json_layer)
        .with(text_layer)
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Print banner
    print_banner();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Order provider: {}",
        state.provider_name().unwrap_or("none (LS_API_KEY missing)")
    );

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Order verify starting on http://{}", addr);

    if !is_prod {
        info!("Health: http://{}/health", addr);
        info!("Verify: POST http://{}/api/verify-order", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  Order Verify RS
  ━━━━━━━━━━━━━━━━━━━━━━━
  Paid-order token service
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
