//! Storefront JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use storefront_app::{
    context::AppContext,
    database::{self, Db},
};

use crate::{
    config::ServerConfig,
    observability::{Observability, RequestLogging, metrics_handler},
    state::State,
};

mod accounts;
mod auth;
mod carts;
mod catalog;
mod config;
mod errors;
mod extensions;
mod healthcheck;
mod observability;
mod reviews;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod wishlists;

/// Storefront JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = Observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Observability error: {init_error}");
        }

        process::exit(1);
    }

    let accounts = match config.accounts.to_accounts_config() {
        Ok(accounts) => accounts,
        Err(source) => {
            error!("invalid account form configuration: {source}");

            process::exit(1);
        }
    };

    let pool = match database::connect(&config.database.database_url).await {
        Ok(pool) => pool,
        Err(source) => {
            error!("failed to connect to database: {source}");

            process::exit(1);
        }
    };

    if config.database.run_migrations {
        if let Err(source) = database::migrate(&pool).await {
            error!("failed to apply migrations: {source}");

            process::exit(1);
        }

        info!("applied pending migrations");
    }

    let app = AppContext::from_db(&Db::new(pool), accounts);

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let mut router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(RequestLogging::new(config.observability.slow_request_threshold()))
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler));

    if config.observability.metrics_enabled {
        router = router.push(Router::with_path("metrics").get(metrics_handler));
    }

    let router = router.push(router::app_router());

    let doc = OpenApi::new("Storefront API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();
    let grace = config.server.shutdown_grace();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;
}
