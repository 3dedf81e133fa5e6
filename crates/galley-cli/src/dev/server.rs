//! Development server: static files from the content base, proxied prefixes
//! forwarded upstream.

use std::future::Future;

use axum::{Router, middleware};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::dev::proxy::{ProxyState, proxy_requests};
use crate::dev::DevConfig;
use crate::error::{CliError, Result};
use galley_config::ProxyTable;

/// Development server.
pub struct DevServer {
    config: DevConfig,
    proxy: ProxyState,
}

impl DevServer {
    pub fn new(config: DevConfig, table: ProxyTable) -> Result<Self> {
        Ok(Self {
            config,
            proxy: ProxyState::new(table)?,
        })
    }

    /// The axum router:
    /// - proxy middleware in front of everything
    /// - `ServeDir` over the content base as the fallback
    /// - permissive CORS (dev only)
    pub fn router(&self) -> Router {
        let static_files = ServeDir::new(&self.config.content_base);

        Router::new()
            .fallback_service(static_files)
            .layer(middleware::from_fn_with_state(
                self.proxy.clone(),
                proxy_requests,
            ))
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
    }

    /// Bind the configured address and serve until Ctrl+C.
    pub async fn start(self) -> Result<()> {
        let addr = self.config.addr;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| CliError::Server(format!("Failed to bind to {addr}: {e}")))?;

        crate::ui::success(&format!(
            "Development server running at {}",
            self.config.server_url()
        ));

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<()> {
        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| CliError::Server(format!("Server error: {e}")))?;

        info!("development server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        crate::ui::info("Shutting down...");
    }
}
