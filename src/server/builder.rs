//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::ValidationState;
use super::router::{build_address_routes, build_health_routes, build_validation_routes};
use crate::addresses::{AddressState, CreateAddress, UpdateAddress};
use crate::config::{AppConfig, ServerSettings};
use crate::core::AddressStore;
use crate::core::validation::RuleSetRegistry;
use anyhow::Result;
use axum::{Extension, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the storefront HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryAddressStore::new())
///     .with_config(AppConfig::from_yaml_file("storefront.yaml")?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn AddressStore>>,
    configs: Vec<AppConfig>,
    custom_routes: Vec<Router>,
    permissive_cors: bool,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            configs: Vec::new(),
            custom_routes: Vec::new(),
            permissive_cors: false,
        }
    }

    /// Set the address store (required)
    pub fn with_store(mut self, store: impl AddressStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Add a configuration; several configs are merged in order
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.configs.push(config);
        self
    }

    /// Add custom routes to the server
    ///
    /// Handlers in these routes can guard their bodies with
    /// [`Validated`](crate::core::validation::Validated) like the built-in ones,
    /// or with [`ValidatedBy`](crate::core::validation::ValidatedBy) for
    /// operations declared in configuration.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Allow any origin, for local development against the mobile client
    pub fn with_permissive_cors(mut self) -> Self {
        self.permissive_cors = true;
        self
    }

    /// Settings of the merged configuration
    pub fn settings(&self) -> ServerSettings {
        AppConfig::merge(self.configs.clone()).server_settings()
    }

    /// Build the rule set registry: built-in operations plus configured ones
    ///
    /// Configured rule sets may not redefine a built-in operation.
    pub fn build_registry(&self) -> Result<RuleSetRegistry> {
        let mut registry = RuleSetRegistry::new();
        registry.register_operation::<CreateAddress>();
        registry.register_operation::<UpdateAddress>();

        let merged = AppConfig::merge(self.configs.clone());
        for rule_set in merged.rule_sets()? {
            registry.try_insert(rule_set)?;
        }

        tracing::debug!(operations = ?registry.operations(), "rule sets registered");
        Ok(registry)
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let registry = Arc::new(self.build_registry()?);

        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("AddressStore is required. Call .with_store()"))?;

        let mut app = build_health_routes()
            .merge(build_address_routes(AddressState { store }))
            .merge(build_validation_routes(ValidationState {
                registry: registry.clone(),
            }));

        for custom_router in std::mem::take(&mut self.custom_routes) {
            app = app.merge(custom_router);
        }

        let app = app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(registry)),
        );
        if self.permissive_cors {
            return Ok(app.layer(CorsLayer::permissive()));
        }
        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `addr`, or to the configured bind address when `None`.
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self, addr: Option<&str>) -> Result<()> {
        let addr = match addr {
            Some(addr) => addr.to_string(),
            None => self.settings().bind_address,
        };
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
