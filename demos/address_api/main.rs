//! Address book API with configurable rule sets
//!
//! ```sh
//! cargo run --example address_api -- demos/address_api/storefront.yaml
//! curl -i -X POST localhost:3000/addresses -H 'content-type: application/json' -d '{}'
//! ```

use storefront::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_yaml_file(&path)?,
        None => AppConfig::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server_settings().log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    ServerBuilder::new()
        .with_store(InMemoryAddressStore::new())
        .with_config(config)
        .with_permissive_cors()
        .serve(None)
        .await
}
