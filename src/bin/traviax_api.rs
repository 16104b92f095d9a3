//! `traviax-api` - serves the Traviax REST API over the JSON document store.
//!
//! Configuration comes from `API_HOST`, `API_PORT`, `MOCK_DATA_PATH`,
//! `DEBUG` and `RUST_LOG`.

use std::error::Error;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use traviax_store::{api, DocumentStore, JsonFileStore, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let settings = Settings::from_env()?;

    let default_level = if settings.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = Arc::new(JsonFileStore::open(settings.data_path.clone()));
    match store.load_all() {
        Ok(collections) => info!(
            path = %settings.data_path.display(),
            collections = collections.len(),
            "data file ready"
        ),
        // Retried lazily on the first request.
        Err(err) => warn!(error = %err, "data file not loaded"),
    }

    api::serve(store, &settings.bind_addr()).await?;
    Ok(())
}
