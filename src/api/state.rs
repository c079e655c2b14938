use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::appstore::{AppStoreClient, StoreLookup};
use crate::config::Config;
use crate::discovery::{Discoverer, MetricsReporter, ProbeClient, ProbeConfig, ProbeError};
use crate::observability::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub discoverer: Discoverer,
    pub store: Arc<dyn StoreLookup>,
    pub metrics: Arc<Metrics>,
    pub check_permits: Arc<Semaphore>,
}

impl AppState {
    pub fn new(config: Config, client: ProbeClient, store: Arc<dyn StoreLookup>) -> Self {
        let metrics = Arc::new(Metrics::new());
        let discoverer =
            Discoverer::new(client).with_reporter(Arc::new(MetricsReporter::new(metrics.clone())));
        let check_permits = Arc::new(Semaphore::new(config.server.max_concurrent_checks));

        Self {
            config: Arc::new(config),
            discoverer,
            store,
            metrics,
            check_permits,
        }
    }

    /// Build clients from configuration
    pub fn from_config(config: Config) -> Result<Self, ProbeError> {
        let client = ProbeClient::new(ProbeConfig::from(&config.probe))?;
        let store = AppStoreClient::new(&config.app_store)?;
        Ok(Self::new(config, client, Arc::new(store)))
    }
}
