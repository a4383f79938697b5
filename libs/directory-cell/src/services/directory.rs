use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use shared_config::AppConfig;

use crate::models::LoadStatus;
use crate::services::catalogue::DirectoryCatalogue;
use crate::services::client::{DoctorFeedClient, DoctorSource};

/// Shared state behind the directory routes: the catalogue and the source
/// it is loaded from.
pub struct DirectoryService {
    config: Arc<AppConfig>,
    source: Arc<dyn DoctorSource>,
    catalogue: RwLock<DirectoryCatalogue>,
}

impl DirectoryService {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let source = Arc::new(DoctorFeedClient::new(&config));
        Self::with_source(config, source)
    }

    pub fn with_source(config: Arc<AppConfig>, source: Arc<dyn DoctorSource>) -> Self {
        Self {
            config,
            source,
            catalogue: RwLock::new(DirectoryCatalogue::new()),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub async fn catalogue(&self) -> RwLockReadGuard<'_, DirectoryCatalogue> {
        self.catalogue.read().await
    }

    /// Runs one load attempt to completion and returns the resulting status.
    /// If a newer attempt was started meanwhile, this attempt's outcome is
    /// dropped and the newer attempt's status is reported.
    pub async fn load(&self) -> LoadStatus {
        let ticket = self.catalogue.write().await.begin_load();
        debug!("Starting doctor load {}", ticket);

        let result = self.source.fetch_doctors().await;

        let mut catalogue = self.catalogue.write().await;
        catalogue.complete_load(ticket, result);
        catalogue.status()
    }

    /// Starts a load in the background.
    pub fn spawn_load(self: &Arc<Self>) -> JoinHandle<LoadStatus> {
        info!("Scheduling doctor load");
        let service = Arc::clone(self);
        tokio::spawn(async move { service.load().await })
    }
}
