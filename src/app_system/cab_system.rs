use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::actors::DispatchService;
use crate::clients::DispatchClient;
use crate::error::SystemError;
use crate::registry::Registry;

use super::DispatchConfig;

/// Owns the registry and the dispatch worker for the lifetime of the application.
///
/// Start it once, hand out [`DispatchClient`]s and the registry to callers, and
/// call [`CabSystem::shutdown`] to stop the worker.
pub struct CabSystem {
    pub registry: Arc<Registry>,
    pub dispatch_client: DispatchClient,
    config: DispatchConfig,
    handle: JoinHandle<()>,
}

impl CabSystem {
    /// Spawns the dispatch worker. Must be called inside a tokio runtime.
    #[instrument(name = "cab_system", skip(config))]
    pub fn start(config: DispatchConfig) -> Self {
        info!("Starting cab system");

        let registry = Arc::new(Registry::new());
        let (service, dispatch_client) = DispatchService::new(Arc::clone(&registry));
        let handle = tokio::spawn(service.run());

        info!("Cab system started");
        Self {
            registry,
            dispatch_client,
            config,
            handle,
        }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Stops the worker and waits for it up to `shutdown_timeout`.
    ///
    /// A worker that does not exit in time is reported, not awaited further.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Initiating shutdown");

        if let Err(e) = self.dispatch_client.shutdown() {
            // Worker already gone; the join below reports how it ended.
            warn!(error = %e, "Shutdown request not delivered");
        }

        let timeout = self.config.shutdown_timeout;
        match tokio::time::timeout(timeout, self.handle).await {
            Ok(Ok(())) => {
                info!("Cab system shutdown complete");
                Ok(())
            }
            Ok(Err(e)) => {
                error!(error = ?e, "Dispatch worker failed");
                Err(SystemError::WorkerPanicked(e.to_string()))
            }
            Err(_) => {
                warn!(
                    timeout_ms = timeout.as_millis(),
                    "Worker did not stop gracefully"
                );
                Err(SystemError::ShutdownTimeout(timeout))
            }
        }
    }
}
