use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::domain::{DriverSummary, Location};
use crate::error::DispatchError;
use crate::matching;
use crate::messages::{CompletionReceiver, DispatchRequest, RideCompletion, RideRequest};
use crate::registry::Registry;

/// Handle to a queued ride; resolves once the worker has processed it.
#[derive(Debug)]
pub struct RideTicket {
    request: RideRequest,
    completion: CompletionReceiver,
}

impl RideTicket {
    pub fn request(&self) -> &RideRequest {
        &self.request
    }

    pub fn driver(&self) -> &str {
        &self.request.driver
    }

    /// Waits up to `timeout` for the ride's completion.
    #[instrument(fields(rider = %self.request.rider, driver = %self.request.driver), skip(self))]
    pub async fn wait(self, timeout: Duration) -> Result<RideCompletion, DispatchError> {
        debug!("Waiting for ride request to complete");
        match tokio::time::timeout(timeout, self.completion).await {
            Ok(Ok(completion)) => Ok(completion),
            Ok(Err(_)) => Err(DispatchError::WorkerDropped),
            Err(_) => {
                warn!("Ride request processing timed out");
                Err(DispatchError::Timeout(timeout))
            }
        }
    }
}

/// What happened to a ride request on the caller's side.
#[derive(Debug)]
pub enum RideRequestStatus {
    /// Assigned to a driver and queued for the worker.
    Queued(RideTicket),
    /// No available driver within range; nothing was queued.
    NoRideFound,
}

/// Caller-facing side of the dispatcher.
///
/// Matching runs on the caller's task; only the ride execution is handed to
/// the worker. Sending never blocks.
#[derive(Clone)]
pub struct DispatchClient {
    sender: mpsc::UnboundedSender<DispatchRequest>,
    registry: Arc<Registry>,
}

impl DispatchClient {
    pub fn new(sender: mpsc::UnboundedSender<DispatchRequest>, registry: Arc<Registry>) -> Self {
        Self { sender, registry }
    }

    pub(crate) fn send(&self, request: DispatchRequest) -> Result<(), DispatchError> {
        self.sender
            .send(request)
            .map_err(|_| DispatchError::DispatcherClosed)
    }

    /// Lists candidate drivers for a rider without queueing anything.
    pub fn find_ride(
        &self,
        rider: &str,
        source: Location,
        destination: Location,
    ) -> Result<Vec<DriverSummary>, DispatchError> {
        matching::find_candidates(&self.registry, rider, source, destination)
    }

    /// Matches the rider and queues the ride with the first candidate.
    ///
    /// The first candidate in scan order is taken as-is; candidates are not
    /// ranked by distance.
    #[instrument(skip(self))]
    pub fn request_ride(
        &self,
        rider: &str,
        source: Location,
        destination: Location,
    ) -> Result<RideRequestStatus, DispatchError> {
        info!("Ride requested");

        let candidates = self.find_ride(rider, source, destination)?;
        let Some(driver) = candidates.into_iter().next() else {
            info!("No ride found");
            return Ok(RideRequestStatus::NoRideFound);
        };

        let request = RideRequest {
            rider: rider.to_string(),
            source,
            destination,
            driver: driver.name,
        };
        let (respond_to, completion) = oneshot::channel();
        self.send(DispatchRequest::Ride {
            request: request.clone(),
            respond_to,
        })?;

        info!(driver = %request.driver, "Ride request added to queue");
        Ok(RideRequestStatus::Queued(RideTicket {
            request,
            completion,
        }))
    }

    /// Asks the worker to stop once the queue is drained.
    #[instrument(skip(self))]
    pub fn shutdown(&self) -> Result<(), DispatchError> {
        debug!("Sending shutdown request");
        self.send(DispatchRequest::Shutdown)
    }
}
