use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use crate::billing;
use crate::clients::DispatchClient;
use crate::messages::{
    CompletionSender, DispatchRequest, RejectReason, RideCompletion, RideOutcome, RideRequest,
};
use crate::registry::Registry;

/// Result of re-checking the assigned driver just before a ride starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooseResult {
    Started,
    DriverUnavailable,
    DriverNotFound,
}

/// The single ride worker.
///
/// Dequeues ride requests in FIFO order and executes each one end to end:
/// choose, bill, pay the driver, move the driver to the destination and mark
/// them busy. Every dequeued request is answered exactly once on its
/// completion channel.
pub struct DispatchService {
    receiver: mpsc::UnboundedReceiver<DispatchRequest>,
    registry: Arc<Registry>,
}

impl DispatchService {
    pub fn new(registry: Arc<Registry>) -> (Self, DispatchClient) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let service = Self {
            receiver,
            registry: Arc::clone(&registry),
        };
        let client = DispatchClient::new(sender, registry);
        (service, client)
    }

    /// Worker loop.
    ///
    /// `Shutdown` closes the queue to new requests; whatever is already queued
    /// is still processed, and the loop ends once the queue is drained.
    #[instrument(name = "dispatch_service", skip(self))]
    pub async fn run(mut self) {
        info!("Worker started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                DispatchRequest::Ride {
                    request,
                    respond_to,
                } => {
                    self.handle_ride_request(request, respond_to);
                }
                DispatchRequest::Shutdown => {
                    info!("Worker shutting down");
                    self.receiver.close();
                }
                #[cfg(test)]
                DispatchRequest::FailingRide {
                    request,
                    respond_to,
                } => {
                    self.respond_isolated(request, respond_to, |_| {
                        panic!("ride processing failed")
                    });
                }
            }
        }

        info!("Worker stopped");
    }

    #[instrument(
        fields(rider = %request.rider, driver = %request.driver),
        skip(self, request, respond_to)
    )]
    fn handle_ride_request(&self, request: RideRequest, respond_to: CompletionSender) {
        self.respond_isolated(request, respond_to, |request| self.process(request));
    }

    /// Runs `process` with panics caught, so the requester always gets an answer
    /// and the worker survives.
    fn respond_isolated(
        &self,
        request: RideRequest,
        respond_to: CompletionSender,
        process: impl FnOnce(&RideRequest) -> RideOutcome,
    ) {
        info!("Processing ride request");

        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| process(&request))) {
            Ok(outcome) => outcome,
            Err(_) => {
                error!("Ride processing panicked");
                RideOutcome::Rejected {
                    reason: RejectReason::Internal,
                }
            }
        };

        info!(?outcome, "Ride request processed");
        if respond_to.send(RideCompletion { request, outcome }).is_err() {
            debug!("Requester no longer waiting for completion");
        }
    }

    /// Executes one ride against the registry.
    ///
    /// The availability check and the later writes are separate steps; the
    /// single worker keeps them from interleaving with another ride.
    pub fn process(&self, request: &RideRequest) -> RideOutcome {
        // 1. Re-check the driver
        match self.choose_ride(request) {
            ChooseResult::Started => {}
            ChooseResult::DriverUnavailable => {
                return RideOutcome::Rejected {
                    reason: RejectReason::DriverUnavailable,
                }
            }
            ChooseResult::DriverNotFound => {
                return RideOutcome::Rejected {
                    reason: RejectReason::DriverNotFound,
                }
            }
        }

        // 2. Bill
        let fare = billing::fare(request.source, request.destination);
        info!(fare, "Ride ended, bill calculated");

        // 3. Pay the driver
        self.registry.add_driver_earnings(&request.driver, fare);

        // 4. Move the driver to the drop-off and take them out of service
        self.registry
            .update_driver_location(&request.driver, request.destination);
        self.registry.set_driver_availability(&request.driver, false);

        RideOutcome::Completed { fare }
    }

    fn choose_ride(&self, request: &RideRequest) -> ChooseResult {
        match self.registry.is_driver_available(&request.driver) {
            Some(true) => {
                info!("Ride started");
                ChooseResult::Started
            }
            Some(false) => {
                warn!("Driver is not available");
                ChooseResult::DriverUnavailable
            }
            None => {
                warn!("Driver not found");
                ChooseResult::DriverNotFound
            }
        }
    }
}
