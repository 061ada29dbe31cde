//! # Mock Framework
//!
//! Utilities for testing the request side of the dispatcher without a worker.
//!
//! Use [`create_mock_client`] to get a client and the receiver its requests land on.
//! Then use [`expect_ride`] to assert what was queued and answer it by hand.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::clients::DispatchClient;
use crate::messages::{CompletionSender, DispatchRequest, RideRequest};
use crate::registry::Registry;

/// Creates a client over `registry` whose queue is owned by the test.
pub fn create_mock_client(
    registry: Arc<Registry>,
) -> (DispatchClient, mpsc::UnboundedReceiver<DispatchRequest>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (DispatchClient::new(sender, registry), receiver)
}

/// Takes the next queued message if it is a ride request.
pub fn expect_ride(
    receiver: &mut mpsc::UnboundedReceiver<DispatchRequest>,
) -> Option<(RideRequest, CompletionSender)> {
    match receiver.try_recv() {
        Ok(DispatchRequest::Ride {
            request,
            respond_to,
        }) => Some((request, respond_to)),
        _ => None,
    }
}

/// True if nothing has been queued.
pub fn expect_empty(receiver: &mut mpsc::UnboundedReceiver<DispatchRequest>) -> bool {
    matches!(receiver.try_recv(), Err(mpsc::error::TryRecvError::Empty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::RideRequestStatus;
    use crate::domain::{DriverCreate, Location, RiderCreate, Vehicle};
    use crate::error::DispatchError;
    use crate::messages::{RideCompletion, RideOutcome};
    use std::time::Duration;

    fn registry() -> Arc<Registry> {
        let registry = Arc::new(Registry::new());
        registry.add_rider(RiderCreate::new("U1", "F", 22).at((10, 0)));
        registry.add_driver(DriverCreate::new(
            "D1",
            "M",
            22,
            Vehicle::new("Swift", "KA-01-12345"),
            (10, 1),
        ));
        registry
    }

    #[tokio::test]
    async fn request_queues_first_candidate_and_ticket_resolves() {
        let (client, mut receiver) = create_mock_client(registry());

        let status = client
            .request_ride("U1", Location::new(10, 0), Location::new(15, 3))
            .unwrap();
        let RideRequestStatus::Queued(ticket) = status else {
            panic!("expected the ride to be queued");
        };

        let (request, responder) = expect_ride(&mut receiver).expect("Expected Ride request");
        assert_eq!(request.rider, "U1");
        assert_eq!(request.driver, "D1");
        assert_eq!(request.destination, Location::new(15, 3));
        assert_eq!(ticket.request(), &request);

        responder
            .send(RideCompletion {
                request: request.clone(),
                outcome: RideOutcome::Completed { fare: 80 },
            })
            .unwrap();

        let completion = ticket.wait(Duration::from_secs(1)).await.unwrap();
        assert_eq!(completion.outcome, RideOutcome::Completed { fare: 80 });
        assert!(expect_empty(&mut receiver));
    }

    #[tokio::test]
    async fn unknown_rider_queues_nothing() {
        let (client, mut receiver) = create_mock_client(registry());

        let result = client.request_ride("ghost", Location::ORIGIN, Location::new(1, 1));
        assert!(matches!(result, Err(DispatchError::RiderNotFound(name)) if name == "ghost"));
        assert!(expect_empty(&mut receiver));
    }

    #[tokio::test]
    async fn no_available_driver_queues_nothing() {
        let registry = registry();
        registry.set_driver_availability("D1", false);
        let (client, mut receiver) = create_mock_client(registry);

        let status = client
            .request_ride("U1", Location::new(10, 0), Location::new(15, 3))
            .unwrap();
        assert!(matches!(status, RideRequestStatus::NoRideFound));
        assert!(expect_empty(&mut receiver));
    }

    #[tokio::test]
    async fn unanswered_ticket_times_out() {
        let (client, mut receiver) = create_mock_client(registry());

        let RideRequestStatus::Queued(ticket) = client
            .request_ride("U1", Location::new(10, 0), Location::new(15, 3))
            .unwrap()
        else {
            panic!("expected the ride to be queued");
        };
        let _held = expect_ride(&mut receiver).expect("Expected Ride request");

        let result = ticket.wait(Duration::from_millis(20)).await;
        assert_eq!(result, Err(DispatchError::Timeout(Duration::from_millis(20))));
    }

    #[tokio::test]
    async fn dropped_responder_is_reported() {
        let (client, mut receiver) = create_mock_client(registry());

        let RideRequestStatus::Queued(ticket) = client
            .request_ride("U1", Location::new(10, 0), Location::new(15, 3))
            .unwrap()
        else {
            panic!("expected the ride to be queued");
        };
        drop(expect_ride(&mut receiver));

        let result = ticket.wait(Duration::from_secs(1)).await;
        assert_eq!(result, Err(DispatchError::WorkerDropped));
    }

    #[tokio::test]
    async fn closed_queue_rejects_requests() {
        let (client, receiver) = create_mock_client(registry());
        drop(receiver);

        let result = client.request_ride("U1", Location::new(10, 0), Location::new(15, 3));
        assert!(matches!(result, Err(DispatchError::DispatcherClosed)));
    }
}
