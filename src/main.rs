use std::error::Error;

use cab_dispatch::app_system::{setup_tracing, CabSystem, DispatchConfig};
use cab_dispatch::clients::RideRequestStatus;
use cab_dispatch::domain::{DriverCreate, Location, RiderCreate};
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing();

    let system = CabSystem::start(DispatchConfig::from_env());
    let completion_timeout = system.config().completion_timeout;
    let registry = system.registry.clone();
    let dispatch = system.dispatch_client.clone();

    // Onboard riders
    for (details, location) in [
        ("Khanh L., M, 23", Location::new(0, 0)),
        ("Thu Tr., F, 22", Location::new(10, 0)),
        ("Blue, M, 2", Location::new(15, 6)),
    ] {
        let rider: RiderCreate = details.parse()?;
        let name = rider.name.clone();
        registry.add_rider(rider);
        registry.update_rider_location(&name, location);
    }

    // Onboard drivers
    for (details, location) in [
        ("Driver1, M, 22", Location::new(10, 1)),
        ("Driver2, M, 29", Location::new(11, 10)),
        ("Driver3, M, 24", Location::new(5, 3)),
    ] {
        registry.add_driver(DriverCreate::parse(details, "Swift, KA-01-12345", location)?);
    }

    if let Err(e) = dispatch.find_ride("Khanh L.", Location::new(0, 0), Location::new(20, 1)) {
        warn!(error = %e, "Find ride failed");
    }
    if let Err(e) = dispatch.find_ride("Thu Tr.", Location::new(10, 0), Location::new(15, 3)) {
        warn!(error = %e, "Find ride failed");
    }

    let span = tracing::info_span!("ride_request", rider = "Thu Tr.");
    async {
        match dispatch.request_ride("Thu Tr.", Location::new(10, 0), Location::new(15, 3)) {
            Ok(RideRequestStatus::Queued(ticket)) => {
                match ticket.wait(completion_timeout).await {
                    Ok(completion) => info!(outcome = ?completion.outcome, "Ride finished"),
                    Err(e) => warn!(error = %e, "Proceeding without ride outcome"),
                }
            }
            Ok(RideRequestStatus::NoRideFound) => info!("No ride found"),
            Err(e) => warn!(error = %e, "Ride request failed"),
        }
    }
    .instrument(span)
    .await;

    info!("Updating locations and status");
    registry.update_rider_location("Thu Tr.", Location::new(15, 3));
    registry.update_driver_location("Driver1", Location::new(15, 3));
    registry.set_driver_availability("Driver1", false);

    if let Err(e) = dispatch.find_ride("Blue", Location::new(15, 6), Location::new(20, 4)) {
        warn!(error = %e, "Find ride failed");
    }

    registry.earnings_report();

    if let Err(e) = system.shutdown().await {
        error!(error = %e, "Shutdown was not graceful");
    }

    info!("Main finished");
    Ok(())
}
