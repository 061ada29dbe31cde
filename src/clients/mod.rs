pub mod dispatch_client;

pub use dispatch_client::*;
