pub mod driver;
pub mod location;
pub mod rider;

pub use driver::*;
pub use location::*;
pub use rider::*;
