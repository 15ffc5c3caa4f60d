pub mod aggregate;
pub mod status;

pub use aggregate::*;
pub use status::{RequestStatus, StatusTone};
