pub mod booking;
pub mod outcome;
pub mod service;

pub use booking::*;
pub use outcome::*;
pub use service::*;
