mod clock;
mod connection_service;
mod session_service;

pub use clock::*;
pub use connection_service::*;
pub use session_service::*;
