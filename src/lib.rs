pub mod config;
pub mod context;
pub mod elevator;
pub mod error;
pub mod strategy;

pub mod strategies {
    pub mod scan;
}

pub mod services {
    pub mod datagram;
    pub mod elevator;
}

pub mod types {
    pub mod direction;
    pub mod request;
    pub mod response;
    pub mod snapshot;
}

pub use config::{Config, ElevatorConfig};
pub use elevator::Elevator;
pub use error::ElevatorError;
pub use types::direction::Direction;
pub use types::request::Request;
pub use types::response::Response;
pub use types::snapshot::{FloorState, FloorView, Snapshot, SubmitOutcome, SubmitStatus};
