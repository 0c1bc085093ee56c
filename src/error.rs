use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElevatorError {
    #[error("number of floors must be between 2 and {max}, got {num_floors}", max = u8::MAX)]
    InvalidConfiguration { num_floors: i64 },
    #[error("floor must be between 1 and {num_floors}, got {floor}")]
    InvalidFloor { floor: i64, num_floors: u8 },
    #[error("elevator must be started from within a tokio runtime")]
    NoRuntime,
}
