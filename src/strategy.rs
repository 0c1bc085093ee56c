use crate::context::CarState;
use crate::types::direction::Direction;

/// Scheduling policy consulted by the control loop while it holds the state lock.
pub trait Strategy: Send + Sync + 'static {
    /// Picks the next floor to commit to, and the direction of travel toward it.
    fn next_target(&self, state: &CarState) -> Option<(u8, Direction)>;

    /// A queued floor that should replace the active target mid-flight, if any.
    fn retarget(&self, state: &CarState) -> Option<u8>;
}
