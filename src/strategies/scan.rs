use crate::context::CarState;
use crate::strategy::Strategy;
use crate::types::direction::Direction;

/// Directional scan: keep going while there is work ahead, reverse to the far
/// end otherwise, and start from idle toward the nearest request.
#[derive(Debug, Clone, Default)]
pub struct ScanStrategy;

impl ScanStrategy {
    pub fn new() -> Self {
        Self
    }

    fn nearest(current: u8, queue: &[u8]) -> Option<(u8, Direction)> {
        queue
            .iter()
            .copied()
            .min_by_key(|&f| (f.abs_diff(current), f))
            .map(|f| (f, Direction::between(current, f)))
    }
}

impl Strategy for ScanStrategy {
    fn next_target(&self, state: &CarState) -> Option<(u8, Direction)> {
        let current = state.current_floor;
        let queue = &state.queued_floors;

        match state.direction {
            Direction::Up => {
                let above = queue.iter().copied().filter(|&f| f > current).min();
                if let Some(floor) = above {
                    return Some((floor, Direction::Up));
                }
                if let Some(&floor) = queue.iter().max() {
                    return Some((floor, Direction::Down));
                }
            }
            Direction::Down => {
                let below = queue.iter().copied().filter(|&f| f < current).max();
                if let Some(floor) = below {
                    return Some((floor, Direction::Down));
                }
                if let Some(&floor) = queue.iter().min() {
                    return Some((floor, Direction::Up));
                }
            }
            Direction::Idle => {}
        }

        Self::nearest(current, queue)
    }

    fn retarget(&self, state: &CarState) -> Option<u8> {
        let target = state.active_target?;
        let current = state.current_floor;
        let in_path = state.queued_floors.iter().copied();

        match state.direction {
            Direction::Up => in_path.filter(|&f| current < f && f < target).min(),
            Direction::Down => in_path.filter(|&f| target < f && f < current).max(),
            Direction::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(current: u8, direction: Direction, queue: &[u8]) -> CarState {
        let mut state = CarState::new(10);
        state.current_floor = current;
        state.direction = direction;
        state.queued_floors = queue.to_vec();
        state
    }

    #[test]
    fn idle_picks_nearest_with_lower_floor_on_tie() {
        let scan = ScanStrategy::new();
        assert_eq!(
            scan.next_target(&state(1, Direction::Idle, &[5, 3])),
            Some((3, Direction::Up))
        );
        assert_eq!(
            scan.next_target(&state(5, Direction::Idle, &[7, 3])),
            Some((3, Direction::Down))
        );
    }

    #[test]
    fn up_continues_to_nearest_above() {
        let scan = ScanStrategy::new();
        assert_eq!(
            scan.next_target(&state(4, Direction::Up, &[2, 9, 6])),
            Some((6, Direction::Up))
        );
    }

    #[test]
    fn up_reverses_to_highest_when_nothing_above() {
        let scan = ScanStrategy::new();
        assert_eq!(
            scan.next_target(&state(8, Direction::Up, &[2, 5, 3])),
            Some((5, Direction::Down))
        );
    }

    #[test]
    fn down_continues_then_reverses_to_lowest() {
        let scan = ScanStrategy::new();
        assert_eq!(
            scan.next_target(&state(6, Direction::Down, &[9, 2, 4])),
            Some((4, Direction::Down))
        );
        assert_eq!(
            scan.next_target(&state(2, Direction::Down, &[9, 4, 7])),
            Some((4, Direction::Up))
        );
    }

    #[test]
    fn empty_queue_has_no_target() {
        let scan = ScanStrategy::new();
        assert_eq!(scan.next_target(&state(3, Direction::Up, &[])), None);
        assert_eq!(scan.next_target(&state(3, Direction::Idle, &[])), None);
    }

    #[test]
    fn retarget_takes_closest_floor_strictly_in_path() {
        let scan = ScanStrategy::new();

        let mut up = state(3, Direction::Up, &[7, 5, 8, 2]);
        up.active_target = Some(8);
        assert_eq!(scan.retarget(&up), Some(5));

        let mut down = state(9, Direction::Down, &[4, 6, 2, 10]);
        down.active_target = Some(2);
        assert_eq!(scan.retarget(&down), Some(6));
    }

    #[test]
    fn retarget_ignores_floors_behind_or_beyond() {
        let scan = ScanStrategy::new();
        let mut up = state(5, Direction::Up, &[2, 4, 9]);
        up.active_target = Some(8);
        assert_eq!(scan.retarget(&up), None);

        let mut idle = state(5, Direction::Idle, &[6]);
        idle.active_target = Some(8);
        assert_eq!(scan.retarget(&idle), None);
    }
}
