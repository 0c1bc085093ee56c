use crate::types::direction::Direction;

/// Mutable car state. Only ever touched while holding the elevator's state lock.
#[derive(Debug)]
pub struct CarState {
    pub num_floors: u8,
    pub current_floor: u8,
    pub direction: Direction,
    pub active_target: Option<u8>,
    pub queued_floors: Vec<u8>,
    pub running: bool,
}

impl CarState {
    pub fn new(num_floors: u8) -> Self {
        CarState {
            num_floors,
            current_floor: 1,
            direction: Direction::Idle,
            active_target: None,
            queued_floors: Vec::new(),
            running: true,
        }
    }

    pub fn is_pending(&self, floor: u8) -> bool {
        floor == self.current_floor
            || self.active_target == Some(floor)
            || self.queued_floors.contains(&floor)
    }

    /// Appends `floor` unless it is current, active or already queued.
    /// Returns whether the queue grew.
    pub fn enqueue_request(&mut self, floor: u8) -> bool {
        if self.is_pending(floor) {
            return false;
        }
        self.queued_floors.push(floor);
        true
    }

    pub fn dequeue(&mut self, floor: u8) {
        self.queued_floors.retain(|&f| f != floor);
    }

    /// Makes `target` the single active floor, pulling it out of the queue.
    pub fn activate(&mut self, target: u8, direction: Direction) {
        self.dequeue(target);
        self.active_target = Some(target);
        self.direction = direction;
    }

    /// Swaps the active target for `candidate`, re-queueing the old one.
    pub fn retarget(&mut self, candidate: u8) {
        if let Some(previous) = self.active_target {
            if !self.queued_floors.contains(&previous) {
                self.queued_floors.push(previous);
            }
        }
        let direction = Direction::between(self.current_floor, candidate);
        self.activate(candidate, direction);
    }

    /// Moves the car one floor toward the active target.
    pub fn transit_floor(&mut self) {
        if let Some(target) = self.active_target {
            match Direction::between(self.current_floor, target) {
                Direction::Up => self.current_floor += 1,
                Direction::Down => self.current_floor -= 1,
                Direction::Idle => {}
            }
        }
    }

    pub fn arrived(&self) -> bool {
        self.active_target
            .is_none_or(|target| target == self.current_floor)
    }

    pub fn clear_target(&mut self) -> Option<u8> {
        let arrived = self.active_target.take();
        if self.queued_floors.is_empty() {
            self.direction = Direction::Idle;
        }
        arrived
    }
}
