use serde::Serialize;

use crate::types::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FloorState {
    Current,
    Moving,
    Queued,
    Available,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloorView {
    pub floor: u8,
    pub state: FloorState,
}

/// Point-in-time view of the car, captured under a single lock hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub num_floors: u8,
    pub current_floor: u8,
    pub active_target: Option<u8>,
    pub direction: Direction,
    pub queue: Vec<u8>,
    pub floors: Vec<FloorView>,
}

impl Snapshot {
    pub(crate) fn new(
        num_floors: u8,
        current_floor: u8,
        active_target: Option<u8>,
        direction: Direction,
        queue: Vec<u8>,
    ) -> Self {
        let floors = (1..=num_floors)
            .map(|floor| {
                let state = if floor == current_floor {
                    FloorState::Current
                } else if active_target == Some(floor) {
                    FloorState::Moving
                } else if queue.contains(&floor) {
                    FloorState::Queued
                } else {
                    FloorState::Available
                };
                FloorView { floor, state }
            })
            .collect();

        Snapshot {
            num_floors,
            current_floor,
            active_target,
            direction,
            queue,
            floors,
        }
    }

    pub fn floor_state(&self, floor: u8) -> Option<FloorState> {
        self.floors
            .iter()
            .find(|view| view.floor == floor)
            .map(|view| view.state)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    Duplicate,
    Queued,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    pub status: SubmitStatus,
    pub message: String,
}

impl SubmitOutcome {
    pub(crate) fn queued(floor: u8) -> Self {
        SubmitOutcome {
            status: SubmitStatus::Queued,
            message: format!("{floor} queued."),
        }
    }

    pub(crate) fn duplicate(floor: u8) -> Self {
        SubmitOutcome {
            status: SubmitStatus::Duplicate,
            message: format!("Floor {floor} already requested or current; ignoring duplicate press."),
        }
    }

    pub fn is_queued(&self) -> bool {
        self.status == SubmitStatus::Queued
    }
}
