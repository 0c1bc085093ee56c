use serde::Serialize;
use std::fmt;
use std::fmt::Display;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Idle,
    Up,
    Down,
}

impl Direction {
    /// Direction of travel from `from` to `to`, `Idle` when they coincide.
    pub fn between(from: u8, to: u8) -> Self {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Direction::Up,
            std::cmp::Ordering::Less => Direction::Down,
            std::cmp::Ordering::Equal => Direction::Idle,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Idle => write!(f, "idle"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn between_follows_floor_order() {
        assert_eq!(Direction::between(1, 5), Direction::Up);
        assert_eq!(Direction::between(5, 1), Direction::Down);
        assert_eq!(Direction::between(3, 3), Direction::Idle);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Up).unwrap(), "\"up\"");
        assert_eq!(Direction::Down.to_string(), "down");
    }
}
