use anyhow::Context;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ElevatorError;

pub const DEFAULT_NUM_FLOORS: i64 = 10;
pub const DEFAULT_FLOOR_INTERVAL: Duration = Duration::from_secs(2);
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(3);
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:11000";

const NUM_FLOORS_VAR: &str = "ELEVATOR_NUM_FLOORS";
const FLOOR_INTERVAL_VAR: &str = "ELEVATOR_FLOOR_INTERVAL_MS";
const BIND_ADDRESS_VAR: &str = "ELEVATOR_BIND_ADDRESS";

#[derive(Debug, Clone)]
pub struct ElevatorConfig {
    num_floors: u8,
    floor_interval: Duration,
    shutdown_timeout: Duration,
}

impl ElevatorConfig {
    pub fn new(num_floors: i64) -> Result<Self, ElevatorError> {
        let num_floors = u8::try_from(num_floors)
            .ok()
            .filter(|&n| n >= 2)
            .ok_or(ElevatorError::InvalidConfiguration { num_floors })?;

        Ok(ElevatorConfig {
            num_floors,
            floor_interval: DEFAULT_FLOOR_INTERVAL,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        })
    }

    pub fn floor_interval(mut self, interval: Duration) -> Self {
        self.floor_interval = interval;
        self
    }

    pub fn shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    pub fn num_floors(&self) -> u8 {
        self.num_floors
    }

    pub fn interval(&self) -> Duration {
        self.floor_interval
    }

    pub fn join_timeout(&self) -> Duration {
        self.shutdown_timeout
    }
}

/// Process configuration for the simulator binary.
#[derive(Debug, Clone)]
pub struct Config {
    pub elevator: ElevatorConfig,
    pub bind_address: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let num_floors = parse_var(&lookup, NUM_FLOORS_VAR)?.unwrap_or(DEFAULT_NUM_FLOORS);
        let floor_interval = parse_var::<u64>(&lookup, FLOOR_INTERVAL_VAR)?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_FLOOR_INTERVAL);
        let bind_address =
            lookup(BIND_ADDRESS_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let elevator = ElevatorConfig::new(num_floors)
            .with_context(|| format!("invalid {NUM_FLOORS_VAR}"))?
            .floor_interval(floor_interval);

        Ok(Config {
            elevator,
            bind_address,
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("failed to parse {key}='{raw}'"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn rejects_fewer_than_two_floors() {
        assert_eq!(
            ElevatorConfig::new(1).unwrap_err(),
            ElevatorError::InvalidConfiguration { num_floors: 1 }
        );
        assert!(ElevatorConfig::new(-4).is_err());
        assert!(ElevatorConfig::new(256).is_err());
        assert_eq!(ElevatorConfig::new(2).unwrap().num_floors(), 2);
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.elevator.num_floors(), 10);
        assert_eq!(config.elevator.interval(), DEFAULT_FLOOR_INTERVAL);
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("ELEVATOR_NUM_FLOORS", "25"),
            ("ELEVATOR_FLOOR_INTERVAL_MS", "150"),
            ("ELEVATOR_BIND_ADDRESS", "0.0.0.0:9000"),
        ]))
        .unwrap();
        assert_eq!(config.elevator.num_floors(), 25);
        assert_eq!(config.elevator.interval(), Duration::from_millis(150));
        assert_eq!(config.bind_address, "0.0.0.0:9000");
    }

    #[test]
    fn bad_values_name_the_variable() {
        let err = Config::from_lookup(lookup(&[("ELEVATOR_NUM_FLOORS", "ten")])).unwrap_err();
        assert!(err.to_string().contains("ELEVATOR_NUM_FLOORS"));

        let err = Config::from_lookup(lookup(&[("ELEVATOR_NUM_FLOORS", "1")])).unwrap_err();
        assert!(err.to_string().contains("ELEVATOR_NUM_FLOORS"));
    }
}
