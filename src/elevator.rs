use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::config::ElevatorConfig;
use crate::context::CarState;
use crate::error::ElevatorError;
use crate::strategies::scan::ScanStrategy;
use crate::strategy::Strategy;
use crate::types::direction::Direction;
use crate::types::snapshot::{Snapshot, SubmitOutcome};

struct Shared {
    state: Mutex<CarState>,
    wake: Notify,
}

impl Shared {
    // Every critical section leaves the state consistent, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, CarState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A single elevator car driven by a background control loop.
///
/// `submit` and `snapshot` are synchronous and only hold the state lock briefly.
/// The control loop runs as a tokio task; starting outside a runtime fails with
/// `ElevatorError::NoRuntime`.
pub struct Elevator {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
    num_floors: u8,
    shutdown_timeout: Duration,
}

impl Elevator {
    pub fn start(num_floors: i64) -> Result<Self, ElevatorError> {
        Self::with_config(ElevatorConfig::new(num_floors)?)
    }

    pub fn with_config(config: ElevatorConfig) -> Result<Self, ElevatorError> {
        Self::with_strategy(config, ScanStrategy::new())
    }

    pub fn with_strategy<ST: Strategy>(
        config: ElevatorConfig,
        strategy: ST,
    ) -> Result<Self, ElevatorError> {
        let runtime = Handle::try_current().map_err(|_| ElevatorError::NoRuntime)?;
        let shared = Arc::new(Shared {
            state: Mutex::new(CarState::new(config.num_floors())),
            wake: Notify::new(),
        });
        let worker = runtime.spawn(control_loop(
            Arc::clone(&shared),
            strategy,
            config.interval(),
        ));
        info!(
            "Elevator started with {} floors, {:?} per floor",
            config.num_floors(),
            config.interval()
        );

        Ok(Elevator {
            shared,
            worker: Mutex::new(Some(worker)),
            num_floors: config.num_floors(),
            shutdown_timeout: config.join_timeout(),
        })
    }

    pub fn num_floors(&self) -> u8 {
        self.num_floors
    }

    /// Requests a floor. Floors that are already current, active or queued are
    /// accepted as no-ops.
    pub fn submit(&self, floor: i64) -> Result<SubmitOutcome, ElevatorError> {
        let floor = u8::try_from(floor)
            .ok()
            .filter(|f| (1..=self.num_floors).contains(f))
            .ok_or(ElevatorError::InvalidFloor {
                floor,
                num_floors: self.num_floors,
            })?;

        let queued = self.shared.lock().enqueue_request(floor);
        if queued {
            info!("Floor {floor} queued");
            self.shared.wake.notify_one();
            Ok(SubmitOutcome::queued(floor))
        } else {
            debug!("Ignoring duplicate request for floor {floor}");
            Ok(SubmitOutcome::duplicate(floor))
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let (num_floors, current, active, direction, queue) = {
            let state = self.shared.lock();
            (
                state.num_floors,
                state.current_floor,
                state.active_target,
                state.direction,
                state.queued_floors.clone(),
            )
        };
        Snapshot::new(num_floors, current, active, direction, queue)
    }

    pub fn is_running(&self) -> bool {
        self.shared.lock().running
    }

    /// Stops the control loop after the floor step in progress and waits for it,
    /// up to the configured timeout. Calling it again is a no-op.
    pub async fn shutdown(&self) {
        self.signal_stop();

        let worker = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(worker) = worker else {
            return;
        };

        match tokio::time::timeout(self.shutdown_timeout, worker).await {
            Ok(Ok(())) => info!("Elevator stopped"),
            Ok(Err(e)) => warn!("Control loop ended abnormally: {e}"),
            Err(_) => warn!(
                "Control loop did not stop within {:?}",
                self.shutdown_timeout
            ),
        }
    }

    fn signal_stop(&self) {
        self.shared.lock().running = false;
        self.shared.wake.notify_one();
    }
}

impl Drop for Elevator {
    fn drop(&mut self) {
        self.signal_stop();
    }
}

async fn control_loop<ST: Strategy>(shared: Arc<Shared>, strategy: ST, interval: Duration) {
    loop {
        // Wait for work.
        loop {
            {
                let mut state = shared.lock();
                if !state.running {
                    return;
                }
                if !state.queued_floors.is_empty() {
                    break;
                }
                state.direction = Direction::Idle;
            }
            shared.wake.notified().await;
        }

        {
            let mut state = shared.lock();
            let Some((target, direction)) = strategy.next_target(&state) else {
                continue;
            };
            state.activate(target, direction);
            info!(
                "Heading {direction} from floor {} to floor {target}",
                state.current_floor
            );
        }

        loop {
            {
                let state = shared.lock();
                if !state.running || state.arrived() {
                    break;
                }
            }

            tokio::time::sleep(interval).await;

            let mut state = shared.lock();
            if let Some(candidate) = strategy.retarget(&state) {
                if state.active_target != Some(candidate) {
                    info!(
                        "Retargeting from floor {:?} to floor {candidate} at floor {}",
                        state.active_target, state.current_floor
                    );
                    state.retarget(candidate);
                }
            }
            state.transit_floor();
            debug!("Passing floor {}", state.current_floor);
        }

        let mut state = shared.lock();
        let at = state.current_floor;
        match state.clear_target() {
            Some(target) if target == at => info!("Arrived at floor {at}"),
            Some(target) => info!("Stopped at floor {at} before reaching floor {target}"),
            None => {}
        }
    }
}
