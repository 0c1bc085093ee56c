use log::debug;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;

use crate::elevator::Elevator;
use crate::types::request::Request;
use crate::types::response::Response;

/// Innermost service: turns a parsed request into a call on the car.
#[derive(Clone)]
pub struct ElevatorService {
    elevator: Arc<Elevator>,
}

impl ElevatorService {
    pub fn new(elevator: Arc<Elevator>) -> Self {
        ElevatorService { elevator }
    }

    fn handle(elevator: &Elevator, request: Request) -> Response {
        match request {
            Request::Floor(floor) => match elevator.submit(floor) {
                Ok(outcome) => Response::Submitted {
                    outcome,
                    state: elevator.snapshot(),
                },
                Err(e) => {
                    debug!("Rejected request: {e}");
                    Response::Rejected {
                        error: e.to_string(),
                    }
                }
            },
            Request::State => Response::State(elevator.snapshot()),
        }
    }
}

impl Service<Request> for ElevatorService {
    type Response = Response;
    type Error = anyhow::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        if !self.elevator.is_running() {
            return Poll::Ready(Err(anyhow::anyhow!("elevator has shut down")));
        }
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let elevator = Arc::clone(&self.elevator);
        Box::pin(async move { Ok(Self::handle(&elevator, request)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::snapshot::SubmitStatus;
    use tower::ServiceExt;

    #[tokio::test(start_paused = true)]
    async fn submits_and_reports_state() {
        let elevator = Arc::new(Elevator::start(6).unwrap());
        let svc = ElevatorService::new(Arc::clone(&elevator));

        let response = svc.clone().oneshot(Request::Floor(4)).await.unwrap();
        let Response::Submitted { outcome, state } = response else {
            panic!("unexpected response: {response:?}");
        };
        assert_eq!(outcome.status, SubmitStatus::Queued);
        assert_eq!(state.queue, vec![4]);

        let response = svc.clone().oneshot(Request::State).await.unwrap();
        assert_eq!(response, Response::State(elevator.snapshot()));

        elevator.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_floor_is_rejected_not_failed() {
        let elevator = Arc::new(Elevator::start(6).unwrap());
        let svc = ElevatorService::new(Arc::clone(&elevator));

        let response = svc.oneshot(Request::Floor(7)).await.unwrap();
        assert_eq!(
            response,
            Response::Rejected {
                error: "floor must be between 1 and 6, got 7".to_string()
            }
        );
        elevator.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn not_ready_after_shutdown() {
        let elevator = Arc::new(Elevator::start(3).unwrap());
        elevator.shutdown().await;

        let svc = ElevatorService::new(elevator);
        assert!(svc.oneshot(Request::State).await.is_err());
    }
}
