use log::{debug, warn};
use serde_json::json;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};

use crate::types::request::Request;
use crate::types::response::Response;

type BoxFuture<T> = Pin<Box<dyn Future<Output = anyhow::Result<T>> + Send>>;

/// Decodes a datagram into a `Request` and encodes the reply as JSON.
///
/// Malformed datagrams are answered with an `{"error": ...}` body without
/// reaching the inner service.
#[derive(Clone)]
pub struct DatagramService<S> {
    inner: S,
}

fn error_body(e: &anyhow::Error) -> anyhow::Result<Vec<u8>> {
    Ok(serde_json::to_vec(&json!({ "error": format!("{e:#}") }))?)
}

impl<S> Service<&[u8]> for DatagramService<S>
where
    S: Service<Request, Response = Response, Error = anyhow::Error> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Vec<u8>;
    type Error = anyhow::Error;
    type Future = BoxFuture<Vec<u8>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, raw: &[u8]) -> Self::Future {
        let request = match Request::try_from(raw) {
            Ok(request) => request,
            Err(e) => {
                warn!("Invalid packet: {e:#}");
                let body = error_body(&e);
                return Box::pin(async move { body });
            }
        };
        debug!("Request received: {request:?}");

        // Hand the readied service to the future and keep a fresh clone behind.
        let clone = self.inner.clone();
        let mut ready = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move {
            let response = ready.call(request).await?;
            Ok(serde_json::to_vec(&response)?)
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DatagramLayer;

impl<S> Layer<S> for DatagramLayer {
    type Service = DatagramService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DatagramService { inner }
    }
}
