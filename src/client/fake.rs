use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::http::{BoxError, BoxFuture, HttpRequest, HttpResponse, HttpTransport};

#[derive(Debug, Clone)]
enum FakeReply {
    Respond { status: u16, body: String },
    Fail(String),
}

#[derive(Debug, Clone)]
/// Answers by URL prefix (first match wins) and records every request.
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

#[derive(Debug)]
struct FakeTransportState {
    requests: Vec<HttpRequest>,
    routes: Vec<(String, FakeReply)>,
    delays: Vec<(String, Duration)>,
    fallback: FakeReply,
}

impl FakeTransport {
    pub(crate) fn new(status: u16, body: impl Into<String>) -> Self {
        Self::with_fallback(FakeReply::Respond {
            status,
            body: body.into(),
        })
    }

    pub(crate) fn failing(message: impl Into<String>) -> Self {
        Self::with_fallback(FakeReply::Fail(message.into()))
    }

    fn with_fallback(fallback: FakeReply) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeTransportState {
                requests: Vec::new(),
                routes: Vec::new(),
                delays: Vec::new(),
                fallback,
            })),
        }
    }

    pub(crate) fn route(self, url_prefix: &str, status: u16, body: impl Into<String>) -> Self {
        self.push_route(
            url_prefix,
            FakeReply::Respond {
                status,
                body: body.into(),
            },
        )
    }

    pub(crate) fn route_failure(self, url_prefix: &str, message: impl Into<String>) -> Self {
        self.push_route(url_prefix, FakeReply::Fail(message.into()))
    }

    /// Hold replies for URLs under `url_prefix` back by `delay`.
    pub(crate) fn delay(self, url_prefix: &str, delay: Duration) -> Self {
        self.state
            .lock()
            .unwrap()
            .delays
            .push((url_prefix.to_owned(), delay));
        self
    }

    fn push_route(self, url_prefix: &str, reply: FakeReply) -> Self {
        self.state
            .lock()
            .unwrap()
            .routes
            .push((url_prefix.to_owned(), reply));
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub(crate) fn last_request(&self) -> Option<HttpRequest> {
        self.state.lock().unwrap().requests.last().cloned()
    }
}

impl HttpTransport for FakeTransport {
    fn execute<'a>(&'a self, request: HttpRequest) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let (reply, delay) = {
                let mut state = self.state.lock().unwrap();
                let delay = state
                    .delays
                    .iter()
                    .find(|(prefix, _)| request.url.starts_with(prefix.as_str()))
                    .map(|(_, delay)| *delay);
                let reply = state
                    .routes
                    .iter()
                    .find(|(prefix, _)| request.url.starts_with(prefix.as_str()))
                    .map(|(_, reply)| reply.clone())
                    .unwrap_or_else(|| state.fallback.clone());
                state.requests.push(request);
                (reply, delay)
            };
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            match reply {
                FakeReply::Respond { status, body } => Ok(HttpResponse { status, body }),
                FakeReply::Fail(message) => Err(message.into()),
            }
        })
    }
}
