// ABOUTME: Test support utilities.
// ABOUTME: Provides a scripted Marathon transport, a fake clock and tracing setup.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Once};
use std::time::{Duration, Instant};
use stride::marathon::{Method, Response, Transport, TransportError};
use stride::reconcile::Clock;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("stride=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// One request seen by `FakeMarathon`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

type Reply = Result<Response, String>;

#[derive(Default)]
struct Script {
    replies: HashMap<(Method, String), VecDeque<Reply>>,
    calls: Vec<Call>,
}

/// Scripted `Transport` that records every request.
///
/// Replies are queued per method and path (query string included). The last
/// queued reply for a route repeats forever; unscripted routes answer 404.
#[derive(Clone, Default)]
pub struct FakeMarathon {
    script: Arc<Mutex<Script>>,
}

#[allow(dead_code)]
impl FakeMarathon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, path: &str, response: Response) -> &Self {
        self.push(method, path, Ok(response))
    }

    pub fn respond_json(&self, method: Method, path: &str, body: Value) -> &Self {
        self.respond(method, path, Response::ok(200, body))
    }

    /// Queue a connection-level failure.
    pub fn fail(&self, method: Method, path: &str) -> &Self {
        self.push(method, path, Err("connection refused".to_string()))
    }

    fn push(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.script
            .lock()
            .replies
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script.lock().calls.clone()
    }

    /// `"METHOD path"` for each call, in order.
    pub fn call_log(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| format!("{} {}", c.method, c.path))
            .collect()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }

    pub fn count_method(&self, method: Method) -> usize {
        self.calls().iter().filter(|c| c.method == method).count()
    }
}

#[async_trait]
impl Transport for FakeMarathon {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response, TransportError> {
        let mut script = self.script.lock();
        script.calls.push(Call {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });

        let reply = match script.replies.get_mut(&(method, path.to_string())) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        match reply {
            Some(Ok(response)) => Ok(response),
            Some(Err(reason)) => Err(TransportError::Request {
                url: path.to_string(),
                reason,
            }),
            None => Ok(Response::error(404, format!("no route for {method} {path}"))),
        }
    }
}

/// Clock whose time only moves when something sleeps on it.
#[derive(Clone)]
pub struct FakeClock {
    start: Instant,
    elapsed: Arc<Mutex<Duration>>,
    sleeps: Arc<Mutex<u32>>,
}

impl Default for FakeClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Arc::default(),
            sleeps: Arc::default(),
        }
    }
}

#[allow(dead_code)]
impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock()
    }

    pub fn sleeps(&self) -> u32 {
        *self.sleeps.lock()
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.start + *self.elapsed.lock()
    }

    async fn sleep(&self, duration: Duration) {
        *self.elapsed.lock() += duration;
        *self.sleeps.lock() += 1;
    }
}
