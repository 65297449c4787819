//! In-process fake email backend for integration testing
//!
//! Runs a `tiny_http` server on `127.0.0.1` with an OS-assigned port.
//! Each request is handled on its own thread, so a slow answer never
//! holds up the requests behind it; that is what lets tests reproduce
//! answers arriving out of order.
//!
//! Every request is appended to a log before it is handled, so tests
//! can assert on what the client sent, including fire-and-forget
//! updates whose answers the client never looks at.

use super::handlers::{handle_get_email, handle_list_mailbox, handle_send_email, handle_update_email};
use super::io::{Reply, read_body, respond};
use super::store::Store;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tiny_http::{Method, Request, Server};

/// A request as the fake backend received it.
#[derive(Debug, Clone)]
pub struct LoggedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

impl LoggedRequest {
    /// The body parsed as JSON, or `Null` if it is not JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

/// A fake backend that runs until dropped.
pub struct FakeBackend {
    port: u16,
    server: Arc<Server>,
    store: Arc<Mutex<Store>>,
    log: Arc<Mutex<Vec<LoggedRequest>>>,
}

impl FakeBackend {
    /// Start a fake backend serving `store`.
    pub fn start(store: Store) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind to ephemeral port"));
        let port = server
            .server_addr()
            .to_ip()
            .expect("listening on an IP address")
            .port();

        let store = Arc::new(Mutex::new(store));
        let log = Arc::new(Mutex::new(Vec::new()));

        {
            let server = server.clone();
            let store = store.clone();
            let log = log.clone();
            thread::spawn(move || {
                for request in server.incoming_requests() {
                    let store = store.clone();
                    let log = log.clone();
                    thread::spawn(move || handle_request(request, &store, &log));
                }
            });
        }

        Self {
            port,
            server,
            store,
            log,
        }
    }

    /// The port the server is listening on.
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Base URL to configure clients with.
    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Snapshot of the backend state.
    pub fn store(&self) -> Store {
        self.store.lock().unwrap().clone()
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<LoggedRequest> {
        self.log.lock().unwrap().clone()
    }

    /// Requests matching `method` and `path`.
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<LoggedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    /// Poll the request log until a matching request shows up.
    pub async fn wait_for(&self, method: &str, path: &str) -> LoggedRequest {
        for _ in 0..200 {
            if let Some(request) = self.requests_to(method, path).pop() {
                return request;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("no {method} {path} within 2s; got {:?}", self.requests());
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.unblock();
    }
}

/// Route one request to its handler.
fn handle_request(mut request: Request, store: &Mutex<Store>, log: &Mutex<Vec<LoggedRequest>>) {
    let method = request.method().clone();
    let path = request.url().split('?').next().unwrap_or("").to_string();
    let body = read_body(&mut request);

    log.lock().unwrap().push(LoggedRequest {
        method: method.to_string(),
        path: path.clone(),
        body: body.clone(),
    });

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let reply = match (&method, segments.as_slice()) {
        (Method::Post, ["emails"]) => handle_send_email(&body, store),
        (_, ["emails"]) => Reply::error(400, "POST request required."),
        (_, ["emails", target]) => match target.parse::<u64>() {
            Ok(id) => match method {
                Method::Get => handle_get_email(id, store),
                Method::Put => handle_update_email(id, &body, store),
                _ => Reply::error(400, "GET or PUT request required."),
            },
            Err(_) => handle_list_mailbox(target, store),
        },
        _ => Reply::error(404, "Not found."),
    };

    respond(request, reply);
}
