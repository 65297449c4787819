//! Shared response helpers for the fake backend.

use serde_json::Value;
use std::io::Read;
use tiny_http::{Header, Request, Response};

/// What a handler answers: a status and an optional JSON body.
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub body: Option<Value>,
}

impl Reply {
    pub const fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }

    pub const fn no_content() -> Self {
        Self {
            status: 204,
            body: None,
        }
    }

    /// A failure whose body is not JSON at all.
    pub const fn plain_failure(status: u16) -> Self {
        Self { status, body: None }
    }
}

/// Read the whole request body as a string.
pub fn read_body(request: &mut Request) -> String {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    body
}

/// Send `reply` back to the client.
pub fn respond(request: Request, reply: Reply) {
    let result = match reply.body {
        Some(body) => {
            let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                .expect("static header is valid");
            request.respond(
                Response::from_string(body.to_string())
                    .with_status_code(reply.status)
                    .with_header(header),
            )
        }
        None => request.respond(Response::empty(reply.status)),
    };
    let _ = result;
}
