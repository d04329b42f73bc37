//! In-process HTTP server used by unit tests.
//!
//! Replies are served in order; once exhausted every request gets a 404 so a
//! request the test did not expect is visible in its assertions.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Request, Response, body::Incoming, server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use serde_json::Value;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub(crate) struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

/// What the server saw for one request.
#[derive(Debug, Clone)]
pub(crate) struct Captured {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

pub(crate) struct MockServer {
    pub endpoint: String,
    captures: Arc<Mutex<Vec<Captured>>>,
}

impl MockServer {
    pub async fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let captures = Arc::new(Mutex::new(Vec::new()));
        let replies = Arc::new(Mutex::new(VecDeque::from(replies)));
        let sink = Arc::clone(&captures);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let sink = Arc::clone(&sink);
                let replies = Arc::clone(&replies);
                let service = service_fn(move |req: Request<Incoming>| {
                    let sink = Arc::clone(&sink);
                    let replies = Arc::clone(&replies);
                    async move {
                        let (authorization, content_type) = {
                            let header = |name: &str| {
                                req.headers()
                                    .get(name)
                                    .and_then(|v| v.to_str().ok())
                                    .map(str::to_owned)
                            };
                            (header("authorization"), header("content-type"))
                        };
                        let bytes = req
                            .into_body()
                            .collect()
                            .await
                            .map(http_body_util::Collected::to_bytes)
                            .unwrap_or_default();
                        sink.lock().expect("lock captures").push(Captured {
                            authorization,
                            content_type,
                            body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
                        });
                        let reply = replies
                            .lock()
                            .expect("lock replies")
                            .pop_front()
                            .unwrap_or_else(|| Reply::new(404, "No handler"));
                        Ok::<_, Infallible>(
                            Response::builder()
                                .status(reply.status)
                                .header("Content-Type", "application/json")
                                .body(Full::new(Bytes::from(reply.body)))
                                .expect("build response"),
                        )
                    }
                });
                tokio::spawn(async move {
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });
        Self {
            endpoint: format!("http://{addr}/api/graphql"),
            captures,
        }
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.captures.lock().expect("lock captures").clone()
    }
}
