//! Test utilities for running the binary against a local GraphQL server.
//!
//! The server answers each request from a shared handler and records every
//! request body so tests can assert on what the binary sent.

use assert_cmd::prelude::*;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Request, Response, StatusCode, body::Incoming, server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use std::io::ErrorKind;
use std::{
    collections::VecDeque,
    net::SocketAddr,
    process::Command,
    sync::{Arc, Mutex},
};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

/// Shared handler type invoked for each incoming request.
pub type Handler = Arc<Mutex<Box<dyn FnMut(&Request<Bytes>) -> Response<Full<Bytes>> + Send>>>;

/// Request bodies seen by the server, parsed as JSON.
pub type Recorded = Arc<Mutex<Vec<serde_json::Value>>>;

/// Handle returned by [`start_mitm`] for shutting down the server.
pub struct ShutdownHandle {
    join: JoinHandle<()>,
    stop: oneshot::Sender<()>,
}

impl ShutdownHandle {
    /// Signal the server to stop and await shutdown.
    pub async fn shutdown(self) {
        let _ = self.stop.send(());
        let _ = self.join.await;
    }
}

/// Start an HTTP server forwarding requests to a shared handler.
///
/// # Errors
///
/// Returns an error if the server fails to bind to a local port.
///
/// # Panics
///
/// Panics if the default response cannot be constructed.
#[expect(
    clippy::integer_division_remainder_used,
    reason = "tokio::select! uses % internally"
)]
pub async fn start_mitm() -> Result<(SocketAddr, Handler, Recorded, ShutdownHandle), std::io::Error>
{
    let handler: Handler = Arc::new(Mutex::new(Box::new(|_req| {
        Response::builder()
            .status(404)
            .body(Full::from("No handler"))
            .expect("failed to create default response")
    })));
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let handler_clone = handler.clone();
    let recorded_clone = recorded.clone();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, mut rx) = oneshot::channel();

    let join = tokio::spawn(async move {
        loop {
            tokio::select! {
                res = listener.accept() => match res {
                    Ok((stream, _)) => {
                        let io = TokioIo::new(stream);
                        let h = handler_clone.clone();
                        let r = recorded_clone.clone();
                        let service = service_fn(move |req: Request<Incoming>| {
                            let h = h.clone();
                            let r = r.clone();
                            async move {
                                let (parts, body) = req.into_parts();
                                let bytes = body.collect().await.map(|b| b.to_bytes()).unwrap_or_default();
                                r.lock()
                                    .expect("lock recorded")
                                    .push(serde_json::from_slice(&bytes).unwrap_or_default());
                                let req2 = Request::from_parts(parts, bytes);
                                let mut f = h.lock().expect("lock handler in service");
                                let resp = (f)(&req2);
                                Ok::<_, std::convert::Infallible>(resp)
                            }
                        });
                        tokio::spawn(async move {
                            let _ = http1::Builder::new().serve_connection(io, service).await;
                        });
                    }
                    Err(e) => {
                        eprintln!("accept error: {e}");
                        match e.kind() {
                            ErrorKind::ConnectionAborted
                            | ErrorKind::ConnectionReset
                            | ErrorKind::Interrupted
                            | ErrorKind::WouldBlock => {}
                            _ => break,
                        }
                    }
                },
                _ = &mut rx => break,
            }
        }
    });

    Ok((addr, handler, recorded, ShutdownHandle { join, stop: tx }))
}

/// Create a `canvasgraphql` command pointed at the local server.
#[allow(
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    reason = "helper for integration tests"
)]
pub fn canvas_cmd(addr: SocketAddr) -> Command {
    let mut cmd = Command::cargo_bin("canvasgraphql").expect("binary");
    cmd.env("CANVAS_GRAPHQL_URL", format!("http://{addr}/api/graphql"))
        .env("CANVAS_API_TOKEN", "dummy")
        .env_remove("CANVAS_ACTIVE_TERM")
        .env_remove("RUST_LOG");
    cmd
}

/// Configure handler to respond with `(status, body)` pairs in order.
///
/// Requests beyond the supplied replies get a 404.
///
/// # Panics
///
/// Panics if building the response fails.
#[allow(dead_code, reason = "helper used in some tests only")]
pub fn set_sequential_responder(handler: &Handler, replies: Vec<(u16, String)>) {
    let replies = Arc::new(Mutex::new(VecDeque::from(replies)));
    *handler.lock().expect("lock handler") = Box::new(move |_req| {
        let (status, body) = replies
            .lock()
            .expect("lock replies")
            .pop_front()
            .unwrap_or_else(|| (404, "No handler".to_string()));
        Response::builder()
            .status(StatusCode::from_u16(status).expect("valid status"))
            .header("Content-Type", "application/json")
            .body(Full::from(body))
            .expect("build response")
    });
}

/// Course listing used across the integration tests.
#[allow(dead_code, reason = "helper used in some tests only")]
pub fn courses_body() -> String {
    serde_json::json!({
        "data": {
            "allCourses": [
                { "name": "CS101", "id": "1", "term": { "name": "Spring 2024" } },
                { "name": "CS102", "id": "2", "term": { "name": "Default Term" } },
                { "name": "HIST10", "id": "3", "term": { "name": "Fall 2023" } }
            ]
        }
    })
    .to_string()
}
