//! Transcript logging for Canvas GraphQL requests.

use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::Path;
use std::sync::Mutex;

use log::warn;
use serde_json::json;

use super::CanvasClient;
use super::helpers::{BODY_SNIPPET_LEN, snippet};
use super::HttpResponse;
use super::types::Payload;

pub(super) type TranscriptWriter = Mutex<BufWriter<File>>;

/// Open the transcript file, continuing without one when it cannot be created.
pub(super) fn open_transcript(path: Option<&Path>) -> Option<TranscriptWriter> {
    let path = path?;
    match File::create(path) {
        Ok(file) => Some(Mutex::new(BufWriter::new(file))),
        Err(e) => {
            warn!("failed to create transcript {}: {e}", path.display());
            None
        }
    }
}

impl CanvasClient {
    /// Append the request and response to the transcript if enabled.
    pub(super) fn log_transcript(&self, payload: &Payload, operation: &str, resp: &HttpResponse) {
        let Some(t) = &self.transcript else {
            return;
        };
        let line = json!({
            "operation": operation,
            "status": resp.status,
            "request": payload.as_value(),
            "response": snippet(&resp.body, BODY_SNIPPET_LEN),
        });
        match t.lock() {
            Ok(mut f) => {
                if let Err(e) = writeln!(f, "{line}") {
                    warn!("failed to write transcript for op={operation}: {e}");
                    return;
                }
                if let Err(e) = f.flush() {
                    warn!("failed to flush transcript for op={operation}: {e}");
                }
            }
            Err(e) => warn!("failed to lock transcript for op={operation}: {e}"),
        }
    }
}
