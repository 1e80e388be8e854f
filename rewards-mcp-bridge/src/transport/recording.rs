//! In-memory transport that records requests and replays canned responses.

use std::{collections::VecDeque, sync::Mutex};

use serde::Serialize;
use serde_json::Value;

use super::{ApiResponse, HttpMethod, Transport, sealed};

/// Request captured by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response with `body`.
    pub(crate) fn respond_json(self, status: u16, body: Value) -> Self {
        self.respond(ApiResponse { body: Some(body), error: None, status })
    }

    /// Queues an error envelope.
    pub(crate) fn respond_error(self, status: u16, error: &str) -> Self {
        self.respond(ApiResponse { body: None, error: Some(error.to_owned()), status })
    }

    pub(crate) fn respond(self, response: ApiResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl sealed::private::Sealed for RecordingTransport {}

impl Transport for RecordingTransport {
    async fn send<'a, B>(
        &'a self,
        method: HttpMethod,
        path: &'a str,
        body: Option<&'a B>,
        headers: &'a [(&'a str, &'a str)],
    ) -> ApiResponse
    where
        B: Serialize + Sync + ?Sized + 'a,
    {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: path.to_owned(),
            body: body.map(|b| serde_json::to_value(b).unwrap()),
            headers: headers.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect(),
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ApiResponse::transport_failure("no canned response"))
    }
}
