// SPDX-License-Identifier: GPL-3.0-only

//! In-memory plugin stand-in
//!
//! A [`ScriptedTransport`] answers calls from a queue of expected
//! `(method, reply)` pairs and records every request it sees. Requests and
//! replies both pass through the JSON envelopes, so a value that would not
//! survive the wire fails here as well. Clones share one script: a test keeps
//! a handle while the connection owns another.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use storage_contracts::protocol::{
    RemoteError, Request, Response, Transport, TransportError, Value,
};
use tracing::trace;

use crate::errors::{Result, TestingError};

type Reply = std::result::Result<Value, TransportError>;

/// One request as the plugin received it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: String,
    pub params: Value,
}

impl RecordedCall {
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }
}

#[derive(Debug, Default)]
struct Script {
    replies: VecDeque<(String, Reply)>,
    calls: Vec<RecordedCall>,
    violations: Vec<TestingError>,
    next_id: u64,
    closed: bool,
}

impl Script {
    fn violation(&mut self, method: String, expected: String) -> TransportError {
        let violation = TestingError::UnexpectedCall { method, expected };
        let message = violation.to_string();
        self.violations.push(violation);
        TransportError::Other(message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue the outcome of the next call, which must be `method`
    pub fn expect(&self, method: &str, reply: Reply) -> &Self {
        self.lock().replies.push_back((method.to_string(), reply));
        self
    }

    pub fn reply(&self, method: &str, value: impl Into<Value>) -> &Self {
        self.expect(method, Ok(value.into()))
    }

    pub fn fail(&self, method: &str, error: TransportError) -> &Self {
        self.expect(method, Err(error))
    }

    /// Plugin answers `method` with an error object
    pub fn fail_with_code(&self, method: &str, code: i32, message: &str) -> &Self {
        self.fail(
            method,
            TransportError::Protocol {
                code,
                message: message.to_string(),
                data: None,
            },
        )
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.lock().calls.iter().map(|c| c.method.clone()).collect()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.lock().calls.last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Every queued reply was consumed and nothing unscripted was called
    pub fn verify(&self) -> Result<()> {
        let script = self.lock();
        if let Some(violation) = script.violations.first() {
            return Err(violation.clone());
        }
        if let Some((next, _)) = script.replies.front() {
            return Err(TestingError::UnconsumedReplies {
                count: script.replies.len(),
                next: next.clone(),
            });
        }
        Ok(())
    }

    pub fn boxed(&self) -> Box<dyn Transport> {
        Box::new(self.clone())
    }
}

/// Pass a scripted outcome through the response envelope
fn over_the_wire(reply: Reply, id: u64) -> Reply {
    let response = match reply {
        Ok(result) => Response::success(result, id),
        Err(TransportError::Protocol {
            code,
            message,
            data,
        }) => Response::failure(RemoteError { code, message, data }, id),
        Err(other) => return Err(other),
    };
    Response::from_json(&response.to_json()?)?.into_result()
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn rpc(&mut self, method: &str, params: Value) -> Reply {
        let mut script = self.lock();
        script.next_id += 1;
        let id = script.next_id;

        let encoded = Request::new(method, params, id).to_json()?;
        trace!(%encoded, "scripted plugin received request");
        let request = Request::from_json(&encoded)?;

        script.calls.push(RecordedCall {
            method: request.method.clone(),
            params: request.params,
        });

        match script.replies.pop_front() {
            Some((expected, reply)) if expected == request.method => over_the_wire(reply, id),
            Some((expected, _)) => Err(script.violation(request.method, expected)),
            None => Err(script.violation(request.method, "no further calls".to_string())),
        }
    }

    async fn close(&mut self) {
        self.lock().closed = true;
    }
}
