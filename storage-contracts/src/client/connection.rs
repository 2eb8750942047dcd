// SPDX-License-Identifier: GPL-3.0-only

//! Plugin session
//!
//! A [`Connection`] owns its transport and the most recent error. Every
//! operation takes `&mut self`, so at most one call is in flight per
//! connection; independent work needs independent connections.

use std::collections::BTreeMap;

use storage_types::Flags;
use tracing::{debug, warn};

use super::array::decode_entities;
use super::config::ConnectConfig;
use super::job::{Submission, parse_job_only, parse_submission};
use super::{Result, translate, validate};
use crate::protocol::{DecodeError, LsmError, Transport, Value, ValueType, WireEntity};

/// Named parameters for one call; `flags` is always present
pub(crate) struct Params(BTreeMap<String, Value>);

impl Params {
    pub(crate) fn new(flags: Flags) -> Self {
        let mut params = BTreeMap::new();
        params.insert("flags".to_string(), Value::from(flags.bits()));
        Self(params)
    }

    pub(crate) fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

pub struct Connection {
    transport: Box<dyn Transport>,
    uri: String,
    plugin: String,
    last_error: Option<LsmError>,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("uri", &self.uri)
            .field("plugin", &self.plugin)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl Connection {
    /// Validate `config`, then run the `startup` handshake over `transport`.
    ///
    /// On any failure the transport is closed before the error is returned.
    pub async fn connect(
        mut transport: Box<dyn Transport>,
        config: &ConnectConfig,
        flags: Flags,
    ) -> Result<Self> {
        let plugin = match validate::flags(flags).and_then(|()| {
            config.validate()?;
            config.plugin_name()
        }) {
            Ok(plugin) => plugin,
            Err(err) => {
                transport.close().await;
                return Err(err);
            }
        };

        let params = Params::new(flags)
            .with("uri", &config.uri)
            .with("password", config.password.as_deref())
            .with("timeout", config.timeout_ms);

        debug!(%plugin, timeout_ms = config.timeout_ms, "starting plugin session");
        if let Err(err) = transport.rpc("startup", params.into_value()).await {
            transport.close().await;
            let err = translate::transport_error("startup", err);
            warn!(%plugin, error = %err, "plugin handshake failed");
            return Err(err);
        }

        Ok(Self {
            transport,
            uri: config.uri.clone(),
            plugin,
            last_error: None,
        })
    }

    /// Send `shutdown` and release the transport.
    ///
    /// The connection is gone afterwards whatever the outcome; the returned
    /// status is that of the shutdown request.
    pub async fn close(mut self, flags: Flags) -> Result<()> {
        self.last_error = None;
        let outcome = match validate::flags(flags) {
            Ok(()) => self
                .transport
                .rpc("shutdown", Params::new(flags).into_value())
                .await
                .map(|_| ())
                .map_err(|err| translate::transport_error("shutdown", err)),
            Err(err) => Err(err),
        };
        self.transport.close().await;
        debug!(plugin = %self.plugin, ok = outcome.is_ok(), "plugin session closed");
        outcome
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Plugin name taken from the URI scheme
    pub fn plugin(&self) -> &str {
        &self.plugin
    }

    /// Error recorded by the most recent operation, if it failed
    pub fn last_error(&self) -> Option<&LsmError> {
        self.last_error.as_ref()
    }

    /// Set the timeout the plugin applies to its own array calls
    pub async fn timeout_set(&mut self, timeout_ms: u32, flags: Flags) -> Result<()> {
        self.gate(|| validate::flags(flags))?;
        let params = Params::new(flags).with("ms", timeout_ms);
        self.call_unit("time_out_set", params).await
    }

    pub async fn timeout_get(&mut self, flags: Flags) -> Result<u32> {
        self.gate(|| validate::flags(flags))?;
        let reply = self.call("time_out_get", Params::new(flags)).await?;
        self.decode("time_out_get", reply.as_u32())
    }

    /// Start an operation: clear the error slot and run its argument checks.
    /// A failing check is returned as is. It is not recorded and nothing is sent.
    pub(crate) fn gate(&mut self, checks: impl FnOnce() -> Result<()>) -> Result<()> {
        self.last_error = None;
        checks().inspect_err(|err| {
            debug!(plugin = %self.plugin, number = %err.number, "argument check failed");
        })
    }

    fn record(&mut self, err: LsmError) -> LsmError {
        warn!(plugin = %self.plugin, number = %err.number, message = %err.message, "operation failed");
        self.last_error = Some(err.clone());
        err
    }

    /// Perform one RPC, translating transport failures
    pub(crate) async fn call(&mut self, method: &str, params: Params) -> Result<Value> {
        debug!(plugin = %self.plugin, method, "rpc");
        match self.transport.rpc(method, params.into_value()).await {
            Ok(reply) => Ok(reply),
            Err(err) => {
                let err = translate::transport_error(method, err);
                Err(self.record(err))
            }
        }
    }

    /// Surface a failure to interpret a successful reply
    pub(crate) fn decode<T>(&mut self, method: &str, decoded: Result<T, DecodeError>) -> Result<T> {
        decoded.map_err(|err| {
            let err = translate::decode_error(method, err);
            self.record(err)
        })
    }

    pub(crate) async fn call_unit(&mut self, method: &str, params: Params) -> Result<()> {
        self.call(method, params).await.map(|_| ())
    }

    pub(crate) async fn call_bool(&mut self, method: &str, params: Params) -> Result<bool> {
        let reply = self.call(method, params).await?;
        self.decode(method, reply.as_bool())
    }

    pub(crate) async fn call_list<T: WireEntity>(
        &mut self,
        method: &str,
        params: Params,
    ) -> Result<Vec<T>> {
        let reply = self.call(method, params).await?;
        self.decode(method, decode_entities(&reply))
    }

    /// Call an operation that returns a `T` inline or a job
    pub(crate) async fn submit<T: WireEntity>(
        &mut self,
        method: &str,
        params: Params,
    ) -> Result<Submission<T>> {
        let reply = self.call(method, params).await?;
        let submission = self.decode(method, parse_submission(&reply))?;
        if let Some(job) = submission.job() {
            debug!(method, %job, "job started");
        }
        Ok(submission)
    }

    /// Call an operation that returns nothing inline or a job
    pub(crate) async fn submit_job(&mut self, method: &str, params: Params) -> Result<Submission<()>> {
        let reply = self.call(method, params).await?;
        let submission = self.decode(method, parse_job_only(&reply))?;
        if let Some(job) = submission.job() {
            debug!(method, %job, "job started");
        }
        Ok(submission)
    }

    /// Call an operation whose reply must be a `T` object
    pub(crate) async fn call_entity<T: WireEntity>(
        &mut self,
        method: &str,
        params: Params,
    ) -> Result<T> {
        let reply = self.call(method, params).await?;
        let decoded = match reply.value_type() {
            ValueType::Object => T::from_value(&reply),
            found => Err(DecodeError::WrongType {
                expected: ValueType::Object,
                found,
            }),
        };
        self.decode(method, decoded)
    }
}
