// SPDX-License-Identifier: GPL-3.0-only

//! Asynchronous job protocol
//!
//! A long-running operation either finishes inline and hands back its result,
//! or returns a job identifier. The caller then polls [`Connection::job_status`]
//! (or one of its typed siblings) until the job is terminal, and finally hands
//! the identifier back with [`Connection::job_free`]. There is no push
//! notification and no built-in poll interval.

use std::fmt;

use storage_types::{FileSystem, Flags, JobStatus, Pool, Snapshot, Volume};
use thiserror::Error;
use tracing::debug;

use super::connection::{Connection, Params};
use super::{Result, validate};
use crate::protocol::{DecodeError, LsmError, Value, ValueType, WireEntity};

/// Plugin-side job identifier.
///
/// Not `Clone`: a successful [`Connection::job_free`] consumes it, so a job
/// can be released at most once. A failed release hands it back.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    /// Re-adopt an identifier obtained elsewhere (e.g. persisted by a caller)
    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A release that did not go through; `job` is still live on the plugin
#[derive(Debug, Error)]
#[error("failed to release job {job}: {error}")]
pub struct JobFreeError {
    pub job: JobId,
    pub error: LsmError,
}

impl JobFreeError {
    pub fn into_parts(self) -> (JobId, LsmError) {
        (self.job, self.error)
    }
}

impl From<JobFreeError> for LsmError {
    fn from(err: JobFreeError) -> Self {
        err.error
    }
}

/// Outcome of an operation that may run asynchronously
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub enum Submission<T> {
    /// Finished inline
    Completed(T),
    /// Accepted; poll the job for progress and result
    Started(JobId),
}

impl<T> Submission<T> {
    pub fn is_started(&self) -> bool {
        matches!(self, Submission::Started(_))
    }

    pub fn job(&self) -> Option<&JobId> {
        match self {
            Submission::Started(job) => Some(job),
            Submission::Completed(_) => None,
        }
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Submission::Completed(value) => Some(value),
            Submission::Started(_) => None,
        }
    }
}

/// One poll of a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobProgress<T> {
    pub status: JobStatus,
    /// 0..=100
    pub percent: u8,
    /// Present only once `status` is [`JobStatus::Complete`] and the job
    /// produced a payload
    pub result: Option<T>,
}

impl<T> JobProgress<T> {
    pub fn is_complete(&self) -> bool {
        self.status == JobStatus::Complete
    }
}

fn job_id(raw: &str) -> Result<JobId, DecodeError> {
    if raw.is_empty() {
        return Err(DecodeError::Invalid("empty job id".to_string()));
    }
    Ok(JobId(raw.to_string()))
}

/// Interpret the reply of an operation that promises a typed result.
///
/// Accepted shapes: a job id string, a result object, or the pair
/// `[job | null, object | null]`. A reply carrying neither is an error.
pub(crate) fn parse_submission<T: WireEntity>(
    value: &Value,
) -> Result<Submission<T>, DecodeError> {
    let (job, result) = match value {
        Value::Array(pair) => match pair.as_slice() {
            [job, result] => (job, result),
            other => {
                return Err(DecodeError::WrongLength {
                    expected: 2,
                    found: other.len(),
                });
            }
        },
        Value::String(_) => (value, &Value::Null),
        _ => (&Value::Null, value),
    };

    match (job, result) {
        (Value::String(id), _) => Ok(Submission::Started(job_id(id)?)),
        (Value::Null, Value::Object(_)) => Ok(Submission::Completed(T::from_value(result)?)),
        (Value::Null, Value::Null) => Err(DecodeError::Invalid(
            "reply carried neither a job nor a result".to_string(),
        )),
        (Value::Null, other) => Err(DecodeError::WrongType {
            expected: ValueType::Object,
            found: other.value_type(),
        }),
        (other, _) => Err(DecodeError::WrongType {
            expected: ValueType::String,
            found: other.value_type(),
        }),
    }
}

/// Interpret the reply of an operation that returns at most a job id
pub(crate) fn parse_job_only(value: &Value) -> Result<Submission<()>, DecodeError> {
    match value {
        Value::Null => Ok(Submission::Completed(())),
        Value::String(id) => Ok(Submission::Started(job_id(id)?)),
        Value::Array(pair) => match pair.as_slice() {
            [job, _] => parse_job_only(job),
            other => Err(DecodeError::WrongLength {
                expected: 2,
                found: other.len(),
            }),
        },
        other => Err(DecodeError::WrongType {
            expected: ValueType::String,
            found: other.value_type(),
        }),
    }
}

/// Interpret `[status, percent, result]`.
///
/// The result slot is only looked at when the status is complete.
pub(crate) fn parse_status<T>(
    value: &Value,
    decode: impl FnOnce(&Value) -> Result<T, DecodeError>,
) -> Result<JobProgress<T>, DecodeError> {
    let [status, percent, result] = value.as_array()? else {
        return Err(DecodeError::WrongLength {
            expected: 3,
            found: value.as_array()?.len(),
        });
    };

    let status = JobStatus::try_from(status.as_i32()?)?;
    let percent = percent.as_u8()?;
    if percent > 100 {
        return Err(DecodeError::Invalid(format!(
            "percent complete {percent} outside 0..=100"
        )));
    }

    let result = match (status, result) {
        (JobStatus::Complete, Value::Null) => None,
        (JobStatus::Complete, payload) => Some(decode(payload)?),
        _ => None,
    };

    Ok(JobProgress {
        status,
        percent,
        result,
    })
}

impl Connection {
    /// Poll a job without extracting a result
    pub async fn job_status(&mut self, job: &JobId, flags: Flags) -> Result<JobProgress<()>> {
        let progress = self.poll(job, flags, |_| Ok(())).await?;
        Ok(JobProgress {
            result: None,
            ..progress
        })
    }

    /// Poll a job whose result is a `T`
    pub async fn job_status_as<T: WireEntity>(
        &mut self,
        job: &JobId,
        flags: Flags,
    ) -> Result<JobProgress<T>> {
        self.poll(job, flags, T::from_value).await
    }

    pub async fn job_status_pool(&mut self, job: &JobId, flags: Flags) -> Result<JobProgress<Pool>> {
        self.job_status_as(job, flags).await
    }

    pub async fn job_status_volume(
        &mut self,
        job: &JobId,
        flags: Flags,
    ) -> Result<JobProgress<Volume>> {
        self.job_status_as(job, flags).await
    }

    pub async fn job_status_fs(
        &mut self,
        job: &JobId,
        flags: Flags,
    ) -> Result<JobProgress<FileSystem>> {
        self.job_status_as(job, flags).await
    }

    pub async fn job_status_snapshot(
        &mut self,
        job: &JobId,
        flags: Flags,
    ) -> Result<JobProgress<Snapshot>> {
        self.job_status_as(job, flags).await
    }

    async fn poll<T>(
        &mut self,
        job: &JobId,
        flags: Flags,
        decode: impl FnOnce(&Value) -> Result<T, DecodeError>,
    ) -> Result<JobProgress<T>> {
        self.gate(|| {
            validate::non_empty("job id", job.as_str())?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags).with("job_id", job.as_str());
        let reply = self.call("job_status", params).await?;
        let progress = self.decode("job_status", parse_status(&reply, decode))?;
        debug!(job = %job, status = %progress.status, percent = progress.percent, "job polled");
        Ok(progress)
    }

    /// Release a job on the plugin side.
    ///
    /// The id is consumed only when the plugin confirms the release; on
    /// failure it comes back inside [`JobFreeError`] so the call can be retried.
    pub async fn job_free(&mut self, job: JobId, flags: Flags) -> Result<(), JobFreeError> {
        if let Err(error) = self.gate(|| {
            validate::non_empty("job id", job.as_str())?;
            validate::flags(flags)
        }) {
            return Err(JobFreeError { job, error });
        }

        let params = Params::new(flags).with("job_id", job.as_str());
        if let Err(error) = self.call("job_free", params).await {
            return Err(JobFreeError { job, error });
        }
        debug!(job = %job, "job released");
        Ok(())
    }
}
