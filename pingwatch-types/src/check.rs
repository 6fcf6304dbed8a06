//! Ping log entries.

use serde::{Deserialize, Serialize};

use crate::{lenient, EndpointId, RawTargetRef, RecordError, RecordId, TargetRef, Timestamp};

/// One observed result of pinging an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRecord {
    pub id: RecordId,
    pub target: TargetRef,
    /// HTTP status, `None` when the request never produced one.
    pub status_code: Option<u16>,
    /// Round-trip latency in milliseconds, `None` when not measured.
    pub response_time: Option<u64>,
    pub created_at: Timestamp,
}

impl CheckRecord {
    pub fn endpoint_id(&self) -> EndpointId {
        self.target.id
    }

    /// A check succeeds only with a 2xx status.
    pub fn is_success(&self) -> bool {
        matches!(self.status_code, Some(200..=299))
    }
}

/// Wire form of [`CheckRecord`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCheckRecord {
    #[serde(default, deserialize_with = "lenient::int")]
    pub id: Option<i64>,
    #[serde(default)]
    pub target: Option<RawTargetRef>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub status_code: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub response_time: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl TryFrom<RawCheckRecord> for CheckRecord {
    type Error = RecordError;

    fn try_from(raw: RawCheckRecord) -> Result<Self, Self::Error> {
        let id = RecordId(lenient::id("id", raw.id)?);
        let target = raw.target.ok_or(RecordError::MissingField("target"))?.try_into()?;
        let created_at = lenient::timestamp("created_at", raw.created_at.as_deref())?;

        // Zero or out-of-range codes mean the transport failed.
        let status_code = raw
            .status_code
            .filter(|code| (100..=599).contains(code))
            .and_then(|code| u16::try_from(code).ok());
        let response_time = raw.response_time.and_then(|ms| u64::try_from(ms).ok());

        Ok(Self {
            id,
            target,
            status_code,
            response_time,
            created_at,
        })
    }
}
