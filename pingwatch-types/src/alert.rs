//! Down alerts.

use serde::{Deserialize, Serialize};

use crate::{lenient, RawTargetRef, RecordError, RecordId, TargetRef, Timestamp};

/// Record that an endpoint went down, as sent by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertEvent {
    pub id: RecordId,
    pub target: TargetRef,
    pub created_at: Timestamp,
}

/// Wire form of [`AlertEvent`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAlertEvent {
    #[serde(default, deserialize_with = "lenient::int")]
    pub id: Option<i64>,
    #[serde(default)]
    pub target: Option<RawTargetRef>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl TryFrom<RawAlertEvent> for AlertEvent {
    type Error = RecordError;

    fn try_from(raw: RawAlertEvent) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RecordId(lenient::id("id", raw.id)?),
            target: raw.target.ok_or(RecordError::MissingField("target"))?.try_into()?,
            created_at: lenient::timestamp("created_at", raw.created_at.as_deref())?,
        })
    }
}
