//! Monitored endpoints and the endpoint snapshot embedded in other records.

use serde::{Deserialize, Serialize};

use crate::{lenient, EndpointId, RecordError};

/// A monitored URL as configured by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub id: EndpointId,
    pub name: String,
    pub url: String,
    /// Monitoring enabled.
    pub is_active: bool,
    /// Email alerts enabled.
    pub send_email: bool,
    /// Result of the most recent check.
    pub is_down: bool,
}

impl Endpoint {
    /// Whether the last check saw the endpoint up.
    pub fn is_up(&self) -> bool {
        !self.is_down
    }

    /// The reference other records use to point at this endpoint.
    pub fn target_ref(&self) -> TargetRef {
        TargetRef {
            id: self.id,
            name: self.name.clone(),
            url: self.url.clone(),
        }
    }
}

/// Wire form of [`Endpoint`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEndpoint {
    #[serde(default, deserialize_with = "lenient::int")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub send_email: Option<bool>,
    #[serde(default)]
    pub is_down: Option<bool>,
}

impl TryFrom<RawEndpoint> for Endpoint {
    type Error = RecordError;

    fn try_from(raw: RawEndpoint) -> Result<Self, Self::Error> {
        let id = EndpointId(lenient::id("id", raw.id)?);
        let name = validate_name(raw.name)?;
        let url = validate_url(raw.url)?;

        Ok(Self {
            id,
            name,
            url,
            // Flags default to the backend's column defaults.
            is_active: raw.is_active.unwrap_or(true),
            send_email: raw.send_email.unwrap_or(false),
            is_down: raw.is_down.unwrap_or(false),
        })
    }
}

/// Name and URL of an endpoint as captured when a log or alert was written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TargetRef {
    pub id: EndpointId,
    pub name: String,
    pub url: String,
}

/// Wire form of [`TargetRef`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTargetRef {
    #[serde(default, deserialize_with = "lenient::int")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl TryFrom<RawTargetRef> for TargetRef {
    type Error = RecordError;

    fn try_from(raw: RawTargetRef) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EndpointId(lenient::id("target.id", raw.id)?),
            name: validate_name(raw.name)?,
            url: validate_url(raw.url)?,
        })
    }
}

fn validate_name(name: Option<String>) -> Result<String, RecordError> {
    let name = name.ok_or(RecordError::MissingField("name"))?;
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RecordError::EmptyName);
    }
    Ok(trimmed.to_string())
}

fn validate_url(url: Option<String>) -> Result<String, RecordError> {
    let url = url.ok_or(RecordError::MissingField("url"))?;
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(RecordError::InvalidUrl {
            url,
            reason: "empty".to_string(),
        });
    }
    url::Url::parse(trimmed).map_err(|e| RecordError::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    Ok(trimmed.to_string())
}
