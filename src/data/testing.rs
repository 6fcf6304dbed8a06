//! Record fixtures for unit tests.

use chrono::{DateTime, Utc};
use pingwatch_types::{AlertEvent, CheckRecord, Endpoint, EndpointId, RecordId, TargetRef};

pub fn target(endpoint: u64) -> TargetRef {
    TargetRef {
        id: EndpointId(endpoint),
        name: format!("endpoint-{endpoint}"),
        url: format!("https://e{endpoint}.example.com/health"),
    }
}

pub fn check(
    id: u64,
    endpoint: u64,
    status: Option<u16>,
    latency: u64,
    at: DateTime<Utc>,
) -> CheckRecord {
    CheckRecord {
        id: RecordId(id),
        target: target(endpoint),
        status_code: status,
        response_time: Some(latency),
        created_at: at,
    }
}

pub fn named_check(id: u64, endpoint: u64, name: &str, url: &str, at: DateTime<Utc>) -> CheckRecord {
    CheckRecord {
        id: RecordId(id),
        target: TargetRef {
            id: EndpointId(endpoint),
            name: name.to_string(),
            url: url.to_string(),
        },
        status_code: Some(200),
        response_time: Some(1),
        created_at: at,
    }
}

pub fn endpoint(id: u64, is_down: bool) -> Endpoint {
    let t = target(id);
    Endpoint {
        id: t.id,
        name: t.name,
        url: t.url,
        is_active: true,
        send_email: false,
        is_down,
    }
}

pub fn alert(id: u64, endpoint: u64, at: DateTime<Utc>) -> AlertEvent {
    AlertEvent {
        id: RecordId(id),
        target: target(endpoint),
        created_at: at,
    }
}
