use std::fmt::{Display, Formatter};

use axiom_core::ProviderId;
use serde::Serialize;
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

/// Request identifier (UUID v4) for correlating output with diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meta {
    pub request_id: RequestId,
    pub generated_at: String,
    pub latency_ms: u64,
    /// Distinct providers behind the records, in first-seen order.
    pub sources: Vec<ProviderId>,
}

impl Meta {
    pub fn new(latency_ms: u64, sources: Vec<ProviderId>) -> Self {
        Self {
            request_id: RequestId::new_v4(),
            generated_at: OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_default(),
            latency_ms,
            sources,
        }
    }

    /// True when any record came from the synthetic generator.
    pub fn has_synthetic_data(&self) -> bool {
        self.sources.iter().any(|source| source.is_synthetic())
    }
}

/// Output wrapper shared by every command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub meta: Meta,
    pub data: Value,
}

impl Envelope {
    pub fn new(meta: Meta, data: Value) -> Self {
        Self { meta, data }
    }
}
