//! Structured audit records shipped to the log sink.
//!
//! Every evaluation emits exactly one JSON document. Shipping is
//! fire-and-forget: a slow or unreachable sink never delays the response,
//! and delivery failures are only logged.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

/// One structured log document describing a single evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    pub record_id: Uuid,
    pub service: &'static str,
    pub event: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

impl AuditRecord {
    pub fn new(event: &str) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            service: env!("CARGO_PKG_NAME"),
            event: event.to_string(),
            timestamp: Utc::now(),
            fields: serde_json::Map::new(),
        }
    }

    /// Attach an extra field to the record.
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }
}

/// Destination for audit records.
pub trait AuditSink: Send + Sync {
    /// Hand over a record. Must not block on delivery.
    fn emit(&self, record: AuditRecord);
}

/// Sink writing records to the process log. Used when shipping is disabled.
pub struct LogSink;

impl AuditSink for LogSink {
    fn emit(&self, record: AuditRecord) {
        match serde_json::to_string(&record) {
            Ok(doc) => info!(target: "audit", %doc, "audit record"),
            Err(e) => warn!(error = %e, "Failed to serialize audit record"),
        }
    }
}

/// Sink posting each record to an Elasticsearch-compatible `_doc` endpoint.
#[derive(Clone)]
pub struct ElasticSink {
    http: reqwest::Client,
    endpoint: String,
}

impl ElasticSink {
    /// `base_url` is the Elasticsearch root, e.g. `http://localhost:9200`.
    pub fn new(base_url: &str, index: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/{}/_doc", base_url.trim_end_matches('/'), index),
        }
    }

    /// POST a single record. Public within the crate for tests.
    pub(crate) async fn ship(&self, record: &AuditRecord) -> Result<(), reqwest::Error> {
        self.http
            .post(&self.endpoint)
            .json(record)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl AuditSink for ElasticSink {
    fn emit(&self, record: AuditRecord) {
        let sink = self.clone();
        tokio::spawn(async move {
            if let Err(e) = sink.ship(&record).await {
                warn!(
                    record_id = %record.record_id,
                    event = %record.event,
                    error = %e,
                    "Failed to ship audit record"
                );
            }
        });
    }
}
