//! Health checks
//!
//! [`StatusChecker`] runs probe reads through the generic request surface
//! and reports whether the API is serving them.

use crate::error::Result;
use crate::http::{Client, RequestOptions};
use crate::types::Method;
use chrono::Utc;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Report status when every probe returned data
pub const STATUS_OK: &str = "OK";

/// Report status when any probe failed or came back empty
pub const STATUS_NOT_OK: &str = "NOT OK";

/// Dependencies listed in reports unless configured otherwise
pub const DEFAULT_DEPENDENCIES: &[&str] = &["SendGrid", "Memcachier"];

/// A read that must return data for the API to count as healthy
#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    pub name: String,
    pub path: String,
    pub options: RequestOptions,
}

impl Probe {
    pub fn new(name: impl Into<String>, path: impl Into<String>, options: RequestOptions) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            options,
        }
    }

    /// Fetch a known location and run a keyword search
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(
                "location",
                "locations/san-mateo-free-medical-clinic",
                RequestOptions::new(),
            ),
            Self::new("search", "search", RequestOptions::new().field("keyword", "food")),
        ]
    }
}

/// Outcome of a status check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub dependencies: Vec<String>,
    /// `"OK"` or `"NOT OK"`
    pub status: String,
    /// Unix timestamp of the check
    pub updated: i64,
    /// Per-probe results
    #[serde(default)]
    pub checks: BTreeMap<String, bool>,
}

impl StatusReport {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Runs probes against a shared client
#[derive(Debug, Clone)]
pub struct StatusChecker {
    client: Arc<Client>,
    probes: Vec<Probe>,
    dependencies: Vec<String>,
}

impl StatusChecker {
    /// Checker with the default probes and dependencies
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            probes: Probe::defaults(),
            dependencies: DEFAULT_DEPENDENCIES.iter().map(|d| (*d).to_string()).collect(),
        }
    }

    #[must_use]
    pub fn with_probes(mut self, probes: Vec<Probe>) -> Self {
        self.probes = probes;
        self
    }

    #[must_use]
    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    /// Run every probe concurrently and build a report.
    ///
    /// A probe passes when its call succeeds with a non-empty body; any
    /// error counts as a failure rather than aborting the check.
    pub async fn check(&self) -> StatusReport {
        let results = join_all(self.probes.iter().map(|probe| self.run(probe))).await;

        let mut checks = BTreeMap::new();
        for (probe, result) in self.probes.iter().zip(results) {
            let passed = match result {
                Ok(data) => is_present(&data),
                Err(e) => {
                    warn!("Status probe {} failed: {e}", probe.name);
                    false
                }
            };
            checks.insert(probe.name.clone(), passed);
        }

        let ok = checks.values().all(|passed| *passed);
        debug!("Status check: {checks:?}");

        StatusReport {
            dependencies: self.dependencies.clone(),
            status: if ok { STATUS_OK } else { STATUS_NOT_OK }.to_string(),
            updated: Utc::now().timestamp(),
            checks,
        }
    }

    async fn run(&self, probe: &Probe) -> Result<Value> {
        self.client
            .request(Method::GET, &probe.path, probe.options.clone())
            .await
    }
}

/// Whether a body carries data. Null, `false` and blank strings, arrays
/// or objects do not.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(_) => true,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests;
