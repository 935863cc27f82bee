// Rust guideline compliant 2026-02-06

//! Core data models shared between the orchestrator and its collaborators.

use serde::{Deserialize, Serialize};

/// A persisted credential: a service identifier and its secret.
///
/// The empty string is a valid service identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Service identifier, used as the store key.
    pub service: String,
    /// Secret associated with the service.
    pub secret: String,
}

impl Credential {
    /// Creates a new Credential.
    pub fn new(service: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            secret: secret.into(),
        }
    }
}

/// Total access count for one service, the element type of heap-sort rankings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceUsage {
    /// Service identifier.
    pub service: String,
    /// Number of recorded accesses across all hours.
    pub count: u64,
}

impl ServiceUsage {
    /// Creates a new ServiceUsage.
    pub fn new(service: impl Into<String>, count: u64) -> Self {
        Self {
            service: service.into(),
            count,
        }
    }
}

impl std::fmt::Display for ServiceUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} accesses)", self.service, self.count)
    }
}
