// Rust guideline compliant 2026-02-06

//! credstate Core Library
//!
//! This crate provides the in-memory engine behind a credential manager:
//! - Associative store (separate chaining, resize on load factor)
//! - Command log (linear undo/redo of credential changes)
//! - Dependency graph (BFS, DFS, strongly connected components)
//! - Access-frequency matrix (per-hour counters, top-N ranking)
//! - Operation queue (FIFO pending work)
//! - Credential manager composing all of the above over a repository
//! - Error types and result handling

pub mod access;
pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod graph;
pub mod manager;
pub mod models;
pub mod persistence;
pub mod queue;
pub mod ranking;
pub mod store;

pub use access::AccessFrequencyMatrix;
pub use clock::{FixedClock, HourClock, SystemClock};
pub use command::{Command, CommandLog, CommandStack, Mutation};
pub use config::Config;
pub use error::{Error, Result};
pub use graph::DependencyGraph;
pub use manager::{CredentialManager, CredentialStore};
pub use models::{Credential, ServiceUsage};
pub use persistence::{CredentialRepository, MemoryRepository};
pub use queue::OperationQueue;
pub use ranking::{heap_sort, heap_sort_by, heap_sort_by_key};
pub use store::AssociativeStore;
