// Rust guideline compliant 2026-02-06

//! Credential manager orchestrating the in-memory engine.
//!
//! The manager owns one instance of every structure in this crate. Credential
//! writes go through to the repository before they reach the associative
//! store, and are logged as reversible commands. Reads reload the store from
//! the repository and count an access at the current hour.

use crate::access::AccessFrequencyMatrix;
use crate::clock::{HourClock, SystemClock};
use crate::command::{Command, CommandLog, Mutation};
use crate::graph::DependencyGraph;
use crate::persistence::CredentialRepository;
use crate::queue::OperationQueue;
use crate::ranking::heap_sort_by_key;
use crate::store::AssociativeStore;
use crate::{Config, Credential, Result, ServiceUsage};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Store type used as the credential cache.
pub type CredentialStore = AssociativeStore<String, String>;

/// Orchestrates credentials, history, dependencies, analytics and pending work.
pub struct CredentialManager<R> {
    repository: R,
    store: CredentialStore,
    history: CommandLog,
    dependencies: DependencyGraph,
    access: AccessFrequencyMatrix,
    pending: OperationQueue,
    clock: Box<dyn HourClock>,
    default_top_n: usize,
}

impl<R: CredentialRepository> CredentialManager<R> {
    /// Creates a manager with the default configuration and loads the
    /// persisted credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be loaded.
    pub fn new(repository: R) -> Result<Self> {
        Self::with_config(repository, &Config::default())
    }

    /// Creates a manager from `config` and loads the persisted credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the repository
    /// cannot be loaded.
    pub fn with_config(repository: R, config: &Config) -> Result<Self> {
        config.validate()?;

        let mut manager = Self {
            repository,
            store: CredentialStore::with_capacity(config.initial_capacity),
            history: CommandLog::new(),
            dependencies: DependencyGraph::new(),
            access: AccessFrequencyMatrix::new(),
            pending: OperationQueue::new(),
            clock: Box::new(SystemClock),
            default_top_n: config.default_top_n,
        };
        let count = manager.reload()?;
        info!(count, "credential manager initialized");
        Ok(manager)
    }

    /// Replaces the hour source used for access recording.
    pub fn with_clock(mut self, clock: impl HourClock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Rebuilds the store from the repository.
    ///
    /// # Returns
    ///
    /// The number of cached credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be loaded; the store is left
    /// unchanged.
    pub fn reload(&mut self) -> Result<usize> {
        let credentials = self.repository.load()?;
        self.store.clear();
        for credential in credentials {
            self.store.put(credential.service, credential.secret);
        }
        debug!(count = self.store.len(), "reloaded credential store");
        Ok(self.store.len())
    }

    /// Adds a credential, or updates it if the service already has one.
    ///
    /// The change is written to the repository, applied to the store, and
    /// recorded for undo. Any redo history is discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read or written; nothing
    /// is changed or recorded in that case.
    pub fn add_credential(&mut self, service: &str, secret: &str) -> Result<()> {
        let previous = self.store.get(service).map(String::as_str);
        let command = Command::for_write(service, previous, secret);
        apply_mutation(&mut self.repository, &mut self.store, command.forward())?;
        self.history.record(command);
        Ok(())
    }

    /// Reads the secret for a service and records the access.
    ///
    /// # Returns
    ///
    /// The secret if the service has a credential, None otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be loaded.
    pub fn get_credential(&mut self, service: &str) -> Result<Option<String>> {
        self.reload()?;
        self.access
            .record_access(service, self.clock.current_hour());
        Ok(self.store.get(service).cloned())
    }

    /// Reverts the most recent credential change.
    ///
    /// # Returns
    ///
    /// False if there is nothing to undo.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository write fails; the change stays undoable.
    pub fn undo(&mut self) -> Result<bool> {
        let repository = &mut self.repository;
        let store = &mut self.store;
        self.history
            .undo(|command| apply_mutation(repository, store, command.backward()))
    }

    /// Re-applies the most recently undone credential change.
    ///
    /// # Returns
    ///
    /// False if there is nothing to redo.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository write fails; the change stays redoable.
    pub fn redo(&mut self) -> Result<bool> {
        let repository = &mut self.repository;
        let store = &mut self.store;
        self.history
            .redo(|command| apply_mutation(repository, store, command.forward()))
    }

    /// Returns true if there is a change to undo.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns true if there is a change to redo.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Returns the undo/redo history.
    pub fn history(&self) -> &CommandLog {
        &self.history
    }

    /// Returns the number of cached credentials.
    pub fn credential_count(&self) -> usize {
        self.store.len()
    }

    /// Returns the cached service identifiers.
    pub fn services(&self) -> Vec<String> {
        self.store.keys().cloned().collect()
    }

    /// Returns the credential cache.
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Returns the repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Returns the repository mutably.
    ///
    /// Writes made here bypass the history; call [`Self::reload`] to refresh
    /// the store afterwards.
    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }
}

impl<R> CredentialManager<R> {
    /// Declares that `service` depends on `dependency`.
    ///
    /// # Returns
    ///
    /// True if the dependency is new.
    pub fn add_service_dependency(&mut self, service: &str, dependency: &str) -> bool {
        self.dependencies.add_edge(service, dependency)
    }

    /// Returns every service reachable from `service` in breadth-first order.
    pub fn related_services(&self, service: &str) -> Vec<String> {
        self.dependencies.bfs(service)
    }

    /// Returns every service reachable from `service` in depth-first order.
    pub fn dependency_walk(&self, service: &str) -> Vec<String> {
        self.dependencies.dfs(service)
    }

    /// Groups services into strongly connected clusters.
    pub fn service_clusters(&self) -> Vec<Vec<String>> {
        self.dependencies.strongly_connected_components()
    }

    /// Checks if the declared dependencies contain a cycle.
    pub fn has_dependency_cycle(&self) -> bool {
        self.dependencies.has_cycle()
    }

    /// Returns the service dependency graph.
    pub fn service_graph(&self) -> &DependencyGraph {
        &self.dependencies
    }

    /// Returns the hour → count access pattern of a service.
    pub fn access_pattern(&self, service: &str) -> BTreeMap<u8, u64> {
        self.access.access_pattern(service)
    }

    /// Returns the total number of recorded reads of a service.
    pub fn total_access_count(&self, service: &str) -> u64 {
        self.access.total_access_count(service)
    }

    /// Returns up to `top_n` services, most accessed first.
    pub fn most_accessed_services(&self, top_n: usize) -> Vec<String> {
        self.access.most_accessed_services(top_n)
    }

    /// Returns the configured default number of most accessed services.
    pub fn top_services(&self) -> Vec<String> {
        self.access.most_accessed_services(self.default_top_n)
    }

    /// Ranks every accessed service with heap sort, most used first.
    ///
    /// This path is independent of [`Self::most_accessed_services`], so the two
    /// rankings can be checked against each other. Equal counts keep
    /// first-recorded order, as they do there.
    pub fn most_used_services_by_heap_sort(&self) -> Vec<ServiceUsage> {
        let mut ranked: Vec<(usize, ServiceUsage)> = self
            .access
            .totals()
            .into_iter()
            .enumerate()
            .map(|(first_seen, (service, count))| (first_seen, ServiceUsage::new(service, count)))
            .collect();
        // Ascending, with later services first among equals, so reversing
        // yields descending counts in first-recorded order.
        heap_sort_by_key(&mut ranked, |(first_seen, usage)| {
            (usage.count, Reverse(*first_seen))
        });
        ranked.into_iter().rev().map(|(_, usage)| usage).collect()
    }

    /// Returns the access-frequency matrix.
    pub fn access_matrix(&self) -> &AccessFrequencyMatrix {
        &self.access
    }

    /// Queues an operation for later processing.
    pub fn queue_operation(&mut self, operation: impl Into<String>) {
        self.pending.enqueue(operation);
    }

    /// Drains all pending operations in FIFO order.
    pub fn process_pending_operations(&mut self) -> Vec<String> {
        let drained = self.pending.process_all();
        debug!(count = drained.len(), "processed pending operations");
        drained
    }

    /// Returns the number of pending operations.
    pub fn pending_operations_count(&self) -> usize {
        self.pending.len()
    }

    /// Returns the next pending operation without removing it.
    pub fn peek_next_operation(&self) -> Option<&str> {
        self.pending.peek()
    }

    /// Returns a snapshot of pending operations in FIFO order.
    pub fn pending_operations(&self) -> Vec<String> {
        self.pending.to_list()
    }

    /// Returns the pending operations queue.
    pub fn operations_queue(&self) -> &OperationQueue {
        &self.pending
    }
}

/// Applies one mutation to the repository, then to the store.
///
/// The repository is rewritten in full: a put updates the matching credential
/// in place or appends it, a remove drops every credential for the service.
fn apply_mutation<R: CredentialRepository>(
    repository: &mut R,
    store: &mut CredentialStore,
    mutation: Mutation<'_>,
) -> Result<()> {
    let mut credentials = repository.load()?;

    match mutation {
        Mutation::Put { service, secret } => {
            match credentials.iter_mut().find(|c| c.service == service) {
                Some(existing) => existing.secret = secret.to_string(),
                None => credentials.push(Credential::new(service, secret)),
            }
            repository.save(&credentials)?;
            store.put(service.to_string(), secret.to_string());
        }
        Mutation::Remove { service } => {
            credentials.retain(|c| c.service != service);
            repository.save(&credentials)?;
            store.remove(service);
        }
    }

    Ok(())
}
