// Rust guideline compliant 2026-02-06

//! Persistence contract for the durable credential list.
//!
//! The associative store is only a cache; the repository behind this trait is
//! the source of truth. Encryption and on-disk formats belong to concrete
//! repository implementations outside this crate.

use crate::{Credential, Result};

/// Durable storage for the ordered credential list.
pub trait CredentialRepository {
    /// Loads every persisted credential in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn load(&self) -> Result<Vec<Credential>>;

    /// Replaces the persisted list with `credentials`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn save(&mut self, credentials: &[Credential]) -> Result<()>;
}

/// Repository that keeps the credential list in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    credentials: Vec<Credential>,
    saves: usize,
}

impl MemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `credentials`.
    pub fn with_credentials(credentials: Vec<Credential>) -> Self {
        Self {
            credentials,
            saves: 0,
        }
    }

    /// Returns the currently persisted list.
    pub fn credentials(&self) -> &[Credential] {
        &self.credentials
    }

    /// Returns how many times `save` has been called.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl CredentialRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<Credential>> {
        Ok(self.credentials.clone())
    }

    fn save(&mut self, credentials: &[Credential]) -> Result<()> {
        self.credentials = credentials.to_vec();
        self.saves += 1;
        Ok(())
    }
}

impl<R: CredentialRepository + ?Sized> CredentialRepository for Box<R> {
    fn load(&self) -> Result<Vec<Credential>> {
        (**self).load()
    }

    fn save(&mut self, credentials: &[Credential]) -> Result<()> {
        (**self).save(credentials)
    }
}
