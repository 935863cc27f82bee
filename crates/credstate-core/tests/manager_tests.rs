// Rust guideline compliant 2026-02-06

//! Integration tests for the credential manager.
//!
//! These tests drive the manager end to end over an in-memory repository and
//! check that the store, history, analytics and repository stay consistent.

use credstate_core::{
    Command, Config, Credential, CredentialManager, CredentialRepository, Error, FixedClock,
    MemoryRepository, Result,
};
use std::collections::BTreeMap;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Helper to create a manager over an empty repository at a fixed hour.
fn manager_at(hour: i32) -> CredentialManager<MemoryRepository> {
    init_tracing();
    CredentialManager::new(MemoryRepository::new())
        .expect("Empty repository should load")
        .with_clock(FixedClock(hour))
}

/// Repository whose writes can be switched off.
#[derive(Default)]
struct FlakyRepository {
    inner: MemoryRepository,
    fail_saves: bool,
}

impl CredentialRepository for FlakyRepository {
    fn load(&self) -> Result<Vec<Credential>> {
        self.inner.load()
    }

    fn save(&mut self, credentials: &[Credential]) -> Result<()> {
        if self.fail_saves {
            return Err(Error::Persistence("disk full".to_string()));
        }
        self.inner.save(credentials)
    }
}

/// Repository that cannot be read.
struct UnreadableRepository;

impl CredentialRepository for UnreadableRepository {
    fn load(&self) -> Result<Vec<Credential>> {
        Err(Error::Persistence("locked".to_string()))
    }

    fn save(&mut self, _credentials: &[Credential]) -> Result<()> {
        Ok(())
    }
}

#[test]
fn test_loads_persisted_credentials() {
    let repository = MemoryRepository::with_credentials(vec![
        Credential::new("gmail", "pw1"),
        Credential::new("github", "pw2"),
    ]);
    let manager = CredentialManager::new(repository).expect("Should load");

    assert_eq!(manager.credential_count(), 2);
    assert_eq!(manager.store().get("gmail").map(String::as_str), Some("pw1"));
    assert!(!manager.can_undo(), "Loading is not an undoable change");
}

#[test]
fn test_load_failure_is_reported() {
    let result = CredentialManager::new(UnreadableRepository);
    assert!(matches!(result, Err(Error::Persistence(_))));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = Config {
        initial_capacity: 0,
        ..Config::default()
    };
    let result = CredentialManager::with_config(MemoryRepository::new(), &config);
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}

#[test]
fn test_config_sets_store_capacity() {
    let config = Config {
        initial_capacity: 64,
        default_top_n: 1,
    };
    let manager = CredentialManager::with_config(MemoryRepository::new(), &config)
        .expect("Valid config");
    assert_eq!(manager.store().capacity(), 64);
}

#[test]
fn test_add_writes_through_to_repository() {
    let mut manager = manager_at(9);
    manager.add_credential("gmail", "pw1").expect("Add should succeed");

    assert_eq!(
        manager.repository().credentials(),
        &[Credential::new("gmail", "pw1")]
    );
    assert_eq!(manager.repository().save_count(), 1);
    assert_eq!(manager.credential_count(), 1);
}

#[test]
fn test_add_then_update_records_matching_commands() {
    let mut manager = manager_at(9);
    manager.add_credential("gmail", "pw1").unwrap();
    assert!(matches!(
        manager.history().peek_undo(),
        Some(Command::AddCredential { .. })
    ));

    manager.add_credential("gmail", "pw2").unwrap();
    assert_eq!(
        manager.history().peek_undo(),
        Some(&Command::UpdateCredential {
            service: "gmail".to_string(),
            old_secret: "pw1".to_string(),
            new_secret: "pw2".to_string(),
        })
    );
    assert_eq!(manager.history().undo_len(), 2);
    assert_eq!(manager.repository().credentials().len(), 1, "Update is in place");
}

#[test]
fn test_get_credential_reads_through_and_records_access() {
    let mut manager = manager_at(14);
    manager.add_credential("gmail", "pw1").unwrap();

    assert_eq!(manager.get_credential("gmail").unwrap().as_deref(), Some("pw1"));
    assert_eq!(manager.get_credential("gmail").unwrap().as_deref(), Some("pw1"));

    assert_eq!(manager.total_access_count("gmail"), 2);
    assert_eq!(manager.access_pattern("gmail"), BTreeMap::from([(14u8, 2u64)]));
}

#[test]
fn test_get_missing_credential_still_counts_access() {
    let mut manager = manager_at(3);
    assert_eq!(manager.get_credential("nope").unwrap(), None);
    assert_eq!(manager.total_access_count("nope"), 1);
}

#[test]
fn test_get_with_invalid_clock_hour_is_ignored() {
    let mut manager = manager_at(24);
    manager.add_credential("gmail", "pw").unwrap();

    assert_eq!(manager.get_credential("gmail").unwrap().as_deref(), Some("pw"));
    assert_eq!(manager.total_access_count("gmail"), 0);
}

#[test]
fn test_undo_add_removes_credential() {
    let mut manager = manager_at(9);
    manager.add_credential("gmail", "pw1").unwrap();

    assert!(manager.undo().unwrap());
    assert!(manager.store().get("gmail").is_none());
    assert!(manager.repository().credentials().is_empty());
    assert!(manager.can_redo());
    assert!(!manager.can_undo());
}

#[test]
fn test_undo_update_restores_old_secret() {
    let mut manager = manager_at(9);
    manager.add_credential("gmail", "pw1").unwrap();
    manager.add_credential("gmail", "pw2").unwrap();

    assert!(manager.undo().unwrap());
    assert_eq!(manager.store().get("gmail").map(String::as_str), Some("pw1"));
    assert_eq!(
        manager.repository().credentials(),
        &[Credential::new("gmail", "pw1")]
    );

    assert!(manager.redo().unwrap());
    assert_eq!(manager.store().get("gmail").map(String::as_str), Some("pw2"));
}

#[test]
fn test_undo_redo_on_empty_history() {
    let mut manager = manager_at(9);
    assert!(!manager.undo().unwrap(), "Nothing to undo");
    assert!(!manager.redo().unwrap(), "Nothing to redo");
    assert_eq!(manager.repository().save_count(), 0);
}

#[test]
fn test_n_adds_undone_and_redone() {
    let mut manager = manager_at(9);
    let services = ["a", "b", "c", "d", "e"];
    for (i, service) in services.iter().enumerate() {
        manager.add_credential(service, &format!("pw{}", i)).unwrap();
    }

    for _ in 0..services.len() {
        assert!(manager.undo().unwrap());
    }
    assert_eq!(manager.credential_count(), 0);
    assert!(manager.repository().credentials().is_empty());

    for _ in 0..services.len() {
        assert!(manager.redo().unwrap());
    }
    for (i, service) in services.iter().enumerate() {
        let expected = format!("pw{}", i);
        assert_eq!(manager.store().get(*service), Some(&expected));
    }
    assert_eq!(manager.repository().credentials().len(), services.len());
}

#[test]
fn test_new_change_after_undo_clears_redo() {
    let mut manager = manager_at(9);
    manager.add_credential("a", "1").unwrap();
    manager.undo().unwrap();
    assert!(manager.can_redo());

    manager.add_credential("b", "2").unwrap();
    assert!(!manager.can_redo());
    assert!(!manager.redo().unwrap());
}

/// Helper to create a manager over a repository whose writes can fail.
fn flaky_manager() -> CredentialManager<FlakyRepository> {
    init_tracing();
    CredentialManager::new(FlakyRepository::default())
        .expect("Empty repository should load")
        .with_clock(FixedClock(9))
}

#[test]
fn test_failed_write_changes_nothing() {
    let mut manager = flaky_manager();
    manager.add_credential("gmail", "pw1").unwrap();
    manager.repository_mut().fail_saves = true;

    let result = manager.add_credential("gmail", "pw2");
    assert!(matches!(result, Err(Error::Persistence(_))));
    assert_eq!(manager.store().get("gmail").map(String::as_str), Some("pw1"));
    assert_eq!(manager.history().undo_len(), 1, "Failed change is not recorded");
    assert_eq!(
        manager.repository().inner.credentials(),
        &[Credential::new("gmail", "pw1")]
    );
}

#[test]
fn test_failed_undo_keeps_command_undoable() {
    let mut manager = flaky_manager();
    manager.add_credential("gmail", "pw1").unwrap();
    manager.repository_mut().fail_saves = true;

    assert!(matches!(manager.undo(), Err(Error::Persistence(_))));
    assert!(manager.can_undo(), "Command goes back on the undo stack");
    assert!(!manager.can_redo());
    assert_eq!(manager.store().get("gmail").map(String::as_str), Some("pw1"));

    manager.repository_mut().fail_saves = false;
    assert!(manager.undo().unwrap());
    assert!(manager.store().get("gmail").is_none());
}

#[test]
fn test_failed_redo_keeps_command_redoable() {
    let mut manager = flaky_manager();
    manager.add_credential("gmail", "pw1").unwrap();
    manager.undo().unwrap();
    manager.repository_mut().fail_saves = true;

    assert!(manager.redo().is_err());
    assert!(manager.can_redo());
    assert!(!manager.can_undo());
    assert!(manager.store().get("gmail").is_none());
}

#[test]
fn test_dependency_delegation() {
    let mut manager = manager_at(9);
    assert!(manager.add_service_dependency("gmail", "google-auth"));
    assert!(manager.add_service_dependency("google-auth", "sms"));
    assert!(!manager.add_service_dependency("gmail", "google-auth"));

    assert_eq!(manager.related_services("gmail"), vec!["gmail", "google-auth", "sms"]);
    assert_eq!(manager.dependency_walk("gmail"), vec!["gmail", "google-auth", "sms"]);
    assert!(manager.related_services("unknown").is_empty());
    assert_eq!(manager.service_clusters().len(), 3);
    assert!(!manager.has_dependency_cycle());

    manager.add_service_dependency("sms", "gmail");
    assert_eq!(manager.service_clusters().len(), 1);
    assert!(manager.has_dependency_cycle());
    assert_eq!(manager.service_graph().edge_count(), 3);
}

#[test]
fn test_queue_delegation() {
    let mut manager = manager_at(9);
    manager.queue_operation("rotate gmail");
    manager.queue_operation(String::from("backup"));

    assert_eq!(manager.pending_operations_count(), 2);
    assert_eq!(manager.peek_next_operation(), Some("rotate gmail"));
    assert_eq!(manager.pending_operations(), vec!["rotate gmail", "backup"]);
    assert_eq!(
        manager.process_pending_operations(),
        vec!["rotate gmail", "backup"]
    );
    assert_eq!(manager.pending_operations_count(), 0);
    assert!(manager.operations_queue().is_empty());
}

#[test]
fn test_rankings_agree() {
    let mut manager = manager_at(9);
    for (service, reads) in [("twitter", 1), ("gmail", 5), ("facebook", 3)] {
        manager.add_credential(service, "pw").unwrap();
        for _ in 0..reads {
            manager.get_credential(service).unwrap();
        }
    }

    assert_eq!(manager.most_accessed_services(2), vec!["gmail", "facebook"]);

    let heap_ranked: Vec<String> = manager
        .most_used_services_by_heap_sort()
        .into_iter()
        .map(|usage| usage.service)
        .collect();
    assert_eq!(heap_ranked, manager.most_accessed_services(3));

    let top = &manager.most_used_services_by_heap_sort()[0];
    assert_eq!(top.to_string(), "gmail (5 accesses)");
}

#[test]
fn test_rankings_agree_on_ties() {
    let mut manager = manager_at(9);
    for service in ["a", "b", "c"] {
        manager.get_credential(service).unwrap();
    }
    for _ in 0..2 {
        manager.get_credential("d").unwrap();
    }
    manager.get_credential("e").unwrap();

    let heap_ranked: Vec<String> = manager
        .most_used_services_by_heap_sort()
        .into_iter()
        .map(|usage| usage.service)
        .collect();
    assert_eq!(heap_ranked, vec!["d", "a", "b", "c", "e"]);
    assert_eq!(heap_ranked, manager.most_accessed_services(5));
}

#[test]
fn test_top_services_uses_configured_default() {
    let config = Config {
        initial_capacity: 16,
        default_top_n: 1,
    };
    let mut manager = CredentialManager::with_config(MemoryRepository::new(), &config)
        .unwrap()
        .with_clock(FixedClock(0));
    manager.get_credential("a").unwrap();
    manager.get_credential("b").unwrap();
    manager.get_credential("b").unwrap();

    assert_eq!(manager.top_services(), vec!["b"]);
}

#[test]
fn test_reload_picks_up_repository_state() {
    let mut manager = manager_at(9);
    manager.add_credential("a", "1").unwrap();
    manager.add_credential("b", "2").unwrap();

    assert_eq!(manager.reload().unwrap(), 2);
    let mut services = manager.services();
    services.sort();
    assert_eq!(services, vec!["a", "b"]);
}
