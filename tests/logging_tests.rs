use roleplan::logging::{init_logging, logging_status, normalize_level};

#[test]
fn test_normalize_level() {
    assert_eq!(normalize_level("INFO").unwrap(), "info");
    assert_eq!(normalize_level(" warning ").unwrap(), "warn");
    assert!(normalize_level("loud").is_err());
}

// One test owns the process-wide logger so the checks run in order.
#[test]
fn test_init_logging_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let other = tempfile::tempdir().unwrap();

    assert!(logging_status().is_none());
    init_logging("info", dir.path()).unwrap();
    init_logging("info", dir.path()).unwrap();

    let (level, log_dir) = logging_status().unwrap();
    assert_eq!(level, "info");
    assert_eq!(log_dir, dir.path());

    assert!(init_logging("info", other.path()).is_err());
    assert!(init_logging("debug", dir.path()).is_err());
    assert!(init_logging("shout", dir.path()).is_err());
}
