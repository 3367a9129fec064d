use plainserve::config::{Config, ConfigError};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Semaphore;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:8080");
    assert_eq!(cfg.server.workers, 10);
    assert_eq!(cfg.server.read_timeout(), Duration::from_secs(30));
    assert_eq!(cfg.static_files.root, PathBuf::from("webroot"));
    assert_eq!(cfg.static_files.index_file, "index.html");
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let cfg = Config::from_yaml_str(
        "server:\n  listen_addr: \"127.0.0.1:9000\"\nstatic_files:\n  root: /srv/www\n",
    )
    .unwrap();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:9000");
    assert_eq!(cfg.server.workers, 10);
    assert_eq!(cfg.static_files.root, PathBuf::from("/srv/www"));
    assert_eq!(cfg.static_files.index_file, "index.html");
}

#[test]
fn test_config_rejects_zero_workers() {
    let result = Config::from_yaml_str("server:\n  workers: 0\n");

    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_config_rejects_workers_beyond_semaphore_limit() {
    let yaml = format!("server:\n  workers: {}\n", Semaphore::MAX_PERMITS + 1);
    let result = Config::from_yaml_str(&yaml);

    assert!(matches!(result, Err(ConfigError::Invalid(_))));

    let yaml = format!("server:\n  workers: {}\n", Semaphore::MAX_PERMITS);
    assert!(Config::from_yaml_str(&yaml).is_ok());
}

#[test]
fn test_config_rejects_zero_timeout() {
    let result = Config::from_yaml_str("server:\n  read_timeout_secs: 0\n");

    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_config_rejects_bad_yaml() {
    let result = Config::from_yaml_str("server:\n  workers: many\n");

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_config_missing_file() {
    let result = Config::from_file(std::path::Path::new("/nonexistent/plainserve.yaml"));

    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

// The only test touching the process environment, so no other test races it.
#[test]
fn test_config_load_from_environment() {
    let path = std::env::temp_dir().join(format!("plainserve-config-{}.yaml", std::process::id()));
    std::fs::write(&path, "server:\n  workers: 4\n  listen_addr: \"127.0.0.1:1\"\n").unwrap();

    unsafe {
        std::env::set_var("PLAINSERVE_CONFIG", &path);
        std::env::set_var("LISTEN", "127.0.0.1:3000");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.server.workers, 4);
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:3000");

    unsafe {
        std::env::remove_var("PLAINSERVE_CONFIG");
        std::env::remove_var("LISTEN");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.server.workers, 10);
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:8080");

    let _ = std::fs::remove_file(path);
}
