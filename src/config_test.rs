use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_server_env() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("BIND_ADDR");
        std::env::remove_var("TASK_QUEUE_CAPACITY");
        std::env::remove_var("CLIENT_CHANNEL_CAPACITY");
    }
}

#[test]
fn from_env_uses_defaults() {
    unsafe { clear_server_env() };

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.listen_addr(), "0.0.0.0:5000");
}

#[test]
fn from_env_parses_overrides() {
    unsafe {
        clear_server_env();
        std::env::set_var("PORT", "8080");
        std::env::set_var("BIND_ADDR", "127.0.0.1");
        std::env::set_var("TASK_QUEUE_CAPACITY", "4");
        std::env::set_var("CLIENT_CHANNEL_CAPACITY", " 32 ");
    }

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.listen_addr(), "127.0.0.1:8080");
    assert_eq!(cfg.task_queue_capacity, 4);
    assert_eq!(cfg.client_channel_capacity, 32);

    unsafe { clear_server_env() };
}

#[test]
fn from_env_rejects_invalid_port() {
    unsafe {
        clear_server_env();
        std::env::set_var("PORT", "http");
    }

    let err = ServerConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    assert_eq!(err.to_string(), "invalid PORT: \"http\"");

    unsafe { clear_server_env() };
}

#[test]
fn from_env_rejects_zero_capacity() {
    unsafe {
        clear_server_env();
        std::env::set_var("TASK_QUEUE_CAPACITY", "0");
    }

    let err = ServerConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::Zero { key: "TASK_QUEUE_CAPACITY" }));

    unsafe { clear_server_env() };
}

#[test]
fn blank_bind_addr_falls_back_to_default() {
    unsafe {
        clear_server_env();
        std::env::set_var("BIND_ADDR", "  ");
    }

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);

    unsafe { clear_server_env() };
}
