use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::time::Duration;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_strainer_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        for (key, _) in env::vars() {
            if key.starts_with("STRAINER_") {
                env::remove_var(key);
            }
        }
        env::remove_var("OPENAI_API_KEY");
        env::remove_var("COURTLISTENER_API_KEY");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 5000);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.max_upload_bytes, 100 * 1024 * 1024);
    assert_eq!(config.extraction_strategy, ExtractionStrategy::Structured);
    assert_eq!(config.similarity_strategy, SimilarityStrategy::Tfidf);
    assert!(!config.mock_provider);
    assert!(config.lookup.enabled);
    assert_eq!(config.jobs.ttl, Duration::from_secs(300));
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:5000");

    let config = Config {
        port: 3000,
        bind_addr: "::1".parse().unwrap(),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "[::1]:3000");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_strainer_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 5000);
    assert!(config.summary.api_key.is_none());
    assert!(config.lookup.token.is_none());
}

#[test]
#[serial]
fn test_from_env_custom_values() {
    clear_strainer_env();

    with_env_vars(
        &[
            ("STRAINER_PORT", "8080"),
            ("STRAINER_BIND_ADDR", "0.0.0.0"),
            ("STRAINER_EXTRACTION_STRATEGY", "regex"),
            ("STRAINER_SIMILARITY_STRATEGY", "Jaccard"),
            ("STRAINER_MOCK_PROVIDER", "true"),
            ("STRAINER_MAX_UPLOAD_BYTES", "1024"),
            ("STRAINER_LOOKUP_ENABLED", "false"),
            ("STRAINER_LLM_MODEL", "gpt-4o-mini"),
            ("STRAINER_JOB_TTL_SECS", "10"),
            ("STRAINER_PACING_DELAY_MS", "0"),
        ],
        || {
            let config = Config::from_env().expect("should parse");

            assert_eq!(config.socket_addr(), "0.0.0.0:8080");
            assert_eq!(config.extraction_strategy, ExtractionStrategy::Pattern);
            assert_eq!(config.similarity_strategy, SimilarityStrategy::Jaccard);
            assert!(config.mock_provider);
            assert_eq!(config.max_upload_bytes, 1024);
            assert!(!config.lookup.enabled);
            assert_eq!(config.summary.model, "gpt-4o-mini");
            assert_eq!(config.jobs.ttl, Duration::from_secs(10));
            assert!(config.jobs.pacing_delay.is_zero());
        },
    );
}

#[test]
#[serial]
fn test_api_key_fallback() {
    clear_strainer_env();

    with_env_vars(&[("OPENAI_API_KEY", "sk-test")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.summary.api_key.as_deref(), Some("sk-test"));
    });
}

#[test]
#[serial]
fn test_invalid_port_zero() {
    clear_strainer_env();

    with_env_vars(&[("STRAINER_PORT", "0")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
        assert!(err.to_string().contains("invalid port"));
    });
}

#[test]
#[serial]
fn test_invalid_port_not_number() {
    clear_strainer_env();

    with_env_vars(&[("STRAINER_PORT", "not_a_port")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::PortParseError { .. }));
    });
}

#[test]
#[serial]
fn test_invalid_bind_addr() {
    clear_strainer_env();

    with_env_vars(&[("STRAINER_BIND_ADDR", "not.an.ip.address")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
        assert!(err.to_string().contains("failed to parse bind address"));
    });
}

#[test]
#[serial]
fn test_unknown_strategy_rejected() {
    clear_strainer_env();

    with_env_vars(&[("STRAINER_SIMILARITY_STRATEGY", "bm25")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidStrategy {
                name: "STRAINER_SIMILARITY_STRATEGY",
                ..
            }
        ));
        assert!(err.to_string().contains("bm25"));
    });
}

#[test]
#[serial]
fn test_invalid_numbers_use_defaults() {
    clear_strainer_env();

    with_env_vars(
        &[
            ("STRAINER_MAX_UPLOAD_BYTES", "lots"),
            ("STRAINER_JOB_TTL_SECS", "soon"),
        ],
        || {
            let config = Config::from_env().expect("should parse with fallback");
            assert_eq!(config.max_upload_bytes, 100 * 1024 * 1024);
            assert_eq!(config.jobs.ttl, Duration::from_secs(300));
        },
    );
}

#[test]
#[serial]
fn test_collaborator_config_errors_propagate() {
    clear_strainer_env();

    with_env_vars(&[("STRAINER_LLM_MAX_ATTEMPTS", "0")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Summary(_)));
    });
}

#[test]
fn test_validate() {
    assert!(Config::default().validate().is_ok());

    let config = Config {
        max_upload_bytes: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidUploadLimit)
    ));
}
