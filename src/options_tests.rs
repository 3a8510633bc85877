//! Tests for configuration resolution.

use super::{BotOptions, ConfigError, env};

/// Environment lookup backed by a fixed list of pairs.
fn env_with(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let pairs: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |name| {
        pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }
}

fn no_env(_: &str) -> Option<String> {
    None
}

mod api_key {
    use super::*;

    #[test]
    fn explicit_value_wins_over_env() {
        let options = BotOptions::builder()
            .api_key("explicit")
            .build_with(env_with(&[(env::API_KEY, "from-env")]))
            .unwrap();

        assert_eq!(options.api_key(), "explicit");
    }

    #[test]
    fn env_used_when_not_explicit() {
        let options = BotOptions::builder()
            .build_with(env_with(&[(env::API_KEY, "from-env")]))
            .unwrap();

        assert_eq!(options.api_key(), "from-env");
    }

    #[test]
    fn missing_everywhere_is_an_error() {
        let result = BotOptions::builder().build_with(no_env);

        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }
}

mod optional_fields {
    use super::*;

    #[test]
    fn default_to_none() {
        let options = BotOptions::builder()
            .api_key("key")
            .build_with(no_env)
            .unwrap();

        assert_eq!(options.user_agent(), None);
        assert_eq!(options.webhook_secret(), None);
    }

    #[test]
    fn resolved_from_env() {
        let options = BotOptions::builder()
            .api_key("key")
            .build_with(env_with(&[
                (env::USER_AGENT, "quackbot/1.0"),
                (env::WEBHOOK_SECRET, "hunter2"),
            ]))
            .unwrap();

        assert_eq!(options.user_agent(), Some("quackbot/1.0"));
        assert_eq!(options.webhook_secret(), Some("hunter2"));
    }

    #[test]
    fn explicit_values_win_over_env() {
        let options = BotOptions::builder()
            .api_key("key")
            .user_agent("explicit/2.0")
            .webhook_secret("explicit-secret")
            .build_with(env_with(&[
                (env::USER_AGENT, "env/1.0"),
                (env::WEBHOOK_SECRET, "env-secret"),
            ]))
            .unwrap();

        assert_eq!(options.user_agent(), Some("explicit/2.0"));
        assert_eq!(options.webhook_secret(), Some("explicit-secret"));
    }
}

mod base_url {
    use super::*;

    #[test]
    fn defaults_to_platform_host() {
        let options = BotOptions::builder()
            .api_key("key")
            .build_with(no_env)
            .unwrap();

        assert_eq!(options.base_url().as_str(), "https://chat.manyducks.co/");
    }

    #[test]
    fn explicit_override_is_used() {
        let options = BotOptions::builder()
            .api_key("key")
            .base_url("http://localhost:8080")
            .build_with(no_env)
            .unwrap();

        assert_eq!(options.base_url().host_str(), Some("localhost"));
    }

    #[test]
    fn invalid_override_is_rejected() {
        let result = BotOptions::builder()
            .api_key("key")
            .base_url("not a url")
            .build_with(no_env);

        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }
}

#[test]
fn debug_output_redacts_credentials() {
    let options = BotOptions::builder()
        .api_key("super-secret-key")
        .webhook_secret("super-secret-secret")
        .build_with(no_env)
        .unwrap();

    let debug = format!("{options:?}");
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("<redacted>"));
}
