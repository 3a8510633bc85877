//! Bot configuration, resolved once at construction.
//!
//! Every field follows the same precedence: an explicitly provided value
//! wins, then the corresponding environment variable, then the default
//! (or an error for the required API key).

use std::fmt;

use thiserror::Error;
use url::Url;

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;

/// Default platform host for API calls.
const DEFAULT_BASE_URL: &str = "https://chat.manyducks.co";

/// Environment variable names consulted by [`BotOptionsBuilder::build`].
pub mod env {
    /// Bot API key (required).
    pub const API_KEY: &str = "BOT_API_KEY";
    /// Webhook signing secret (optional).
    pub const WEBHOOK_SECRET: &str = "BOT_WEBHOOK_SECRET";
    /// User-Agent string for API calls (optional).
    pub const USER_AGENT: &str = "BOT_USER_AGENT";
}

/// Error type for configuration resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key was provided and the environment had none either.
    #[error("Missing required API key. Pass one explicitly or set the {} environment variable.", env::API_KEY)]
    MissingApiKey,

    /// The base URL override could not be parsed.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Resolved, immutable bot configuration.
///
/// Built with [`BotOptions::builder`] and shared by reference between the
/// webhook and API components for the lifetime of the bot.
#[derive(Clone)]
pub struct BotOptions {
    api_key: String,
    user_agent: Option<String>,
    webhook_secret: Option<String>,
    base_url: Url,
}

impl BotOptions {
    /// Starts building a configuration.
    #[must_use]
    pub fn builder() -> BotOptionsBuilder {
        BotOptionsBuilder::default()
    }

    /// The API key used to authenticate outbound calls.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The User-Agent string sent with API calls, if any.
    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// The webhook signing secret. When present, inbound deliveries must
    /// carry a valid signature.
    #[must_use]
    pub fn webhook_secret(&self) -> Option<&str> {
        self.webhook_secret.as_deref()
    }

    /// Base URL of the platform's API host.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

// Credentials stay out of logs.
impl fmt::Debug for BotOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotOptions")
            .field("api_key", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field(
                "webhook_secret",
                &self.webhook_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// Builder for [`BotOptions`].
#[derive(Debug, Default, Clone)]
pub struct BotOptionsBuilder {
    api_key: Option<String>,
    user_agent: Option<String>,
    webhook_secret: Option<String>,
    base_url: Option<String>,
}

impl BotOptionsBuilder {
    /// Sets the API key, overriding `BOT_API_KEY`.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the User-Agent string, overriding `BOT_USER_AGENT`.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the webhook signing secret, overriding `BOT_WEBHOOK_SECRET`.
    #[must_use]
    pub fn webhook_secret(mut self, webhook_secret: impl Into<String>) -> Self {
        self.webhook_secret = Some(webhook_secret.into());
        self
    }

    /// Points API calls at a different host. Intended for tests and
    /// self-hosted deployments; there is no environment fallback.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Resolves the configuration, falling back to environment variables
    /// for anything not set explicitly.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key could be resolved or if the base URL
    /// override is not a valid URL.
    pub fn build(self) -> Result<BotOptions, ConfigError> {
        self.build_with(|name| std::env::var(name).ok())
    }

    /// Resolution with an injected environment lookup, so tests never
    /// touch process-wide state.
    pub(crate) fn build_with(
        self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<BotOptions, ConfigError> {
        let api_key = self
            .api_key
            .or_else(|| lookup(env::API_KEY))
            .ok_or(ConfigError::MissingApiKey)?;

        let user_agent = self.user_agent.or_else(|| lookup(env::USER_AGENT));
        let webhook_secret = self.webhook_secret.or_else(|| lookup(env::WEBHOOK_SECRET));

        let base_url = match self.base_url {
            Some(raw) => Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl {
                url: raw,
                reason: e.to_string(),
            })?,
            None => Url::parse(DEFAULT_BASE_URL).expect("default base URL parses"),
        };

        Ok(BotOptions {
            api_key,
            user_agent,
            webhook_secret,
            base_url,
        })
    }
}
