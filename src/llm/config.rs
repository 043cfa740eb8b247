//! Per-invocation credential and endpoint resolution.
//!
//! Upstream proxies come in several flavors, so every knob has an alias:
//! `OPENAI_*` names take precedence, `AIPIPE_*` names fill the gaps. The
//! config is re-resolved on every invocation so a credential rotated in the
//! host environment is picked up without a restart.

/// Auth header convention expected by the upstream proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStyle {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// `X-API-Key: <key>`
    XApiKey,
}

impl AuthStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthStyle::Bearer => "bearer",
            AuthStyle::XApiKey => "x-api-key",
        }
    }

    /// Parse a configured style hint. Anything outside the known set
    /// (including empty) means "unspecified": probe all styles in order.
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "bearer" => Some(AuthStyle::Bearer),
            "x-api-key" => Some(AuthStyle::XApiKey),
            _ => None,
        }
    }
}

/// Model identifier used when `OPENAI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Resolved upstream configuration for one invocation.
///
/// Absence of any field is a normal, handled state, never an error: a
/// missing key disables the network strategies, a missing base URL disables
/// the raw probing strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: String,
    pub auth_style: Option<AuthStyle>,
}

impl LlmConfig {
    /// Resolve from the current process environment.
    pub fn resolve() -> Self {
        Self {
            api_key: env_first("OPENAI_API_KEY", "AIPIPE_API_KEY"),
            base_url: env_first("OPENAI_BASE_URL", "AIPIPE_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .filter(|u| !u.is_empty()),
            model: env_nonempty("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            auth_style: env_nonempty("AIPIPE_AUTH_STYLE")
                .and_then(|raw| AuthStyle::parse(&raw)),
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// First non-empty of two environment variables. An empty primary does not
/// shadow a populated alias.
fn env_first(primary: &str, alias: &str) -> Option<String> {
    env_nonempty(primary).or_else(|| env_nonempty(alias))
}
