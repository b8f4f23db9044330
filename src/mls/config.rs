// src/mls/config.rs

/// MLS feed credentials, read once at startup and passed into the sync
/// service explicitly. Nothing below this layer touches the environment.
///
/// Two credential styles are supported, matching what regional RESO
/// vendors actually hand out: an API key pair used against the base URL,
/// or a plain username/password login.
#[derive(Debug, Clone, Default)]
pub struct MlsConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl MlsConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: read_env("MLS_API_URL"),
            api_key: read_env("MLS_API_KEY"),
            api_secret: read_env("MLS_API_SECRET"),
            username: read_env("MLS_USERNAME"),
            password: read_env("MLS_PASSWORD"),
        }
    }

    /// True when at least one usable credential pair is present. Every
    /// sync entry point checks this first and short-circuits without any
    /// partial work when it is false.
    pub fn is_configured(&self) -> bool {
        (present(&self.base_url) && present(&self.api_key))
            || (present(&self.username) && present(&self.password))
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
