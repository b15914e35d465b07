use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Settings read without the API URL, for commands that stay local.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSettings {
    pub log_level: String,
    pub data_dir: PathBuf,
}

#[derive(Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub env: Environment,
    pub log_level: String,
    pub data_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub storefront_origin: String,
    pub api_token: Option<String>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_url", &self.api_url)
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("data_dir", &self.data_dir)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("storefront_origin", &self.storefront_origin)
            .field("api_token", &self.api_token.as_ref().map(|_| "[redacted]"))
            .field("user_name", &self.user_name)
            .field("user_email", &self.user_email)
            .finish()
    }
}
