//! The signed-in customer, as far as this client knows.
//!
//! Tokens are issued elsewhere; the client only carries one and uses the
//! profile fields to prefill forms.

use shopfront_core::AppConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Session {
    /// A session exists only when an API token is configured.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        config.api_token.as_ref().map(|_| Self {
            name: config.user_name.clone(),
            email: config.user_email.clone(),
        })
    }
}
