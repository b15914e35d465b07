//! Shared state for command handlers: configuration, the API client and the
//! signed-in session.

use dialoguer::Confirm;
use rust_decimal::Decimal;
use shopfront_client::{CatalogStore, Scope, Session, ShopfrontClient};
use std::path::Path;

use shopfront_core::{AppConfig, CartStore, FileCartStorage};

pub(crate) struct App {
    pub(crate) config: AppConfig,
    pub(crate) client: ShopfrontClient,
    pub(crate) session: Option<Session>,
    assume_yes: bool,
}

impl App {
    pub(crate) fn new(config: AppConfig, assume_yes: bool) -> anyhow::Result<Self> {
        let client = ShopfrontClient::new(&config)?;
        let session = Session::from_config(&config);
        Ok(Self {
            config,
            client,
            session,
            assume_yes,
        })
    }

    /// The cart persisted under the configured data directory.
    pub(crate) fn cart(&self) -> CartStore<FileCartStorage> {
        open_cart(&self.config.data_dir)
    }

    pub(crate) fn assume_yes(&self) -> bool {
        self.assume_yes
    }

    pub(crate) fn store(&self, scope: Scope) -> CatalogStore {
        CatalogStore::new(self.client.clone(), scope)
    }

    /// Fails with a login hint when no API token is configured.
    pub(crate) fn require_session(&self) -> anyhow::Result<&Session> {
        self.session.as_ref().ok_or_else(|| {
            anyhow::anyhow!("not signed in; set SHOPFRONT_API_TOKEN to use this command")
        })
    }

    pub(crate) fn confirm(&self, prompt: &str) -> anyhow::Result<bool> {
        confirm(self.assume_yes, prompt)
    }
}

pub(crate) fn open_cart(data_dir: &Path) -> CartStore<FileCartStorage> {
    CartStore::load(FileCartStorage::new(data_dir))
}

/// Asks before a destructive action. `--yes` answers for the user.
pub(crate) fn confirm(assume_yes: bool, prompt: &str) -> anyhow::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

/// Formats an amount in rupees with two decimals.
pub(crate) fn fmt_money(amount: Decimal) -> String {
    format!("\u{20b9}{amount:.2}")
}

/// Shortens `text` to `max` characters, marking the cut with `...`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Reports an API failure on stderr and in the log, then returns it.
pub(crate) fn api_failure<E>(action: &str, err: E) -> anyhow::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    tracing::error!(error = %err, action, "request failed");
    anyhow::Error::new(err).context(format!("failed to {action}"))
}
