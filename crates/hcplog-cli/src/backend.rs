use anyhow::{Context as _, Result};
use hcplog_config::{self as config, AppConfig, BackendKind};
use hcplog_core::domain::InteractionRecord;
use hcplog_core::dto::{InteractionLogDto, LogConfirmation};
use hcplog_core::service::InteractionRecordStore;
use hcplog_remote::ApiClient;
use hcplog_store::records::to_dto;
use hcplog_store::Store;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::error::{invalid_input, not_found};

/// Where interaction records live for this invocation.
pub enum Backend {
    Local(Store),
    Remote(ApiClient),
}

impl Backend {
    pub fn open(
        app_config: &AppConfig,
        db_path: Option<PathBuf>,
        remote: bool,
        api_url: Option<&str>,
    ) -> Result<Self> {
        let kind = if remote || api_url.is_some() {
            BackendKind::Remote
        } else {
            app_config.backend
        };

        match kind {
            BackendKind::Local => {
                let path = hcplog_store::paths::resolve_db_path(db_path)?;
                debug!(path = %path.display(), "opening local store");
                let store = Store::open(&path)
                    .with_context(|| format!("open database {}", path.display()))?;
                Ok(Backend::Local(store))
            }
            BackendKind::Remote => Ok(Backend::Remote(remote_client(app_config, api_url)?)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Backend::Local(_) => "local",
            Backend::Remote(_) => "remote",
        }
    }

    pub fn local(&self) -> Option<&Store> {
        match self {
            Backend::Local(store) => Some(store),
            Backend::Remote(_) => None,
        }
    }

    pub fn client(&self) -> Option<&ApiClient> {
        match self {
            Backend::Local(_) => None,
            Backend::Remote(client) => Some(client),
        }
    }

    pub fn log_form(&self, record: &InteractionRecord) -> Result<LogConfirmation> {
        match self {
            Backend::Local(store) => Ok(store.log_form(record)?),
            Backend::Remote(client) => Ok(client.log_form(record)?),
        }
    }

    pub fn confirm_draft(&self, record: &InteractionRecord) -> Result<LogConfirmation> {
        match self {
            Backend::Local(store) => Ok(store.confirm_draft(record)?),
            Backend::Remote(client) => Ok(client.confirm_draft(record)?),
        }
    }

    pub fn list(&self) -> Result<Vec<InteractionLogDto>> {
        match self {
            Backend::Local(store) => Ok(store.list()?),
            Backend::Remote(client) => Ok(client.list()?),
        }
    }

    /// One stored log by id. The remote API has no single-log endpoint, so
    /// the remote side searches the full listing.
    pub fn show(&self, id: i64) -> Result<InteractionLogDto> {
        match self {
            Backend::Local(store) => {
                let stored = store.interactions().get(id)?;
                Ok(to_dto(&stored))
            }
            Backend::Remote(client) => client
                .list()?
                .into_iter()
                .find(|log| log.id == id)
                .ok_or_else(|| not_found(format!("no interaction log with id {id}"))),
        }
    }
}

/// Builds the API client from `--api-url` or `[api]` in the config file.
pub fn remote_client(app_config: &AppConfig, api_url: Option<&str>) -> Result<ApiClient> {
    let base_url = match api_url {
        Some(raw) => config::validate_api_url(raw)?,
        None => app_config.api.base_url.clone().ok_or_else(|| {
            invalid_input("no API base URL configured; pass --api-url or set api.base_url")
        })?,
    };
    let timeout = Duration::from_secs(app_config.api.timeout_secs);
    let client = ApiClient::new(&base_url, timeout, &app_config.api.user_agent)?;
    debug!(
        base_url = %client.base_url(),
        timeout_secs = app_config.api.timeout_secs,
        "remote backend"
    );
    Ok(client)
}
