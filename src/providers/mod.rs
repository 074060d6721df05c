pub mod clio;

use std::path::Path;

use async_trait::async_trait;

use crate::config::{self, AppConfig, Credential};
use crate::error::Result;
use crate::model::{ResourceCollection, ResourceKind};

/// The two environments being reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum System {
    Manage,
    Grow,
}

impl System {
    pub const ALL: [System; 2] = [System::Manage, System::Grow];

    pub fn as_str(self) -> &'static str {
        match self {
            System::Manage => "manage",
            System::Grow => "grow",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            System::Manage => "https://app.clio.com/api/v4/",
            System::Grow => "https://app.grow.clio.com/api/v4/",
        }
    }
}

impl std::fmt::Display for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait Provider: Send + Sync {
    fn system(&self) -> System;
    /// GET `endpoint` relative to the system's base URL and validate the envelope.
    async fn fetch(&self, endpoint: &str) -> Result<ResourceCollection>;
}

pub async fn get_custom_fields(provider: &dyn Provider) -> Result<ResourceCollection> {
    provider.fetch(ResourceKind::CustomFields.endpoint()).await
}

pub async fn get_field_sets(provider: &dyn Provider) -> Result<ResourceCollection> {
    provider.fetch(ResourceKind::FieldSets.endpoint()).await
}

pub async fn get_resource(provider: &dyn Provider, kind: ResourceKind) -> Result<ResourceCollection> {
    match kind {
        ResourceKind::CustomFields => get_custom_fields(provider).await,
        ResourceKind::FieldSets => get_field_sets(provider).await,
    }
}

#[cfg(test)]
pub mod tests;

/// Builds the Manage and Grow clients, in that order.
pub fn create_providers(config: &AppConfig, credential: &Credential) -> [clio::ClioProvider; 2] {
    System::ALL.map(|system| {
        clio::ClioProvider::new(system, config.base_url(system).to_string(), credential)
    })
}

/// Resolves the token, then the config, then builds both clients. A missing
/// token fails before anything else is read or any client exists.
pub fn connect(
    api_key: Option<String>,
    config_path: Option<&Path>,
) -> Result<[clio::ClioProvider; 2]> {
    let credential = Credential::from_value(api_key)?;
    let config = config::load_config(config_path)?;
    Ok(create_providers(&config, &credential))
}
