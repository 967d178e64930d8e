//! Service construction shared by every subcommand.

use isowalk_core::WalkService;
use isowalk_data::{HttpWalkService, WalkServiceConfig};
use isowalk_data::service::DEFAULT_BASE_URL;

use crate::{ARG_KEY, CliError};

/// Connection settings resolved from the merged configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServiceSettings {
    pub(crate) base_url: String,
    pub(crate) key: String,
}

impl ServiceSettings {
    /// Require a non-blank key; fall back to the production base URL.
    pub(crate) fn resolve(
        key: Option<String>,
        base_url: Option<String>,
        key_env: &'static str,
    ) -> Result<Self, CliError> {
        let key = key
            .filter(|key| !key.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_KEY,
                env: key_env,
            })?;
        Ok(Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            key,
        })
    }
}

/// Builds the walk service for the current invocation.
pub(crate) trait ServiceBuilder {
    fn build(&self, settings: &ServiceSettings) -> Result<Box<dyn WalkService>, CliError>;
}

pub(crate) struct DefaultServiceBuilder;

impl ServiceBuilder for DefaultServiceBuilder {
    fn build(&self, settings: &ServiceSettings) -> Result<Box<dyn WalkService>, CliError> {
        let config = WalkServiceConfig::new(settings.base_url.clone())
            .with_subscription_key(settings.key.clone());
        let service =
            HttpWalkService::with_config(config).map_err(|source| CliError::BuildService {
                base_url: settings.base_url.clone(),
                source,
            })?;
        Ok(Box::new(service))
    }
}

/// Require an option that ortho-config could not fill from any layer.
pub(crate) fn require<T>(
    value: Option<T>,
    field: &'static str,
    env: &'static str,
) -> Result<T, CliError> {
    value.ok_or(CliError::MissingArgument { field, env })
}
