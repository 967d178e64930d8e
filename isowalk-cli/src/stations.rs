//! `stations` command implementation.

use std::io::Write;

use clap::Parser;
use isowalk_core::NearbyParams;
use isowalk_core::query::DEFAULT_MAX_WALKTIME;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::output::{StationOut, write_json};
use crate::service::{ServiceBuilder, ServiceSettings, require};
use crate::{
    ARG_BASE_URL, ARG_KEY, ARG_MAX_WALKTIME, ARG_X, ARG_Y, CliError, ENV_STATIONS_KEY,
    ENV_STATIONS_X, ENV_STATIONS_Y,
};

/// CLI arguments for the `stations` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "List Swiss public transport stations within walking range \
                 of a WGS84 source location, nearest first.",
    about = "List nearby public transport stations"
)]
#[ortho_config(prefix = "ISOWALK")]
pub(crate) struct StationsArgs {
    /// Source longitude.
    #[arg(long = ARG_X, value_name = "x", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) x: Option<f64>,
    /// Source latitude.
    #[arg(long = ARG_Y, value_name = "y", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) y: Option<f64>,
    /// Maximum walking time to a station in minutes.
    #[arg(long = ARG_MAX_WALKTIME, value_name = "minutes")]
    #[serde(default)]
    pub(crate) max_walktime: Option<u32>,
    /// Service subscription key.
    #[arg(long = ARG_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) key: Option<String>,
    /// Base URL of the service.
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
}

impl StationsArgs {
    pub(crate) fn into_config(self) -> Result<StationsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        StationsConfig::try_from(merged)
    }
}

/// Resolved `stations` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StationsConfig {
    pub(crate) params: NearbyParams,
    pub(crate) service: ServiceSettings,
}

impl TryFrom<StationsArgs> for StationsConfig {
    type Error = CliError;

    fn try_from(args: StationsArgs) -> Result<Self, Self::Error> {
        let x = require(args.x, ARG_X, ENV_STATIONS_X)?;
        let y = require(args.y, ARG_Y, ENV_STATIONS_Y)?;
        let service = ServiceSettings::resolve(args.key, args.base_url, ENV_STATIONS_KEY)?;
        Ok(Self {
            params: NearbyParams::at(x, y)
                .with_max_walktime(args.max_walktime.unwrap_or(DEFAULT_MAX_WALKTIME)),
            service,
        })
    }
}

pub(crate) fn run_stations_with(
    args: StationsArgs,
    builder: &dyn ServiceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_stations(&config, builder, writer)
}

pub(crate) fn execute_stations(
    config: &StationsConfig,
    builder: &dyn ServiceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let service = builder.build(&config.service)?;
    let table = isowalk_data::nearby_stations(&*service, &config.params)?;
    let rows: Vec<StationOut> = table.iter().map(StationOut::from).collect();
    write_json(writer, &rows)
}
