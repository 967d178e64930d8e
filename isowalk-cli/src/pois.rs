//! `pois` command implementation.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use isowalk_core::query::DEFAULT_EPSG;
use isowalk_core::{IsochroneParams, PoiTarget};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::output::{WalkTimeOut, write_json};
use crate::service::{ServiceBuilder, ServiceSettings, require};
use crate::{
    ARG_BASE_URL, ARG_EPSG, ARG_KEY, ARG_POIS, ARG_X, ARG_Y, CliError, ENV_POIS_FILE,
    ENV_POIS_KEY, ENV_POIS_X, ENV_POIS_Y,
};

/// CLI arguments for the `pois` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Compute walking times from a source location to each point \
                 of interest listed in a JSON file. The file holds an array \
                 of objects with `x`, `y` and an optional `id`.",
    about = "Compute walk times to points of interest"
)]
#[ortho_config(prefix = "ISOWALK")]
pub(crate) struct PoisArgs {
    /// Source x coordinate.
    #[arg(long = ARG_X, value_name = "x", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) x: Option<f64>,
    /// Source y coordinate.
    #[arg(long = ARG_Y, value_name = "y", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) y: Option<f64>,
    /// EPSG code of the source and target coordinates.
    #[arg(long = ARG_EPSG, value_name = "code")]
    #[serde(default)]
    pub(crate) epsg: Option<u32>,
    /// Path to a JSON array of points of interest.
    #[arg(long = ARG_POIS, value_name = "path")]
    #[serde(default)]
    pub(crate) pois: Option<Utf8PathBuf>,
    /// Service subscription key.
    #[arg(long = ARG_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) key: Option<String>,
    /// Base URL of the service.
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
}

impl PoisArgs {
    pub(crate) fn into_config(self) -> Result<PoisConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PoisConfig::try_from(merged)
    }
}

/// Resolved `pois` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PoisConfig {
    pub(crate) params: IsochroneParams,
    pub(crate) pois_path: Utf8PathBuf,
    pub(crate) service: ServiceSettings,
}

impl TryFrom<PoisArgs> for PoisConfig {
    type Error = CliError;

    fn try_from(args: PoisArgs) -> Result<Self, Self::Error> {
        let x = require(args.x, ARG_X, ENV_POIS_X)?;
        let y = require(args.y, ARG_Y, ENV_POIS_Y)?;
        let pois_path = require(args.pois, ARG_POIS, ENV_POIS_FILE)?;
        let service = ServiceSettings::resolve(args.key, args.base_url, ENV_POIS_KEY)?;
        Ok(Self {
            params: IsochroneParams::at(x, y).with_epsg(args.epsg.unwrap_or(DEFAULT_EPSG)),
            pois_path,
            service,
        })
    }
}

/// Load the JSON list of points of interest.
pub(crate) fn load_pois(path: &Utf8Path) -> Result<Vec<PoiTarget>, CliError> {
    let text = isowalk_fs::read_text(path).map_err(|source| CliError::ReadPois {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ParsePois {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn run_pois_with(
    args: PoisArgs,
    builder: &dyn ServiceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_pois(&config, builder, writer)
}

pub(crate) fn execute_pois(
    config: &PoisConfig,
    builder: &dyn ServiceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let pois = load_pois(&config.pois_path)?;
    log::debug!("loaded {} points of interest from {}", pois.len(), config.pois_path);
    let service = builder.build(&config.service)?;
    let table = isowalk_data::poi_walktimes(&*service, &config.params, &pois)?;
    let rows: Vec<WalkTimeOut> = table.iter().map(WalkTimeOut::from).collect();
    write_json(writer, &rows)
}
