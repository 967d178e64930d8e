//! `isochrone` command implementation.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use isowalk_core::IsochroneParams;
use isowalk_core::query::{DEFAULT_EPSG, DEFAULT_MAX_MINUTES};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::output::{GridSummary, PixelOut, write_json};
use crate::service::{ServiceBuilder, ServiceSettings, require};
use crate::{
    ARG_BASE_URL, ARG_BREAK_VALUES, ARG_EPSG, ARG_FORMAT, ARG_KEY, ARG_MAX_MIN, ARG_OUTPUT, ARG_X,
    ARG_Y, CliError, ENV_ISOCHRONE_KEY, ENV_ISOCHRONE_X, ENV_ISOCHRONE_Y,
};

/// File the image is written to when `--output` is not given.
pub(crate) const DEFAULT_OUTPUT: &str = "isochrone.png";

/// What the `isochrone` command produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum IsochroneFormat {
    /// Write the isochrone image to a PNG file.
    #[default]
    Png,
    /// Print the raw grid as a pixel table sorted by walk time.
    Pixels,
    /// Print a summary of the raw grid header.
    Grid,
}

/// CLI arguments for the `isochrone` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Fetch the walking isochrone around a source location. \
                 By default the coloured isochrone image is written to a PNG \
                 file; the raw grid can instead be printed as a pixel table \
                 or summarised.",
    about = "Fetch a walking isochrone"
)]
#[ortho_config(prefix = "ISOWALK")]
pub(crate) struct IsochroneArgs {
    /// Source x coordinate (longitude for EPSG:4326).
    #[arg(long = ARG_X, value_name = "x", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) x: Option<f64>,
    /// Source y coordinate (latitude for EPSG:4326).
    #[arg(long = ARG_Y, value_name = "y", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) y: Option<f64>,
    /// EPSG code of the source coordinates.
    #[arg(long = ARG_EPSG, value_name = "code")]
    #[serde(default)]
    pub(crate) epsg: Option<u32>,
    /// Isochrone time budget in minutes.
    #[arg(long = ARG_MAX_MIN, value_name = "minutes")]
    #[serde(default)]
    pub(crate) max_min: Option<u32>,
    /// Comma-separated class boundaries in minutes (e.g. "5,10,15").
    #[arg(long = ARG_BREAK_VALUES, value_name = "list")]
    #[serde(default)]
    pub(crate) break_values: Option<String>,
    /// Output format.
    #[arg(long = ARG_FORMAT, value_enum, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<IsochroneFormat>,
    /// Destination of the PNG image.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Service subscription key.
    #[arg(long = ARG_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) key: Option<String>,
    /// Base URL of the service.
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
}

impl IsochroneArgs {
    pub(crate) fn into_config(self) -> Result<IsochroneConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        IsochroneConfig::try_from(merged)
    }
}

/// Where the isochrone result goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum IsochroneTarget {
    Png(Utf8PathBuf),
    Pixels,
    Grid,
}

/// Resolved `isochrone` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct IsochroneConfig {
    pub(crate) params: IsochroneParams,
    pub(crate) target: IsochroneTarget,
    pub(crate) service: ServiceSettings,
}

impl TryFrom<IsochroneArgs> for IsochroneConfig {
    type Error = CliError;

    fn try_from(args: IsochroneArgs) -> Result<Self, Self::Error> {
        let x = require(args.x, ARG_X, ENV_ISOCHRONE_X)?;
        let y = require(args.y, ARG_Y, ENV_ISOCHRONE_Y)?;
        let service = ServiceSettings::resolve(args.key, args.base_url, ENV_ISOCHRONE_KEY)?;

        let mut params = IsochroneParams::at(x, y)
            .with_epsg(args.epsg.unwrap_or(DEFAULT_EPSG))
            .with_max_minutes(args.max_min.unwrap_or(DEFAULT_MAX_MINUTES));
        if let Some(list) = args.break_values {
            params = params.with_break_values(parse_break_values(&list)?);
        }

        let target = match args.format.unwrap_or_default() {
            IsochroneFormat::Png => IsochroneTarget::Png(
                args.output
                    .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT)),
            ),
            IsochroneFormat::Pixels => IsochroneTarget::Pixels,
            IsochroneFormat::Grid => IsochroneTarget::Grid,
        };

        Ok(Self {
            params,
            target,
            service,
        })
    }
}

/// Parse a comma-separated list of minutes, ignoring blank entries.
pub(crate) fn parse_break_values(list: &str) -> Result<Vec<f64>, CliError> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| CliError::InvalidBreakValues {
                    value: list.to_owned(),
                })
        })
        .collect()
}

/// Summary printed after the PNG has been written.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct PngWritten {
    pub(crate) output: Utf8PathBuf,
    pub(crate) bytes: usize,
}

pub(crate) fn run_isochrone_with(
    args: IsochroneArgs,
    builder: &dyn ServiceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_isochrone(&config, builder, writer)
}

pub(crate) fn execute_isochrone(
    config: &IsochroneConfig,
    builder: &dyn ServiceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let service = builder.build(&config.service)?;
    match &config.target {
        IsochroneTarget::Png(output) => {
            let bytes = isowalk_data::isochrone_png(&*service, &config.params, output)?;
            write_json(
                writer,
                &PngWritten {
                    output: output.clone(),
                    bytes,
                },
            )
        }
        IsochroneTarget::Pixels => {
            let rows = isowalk_data::isochrone_pixels(&*service, &config.params)?;
            let rows: Vec<PixelOut> = rows.iter().map(PixelOut::from).collect();
            write_json(writer, &rows)
        }
        IsochroneTarget::Grid => {
            let grid = isowalk_data::isochrone_grid(&*service, &config.params)?;
            write_json(writer, &GridSummary::from(&grid))
        }
    }
}
