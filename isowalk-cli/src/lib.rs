//! Command-line interface for the walking-isochrone service.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod isochrone;
mod output;
mod pois;
mod service;
mod stations;

pub use error::CliError;

use isochrone::IsochroneArgs;
use pois::PoisArgs;
use service::DefaultServiceBuilder;
use stations::StationsArgs;

pub(crate) const ARG_X: &str = "x";
pub(crate) const ARG_Y: &str = "y";
pub(crate) const ARG_KEY: &str = "key";
pub(crate) const ARG_BASE_URL: &str = "base-url";
pub(crate) const ARG_EPSG: &str = "epsg";
pub(crate) const ARG_MAX_MIN: &str = "max-min";
pub(crate) const ARG_BREAK_VALUES: &str = "break-values";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ARG_FORMAT: &str = "format";
pub(crate) const ARG_POIS: &str = "pois";
pub(crate) const ARG_MAX_WALKTIME: &str = "max-walktime";

pub(crate) const ENV_ISOCHRONE_X: &str = "ISOWALK_CMDS_ISOCHRONE_X";
pub(crate) const ENV_ISOCHRONE_Y: &str = "ISOWALK_CMDS_ISOCHRONE_Y";
pub(crate) const ENV_ISOCHRONE_KEY: &str = "ISOWALK_CMDS_ISOCHRONE_KEY";
pub(crate) const ENV_POIS_X: &str = "ISOWALK_CMDS_POIS_X";
pub(crate) const ENV_POIS_Y: &str = "ISOWALK_CMDS_POIS_Y";
pub(crate) const ENV_POIS_KEY: &str = "ISOWALK_CMDS_POIS_KEY";
pub(crate) const ENV_POIS_FILE: &str = "ISOWALK_CMDS_POIS_POIS";
pub(crate) const ENV_STATIONS_X: &str = "ISOWALK_CMDS_STATIONS_X";
pub(crate) const ENV_STATIONS_Y: &str = "ISOWALK_CMDS_STATIONS_Y";
pub(crate) const ENV_STATIONS_KEY: &str = "ISOWALK_CMDS_STATIONS_KEY";

/// Run the isowalk CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, the
/// service call fails, or the result cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let builder = DefaultServiceBuilder;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Isochrone(args) => isochrone::run_isochrone_with(args, &builder, &mut stdout),
        Command::Pois(args) => pois::run_pois_with(args, &builder, &mut stdout),
        Command::Stations(args) => stations::run_stations_with(args, &builder, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "isowalk",
    about = "Query walking isochrones, walk times and nearby stations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch the walking isochrone around a source location.
    Isochrone(IsochroneArgs),
    /// Compute walk times from a source to a list of points of interest.
    Pois(PoisArgs),
    /// List public transport stations within walking range.
    Stations(StationsArgs),
}

#[cfg(test)]
mod tests;
