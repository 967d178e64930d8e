//! Shared test harness modules for the isowalk CLI.

use super::*;

mod helpers;
mod unit;
