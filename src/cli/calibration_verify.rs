// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to verify phase-calibration tables.

use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;

use crate::{
    antenna::CHANNEL_ORDER,
    calibration::{CalibrationError, CalibrationTable},
    BeamsteerError,
};

/// Verify that phase-calibration tables can be read, and summarise them.
#[derive(Parser, Debug)]
pub struct CalibrationVerifyArgs {
    /// Path to the calibration table(s) to be verified.
    #[clap(name = "CALIBRATION_FILES", parse(from_os_str), required = true)]
    files: Vec<PathBuf>,
}

impl CalibrationVerifyArgs {
    pub(super) fn run(&self) -> Result<(), BeamsteerError> {
        let num_bad = verify(&self.files);
        if num_bad > 0 {
            return Err(BeamsteerError::Calibration(format!(
                "{num_bad} of {} calibration tables couldn't be read",
                self.files.len()
            )));
        }
        Ok(())
    }
}

/// Read and print stats out for each calibration table. If a table couldn't be
/// read, print the error, and continue with the others. The number of
/// unreadable tables is returned.
fn verify<P: AsRef<Path>>(files: &[P]) -> usize {
    let mut num_bad = 0;
    for file in files {
        let file = file.as_ref();
        info!("{}:", file.display());
        match CalibrationTable::read_yaml(file) {
            Ok(table) => summarise(&table),
            Err(e) => {
                info!("    {}", describe(&e));
                num_bad += 1;
            }
        }
        info!("");
    }
    num_bad
}

fn summarise(table: &CalibrationTable) {
    for quadrant in CHANNEL_ORDER {
        match table.quadrant(quadrant) {
            Some(corrections) => {
                let num_corrected = corrections.values().filter(|&&c| c != 0).count();
                // Not empty, so these are always present.
                let min = corrections.values().min().copied().unwrap_or_default();
                let max = corrections.values().max().copied().unwrap_or_default();
                info!(
                    "    {quadrant}: {} settings listed, {num_corrected} corrected, corrections from {min} to {max}",
                    corrections.len()
                );
            }
            None => info!("    {quadrant}: no corrections; settings are used as is"),
        }
    }
}

fn describe(e: &CalibrationError) -> String {
    match e {
        CalibrationError::IO(e) => format!("Couldn't read the file: {e}"),
        e => e.to_string(),
    }
}
