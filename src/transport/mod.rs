// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing beam settings to AWMF-0108 hardware.
//!
//! [`BeamTransport`] abstracts over whatever carries register values to the
//! chip. This crate doesn't drive a bus itself; [`DryRunTransport`] only
//! reports what would be written and [`FileTransport`] appends the register
//! values to a file (e.g. a FIFO read by a bus driver).

mod error;
#[cfg(test)]
mod tests;

pub use error::TransportError;

use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use log::{debug, info};
use strum_macros::{Display, EnumIter, EnumString};

/// The operating mode of the beamformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum BeamMode {
    #[strum(serialize = "SB")]
    Standby,

    #[strum(serialize = "TX")]
    Tx,

    #[strum(serialize = "RX")]
    Rx,
}

/// Something that can write beam settings to a beamformer. Phases and
/// attenuations are given per channel in the order NE, SE, SW, NW.
pub trait BeamTransport {
    fn set_beam(
        &mut self,
        mode: BeamMode,
        phases: [u8; 4],
        attenuations: [u8; 4],
    ) -> Result<(), TransportError>;
}

/// A single write of beam settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeamWrite {
    pub mode: BeamMode,
    pub phases: [u8; 4],
    pub attenuations: [u8; 4],
}

/// Logs the writes that would have been made, and keeps them.
#[derive(Debug, Default)]
pub struct DryRunTransport {
    writes: Vec<BeamWrite>,
}

impl DryRunTransport {
    pub fn new() -> DryRunTransport {
        DryRunTransport::default()
    }

    pub fn writes(&self) -> &[BeamWrite] {
        &self.writes
    }
}

impl BeamTransport for DryRunTransport {
    fn set_beam(
        &mut self,
        mode: BeamMode,
        phases: [u8; 4],
        attenuations: [u8; 4],
    ) -> Result<(), TransportError> {
        info!("Would write {mode} mode, phases {phases:?}, attenuations {attenuations:?}");
        self.writes.push(BeamWrite {
            mode,
            phases,
            attenuations,
        });
        Ok(())
    }
}

/// Appends one tab-separated line per write to a file: the mode, then the four
/// phases, then the four attenuations.
#[derive(Debug)]
pub struct FileTransport {
    path: PathBuf,
}

impl FileTransport {
    pub fn new<P: AsRef<Path>>(path: P) -> FileTransport {
        FileTransport {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl BeamTransport for FileTransport {
    fn set_beam(
        &mut self,
        mode: BeamMode,
        phases: [u8; 4],
        attenuations: [u8; 4],
    ) -> Result<(), TransportError> {
        debug!("Writing beam settings to {}", self.path.display());
        let mut f = OpenOptions::new().append(true).create(true).open(&self.path)?;
        writeln!(
            f,
            "{mode}\t{}",
            phases.iter().chain(attenuations.iter()).join("\t")
        )?;
        Ok(())
    }
}
