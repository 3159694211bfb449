// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use clap::Parser;
use log::info;

use super::common::{BeamArgs, MODE_HELP};
use crate::{
    transport::{BeamMode, BeamTransport, DryRunTransport, FileTransport},
    BeamsteerError,
};

/// Calculate (and optionally program) the phase settings of a steered beam.
#[derive(Parser, Debug)]
pub struct SteerArgs {
    #[clap(flatten)]
    beam_args: BeamArgs,

    #[clap(short, long, help = MODE_HELP.as_str(), default_value = "TX")]
    mode: BeamMode,

    /// Write the settings to the beamformer. Without --device, the writes are
    /// only reported.
    #[clap(long)]
    program: bool,

    /// The file (e.g. a FIFO) that beamformer register writes are appended to.
    #[clap(short, long, parse(from_os_str), requires = "program")]
    device: Option<PathBuf>,

    /// Also print the phase of each element before quantisation [radians].
    #[clap(long)]
    raw: bool,
}

impl SteerArgs {
    pub(super) fn run(self) -> Result<(), BeamsteerError> {
        let SteerArgs {
            beam_args,
            mode,
            program,
            device,
            raw,
        } = self;
        let mut controller = beam_args.parse()?;

        let settings = controller.phase_settings();
        println!(
            "{settings}, {mode} mode | Amp: {}",
            controller.beam_strength()
        );
        if raw {
            println!("{:.6}", controller.raw_phase_settings());
        }

        if program {
            let mut transport: Box<dyn BeamTransport> = match device {
                Some(device) => {
                    info!("Programming the beamformer via {}", device.display());
                    Box::new(FileTransport::new(device))
                }
                None => Box::new(DryRunTransport::new()),
            };
            controller.program(transport.as_mut(), mode)?;
        }

        Ok(())
    }
}
