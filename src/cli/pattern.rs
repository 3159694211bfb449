// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use clap::Parser;
use log::{info, warn};

use super::common::BeamArgs;
use crate::{
    array_factor::AfOptions,
    constants::{DEFAULT_N_PHI, DEFAULT_N_THETA},
    BeamsteerError,
};

/// Sample the array factor of a steered beam.
#[derive(Parser, Debug)]
pub struct PatternArgs {
    #[clap(flatten)]
    beam_args: BeamArgs,

    /// The number of zenith angles to sample.
    #[clap(long, default_value_t = DEFAULT_N_THETA)]
    n_theta: usize,

    /// The number of azimuths to sample.
    #[clap(long, default_value_t = DEFAULT_N_PHI)]
    n_phi: usize,

    /// Sample zenith angles up to 180° rather than 90°, i.e. include the back
    /// of the array.
    #[clap(long)]
    back_lobes: bool,

    /// Don't divide the pattern by its biggest magnitude.
    #[clap(long)]
    no_normalise: bool,

    /// Write the complex value of the array factor rather than its magnitude.
    #[clap(long)]
    complex: bool,

    /// The file to write the pattern to. The file is tab-separated, with each
    /// line (1) the zenith angle in degrees, (2) the azimuth in degrees, and
    /// (3) the magnitude of the array factor. With --complex, (3) and (4) are
    /// the real and imaginary parts.
    #[clap(short, long, default_value = "af_pattern.tsv")]
    output: PathBuf,
}

impl PatternArgs {
    pub(super) fn run(self) -> Result<(), BeamsteerError> {
        let PatternArgs {
            beam_args,
            n_theta,
            n_phi,
            back_lobes,
            no_normalise,
            complex,
            output,
        } = self;
        let mut controller = beam_args.parse()?;
        info!("Phase settings: {}", controller.phase_settings());

        if n_theta == 0 || n_phi == 0 {
            warn!("Nothing to sample with {n_theta} zenith angles and {n_phi} azimuths");
        }
        let options = AfOptions {
            n_theta,
            n_phi,
            normalised: !no_normalise,
            absolute: !complex,
            back_lobes,
        };
        let pattern = controller.generate_all_af(&options)?;

        let mut out = BufWriter::new(File::create(&output)?);
        for s in &pattern {
            if complex {
                writeln!(
                    &mut out,
                    "{}\t{}\t{:e}\t{:e}",
                    s.theta_deg, s.phi_deg, s.af.re, s.af.im
                )?;
            } else {
                writeln!(&mut out, "{}\t{}\t{:e}", s.theta_deg, s.phi_deg, s.magnitude())?;
            }
        }
        out.flush()?;
        info!(
            "Wrote {} array factor values to {}",
            pattern.len(),
            output.display()
        );

        Ok(())
    }
}
