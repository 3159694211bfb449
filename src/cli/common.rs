// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Arguments shared between subcommands.

use std::path::PathBuf;

use clap::Args;
use itertools::Itertools;
use log::{debug, info};
use strum::IntoEnumIterator;

use super::BeamsteerError;
use crate::{
    antenna::{
        AntennaGeometry, AntennaLayout, GEOMETRY_FILE_TYPES_COMMA_SEPARATED,
        LAYOUTS_COMMA_SEPARATED,
    },
    calibration::{CalibrationFile, NoCalibration},
    constants::{DEFAULT_FREQ_GHZ, DEFAULT_SPACING_M, MAX_ATTENUATION_CODE},
    controller::BeamController,
    steering::SteeringRequest,
    transport::BeamMode,
};

lazy_static::lazy_static! {
    pub(super) static ref MODES_COMMA_SEPARATED: String = BeamMode::iter().join(", ");

    static ref LAYOUT_HELP: String =
        format!("The reference board to steer. Ignored if an antenna file is given. Valid layouts are: {}", *LAYOUTS_COMMA_SEPARATED);

    static ref ANTENNA_FILE_HELP: String =
        format!("A file describing the antenna geometry, with the keys 'spacing_m', 'grid' and 'invert'. Supported formats: {}", *GEOMETRY_FILE_TYPES_COMMA_SEPARATED);

    static ref SPACING_HELP: String =
        format!("The centre-to-centre distance between adjacent elements of the reference board [mm]. Default: {}", DEFAULT_SPACING_M * 1e3);

    static ref FREQ_HELP: String =
        format!("The operating frequency [GHz]. Default: {DEFAULT_FREQ_GHZ}");

    static ref BEAM_STRENGTH_HELP: String =
        format!("The amplification applied to every channel, from 0 to {MAX_ATTENUATION_CODE}. This is written to hardware as the attenuation code {MAX_ATTENUATION_CODE} - strength");

    pub(super) static ref MODE_HELP: String =
        format!("The beamformer mode. Valid modes are: {}", *MODES_COMMA_SEPARATED);
}

/// Everything needed to calculate a beam.
#[derive(Debug, Clone, Args)]
pub(super) struct BeamArgs {
    /// The polar angle to steer to, away from broadside [degrees].
    #[clap(short, long, allow_hyphen_values = true, default_value = "0")]
    pub(super) theta: f64,

    /// The azimuth to steer to, clockwise from North [degrees].
    #[clap(short, long, allow_hyphen_values = true, default_value = "0")]
    pub(super) phi: f64,

    #[clap(short, long, help = FREQ_HELP.as_str())]
    pub(super) freq_ghz: Option<f64>,

    /// The operating wavelength [metres]. Use this instead of a frequency.
    #[clap(long)]
    pub(super) wavelength_m: Option<f64>,

    #[clap(short, long, help = BEAM_STRENGTH_HELP.as_str(), default_value = "1")]
    pub(super) beam_strength: u8,

    #[clap(short, long, help = LAYOUT_HELP.as_str(), default_value = "1x4")]
    pub(super) layout: AntennaLayout,

    #[clap(short, long, help = ANTENNA_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) antenna_file: Option<PathBuf>,

    #[clap(long, help = SPACING_HELP.as_str())]
    pub(super) spacing_mm: Option<f64>,

    /// A yaml phase-calibration table. If it can't be read, phase settings are
    /// left uncalibrated.
    #[clap(short, long, parse(from_os_str))]
    pub(super) calibration: Option<PathBuf>,
}

impl BeamArgs {
    /// Validate the arguments and set up a controller with them.
    pub(super) fn parse(self) -> Result<BeamController, BeamsteerError> {
        let BeamArgs {
            theta,
            phi,
            freq_ghz,
            wavelength_m,
            beam_strength,
            layout,
            antenna_file,
            spacing_mm,
            calibration,
        } = self;

        if freq_ghz.is_some() && wavelength_m.is_some() {
            return Err(BeamsteerError::Steering(
                "Both a frequency and a wavelength were given; only one may be used".to_string(),
            ));
        }
        if antenna_file.is_some() && spacing_mm.is_some() {
            return Err(BeamsteerError::AntennaFile(
                "A spacing can't be given with an antenna file; put it in the file instead"
                    .to_string(),
            ));
        }

        let request = match wavelength_m {
            Some(wavelength_m) => {
                SteeringRequest::new(theta, phi, wavelength_m, beam_strength)?
            }
            None => SteeringRequest::from_freq_ghz(
                theta,
                phi,
                freq_ghz.unwrap_or(DEFAULT_FREQ_GHZ),
                beam_strength,
            )?,
        };
        info!(
            "Steering to theta = {theta}°, phi = {:.2}° at {:.4} mm wavelength",
            request.phi().to_degrees(),
            request.wavelength_m() * 1e3
        );

        let geometry = match antenna_file {
            Some(file) => {
                info!("Using antenna geometry from {}", file.display());
                AntennaGeometry::read_file(file)?
            }
            None => {
                let spacing_m = spacing_mm.map(|s| s / 1e3).unwrap_or(DEFAULT_SPACING_M);
                info!("Using the {layout} board, {} mm spacing", spacing_m * 1e3);
                layout.geometry(spacing_m)?
            }
        };
        debug!("Antenna grid: {}", geometry.grid());

        let mut controller = match calibration {
            Some(file) => BeamController::with_calibration_source(
                request,
                &CalibrationFile,
                &file.display().to_string(),
            ),
            None => BeamController::with_calibration_source(request, &NoCalibration, ""),
        };
        controller.set_antenna(geometry)?;
        Ok(controller)
    }
}
