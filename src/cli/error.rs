// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all beamsteer-related errors. This should be the *only*
//! error enum that is publicly visible.

use thiserror::Error;

use crate::{
    antenna::{AntennaError, LAYOUTS_COMMA_SEPARATED},
    array_factor::ArrayFactorError,
    calibration::CalibrationError,
    steering::SteeringError,
    transport::TransportError,
};

/// The *only* publicly visible error from beamsteer. Each error message should
/// suggest a way forward, unless it's "generic".
#[derive(Error, Debug)]
pub enum BeamsteerError {
    /// An error related to the antenna geometry.
    #[error("{0}\n\nUse --layout with one of: {layouts}, or supply a geometry file with --antenna-file", layouts = LAYOUTS_COMMA_SEPARATED.as_str())]
    Antenna(String),

    /// An error related to reading an antenna geometry file.
    #[error("{0}\n\nGeometry files need the keys 'spacing_m', 'grid' and 'invert'")]
    AntennaFile(String),

    /// An error related to the steering direction, frequency or beam strength.
    #[error("{0}")]
    Steering(String),

    /// An error related to sampling array factors.
    #[error("{0}\n\nUse smaller values for --n-theta and --n-phi")]
    Pattern(String),

    /// An error related to phase-calibration tables.
    #[error("{0}\n\nCalibration tables are yaml, with each quadrant mapping phase settings (0 to 31) to corrections")]
    Calibration(String),

    /// The beamformer couldn't be written to. The calculated settings are not
    /// lost.
    #[error("{0}\n\nNo settings were changed; the write can be tried again once the beamformer is available")]
    Transport(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<AntennaError> for BeamsteerError {
    fn from(e: AntennaError) -> Self {
        let s = e.to_string();
        match e {
            AntennaError::Empty(_)
            | AntennaError::RaggedRows { .. }
            | AntennaError::DimensionMismatch { .. }
            | AntennaError::MissingQuadrant(_)
            | AntennaError::BadSpacing(_) => Self::Antenna(s),
            AntennaError::UnrecognisedFileType { .. }
            | AntennaError::Toml { .. }
            | AntennaError::Json { .. } => Self::AntennaFile(s),
            AntennaError::IO(e) => Self::from(e),
        }
    }
}

impl From<SteeringError> for BeamsteerError {
    fn from(e: SteeringError) -> Self {
        Self::Steering(e.to_string())
    }
}

impl From<ArrayFactorError> for BeamsteerError {
    fn from(e: ArrayFactorError) -> Self {
        Self::Pattern(e.to_string())
    }
}

impl From<CalibrationError> for BeamsteerError {
    fn from(e: CalibrationError) -> Self {
        let s = e.to_string();
        match e {
            CalibrationError::SettingOutOfRange { .. } | CalibrationError::Yaml(_) => {
                Self::Calibration(s)
            }
            CalibrationError::IO(e) => Self::from(e),
        }
    }
}

impl From<TransportError> for BeamsteerError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<std::io::Error> for BeamsteerError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
