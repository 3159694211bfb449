// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with steering requests.

use thiserror::Error;

use crate::constants::MAX_ATTENUATION_CODE;

#[derive(Error, Debug)]
pub enum SteeringError {
    #[error("Steering angle {name} must be finite; got {value}")]
    NonFiniteAngle { name: &'static str, value: f64 },

    #[error("Wavelength must be a positive, finite number of metres; got {0}")]
    BadWavelength(f64),

    #[error("Steering across {extent} elements spaced {spacing_m} m apart with wave number {wave_number} rad/m gives phases too big to represent")]
    PhaseOverflow {
        wave_number: f64,
        spacing_m: f64,
        extent: usize,
    },

    #[error("Frequency must be a positive, finite number of GHz; got {0}")]
    BadFrequency(f64),

    #[error("Beam strength {0} is too big; it must be at most {MAX_ATTENUATION_CODE}")]
    BadBeamStrength(u8),
}
