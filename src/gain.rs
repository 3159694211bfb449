// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Element gains.
//!
//! Arrays are uniformly illuminated, so every element has a relative gain of
//! 1. The beam strength is applied to all channels alike at the hardware
//! level, as an attenuation code, and so never appears in the relative gains.

use ndarray::prelude::*;

use crate::{
    antenna::AntennaGeometry,
    constants::{
        GAIN_CONTROL_MAX_RX_DB, GAIN_CONTROL_MAX_TX_DB, GAIN_CONTROL_STEP_DB,
        MAX_ATTENUATION_CODE,
    },
    transport::BeamMode,
};

/// Get the relative gain (0 to 1) of each element of `geometry`.
pub fn relative_gains(geometry: &AntennaGeometry) -> Array2<f64> {
    Array2::ones(geometry.dim())
}

/// Convert a beam strength into the attenuation code written to each channel.
/// Beam strengths above the maximum code saturate at no attenuation.
pub fn attenuation_code(beam_strength: u8) -> u8 {
    MAX_ATTENUATION_CODE.saturating_sub(beam_strength)
}

/// The gain of each channel [dB] in `mode` when written with attenuation
/// `code`. Standby has no signal path, so no gain.
pub fn channel_gain_db(mode: BeamMode, code: u8) -> Option<f64> {
    let max_db = match mode {
        BeamMode::Tx => GAIN_CONTROL_MAX_TX_DB,
        BeamMode::Rx => GAIN_CONTROL_MAX_RX_DB,
        BeamMode::Standby => return None,
    };
    let code = code.min(MAX_ATTENUATION_CODE);
    Some(max_db - f64::from(code) * GAIN_CONTROL_STEP_DB)
}
