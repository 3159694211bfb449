// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision, and all angles are radians unless
the name says otherwise.
 */

pub use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// The number of discrete phase codes an AWMF-0108 channel understands. These
/// span a full cycle (2π radians).
pub const PHASE_CONTROL_RANGE: u8 = 32;

/// The phase-shift range covered by [`PHASE_CONTROL_RANGE`] codes [radians].
pub const PHASE_CONTROL_MAX: f64 = TAU;

/// The number of discrete gain (attenuation) codes an AWMF-0108 channel
/// understands.
pub const GAIN_CONTROL_RANGE: u8 = 32;

/// The largest attenuation code. A beam strength `s` is written to the chip as
/// `MAX_ATTENUATION_CODE - s`.
pub const MAX_ATTENUATION_CODE: u8 = GAIN_CONTROL_RANGE - 1;

/// dB of attenuation per gain code.
pub const GAIN_CONTROL_STEP_DB: f64 = 1.0;

/// Maximum receive gain [dB].
pub const GAIN_CONTROL_MAX_RX_DB: f64 = 28.0;

/// Maximum transmit gain [dB].
pub const GAIN_CONTROL_MAX_TX_DB: f64 = 26.0;

/// Speed of light in a vacuum [metres per second].
pub const VEL_C: f64 = 299_792_458.0;

/// The centre-to-centre distance between the patches of the reference boards
/// [metres].
pub const DEFAULT_SPACING_M: f64 = 5.4e-3;

/// The frequency the reference boards are designed for [GHz].
pub const DEFAULT_FREQ_GHZ: f64 = 28.0;

/// The default number of zenith angles to sample when generating an array
/// factor pattern.
pub const DEFAULT_N_THETA: usize = 30;

/// The default number of azimuths to sample when generating an array factor
/// pattern.
pub const DEFAULT_N_PHI: usize = 30;

/// Below this absolute value, cos(theta) is treated as zero when projecting a
/// steering direction onto the array axes.
pub const PROJECTION_COS_LIMIT: f64 = 1e-12;
