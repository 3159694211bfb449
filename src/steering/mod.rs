// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Steering requests, and projecting a steering direction onto the axes of a
//! planar array.

mod error;

pub use error::SteeringError;

use log::{debug, warn};

use crate::constants::{FRAC_PI_2, MAX_ATTENUATION_CODE, PROJECTION_COS_LIMIT, TAU, VEL_C};

/// Where to point the beam and how hard. Angles are kept in radians; phi is
/// normalised into [0, 2π). Theta is left alone, so it may be negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringRequest {
    /// Polar angle from broadside [radians].
    theta: f64,

    /// Azimuth [radians]. 0 is North.
    phi: f64,

    /// [metres]
    wavelength_m: f64,

    /// Scalar amplification applied uniformly to all channels. This is
    /// written to hardware as an attenuation code.
    beam_strength: u8,
}

impl SteeringRequest {
    /// Create a new request. The angles are in degrees.
    pub fn new(
        theta_deg: f64,
        phi_deg: f64,
        wavelength_m: f64,
        beam_strength: u8,
    ) -> Result<SteeringRequest, SteeringError> {
        if !theta_deg.is_finite() {
            return Err(SteeringError::NonFiniteAngle {
                name: "theta",
                value: theta_deg,
            });
        }
        if !phi_deg.is_finite() {
            return Err(SteeringError::NonFiniteAngle {
                name: "phi",
                value: phi_deg,
            });
        }
        // Subnormal wavelengths overflow the wave number.
        let k = TAU / wavelength_m;
        if !(wavelength_m.is_finite() && wavelength_m > 0.0 && k.is_finite()) {
            return Err(SteeringError::BadWavelength(wavelength_m));
        }
        if beam_strength > MAX_ATTENUATION_CODE {
            return Err(SteeringError::BadBeamStrength(beam_strength));
        }

        // rem_euclid can round up to exactly 360 for tiny negative values.
        let phi_deg = match phi_deg.rem_euclid(360.0) {
            p if p >= 360.0 => 0.0,
            p => p,
        };
        Ok(SteeringRequest {
            theta: theta_deg.to_radians(),
            phi: phi_deg.to_radians(),
            wavelength_m,
            beam_strength,
        })
    }

    /// Create a new request from a frequency rather than a wavelength. The
    /// angles are in degrees.
    pub fn from_freq_ghz(
        theta_deg: f64,
        phi_deg: f64,
        freq_ghz: f64,
        beam_strength: u8,
    ) -> Result<SteeringRequest, SteeringError> {
        let wavelength_m = wavelength_from_freq_ghz(freq_ghz)?;
        SteeringRequest::new(theta_deg, phi_deg, wavelength_m, beam_strength)
    }

    /// [radians]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// [radians], in [0, 2π)
    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn wavelength_m(&self) -> f64 {
        self.wavelength_m
    }

    pub fn beam_strength(&self) -> u8 {
        self.beam_strength
    }

    /// The wave number k = 2π / λ [radians per metre].
    pub fn wave_number(&self) -> f64 {
        TAU / self.wavelength_m
    }
}

/// Convert a frequency [GHz] to a free-space wavelength [metres].
pub fn wavelength_from_freq_ghz(freq_ghz: f64) -> Result<f64, SteeringError> {
    if !(freq_ghz.is_finite() && freq_ghz > 0.0) {
        return Err(SteeringError::BadFrequency(freq_ghz));
    }
    Ok(VEL_C / (freq_ghz * 1e9))
}

/// A steering direction projected onto the east-west and north-south axes of
/// the array [radians].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAngles {
    pub ew: f64,
    pub ns: f64,
}

/// The phase difference between adjacent elements along each array axis
/// [radians per element].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseGradients {
    pub ew: f64,
    pub ns: f64,
}

/// Project the 3D direction (theta, phi) onto the array's axes.
///
/// When cos(theta) is (practically) zero, the direction lies in the plane of
/// the array and the projection diverges; each axis angle then saturates at
/// ±π/2, or 0 if the direction has no component along that axis.
pub fn project(theta: f64, phi: f64) -> AxisAngles {
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();
    let ew_num = sin_p * sin_t;
    let ns_num = cos_p * sin_t;

    if cos_t.abs() < PROJECTION_COS_LIMIT {
        warn!(
            "theta = {}° is in the plane of the array; saturating axis angles",
            theta.to_degrees()
        );
        // The sign of a vanishing cos(theta) decides which way the ratio
        // diverges.
        let sign = if cos_t < 0.0 { -1.0 } else { 1.0 };
        let saturate = |num: f64| {
            if num.abs() < PROJECTION_COS_LIMIT {
                0.0
            } else {
                FRAC_PI_2 * num.signum() * sign
            }
        };
        return AxisAngles {
            ew: saturate(ew_num),
            ns: saturate(ns_num),
        };
    }

    AxisAngles {
        ew: (ew_num / cos_t).atan(),
        ns: (ns_num / cos_t).atan(),
    }
}

/// Check that a phase ramp over `extent` element steps of `spacing_m` stays
/// finite for `request`. Every phase of an array with `extent` rows plus
/// columns is bounded by this ramp.
pub fn check_phase_extent(
    request: &SteeringRequest,
    spacing_m: f64,
    extent: usize,
) -> Result<(), SteeringError> {
    let k = request.wave_number();
    if (k * spacing_m * extent as f64).is_finite() {
        Ok(())
    } else {
        Err(SteeringError::PhaseOverflow {
            wave_number: k,
            spacing_m,
            extent,
        })
    }
}

/// Get the per-element phase gradients needed to steer an array with element
/// spacing `spacing_m` towards `request`.
pub fn phase_gradients(request: &SteeringRequest, spacing_m: f64) -> PhaseGradients {
    let k = request.wave_number();
    let AxisAngles { ew, ns } = project(request.theta, request.phi);
    let gradients = PhaseGradients {
        ew: -k * spacing_m * ew.sin(),
        ns: -k * spacing_m * ns.sin(),
    };
    debug!(
        "EW angle {:.3}°, NS angle {:.3}°, gradients {:.4} rad (EW) {:.4} rad (NS)",
        ew.to_degrees(),
        ns.to_degrees(),
        gradients.ew,
        gradients.ns
    );
    gradients
}
