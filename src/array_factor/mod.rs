// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Array-factor calculations.
//!
//! The array factor of a planar array at the observation angle (theta, phi)
//! is the coherent sum of every element's phasor:
//!
//! ```text
//! AF(θ, φ) = Σ_n Σ_m I[n][m] exp(i (d[n][m] + k s n sin θ cos φ + k s m sin θ sin φ))
//! ```
//!
//! where `I` are the relative element gains, `d` the (uninverted) phase field,
//! `k` the wave number and `s` the element spacing. Rows (`n`) run
//! north-south, columns (`m`) east-west.

mod error;

pub use error::ArrayFactorError;

use log::{debug, warn};
use ndarray::prelude::*;

use crate::{
    c64,
    constants::{DEFAULT_N_PHI, DEFAULT_N_THETA, TAU},
};

/// How to sample an array-factor pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AfOptions {
    /// The number of zenith angles to sample, starting from broadside.
    pub n_theta: usize,

    /// The number of azimuths to sample, starting from North.
    pub n_phi: usize,

    /// Divide every value by the biggest magnitude in the pattern.
    pub normalised: bool,

    /// Only keep the magnitude of each value.
    pub absolute: bool,

    /// Sample the back of the array too; zenith angles then go up to 180°
    /// rather than 90°.
    pub back_lobes: bool,
}

impl Default for AfOptions {
    fn default() -> Self {
        AfOptions {
            n_theta: DEFAULT_N_THETA,
            n_phi: DEFAULT_N_PHI,
            normalised: true,
            absolute: true,
            back_lobes: false,
        }
    }
}

impl AfOptions {
    /// The biggest zenith angle that could be sampled (exclusive) [degrees].
    pub fn max_theta_deg(&self) -> f64 {
        if self.back_lobes {
            180.0
        } else {
            90.0
        }
    }

    /// The number of samples in the grid.
    pub fn num_samples(&self) -> Result<usize, ArrayFactorError> {
        self.n_theta
            .checked_mul(self.n_phi)
            .ok_or(ArrayFactorError::TooManySamples {
                n_theta: self.n_theta,
                n_phi: self.n_phi,
            })
    }
}

/// A single array-factor value at an observation angle. If the value was
/// requested as absolute, `af` is real and non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayFactorSample {
    pub theta_deg: f64,
    pub phi_deg: f64,
    pub af: c64,
}

impl ArrayFactorSample {
    pub fn magnitude(&self) -> f64 {
        self.af.norm()
    }
}

/// The pieces needed to evaluate the array factor of a steered array.
#[derive(Debug, Clone, Copy)]
pub struct ArrayFactor<'a> {
    gains: ArrayView2<'a, f64>,
    phases: ArrayView2<'a, f64>,
    spacing_m: f64,
    wave_number: f64,
}

impl<'a> ArrayFactor<'a> {
    /// `gains` and `phases` [radians] must have the same dimensions.
    pub fn new(
        gains: ArrayView2<'a, f64>,
        phases: ArrayView2<'a, f64>,
        spacing_m: f64,
        wavelength_m: f64,
    ) -> ArrayFactor<'a> {
        assert_eq!(
            gains.dim(),
            phases.dim(),
            "gain and phase fields must have the same dimensions"
        );
        ArrayFactor {
            gains,
            phases,
            spacing_m,
            wave_number: TAU / wavelength_m,
        }
    }

    /// Evaluate the (unnormalised) array factor at (theta, phi) [radians].
    pub fn at(&self, theta: f64, phi: f64) -> c64 {
        let sin_t = theta.sin();
        let (sin_p, cos_p) = phi.sin_cos();
        let ks = self.wave_number * self.spacing_m;
        let ns_step = ks * sin_t * cos_p;
        let ew_step = ks * sin_t * sin_p;

        self.gains
            .indexed_iter()
            .zip(self.phases.iter())
            .map(|(((n, m), &gain), &phase)| {
                c64::cis(phase + ns_step * n as f64 + ew_step * m as f64) * gain
            })
            .sum()
    }

    /// Lazily evaluate the array factor over a grid of observation angles. No
    /// normalisation is done; see [`ArrayFactor::pattern`].
    pub fn samples(&self, options: &AfOptions) -> Result<AfSamples<'a>, ArrayFactorError> {
        Ok(AfSamples {
            af: *self,
            options: *options,
            total: options.num_samples()?,
            index: 0,
        })
    }

    /// Evaluate the array factor over a grid of observation angles, applying
    /// normalisation if requested. Normalising needs the biggest magnitude of
    /// the whole pattern, so the samples are buffered first.
    ///
    /// If every sample is zero, the pattern can't be normalised and is
    /// returned as is.
    pub fn pattern(
        &self,
        options: &AfOptions,
    ) -> Result<Vec<ArrayFactorSample>, ArrayFactorError> {
        let mut samples: Vec<ArrayFactorSample> = self.samples(options)?.collect();
        if !options.normalised {
            return Ok(samples);
        }

        let max = samples
            .iter()
            .map(ArrayFactorSample::magnitude)
            .fold(0.0, f64::max);
        if max > 0.0 {
            debug!("Normalising array factor pattern by {max}");
            samples.iter_mut().for_each(|s| s.af /= max);
        } else {
            warn!("The array factor is zero everywhere; not normalising");
        }
        Ok(samples)
    }
}

/// A lazy, finite iterator over array-factor samples. Zenith angles go from
/// 0° (inclusive) to 90° or 180° (exclusive) and azimuths from 0° to 360°
/// (exclusive). Azimuth varies fastest.
#[derive(Debug, Clone)]
pub struct AfSamples<'a> {
    af: ArrayFactor<'a>,
    options: AfOptions,
    total: usize,
    index: usize,
}

impl Iterator for AfSamples<'_> {
    type Item = ArrayFactorSample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.total {
            return None;
        }
        let AfOptions {
            n_theta,
            n_phi,
            absolute,
            ..
        } = self.options;
        let i_theta = self.index / n_phi;
        let i_phi = self.index % n_phi;
        self.index += 1;

        let theta_deg = self.options.max_theta_deg() * i_theta as f64 / n_theta as f64;
        let phi_deg = 360.0 * i_phi as f64 / n_phi as f64;
        let mut af = self.af.at(theta_deg.to_radians(), phi_deg.to_radians());
        if absolute {
            af = c64::new(af.norm(), 0.0);
        }

        Some(ArrayFactorSample {
            theta_deg,
            phi_deg,
            af,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AfSamples<'_> {}
