// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Per-element phase fields, and quantising them into AWMF-0108 phase
//! settings.


use std::{fmt, ops::Index};

use itertools::Itertools;
use log::trace;
use ndarray::prelude::*;
use ndarray::Zip;

use crate::{
    antenna::{AntennaGeometry, Quadrant, CHANNEL_ORDER},
    calibration::CalibrationTable,
    constants::{PHASE_CONTROL_MAX, PHASE_CONTROL_RANGE, PI, TAU},
    steering::PhaseGradients,
};

/// The phase offset of every element of an array [radians]. `raw` is the
/// linear phase ramp that steers the beam. `inverted` additionally has π added
/// to every element whose feed is wired with a 180° flip; this is what gets
/// written to hardware.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseField {
    raw: Array2<f64>,
    inverted: Array2<f64>,
}

impl PhaseField {
    /// Build the phase field of `geometry`. Element [0, 0] is the reference
    /// (phase 0). Moving down a row adds the NS gradient, moving along a row
    /// adds the EW gradient.
    pub fn new(geometry: &AntennaGeometry, gradients: PhaseGradients) -> PhaseField {
        let (num_rows, num_cols) = geometry.dim();
        let mut raw = Array2::zeros((num_rows, num_cols));
        for i in 0..num_rows {
            if i > 0 {
                raw[[i, 0]] = raw[[i - 1, 0]] + gradients.ns;
            }
            for j in 1..num_cols {
                raw[[i, j]] = raw[[i, j - 1]] + gradients.ew;
            }
        }

        let mut inverted = raw.clone();
        Zip::from(&mut inverted)
            .and(geometry.invert())
            .for_each(|phase, &invert| {
                if invert {
                    *phase += PI;
                }
            });
        trace!("Raw phase field: {raw}");
        trace!("Inverted phase field: {inverted}");

        PhaseField { raw, inverted }
    }

    pub fn raw(&self) -> ArrayView2<f64> {
        self.raw.view()
    }

    pub fn inverted(&self) -> ArrayView2<f64> {
        self.inverted.view()
    }

    /// Quantise the inverted field into phase settings, one per quadrant,
    /// correcting each with `calibration` if it's available. `geometry` must
    /// be the geometry that this field was built from.
    pub fn quantise(
        &self,
        geometry: &AntennaGeometry,
        calibration: Option<&CalibrationTable>,
    ) -> PhaseSettings {
        PhaseSettings(CHANNEL_ORDER.map(|quadrant| {
            let element = geometry
                .element_of(quadrant)
                .expect("AntennaGeometry guarantees every quadrant drives an element");
            let setting = radians_to_setting(self.inverted[element]);
            match calibration {
                Some(table) => table.apply(quadrant, setting),
                None => setting,
            }
        }))
    }
}

/// Convert a phase [radians] into an AWMF-0108 phase setting (0 to 31). The
/// phase is wrapped into [0, 2π) and rounded to the nearest setting, with
/// ties going to the even setting. Rounding up to a full cycle gives 0.
pub fn radians_to_setting(rads: f64) -> u8 {
    let interval = PHASE_CONTROL_MAX / f64::from(PHASE_CONTROL_RANGE);
    let wrapped = rads.rem_euclid(TAU);
    let setting = (wrapped / interval).round_ties_even() as u8;
    if setting >= PHASE_CONTROL_RANGE {
        0
    } else {
        setting
    }
}

/// Phase settings for each AWMF-0108 channel, in the order NE, SE, SW, NW.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseSettings([u8; 4]);

impl PhaseSettings {
    /// The settings in channel order (NE, SE, SW, NW).
    pub fn as_array(&self) -> [u8; 4] {
        self.0
    }

    pub fn get(&self, quadrant: Quadrant) -> u8 {
        self[quadrant]
    }

    /// Iterate over (quadrant, setting) pairs in channel order.
    pub fn iter(&self) -> impl Iterator<Item = (Quadrant, u8)> + '_ {
        CHANNEL_ORDER.into_iter().zip(self.0)
    }
}

impl Index<Quadrant> for PhaseSettings {
    type Output = u8;

    fn index(&self, quadrant: Quadrant) -> &u8 {
        let i = match quadrant {
            Quadrant::NE => 0,
            Quadrant::SE => 1,
            Quadrant::SW => 2,
            Quadrant::NW => 3,
        };
        &self.0[i]
    }
}

impl fmt::Display for PhaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            self.iter().map(|(q, s)| format!("{q} = {s}")).join(", ")
        )
    }
}
