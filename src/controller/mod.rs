// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The [`BeamController`] ties steering, quantisation, calibration and
//! array-factor sampling together for a single antenna.
//!
//! Phase settings and relative gains are computed on first use and cached.
//! Replacing the antenna geometry always throws the cache away; replacing the
//! steering request makes the next call recompute, because cached results
//! remember the request they were made for.


use log::{debug, info};
use ndarray::prelude::*;

use crate::{
    antenna::AntennaGeometry,
    array_factor::{AfOptions, ArrayFactor, ArrayFactorError, ArrayFactorSample},
    calibration::{CalibrationSource, CalibrationTable},
    gain::{attenuation_code, channel_gain_db, relative_gains},
    phase::{PhaseField, PhaseSettings},
    steering::{check_phase_extent, phase_gradients, SteeringError, SteeringRequest},
    transport::{BeamMode, BeamTransport, TransportError},
};

#[derive(Debug, Clone)]
struct CachedBeam {
    request: SteeringRequest,
    field: PhaseField,
    settings: PhaseSettings,
}

impl CachedBeam {
    fn new(
        request: &SteeringRequest,
        geometry: &AntennaGeometry,
        calibration: Option<&CalibrationTable>,
    ) -> CachedBeam {
        debug!("Calculating phase settings");
        let gradients = phase_gradients(request, geometry.spacing_m());
        let field = PhaseField::new(geometry, gradients);
        let settings = field.quantise(geometry, calibration);
        debug!("Phase settings: {settings}");
        CachedBeam {
            request: *request,
            field,
            settings,
        }
    }
}

/// Calculates (and remembers) the beam settings of an antenna.
#[derive(Debug, Clone)]
pub struct BeamController {
    request: SteeringRequest,
    geometry: AntennaGeometry,
    calibration: Option<CalibrationTable>,

    beam: Option<CachedBeam>,
    gains: Option<Array2<f64>>,
}

impl BeamController {
    /// Create a controller for the reference 1x4 board. Use
    /// [`BeamController::set_antenna`] for anything else.
    pub fn new(request: SteeringRequest, calibration: Option<CalibrationTable>) -> BeamController {
        BeamController {
            request,
            geometry: AntennaGeometry::default(),
            calibration,
            beam: None,
            gains: None,
        }
    }

    /// Create a controller, getting the calibration table from `source`.
    pub fn with_calibration_source<S: CalibrationSource + ?Sized>(
        request: SteeringRequest,
        source: &S,
        identifier: &str,
    ) -> BeamController {
        BeamController::new(request, source.load(identifier))
    }

    /// Replace the antenna geometry. Anything previously calculated is
    /// forgotten. If the current request can't steer `geometry`, nothing
    /// changes.
    pub fn set_antenna(&mut self, geometry: AntennaGeometry) -> Result<(), SteeringError> {
        check_steerable(&self.request, &geometry)?;
        debug!("New antenna geometry; clearing cached settings");
        self.geometry = geometry;
        self.beam = None;
        self.gains = None;
        Ok(())
    }

    /// Point somewhere else. If `request` can't steer the current antenna,
    /// nothing changes.
    pub fn set_request(&mut self, request: SteeringRequest) -> Result<(), SteeringError> {
        check_steerable(&request, &self.geometry)?;
        self.request = request;
        Ok(())
    }

    pub fn request(&self) -> &SteeringRequest {
        &self.request
    }

    pub fn geometry(&self) -> &AntennaGeometry {
        &self.geometry
    }

    pub fn calibration(&self) -> Option<&CalibrationTable> {
        self.calibration.as_ref()
    }

    pub fn beam_strength(&self) -> u8 {
        self.request.beam_strength()
    }

    fn beam(&mut self) -> &CachedBeam {
        if self
            .beam
            .as_ref()
            .is_some_and(|b| b.request != self.request)
        {
            debug!("Steering request changed; clearing cached settings");
            self.beam = None;
        }
        self.beam.get_or_insert_with(|| {
            CachedBeam::new(&self.request, &self.geometry, self.calibration.as_ref())
        })
    }

    /// Get the (calibrated) phase setting of each channel, in the order NE,
    /// SE, SW, NW.
    pub fn phase_settings(&mut self) -> PhaseSettings {
        self.beam().settings
    }

    /// Get the phase of each element [radians] before any feed inversion is
    /// applied. This has the same layout as the antenna grid.
    pub fn raw_phase_settings(&mut self) -> ArrayView2<f64> {
        self.beam().field.raw()
    }

    /// Get the relative gain (0 to 1) of each element. This has the same
    /// layout as the antenna grid.
    pub fn relative_gain(&mut self) -> ArrayView2<f64> {
        self.gains
            .get_or_insert_with(|| relative_gains(&self.geometry))
            .view()
    }

    /// Sample the array factor of the steered antenna. See [`AfOptions`] for
    /// the sampling grid.
    pub fn generate_all_af(
        &mut self,
        options: &AfOptions,
    ) -> Result<Vec<ArrayFactorSample>, ArrayFactorError> {
        let spacing_m = self.geometry.spacing_m();
        let wavelength_m = self.request.wavelength_m();
        let gains = self.relative_gain().to_owned();
        let phases = self.raw_phase_settings();
        ArrayFactor::new(gains.view(), phases, spacing_m, wavelength_m).pattern(options)
    }

    /// Write the current beam to hardware. The beam strength is written as the
    /// same attenuation code on every channel. If the write fails, nothing
    /// calculated is lost and the write can simply be tried again.
    pub fn program<T: BeamTransport + ?Sized>(
        &mut self,
        transport: &mut T,
        mode: BeamMode,
    ) -> Result<PhaseSettings, TransportError> {
        let settings = self.phase_settings();
        let attenuation = attenuation_code(self.beam_strength());
        transport.set_beam(mode, settings.as_array(), [attenuation; 4])?;
        match channel_gain_db(mode, attenuation) {
            Some(gain) => info!(
                "Programmed {mode} mode ({settings}, attenuation {attenuation}, channel gain {gain} dB)"
            ),
            None => info!("Programmed {mode} mode ({settings}, attenuation {attenuation})"),
        }
        Ok(settings)
    }
}

/// The biggest phase in an array is bounded by the steering ramp over its rows
/// plus columns; that must be finite.
fn check_steerable(
    request: &SteeringRequest,
    geometry: &AntennaGeometry,
) -> Result<(), SteeringError> {
    let (num_rows, num_cols) = geometry.dim();
    check_phase_extent(request, geometry.spacing_m(), num_rows + num_cols)
}
