// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Beam-steering software for phased-array antennas driven by AWMF-0108
beamformer chips.

A steering direction (theta, phi) is projected onto the array's axes, turned
into a per-element phase field and quantised into 5-bit phase codes with
optional per-quadrant calibration. The far-field array factor of the steered
array can also be sampled for visualisation.
 */

pub mod antenna;
pub mod array_factor;
pub mod calibration;
pub(crate) mod cli;
pub mod constants;
pub mod controller;
pub mod gain;
pub mod phase;
pub mod steering;
pub mod transport;

// Re-exports.
pub use antenna::{AntennaError, AntennaGeometry, AntennaLayout, Quadrant, CHANNEL_ORDER};
pub use array_factor::{AfOptions, AfSamples, ArrayFactorError, ArrayFactorSample};
pub use calibration::{
    CalibrationError, CalibrationFile, CalibrationSource, CalibrationTable, NoCalibration,
};
pub use cli::{Beamsteer, BeamsteerError};
pub use controller::BeamController;
pub use phase::{PhaseField, PhaseSettings};
pub use steering::{SteeringError, SteeringRequest};
pub use transport::{BeamMode, BeamTransport, DryRunTransport, TransportError};

/// Double-precision complex numbers.
#[allow(non_camel_case_types)]
pub type c64 = num_complex::Complex64;
