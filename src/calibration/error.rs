// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::antenna::Quadrant;

/// Errors associated with reading phase-calibration tables. Callers going
/// through [`super::CalibrationSource`] never see these; an unreadable table
/// just means no calibration.
#[derive(Error, Debug)]
pub enum CalibrationError {
    #[error("Calibration for quadrant {quadrant} lists phase setting {setting}, but settings must be between 0 and 31")]
    SettingOutOfRange { quadrant: Quadrant, setting: i32 },

    #[error("Couldn't decode the calibration table: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
