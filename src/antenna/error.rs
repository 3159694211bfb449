// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with antenna geometry.

use thiserror::Error;

use super::Quadrant;

#[derive(Error, Debug)]
pub enum AntennaError {
    #[error("The antenna {0} is empty")]
    Empty(&'static str),

    #[error("Row {row} of the antenna {what} has {got} elements, but row 0 has {expected}")]
    RaggedRows {
        what: &'static str,
        row: usize,
        got: usize,
        expected: usize,
    },

    #[error("The antenna grid is {grid_rows}x{grid_cols}, but the inversion mask is {mask_rows}x{mask_cols}; these must match")]
    DimensionMismatch {
        grid_rows: usize,
        grid_cols: usize,
        mask_rows: usize,
        mask_cols: usize,
    },

    #[error("Quadrant {0} does not appear in the antenna grid; every AWMF-0108 channel needs an element")]
    MissingQuadrant(Quadrant),

    #[error("Antenna spacing must be a positive, finite number of metres; got {0}")]
    BadSpacing(f64),

    #[error("Antenna file '{file}' doesn't have a recognised file extension! Valid extensions are: {valid}")]
    UnrecognisedFileType { file: String, valid: String },

    #[error("Couldn't decode toml structure from '{file}':\n{err}")]
    Toml { file: String, err: toml::de::Error },

    #[error("Couldn't decode json structure from '{file}':\n{err}")]
    Json {
        file: String,
        err: serde_json::Error,
    },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
