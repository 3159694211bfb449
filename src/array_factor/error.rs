// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with sampling array factors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArrayFactorError {
    #[error("Sampling {n_theta} zenith angles by {n_phi} azimuths gives too many samples")]
    TooManySamples { n_theta: usize, n_phi: usize },
}
