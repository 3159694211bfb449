// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Errors writing beam settings to hardware. None of these are fatal; the
/// same settings can be written again once the hardware is available.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("The beamformer interface is not connected")]
    NotConnected,

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
