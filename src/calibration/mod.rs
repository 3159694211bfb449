// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Per-quadrant phase calibration.
//!
//! A calibration table lists, for each quadrant, the measured error of some
//! phase settings (in settings, i.e. measurement minus setting). Tables are
//! stored as yaml:
//!
//! ```yaml
//! NW:
//!   0: 3
//!   1: -2
//! NE:
//!   10: 2
//! ```
//!
//! A quantised setting is corrected with the entry whose setting is nearest
//! to it. When two entries are equally near, the smaller setting wins.

mod error;

pub use error::CalibrationError;

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::{debug, trace, warn};

use crate::{antenna::Quadrant, constants::PHASE_CONTROL_RANGE};

/// Phase-setting corrections, keyed by quadrant and then by setting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalibrationTable(BTreeMap<Quadrant, BTreeMap<i32, i32>>);

impl CalibrationTable {
    pub fn new(
        corrections: BTreeMap<Quadrant, BTreeMap<i32, i32>>,
    ) -> Result<CalibrationTable, CalibrationError> {
        for (&quadrant, settings) in &corrections {
            if let Some(&setting) = settings
                .keys()
                .find(|&&s| !(0..i32::from(PHASE_CONTROL_RANGE)).contains(&s))
            {
                return Err(CalibrationError::SettingOutOfRange { quadrant, setting });
            }
        }
        Ok(CalibrationTable(corrections))
    }

    /// Read a yaml calibration table from a file.
    pub fn read_yaml<P: AsRef<Path>>(file: P) -> Result<CalibrationTable, CalibrationError> {
        let mut buf = BufReader::new(File::open(file)?);
        CalibrationTable::from_yaml(&mut buf)
    }

    /// Read a yaml calibration table.
    pub fn from_yaml<T: BufRead>(buf: &mut T) -> Result<CalibrationTable, CalibrationError> {
        let corrections = serde_yaml::from_reader(buf)?;
        CalibrationTable::new(corrections)
    }

    /// The corrections for a single quadrant, if the table has any.
    pub fn quadrant(&self, quadrant: Quadrant) -> Option<&BTreeMap<i32, i32>> {
        self.0.get(&quadrant).filter(|m| !m.is_empty())
    }

    /// Iterate over the quadrants and their corrections.
    pub fn iter(&self) -> impl Iterator<Item = (Quadrant, &BTreeMap<i32, i32>)> {
        self.0.iter().map(|(&q, m)| (q, m))
    }

    /// Find the table entry nearest to `setting` for `quadrant`, returning
    /// the entry's setting and correction.
    pub fn nearest(&self, quadrant: Quadrant, setting: u8) -> Option<(i32, i32)> {
        let setting = i32::from(setting);
        // `min_by_key` keeps the first of equal elements and the map is
        // ordered, so ties go to the smaller setting.
        self.quadrant(quadrant)?
            .iter()
            .min_by_key(|&(&s, _)| (s - setting).abs())
            .map(|(&s, &c)| (s, c))
    }

    /// Correct a quantised phase setting. If there are no corrections for this
    /// quadrant, the setting is returned unchanged.
    pub fn apply(&self, quadrant: Quadrant, setting: u8) -> u8 {
        match self.nearest(quadrant, setting) {
            Some((nearest, correction)) => {
                let corrected = (i64::from(setting) - i64::from(correction))
                    .rem_euclid(i64::from(PHASE_CONTROL_RANGE)) as u8;
                trace!("{quadrant}: setting {setting} -> {corrected} (nearest entry {nearest}, correction {correction})");
                corrected
            }
            None => {
                debug!("No calibration for quadrant {quadrant}; leaving setting {setting} alone");
                setting
            }
        }
    }
}

/// Something that can provide a [`CalibrationTable`]. Not being able to
/// provide one is not an error; phase settings are then left uncorrected.
pub trait CalibrationSource {
    fn load(&self, identifier: &str) -> Option<CalibrationTable>;
}

/// Calibration tables come from yaml files; the identifier is a path.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalibrationFile;

impl CalibrationSource for CalibrationFile {
    fn load(&self, identifier: &str) -> Option<CalibrationTable> {
        match CalibrationTable::read_yaml(identifier) {
            Ok(table) => {
                debug!("Read phase calibration from {identifier}");
                Some(table)
            }
            Err(e) => {
                warn!("Couldn't read phase calibration from {identifier}; settings won't be calibrated ({e})");
                None
            }
        }
    }
}

/// Never provides a table.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCalibration;

impl CalibrationSource for NoCalibration {
    fn load(&self, _identifier: &str) -> Option<CalibrationTable> {
        None
    }
}
