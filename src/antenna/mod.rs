// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Antenna geometry.
//!
//! An [`AntennaGeometry`] says where each radiating element sits, which
//! AWMF-0108 channel ([`Quadrant`]) drives it, whether its feed line is wired
//! with a 180° flip, and how far apart the elements are. For example, the
//! reference 2x2 board is
//!
//! ```text
//! [ [NW, NE],
//!   [SW, SE] ]
//! ```
//!
//! Rows run north-south and columns run east-west.

mod error;

pub use error::AntennaError;

use std::{fs::File, io::Read, path::Path, str::FromStr};

use itertools::Itertools;
use log::debug;
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::constants::DEFAULT_SPACING_M;

/// The four channels of an AWMF-0108. Each radiating element is driven by
/// exactly one of these.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[allow(clippy::upper_case_acronyms)]
#[strum(ascii_case_insensitive)]
pub enum Quadrant {
    NE,
    NW,
    SE,
    SW,
}

/// The order that per-channel values are reported and written to hardware,
/// regardless of the antenna layout.
pub const CHANNEL_ORDER: [Quadrant; 4] = [Quadrant::NE, Quadrant::SE, Quadrant::SW, Quadrant::NW];

/// The reference boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum AntennaLayout {
    #[strum(serialize = "2x2")]
    TwoByTwo,

    #[strum(serialize = "1x4")]
    OneByFour,
}

impl AntennaLayout {
    /// Get the geometry of this board with the given element spacing
    /// [metres].
    pub fn geometry(self, spacing_m: f64) -> Result<AntennaGeometry, AntennaError> {
        use Quadrant::*;

        let (grid, invert) = match self {
            AntennaLayout::TwoByTwo => (
                array![[NW, NE], [SW, SE]],
                array![[true, false], [true, false]],
            ),
            AntennaLayout::OneByFour => (
                array![[NE, NW, SE, SW]],
                array![[true, false, true, false]],
            ),
        };
        AntennaGeometry::new(grid, invert, spacing_m)
    }
}

/// Where the elements of an array sit and how they're wired. The grid and
/// inversion mask always have the same dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct AntennaGeometry {
    grid: Array2<Quadrant>,
    invert: Array2<bool>,
    spacing_m: f64,
}

impl AntennaGeometry {
    /// Validate and create a new geometry. `invert[[i, j]]` is true if the
    /// element at `grid[[i, j]]` has its feed wired with a 180° phase flip.
    pub fn new(
        grid: Array2<Quadrant>,
        invert: Array2<bool>,
        spacing_m: f64,
    ) -> Result<AntennaGeometry, AntennaError> {
        if grid.is_empty() {
            return Err(AntennaError::Empty("grid"));
        }
        if grid.dim() != invert.dim() {
            let (grid_rows, grid_cols) = grid.dim();
            let (mask_rows, mask_cols) = invert.dim();
            return Err(AntennaError::DimensionMismatch {
                grid_rows,
                grid_cols,
                mask_rows,
                mask_cols,
            });
        }
        if !(spacing_m.is_finite() && spacing_m > 0.0) {
            return Err(AntennaError::BadSpacing(spacing_m));
        }
        if let Some(q) = Quadrant::iter().find(|q| !grid.iter().any(|g| g == q)) {
            return Err(AntennaError::MissingQuadrant(q));
        }

        Ok(AntennaGeometry {
            grid,
            invert,
            spacing_m,
        })
    }

    /// Create a new geometry from nested rows, as they would appear in a
    /// geometry file.
    pub fn from_rows(
        grid: &[Vec<Quadrant>],
        invert: &[Vec<bool>],
        spacing_m: f64,
    ) -> Result<AntennaGeometry, AntennaError> {
        let grid = rows_to_array(grid, "grid")?;
        let invert = rows_to_array(invert, "inversion mask")?;
        AntennaGeometry::new(grid, invert, spacing_m)
    }

    /// Read a geometry from a toml or json file. The file must have the keys
    /// `spacing_m`, `grid` and `invert`, e.g.
    ///
    /// ```toml
    /// spacing_m = 0.0054
    /// grid = [["NW", "NE"], ["SW", "SE"]]
    /// invert = [[true, false], [true, false]]
    /// ```
    pub fn read_file<P: AsRef<Path>>(file: P) -> Result<AntennaGeometry, AntennaError> {
        let file = file.as_ref();
        debug!("Attempting to read antenna geometry file {}", file.display());

        let file_type = file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| GeometryFileType::from_str(&e).ok());
        let mut contents = String::new();
        let geometry_file: GeometryFile = match file_type {
            Some(GeometryFileType::Toml) => {
                File::open(file)?.read_to_string(&mut contents)?;
                toml::from_str(&contents).map_err(|err| AntennaError::Toml {
                    file: file.display().to_string(),
                    err,
                })?
            }
            Some(GeometryFileType::Json) => {
                File::open(file)?.read_to_string(&mut contents)?;
                serde_json::from_str(&contents).map_err(|err| AntennaError::Json {
                    file: file.display().to_string(),
                    err,
                })?
            }
            None => {
                return Err(AntennaError::UnrecognisedFileType {
                    file: file.display().to_string(),
                    valid: GEOMETRY_FILE_TYPES_COMMA_SEPARATED.clone(),
                })
            }
        };

        AntennaGeometry::from_rows(
            &geometry_file.grid,
            &geometry_file.invert,
            geometry_file.spacing_m,
        )
    }

    pub fn grid(&self) -> ArrayView2<Quadrant> {
        self.grid.view()
    }

    pub fn invert(&self) -> ArrayView2<bool> {
        self.invert.view()
    }

    /// The centre-to-centre distance between adjacent elements [metres].
    pub fn spacing_m(&self) -> f64 {
        self.spacing_m
    }

    /// (rows, columns)
    pub fn dim(&self) -> (usize, usize) {
        self.grid.dim()
    }

    /// Find the element driven by `quadrant`. If a quadrant drives multiple
    /// elements, the last one in row-major order is returned.
    pub fn element_of(&self, quadrant: Quadrant) -> Option<(usize, usize)> {
        self.grid
            .indexed_iter()
            .filter(|(_, q)| **q == quadrant)
            .map(|(ij, _)| ij)
            .last()
    }
}

impl Default for AntennaGeometry {
    /// The reference 1x4 board.
    fn default() -> Self {
        use Quadrant::*;

        AntennaGeometry {
            grid: array![[NE, NW, SE, SW]],
            invert: array![[true, false, true, false]],
            spacing_m: DEFAULT_SPACING_M,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GeometryFile {
    spacing_m: f64,
    grid: Vec<Vec<Quadrant>>,
    invert: Vec<Vec<bool>>,
}

#[derive(Debug, Display, EnumIter, EnumString)]
enum GeometryFileType {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

lazy_static::lazy_static! {
    pub(crate) static ref GEOMETRY_FILE_TYPES_COMMA_SEPARATED: String = GeometryFileType::iter().join(", ");

    pub(crate) static ref LAYOUTS_COMMA_SEPARATED: String = AntennaLayout::iter().join(", ");
}

fn rows_to_array<T: Copy>(rows: &[Vec<T>], what: &'static str) -> Result<Array2<T>, AntennaError> {
    let expected = rows.first().map(|r| r.len()).unwrap_or(0);
    if expected == 0 {
        return Err(AntennaError::Empty(what));
    }
    if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
        return Err(AntennaError::RaggedRows {
            what,
            row,
            got: r.len(),
            expected,
        });
    }

    Ok(Array2::from_shape_fn((rows.len(), expected), |(i, j)| {
        rows[i][j]
    }))
}
