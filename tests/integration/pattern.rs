// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use crate::{beamsteer, get_cmd_output};

fn parse_tsv(contents: &str) -> Vec<Vec<f64>> {
    contents
        .lines()
        .map(|l| l.split('\t').map(|v| v.parse().unwrap()).collect())
        .collect()
}

#[test]
fn test_pattern_broadside() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("af.tsv");
    let cmd = beamsteer()
        .args([
            "pattern",
            "--n-theta",
            "9",
            "--n-phi",
            "12",
            "--output",
            &output.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "pattern failed on simple test data: {:?}", cmd.err());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Wrote 108 array factor values"), "{stdout}");

    let rows = parse_tsv(&std::fs::read_to_string(&output).unwrap());
    assert_eq!(rows.len(), 9 * 12);
    assert!(rows.iter().all(|r| r.len() == 3));
    // Broadside is the peak of an unsteered array.
    assert_abs_diff_eq!(rows[0][0], 0.0);
    assert_abs_diff_eq!(rows[0][1], 0.0);
    assert_abs_diff_eq!(rows[0][2], 1.0, epsilon = 1e-12);
    assert!(rows.iter().all(|r| r[2] <= 1.0 + 1e-12));
    // Azimuth varies fastest.
    assert_abs_diff_eq!(rows[1][0], 0.0);
    assert_abs_diff_eq!(rows[1][1], 30.0);
    assert_abs_diff_eq!(rows[12][0], 10.0);
}

#[test]
fn test_pattern_complex_unnormalised() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("af.tsv");
    let cmd = beamsteer()
        .args([
            "pattern",
            "--n-theta",
            "4",
            "--n-phi",
            "4",
            "--back-lobes",
            "--no-normalise",
            "--complex",
            "-o",
            &output.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", cmd.err());

    let rows = parse_tsv(&std::fs::read_to_string(&output).unwrap());
    assert_eq!(rows.len(), 16);
    assert!(rows.iter().all(|r| r.len() == 4));
    // All four elements add up coherently at broadside.
    assert_abs_diff_eq!(rows[0][2], 4.0, epsilon = 1e-12);
    assert_abs_diff_eq!(rows[0][3], 0.0, epsilon = 1e-12);
    // With back lobes, zenith angles go up to 180°.
    assert_abs_diff_eq!(rows[15][0], 135.0);
}

#[test]
fn test_pattern_bad_args() {
    let cmd = beamsteer().args(["pattern", "--wavelength-m", "0"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Wavelength must be a positive"), "{stderr}");
}

#[test]
fn test_pattern_too_many_samples() {
    let tmp_dir = TempDir::new().unwrap();
    let output = tmp_dir.path().join("af.tsv");
    let cmd = beamsteer()
        .args([
            "pattern",
            "--n-theta",
            &usize::MAX.to_string(),
            "--n-phi",
            "2",
            "-o",
            &output.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("gives too many samples"), "{stderr}");
    assert!(stderr.contains("--n-theta"), "{stderr}");
    assert!(!output.exists());
}
