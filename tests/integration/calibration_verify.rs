// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use indoc::indoc;
use tempfile::TempDir;

use crate::{beamsteer, get_cmd_output, make_file_in_dir};

#[test]
fn test_calibration_verify() {
    let tmp_dir = TempDir::new().unwrap();
    let cal = make_file_in_dir(
        "cal.yaml",
        tmp_dir.path(),
        indoc! {"
            NW:
              0: 3
              1: -2
              2: 0
            NE:
              10: 2
        "},
    );
    let cmd = beamsteer()
        .args(["calibration-verify", &cal.display().to_string()])
        .ok();
    assert!(cmd.is_ok(), "calibration-verify failed: {:?}", cmd.err());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    assert!(
        stdout.contains("NE: 1 settings listed, 1 corrected, corrections from 2 to 2"),
        "{stdout}"
    );
    assert!(
        stdout.contains("NW: 3 settings listed, 2 corrected, corrections from -2 to 3"),
        "{stdout}"
    );
    assert!(
        stdout.contains("SE: no corrections; settings are used as is"),
        "{stdout}"
    );
}

#[test]
fn test_calibration_verify_bad_tables() {
    let tmp_dir = TempDir::new().unwrap();
    let good = make_file_in_dir("good.yaml", tmp_dir.path(), "SW:\n  31: 1\n");
    let out_of_range = make_file_in_dir("bad.yaml", tmp_dir.path(), "SW:\n  32: 1\n");
    let cmd = beamsteer()
        .args([
            "calibration-verify",
            &good.display().to_string(),
            &out_of_range.display().to_string(),
            "/does/not/exist.yaml",
        ])
        .ok();
    assert!(cmd.is_err());
    let (stdout, stderr) = get_cmd_output(cmd);
    // The good table is still summarised.
    assert!(stdout.contains("SW: 1 settings listed"), "{stdout}");
    assert!(
        stdout.contains("lists phase setting 32, but settings must be between 0 and 31"),
        "{stdout}"
    );
    assert!(stdout.contains("Couldn't read the file"), "{stdout}");
    assert!(
        stderr.contains("2 of 3 calibration tables couldn't be read"),
        "{stderr}"
    );
}
