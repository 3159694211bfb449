// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use indoc::indoc;
use tempfile::TempDir;

use crate::{beamsteer, get_cmd_output, make_file_in_dir};

#[test]
fn test_steer_broadside() {
    let cmd = beamsteer().args(["steer"]).ok();
    assert!(cmd.is_ok(), "steer failed on simple test data: {:?}", cmd.err());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    assert!(
        stdout.contains("NE = 16, SE = 16, SW = 0, NW = 0, TX mode | Amp: 1"),
        "{stdout}"
    );
}

#[test]
fn test_steer_off_broadside() {
    let cmd = beamsteer()
        .args([
            "steer",
            "--theta",
            "30",
            "--phi",
            "90",
            "--wavelength-m",
            "0.0107",
            "--mode",
            "rx",
            "--beam-strength",
            "7",
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", cmd.err());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(
        stdout.contains("NE = 16, SE = 0, SW = 8, NW = 24, RX mode | Amp: 7"),
        "{stdout}"
    );
}

#[test]
fn test_steer_2x2_with_calibration() {
    let tmp_dir = TempDir::new().unwrap();
    let cal = make_file_in_dir(
        "cal.yaml",
        tmp_dir.path(),
        indoc! {"
            NE:
              10: 2
            SE:
              0: 0
        "},
    );
    let cmd = beamsteer()
        .args([
            "steer",
            "-t",
            "20",
            "-p",
            "45",
            "--wavelength-m",
            "0.0107",
            "--layout",
            "2x2",
            "--calibration",
            &cal.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", cmd.err());
    let (stdout, _) = get_cmd_output(cmd);
    // NE quantises to 28; the nearest entry is 10, so it's corrected by 2.
    assert!(
        stdout.contains("NE = 26, SE = 24, SW = 12, NW = 16, TX mode"),
        "{stdout}"
    );
}

#[test]
fn test_steer_missing_calibration_is_not_fatal() {
    let cmd = beamsteer()
        .args(["steer", "--calibration", "/does/not/exist.yaml"])
        .ok();
    assert!(cmd.is_ok(), "{:?}", cmd.err());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("settings won't be calibrated"), "{stdout}");
    assert!(stdout.contains("NE = 16, SE = 16, SW = 0, NW = 0"), "{stdout}");
}

#[test]
fn test_steer_program_to_device() {
    let tmp_dir = TempDir::new().unwrap();
    let device = tmp_dir.path().join("awmf0108");
    let cmd = beamsteer()
        .args([
            "steer",
            "-t",
            "30",
            "-p",
            "90",
            "--wavelength-m",
            "0.0107",
            "--program",
            "--device",
            &device.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", cmd.err());

    let written = std::fs::read_to_string(&device).unwrap();
    assert_eq!(written, "TX\t16\t0\t8\t24\t30\t30\t30\t30\n");
}

#[test]
fn test_steer_dry_run_program() {
    let cmd = beamsteer()
        .args(["steer", "--program", "--mode", "SB", "-b", "0"])
        .ok();
    assert!(cmd.is_ok(), "{:?}", cmd.err());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Would write SB mode"), "{stdout}");
    assert!(stdout.contains("[31, 31, 31, 31]"), "{stdout}");
}

#[test]
fn test_steer_unwritable_device() {
    let cmd = beamsteer()
        .args(["steer", "--program", "--device", "/does/not/exist/awmf0108"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("the write can be tried again"), "{stderr}");
}

#[test]
fn test_steer_bad_beam_strength() {
    let cmd = beamsteer().args(["steer", "-b", "40"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Beam strength 40 is too big"), "{stderr}");
}

#[test]
fn test_steer_antenna_file() {
    let tmp_dir = TempDir::new().unwrap();
    let antenna = make_file_in_dir(
        "antenna.json",
        tmp_dir.path(),
        r#"{"spacing_m": 0.0054, "grid": [["NE", "NW", "SE", "SW"]], "invert": [[true, false, true, false]]}"#,
    );
    let cmd = beamsteer()
        .args(["steer", "--antenna-file", &antenna.display().to_string()])
        .ok();
    assert!(cmd.is_ok(), "{:?}", cmd.err());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("NE = 16, SE = 16, SW = 0, NW = 0"), "{stdout}");

    let bad = make_file_in_dir(
        "antenna.toml",
        tmp_dir.path(),
        indoc! {r#"
            spacing_m = 0.0054
            grid = [["NE", "NW", "SE"]]
            invert = [[true, false, true]]
        "#},
    );
    let cmd = beamsteer()
        .args(["steer", "--antenna-file", &bad.display().to_string()])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Quadrant SW does not appear"), "{stderr}");
}

#[test]
fn test_steer_rejects_overflowing_phases() {
    // Positive, but the wave number isn't finite.
    let cmd = beamsteer()
        .args(["steer", "-t", "0", "-p", "0", "--wavelength-m", "1e-320"])
        .ok();
    assert!(cmd.is_err());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(!stdout.contains("NaN"), "{stdout}");
    assert!(stderr.contains("Wavelength must be a positive"), "{stderr}");

    let cmd = beamsteer()
        .args(["steer", "-t", "30", "-p", "90", "--spacing-mm", "1e308"])
        .ok();
    assert!(cmd.is_err());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(!stdout.contains("NaN"), "{stdout}");
    assert!(stderr.contains("gives phases too big to represent"), "{stderr}");
}
