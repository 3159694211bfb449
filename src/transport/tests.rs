// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use tempfile::tempdir;

use super::*;

#[test]
fn modes_have_short_names() {
    assert_eq!(BeamMode::Tx.to_string(), "TX");
    assert_eq!(BeamMode::Rx.to_string(), "RX");
    assert_eq!(BeamMode::from_str("SB").unwrap(), BeamMode::Standby);
}

#[test]
fn dry_run_keeps_writes() {
    let mut t = DryRunTransport::new();
    t.set_beam(BeamMode::Tx, [16, 16, 0, 0], [30; 4]).unwrap();
    t.set_beam(BeamMode::Rx, [1, 2, 3, 4], [0; 4]).unwrap();
    assert_eq!(t.writes().len(), 2);
    assert_eq!(
        t.writes()[0],
        BeamWrite {
            mode: BeamMode::Tx,
            phases: [16, 16, 0, 0],
            attenuations: [30; 4]
        }
    );
}

#[test]
fn file_transport_appends_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("beam.tsv");
    let mut t = FileTransport::new(&path);
    t.set_beam(BeamMode::Tx, [16, 16, 0, 0], [30; 4]).unwrap();
    t.set_beam(BeamMode::Rx, [1, 2, 3, 4], [0, 0, 0, 0]).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "TX\t16\t16\t0\t0\t30\t30\t30\t30\nRX\t1\t2\t3\t4\t0\t0\t0\t0\n"
    );
}

#[test]
fn file_transport_reports_io_errors() {
    let dir = tempdir().unwrap();
    let mut t = FileTransport::new(dir.path().join("missing").join("beam.tsv"));
    assert!(matches!(
        t.set_beam(BeamMode::Tx, [0; 4], [0; 4]),
        Err(TransportError::IO(_))
    ));
}
