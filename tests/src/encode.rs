use std::fs;

use graypgm::{load_data, load_info, save, PgmEncodeErrors};

use crate::scratch_path;

#[test]
fn saved_files_carry_the_fixed_header() {
    let path = scratch_path("header.pgm");
    let pixels = [10, 20, 30, 40, 50, 60];

    save(&path, &pixels, 3, 2, 0).unwrap();

    let expected: Vec<u8> = [&b"P5\n# Created by graypgm\n3 2\n255\n"[..], &pixels].concat();

    assert_eq!(fs::read(&path).unwrap(), expected);

    fs::remove_file(path).unwrap();
}

#[test]
fn save_then_load_round_trips() {
    let path = scratch_path("roundtrip.pgm");
    let pixels: Vec<u8> = (0..=255).collect();

    save(&path, &pixels, 16, 16, 0).unwrap();

    let info = load_info(&path).unwrap();

    assert_eq!((info.width, info.height), (16, 16));
    // the saver always writes 255, whatever the data held
    assert_eq!(info.max_value, 255);

    let mut decoded = vec![0; info.data_size];
    load_data(&path, &mut decoded).unwrap();

    assert_eq!(decoded, pixels);

    fs::remove_file(path).unwrap();
}

#[test]
fn padded_and_packed_sources_write_identical_files() {
    let padded_path = scratch_path("padded.pgm");
    let packed_path = scratch_path("packed.pgm");

    // 9s are row padding, they must never reach the file
    let padded = [1, 2, 9, 9, 3, 4, 9, 9];
    let packed = [1, 2, 3, 4];

    save(&padded_path, &padded, 2, 2, 4).unwrap();
    save(&packed_path, &packed, 2, 2, 0).unwrap();

    assert_eq!(
        fs::read(&padded_path).unwrap(),
        fs::read(&packed_path).unwrap()
    );

    let mut pixels = [0_u8; 4];
    load_data(&padded_path, &mut pixels).unwrap();

    assert_eq!(pixels, packed);

    fs::remove_file(padded_path).unwrap();
    fs::remove_file(packed_path).unwrap();
}

#[test]
fn invalid_geometry_leaves_no_file_behind() {
    let path = scratch_path("invalid.pgm");

    for (width, height, stride) in [(0, 2, 0), (2, 0, 0), (4, 1, 2)] {
        let err = save(&path, &[0_u8; 8], width, height, stride).unwrap_err();

        assert!(matches!(err, PgmEncodeErrors::Static(_)));
    }

    // geometry is checked before the file is created
    assert!(!path.exists());
}

#[test]
fn short_source_buffers_are_rejected() {
    let path = scratch_path("short.pgm");

    let err = save(&path, &[0_u8; 5], 3, 2, 0).unwrap_err();

    assert!(matches!(err, PgmEncodeErrors::Static(_)));
    assert!(!path.exists());
}
