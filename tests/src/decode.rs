use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use graypgm::{load_data, load_info, ImageInfo, PgmDecodeErrors, PgmDecoder};
use graypgm_core::options::DecoderOptions;

use crate::scratch_path;

const SAMPLE_HEADER: &[u8] = b"P5\n# comment\n3 2\n255\n";
const SAMPLE_PIXELS: [u8; 6] = [10, 20, 30, 40, 50, 60];

const SAMPLE_INFO: ImageInfo = ImageInfo {
    width:     3,
    height:    2,
    max_value: 255,
    data_size: 6
};

fn write_sample(name: &str) -> PathBuf {
    let path = scratch_path(name);

    fs::write(&path, [SAMPLE_HEADER, &SAMPLE_PIXELS].concat()).unwrap();

    path
}

#[test]
fn load_info_reads_the_header() {
    let path = write_sample("info.pgm");

    let info = load_info(&path).unwrap();

    assert_eq!(info, SAMPLE_INFO);

    fs::remove_file(path).unwrap();
}

#[test]
fn load_info_ignores_pixel_data() {
    // a file holding only the header parses fine, the payload is never
    // touched by the info loader
    let path = scratch_path("headeronly.pgm");
    fs::write(&path, SAMPLE_HEADER).unwrap();

    let info = load_info(&path).unwrap();

    assert_eq!(info, SAMPLE_INFO);

    fs::remove_file(path).unwrap();
}

#[test]
fn load_data_fills_the_buffer() {
    let path = write_sample("data.pgm");
    let mut pixels = [0_u8; 6];

    let info = load_data(&path, &mut pixels).unwrap();

    assert_eq!(info, SAMPLE_INFO);
    assert_eq!(pixels, SAMPLE_PIXELS);

    fs::remove_file(path).unwrap();
}

#[test]
fn load_data_rejects_a_small_buffer() {
    let path = write_sample("capacity.pgm");
    let mut pixels = [0_u8; 5];

    let err = load_data(&path, &mut pixels).unwrap_err();

    assert!(matches!(err, PgmDecodeErrors::CapacityExceeded(6, 5)));
    // the buffer must not be written before the capacity check passes
    assert_eq!(pixels, [0; 5]);

    fs::remove_file(path).unwrap();
}

#[test]
fn load_data_reports_truncation() {
    let path = scratch_path("truncated.pgm");
    fs::write(&path, [SAMPLE_HEADER, &SAMPLE_PIXELS[..4]].concat()).unwrap();

    let mut pixels = [0_u8; 6];
    let err = load_data(&path, &mut pixels).unwrap_err();

    assert!(matches!(err, PgmDecodeErrors::TruncatedData(6, 4)));

    fs::remove_file(path).unwrap();
}

#[test]
fn missing_file_is_an_io_error() {
    let path = scratch_path("doesnotexist.pgm");

    let err = load_info(&path).unwrap_err();

    assert!(matches!(err, PgmDecodeErrors::IoErrors(_)));
}

#[test]
fn comments_between_tokens_change_nothing() {
    let plain = scratch_path("plain.pgm");
    let commented = scratch_path("commented.pgm");

    fs::write(&plain, [&b"P5\n3 2\n255\n"[..], &SAMPLE_PIXELS].concat()).unwrap();
    fs::write(
        &commented,
        [
            &b"P5\n# a\n3\n# b\n# c\n2\n# d\n255\n"[..],
            &SAMPLE_PIXELS
        ]
        .concat()
    )
    .unwrap();

    let mut from_plain = [0_u8; 6];
    let mut from_commented = [0_u8; 6];

    let plain_info = load_data(&plain, &mut from_plain).unwrap();
    let commented_info = load_data(&commented, &mut from_commented).unwrap();

    assert_eq!(plain_info, commented_info);
    assert_eq!(from_plain, from_commented);

    fs::remove_file(plain).unwrap();
    fs::remove_file(commented).unwrap();
}

#[test]
fn malformed_headers_are_rejected() {
    // ascii magic, zero width, max value out of range
    for (name, header) in [
        ("p2.pgm", &b"P2\n3 2\n255\n"[..]),
        ("zerow.pgm", &b"P5\n0 2\n255\n"[..]),
        ("bigmax.pgm", &b"P5\n3 2\n256\n"[..])
    ] {
        let path = scratch_path(name);
        fs::write(&path, [header, &SAMPLE_PIXELS].concat()).unwrap();

        let err = load_info(&path).unwrap_err();

        assert!(matches!(err, PgmDecodeErrors::InvalidHeader(_)));

        fs::remove_file(path).unwrap();
    }
}

#[test]
fn decoder_options_apply_to_file_streams() {
    let path = write_sample("limits.pgm");

    let options = DecoderOptions::default().set_max_width(2);
    let file = File::open(&path).unwrap();
    let mut decoder = PgmDecoder::new_with_options(BufReader::new(file), options);

    let err = decoder.decode().unwrap_err();

    assert!(matches!(err, PgmDecodeErrors::LargeDimensions(2, 3)));

    fs::remove_file(path).unwrap();
}
