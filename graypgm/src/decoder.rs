use std::fmt::{Debug, Formatter};
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::Path;

use graypgm_core::bytestream::{ByteIoError, ByteReaderTrait};
use graypgm_core::options::DecoderOptions;
use log::info;

/// Longest header token the decoder accepts, in bytes.
///
/// No valid header field needs anything near this, so a longer token is
/// treated as a malformed header rather than grown into.
pub const MAX_TOKEN_LENGTH: usize = 49;

/// Image information decoded from a PGM header
///
/// `data_size` is always `width * height`, one byte per pixel. It is
/// computed, never read from the file, so it can be trusted to size a
/// buffer for [`PgmDecoder::decode_into`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    /// Image width in pixels, at least 1
    pub width:     usize,
    /// Image height in pixels, at least 1
    pub height:    usize,
    /// Declared maximum sample value, in `1..=255`.
    ///
    /// The declaration is not enforced against the actual pixel bytes
    pub max_value: u8,
    /// Size of the pixel payload in bytes
    pub data_size: usize
}

/// Errors occurring during decoding
pub enum PgmDecodeErrors {
    /// An I/O error from the file or underlying stream
    IoErrors(io::Error),
    /// The header is malformed, wrong magic, non numeric field or a
    /// field out of bounds
    InvalidHeader(String),
    /// A header token exceeded [`MAX_TOKEN_LENGTH`]
    TokenTooLong(usize),
    // limit, found
    LargeDimensions(usize, usize),
    // needed, capacity
    CapacityExceeded(usize, usize),
    // expected, read
    TruncatedData(usize, usize)
}

impl Debug for PgmDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoErrors(err) => {
                writeln!(f, "{err}")
            }
            Self::InvalidHeader(val) => {
                writeln!(f, "Invalid header, reason: {val}")
            }
            Self::TokenTooLong(limit) => {
                writeln!(f, "Header token longer than the maximum of {limit} bytes")
            }
            Self::LargeDimensions(limit, found) => {
                writeln!(
                    f,
                    "Too large dimensions, expected a value less than {limit} but found {found}"
                )
            }
            Self::CapacityExceeded(needed, capacity) => {
                writeln!(
                    f,
                    "Pixel data needs {needed} bytes but the buffer holds {capacity}"
                )
            }
            Self::TruncatedData(expected, read) => {
                writeln!(
                    f,
                    "Pixel data truncated, expected {expected} bytes but the file had {read}"
                )
            }
        }
    }
}

impl From<io::Error> for PgmDecodeErrors {
    fn from(err: io::Error) -> Self {
        PgmDecodeErrors::IoErrors(err)
    }
}

impl From<ByteIoError> for PgmDecodeErrors {
    fn from(err: ByteIoError) -> Self {
        match err {
            ByteIoError::StdIoError(err) => PgmDecodeErrors::IoErrors(err),
            ByteIoError::NotEnoughBytes(expected, read) => {
                PgmDecodeErrors::TruncatedData(expected, read)
            }
        }
    }
}

/// An instance of a PGM decoder
///
/// The decoder handles the binary grayscale (`P5`) format only
pub struct PgmDecoder<T: ByteReaderTrait> {
    stream:          T,
    width:           usize,
    height:          usize,
    max_value:       u8,
    decoded_headers: bool,
    options:         DecoderOptions
}

impl<T: ByteReaderTrait> PgmDecoder<T> {
    /// Create a new pgm decoder with default options
    ///
    /// # Arguments
    /// - source: PGM encoded bytes
    ///
    /// # Example
    /// ```
    /// use std::io::Cursor;
    /// use graypgm::PgmDecoder;
    /// let mut decoder = PgmDecoder::new(Cursor::new(b"NOT VALID PGM"));
    ///
    /// assert!(decoder.decode().is_err());
    /// ```
    pub fn new(source: T) -> PgmDecoder<T> {
        PgmDecoder::new_with_options(source, DecoderOptions::default())
    }

    /// Create a new PGM decoder with the specified options
    ///
    /// # Arguments
    /// - source: PGM encoded bytes
    /// - options: Modified options for the decoder
    pub fn new_with_options(source: T, options: DecoderOptions) -> PgmDecoder<T> {
        PgmDecoder {
            stream: source,
            width: 0,
            height: 0,
            max_value: 0,
            decoded_headers: false,
            options
        }
    }

    /// Read PGM headers and store them in internal state
    ///
    /// The stream is left at the first byte of the pixel payload, the
    /// single whitespace after the max value token is consumed as the
    /// token delimiter.
    ///
    /// Calling this multiple times is cheap, the headers are only ever
    /// decoded once
    pub fn decode_headers(&mut self) -> Result<(), PgmDecodeErrors> {
        if self.decoded_headers {
            return Ok(());
        }

        let magic = next_token(&mut self.stream)?;

        if magic.as_slice() != b"P5" {
            let msg = format!(
                "Expected P5 magic but found `{}`, only binary grayscale is supported",
                String::from_utf8_lossy(&magic)
            );
            return Err(PgmDecodeErrors::InvalidHeader(msg));
        }

        let width = parse_integer(&next_token(&mut self.stream)?, "width")?;

        if width < 1 {
            return Err(PgmDecodeErrors::InvalidHeader(
                "Width cannot be zero".to_string()
            ));
        }
        if width > self.options.get_max_width() {
            return Err(PgmDecodeErrors::LargeDimensions(
                self.options.get_max_width(),
                width
            ));
        }

        let height = parse_integer(&next_token(&mut self.stream)?, "height")?;

        if height < 1 {
            return Err(PgmDecodeErrors::InvalidHeader(
                "Height cannot be zero".to_string()
            ));
        }
        if height > self.options.get_max_height() {
            return Err(PgmDecodeErrors::LargeDimensions(
                self.options.get_max_height(),
                height
            ));
        }

        // ensure width * height cannot overflow before anyone computes a
        // payload size from these fields
        if width.checked_mul(height).is_none() {
            return Err(PgmDecodeErrors::InvalidHeader(
                "Image dimensions overflow usize".to_string()
            ));
        }

        let max_value = parse_integer(&next_token(&mut self.stream)?, "max value")?;

        if !(1..=255).contains(&max_value) {
            let msg = format!("Max value {max_value} out of range, expected 1..=255");
            return Err(PgmDecodeErrors::InvalidHeader(msg));
        }

        self.width = width;
        self.height = height;
        self.max_value = max_value as u8;

        info!("Width: {}, height: {}", self.width, self.height);
        info!("Max value: {}", self.max_value);

        self.decoded_headers = true;

        Ok(())
    }

    /// Return image dimensions or none if headers
    /// aren't decoded
    pub const fn get_dimensions(&self) -> Option<(usize, usize)> {
        if self.decoded_headers {
            Some((self.width, self.height))
        } else {
            None
        }
    }

    /// Return the declared maximum sample value or none if
    /// headers aren't decoded
    pub const fn get_max_value(&self) -> Option<u8> {
        if self.decoded_headers {
            Some(self.max_value)
        } else {
            None
        }
    }

    /// Return the decoded header information or none if headers
    /// aren't decoded
    pub const fn get_info(&self) -> Option<ImageInfo> {
        if self.decoded_headers {
            Some(self.header_info())
        } else {
            None
        }
    }

    // only meaningful once decoded_headers is set
    const fn header_info(&self) -> ImageInfo {
        ImageInfo {
            width:     self.width,
            height:    self.height,
            max_value: self.max_value,
            data_size: self.width * self.height
        }
    }

    /// Decode the pixel payload into a caller provided buffer
    ///
    /// Headers are decoded first in case that hasn't happened yet. The
    /// buffer capacity is checked against the payload size before a
    /// single payload byte is read, and the decoder never writes past
    /// `sink.len()`. Bytes after `data_size` in `sink` are left as they
    /// were, and on error the buffer contents are unspecified.
    ///
    /// # Returns
    /// The decoded header information, the caller is free to ignore it
    pub fn decode_into(&mut self, sink: &mut [u8]) -> Result<ImageInfo, PgmDecodeErrors> {
        self.decode_headers()?;

        let info = self.header_info();

        if info.data_size > sink.len() {
            return Err(PgmDecodeErrors::CapacityExceeded(
                info.data_size,
                sink.len()
            ));
        }
        // trailing bytes past the payload are ignored, matching what the
        // format allows a writer to append
        self.stream.read_exact_bytes(&mut sink[..info.data_size])?;

        Ok(info)
    }

    /// Decode a pgm encoded file and return the pixel bytes from it
    ///
    /// This allocates the exact payload size. Callers that size their
    /// own buffer from [`load_info`] should prefer
    /// [`decode_into`](Self::decode_into)
    pub fn decode(&mut self) -> Result<Vec<u8>, PgmDecodeErrors> {
        self.decode_headers()?;

        let mut data = vec![0; self.width * self.height];
        self.decode_into(&mut data)?;

        Ok(data)
    }
}

/// Load image information from a PGM file without reading pixel data
///
/// Only the header region of the file is read, the handle is closed
/// before returning on every path.
///
/// # Arguments
/// - path: File to read
///
/// # Returns
/// The decoded header information, or the failure that stopped the parse
pub fn load_info<P: AsRef<Path>>(path: P) -> Result<ImageInfo, PgmDecodeErrors> {
    let file = File::open(path)?;
    let mut decoder = PgmDecoder::new(BufReader::new(file));

    decoder.decode_headers()?;

    Ok(decoder.header_info())
}

/// Load the header and the full pixel payload of a PGM file into a
/// caller provided buffer
///
/// The buffer must hold at least `width * height` bytes as declared by
/// the file's header, checked before any pixel byte is read. On failure
/// the buffer contents are unspecified and the returned information must
/// not be trusted. The file handle is closed before returning on every
/// path.
///
/// # Arguments
/// - path: File to read
/// - sink: Destination buffer for the pixel payload
///
/// # Returns
/// The decoded header information, the caller is free to ignore it
pub fn load_data<P: AsRef<Path>>(path: P, sink: &mut [u8]) -> Result<ImageInfo, PgmDecodeErrors> {
    let file = File::open(path)?;
    let mut decoder = PgmDecoder::new(BufReader::new(file));

    decoder.decode_into(sink)
}

/// Read the next whitespace delimited token from the stream.
///
/// Leading whitespace is skipped. A `#` starts a comment running up to
/// and including the next newline, discarded wherever it appears, even
/// in the middle of a token, in which case the partial token is
/// discarded with it. The whitespace byte terminating a token is
/// consumed, so after the last header token the stream sits on the
/// first payload byte.
///
/// End of stream before a token is terminated is a header error, a
/// binary PGM header can never validly end the file.
fn next_token<T: ByteReaderTrait>(stream: &mut T) -> Result<Vec<u8>, PgmDecodeErrors> {
    let mut token = Vec::new();

    'token: loop {
        token.clear();

        loop {
            let byte = match stream.read_byte()? {
                Some(b) => b,
                None => {
                    return Err(PgmDecodeErrors::InvalidHeader(
                        "Unexpected end of file inside header".to_string()
                    ))
                }
            };

            if byte == b'#' {
                // comment, discard everything up to and including the
                // newline, then restart token collection
                loop {
                    match stream.read_byte()? {
                        Some(b'\n') => break,
                        Some(_) => {}
                        None => {
                            return Err(PgmDecodeErrors::InvalidHeader(
                                "Unexpected end of file inside header".to_string()
                            ))
                        }
                    }
                }
                continue 'token;
            }

            if byte.is_ascii_whitespace() {
                if token.is_empty() {
                    continue;
                }
                return Ok(token);
            }

            token.push(byte);

            if token.len() > MAX_TOKEN_LENGTH {
                return Err(PgmDecodeErrors::TokenTooLong(MAX_TOKEN_LENGTH));
            }
        }
    }
}

/// Parse a header token as a base 10 integer
fn parse_integer(token: &[u8], field: &'static str) -> Result<usize, PgmDecodeErrors> {
    let mut value = 0_usize;

    for byte in token {
        if !byte.is_ascii_digit() {
            let msg = format!(
                "Non numeric byte `{}` in {field} field",
                char::from(*byte)
            );
            return Err(PgmDecodeErrors::InvalidHeader(msg));
        }
        // saturate instead of wrapping, the bounds checks on the caller
        // side then reject the field
        value = value
            .saturating_mul(10)
            .saturating_add(usize::from(byte - b'0'));
    }
    Ok(value)
}
