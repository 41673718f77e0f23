use std::fmt::{Debug, Formatter};
use std::fs::File;
use std::io;
use std::io::{BufWriter, Error, Write};
use std::path::Path;

/// Errors occurring during encoding
pub enum PgmEncodeErrors {
    Static(&'static str),
    IoErrors(io::Error)
}

impl From<io::Error> for PgmEncodeErrors {
    fn from(err: Error) -> Self {
        PgmEncodeErrors::IoErrors(err)
    }
}

impl Debug for PgmEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PgmEncodeErrors::Static(ref errors) => {
                writeln!(f, "{errors}")
            }
            PgmEncodeErrors::IoErrors(ref err) => {
                writeln!(f, "{err}")
            }
        }
    }
}

/// A binary PGM encoder
///
/// Writes 8 bit grayscale pixels as a `P5` file through any
/// [`Write`] sink. The max value field is always written as 255, the
/// encoder does not scan the pixels for a tighter bound
pub struct PgmEncoder<'a, W: Write> {
    writer: &'a mut W
}

impl<'a, W: Write> PgmEncoder<'a, W> {
    /// Create a new PGM encoder that writes to `writer`
    pub fn new(writer: &'a mut W) -> PgmEncoder<'a, W> {
        Self { writer }
    }

    fn write_headers(&mut self, width: usize, height: usize) -> Result<(), PgmEncodeErrors> {
        let header = format!("P5\n# Created by graypgm\n{width} {height}\n255\n");

        self.writer.write_all(header.as_bytes())?;

        Ok(())
    }

    /// Encode `data` as an 8 bit binary PGM image
    ///
    /// `stride` is the number of bytes between the starts of consecutive
    /// rows in `data`, zero means rows are tightly packed. Each row
    /// emits exactly `width` bytes, padding bytes past `width` within a
    /// stride never reach the output, so the written file is tightly
    /// packed regardless of the input layout.
    ///
    /// # Example
    /// ```
    /// use graypgm::PgmEncoder;
    /// let mut sink = Vec::new();
    ///
    /// // two rows of two pixels, rows padded to four bytes
    /// PgmEncoder::new(&mut sink)
    ///     .encode(2, 2, 4, &[1, 2, 9, 9, 3, 4, 9, 9])
    ///     .unwrap();
    ///
    /// assert!(sink.ends_with(&[1, 2, 3, 4]));
    /// ```
    pub fn encode(
        &mut self, width: usize, height: usize, stride: usize, data: &[u8]
    ) -> Result<(), PgmEncodeErrors> {
        let stride = sanitize_dimensions(width, height, stride, data.len())?;

        self.write_headers(width, height)?;

        for row in data.chunks(stride).take(height) {
            self.writer.write_all(&row[..width])?;
        }

        Ok(())
    }
}

/// Save 8 bit grayscale pixels to `path` as a binary PGM file
///
/// `stride` is the number of bytes between the starts of consecutive
/// rows in `data`, zero means rows are tightly packed. Geometry is
/// validated before the file is created, so a call with bad arguments
/// leaves no file behind. The handle is flushed and closed before
/// returning on every path.
///
/// # Arguments
/// - path: File to write, truncated if it exists
/// - data: Pixel bytes, at least `stride * (height - 1) + width` of them
/// - width: Image width in pixels, at least 1
/// - height: Image height in pixels, at least 1
/// - stride: Bytes per source row, zero for tightly packed rows
pub fn save<P: AsRef<Path>>(
    path: P, data: &[u8], width: usize, height: usize, stride: usize
) -> Result<(), PgmEncodeErrors> {
    sanitize_dimensions(width, height, stride, data.len())?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    PgmEncoder::new(&mut writer).encode(width, height, stride, data)?;

    // errors still sitting in the buffer must surface here, a plain drop
    // would swallow them
    writer.flush()?;

    Ok(())
}

/// Check encode geometry, returning the effective stride
fn sanitize_dimensions(
    width: usize, height: usize, stride: usize, data_len: usize
) -> Result<usize, PgmEncodeErrors> {
    // stride of zero means rows are tightly packed
    let stride = if stride == 0 { width } else { stride };

    if width < 1 || height < 1 {
        return Err(PgmEncodeErrors::Static("Image dimensions cannot be zero"));
    }
    if stride < width {
        return Err(PgmEncodeErrors::Static("Stride cannot be smaller than width"));
    }

    // the last row only needs width bytes, not a whole stride
    let needed = stride
        .checked_mul(height - 1)
        .and_then(|n| n.checked_add(width))
        .ok_or(PgmEncodeErrors::Static("Image dimensions overflow usize"))?;

    if needed > data_len {
        return Err(PgmEncodeErrors::Static(
            "Data length does not match image dimensions"
        ));
    }

    Ok(stride)
}
