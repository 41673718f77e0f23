use core::fmt::Formatter;

pub(crate) mod std_readers;

/// Errors surfaced by the reader implementations
pub enum ByteIoError {
    /// An error from the underlying reader
    StdIoError(std::io::Error),
    // requested, read
    NotEnoughBytes(usize, usize),
}

impl core::fmt::Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {err}")
            }
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
        }
    }
}

impl From<std::io::Error> for ByteIoError {
    fn from(value: std::io::Error) -> Self {
        ByteIoError::StdIoError(value)
    }
}
