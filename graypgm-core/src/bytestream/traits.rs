/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Traits for reading bytes in graypgm
//!
//! This exposes the trait the decoder is generic over together
//! with the guarantees implementations must uphold.

use crate::bytestream::reader::ByteIoError;

/// The input trait implemented for readers.
///
/// The decoder only ever walks a stream forward, so this is a lot
/// smaller than a general I/O trait, a single byte read used by the
/// header scanner and an exact fill used by the payload loader.
///
/// We implement this trait for two types, [`BufReader`](std::io::BufReader)
/// over anything that implements [`Read`](std::io::Read), which is what the
/// file loading entry points use, and [`Cursor`](std::io::Cursor) for
/// in memory buffers.
pub trait ByteReaderTrait {
    /// Read a single byte from the stream.
    ///
    /// Returns `Ok(None)` at the end of the stream, the caller decides
    /// whether that is an error.
    ///
    /// This is called from the header scanner's hot loop so the
    /// implementation should try to be as fast as possible
    fn read_byte(&mut self) -> Result<Option<u8>, ByteIoError>;

    /// Read exact bytes required to fill `buf` or return an error if that
    /// isn't possible
    ///
    /// ## Arguments
    ///  - `buf`: Buffer to fill with bytes from the underlying reader
    /// ## Errors
    /// When the stream ends before `buf` is full, the implementation must
    /// report how many bytes it actually read via
    /// [`ByteIoError::NotEnoughBytes`]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError>;
}
