/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A binary PGM (P5) decoder and encoder
//!
//! PGM is the grayscale member of the Netpbm family, a short ASCII
//! header followed by raw pixel bytes. This crate handles the binary
//! `P5` flavor only, one byte per pixel, `#` comments allowed anywhere
//! in the header. The ASCII `P2` flavor, color formats and 16 bit
//! samples are out of scope.
//!
//! The quickest way in are the file entry points
//!
//! - [`load_info`]: read only the header of a file
//! - [`load_data`]: read the header and fill a caller provided buffer
//!   with the pixel payload
//! - [`save`]: write a pixel buffer out as a P5 file, with optional row
//!   padding in the source via a stride
//!
//! For other sources, [`PgmDecoder`] works over anything implementing
//! the reader trait from `graypgm-core` and [`PgmEncoder`] over anything
//! implementing [`Write`](std::io::Write)
//!
//! # Example
//! ```
//! use std::io::Cursor;
//! use graypgm::{PgmDecoder, PgmEncoder};
//!
//! // encode a 2x2 gradient into memory
//! let mut sink = Vec::new();
//! PgmEncoder::new(&mut sink)
//!     .encode(2, 2, 0, &[0, 85, 170, 255])
//!     .unwrap();
//!
//! // and read it back
//! let mut decoder = PgmDecoder::new(Cursor::new(sink));
//! let pixels = decoder.decode().unwrap();
//!
//! assert_eq!(decoder.get_dimensions(), Some((2, 2)));
//! assert_eq!(pixels, vec![0, 85, 170, 255]);
//! ```
pub use crate::decoder::*;
pub use crate::encoder::*;

mod decoder;
mod encoder;
