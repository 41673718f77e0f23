/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Core routines shared by the graypgm crates
//!
//! This crate provides the plumbing the codec crate is built on
//!
//! It currently contains
//!
//! - A bytestream reader abstraction over buffered files and in memory
//!   buffers
//! - Decoder options with sanity limits on image dimensions

pub mod bytestream;
pub mod options;
