//! # I/O Module
//!
//! Output boundary: plain text tables on stdout and JSON dumps on disk.

pub mod report;
