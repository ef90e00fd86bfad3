//! # Chronospatial Exec
//!
//! Reads register/program listings and formats what the machine produces.

#![warn(missing_docs, missing_debug_implementations)]

pub mod listing;
