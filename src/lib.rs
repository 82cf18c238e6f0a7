//! Fluorescence toolkit for the DBST chemosensor.
//!
//! * [`spectrum`] simulates emission spectra of the probe with Pb2+ or H2PO4-.
//! * [`data`] and [`analysis`] turn a measured four-column table into λmax,
//!   enhancement/quenching ratios, digital bits and a molecular logic gate.
//! * [`lod`] computes the limit of detection.
//!
//! Everything here is pure and synchronous; the desktop front end lives in
//! the `dbst-lab` binary.

pub mod analysis;
pub mod data;
pub mod error;
pub mod lod;
pub mod settings;
pub mod spectrum;

pub use error::{LabError, Result};
