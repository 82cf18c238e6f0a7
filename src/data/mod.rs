/// Data layer: the uploaded four-column table and its loaders.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → columns
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ RawDataset  │  wavelength + DBST / +H2PO4- / +Pb2+, validated
///   └────────────┘
///        │
///        ▼
///   analysis::peak
/// ```

pub mod loader;
pub mod model;

pub use model::{RawDataset, Series};
