/// Spectrum simulator: wavelength grid → model → intensity curves.
///
/// ```text
///   (start, stop, count)
///         │
///         ▼
///   ┌──────────────┐
///   │ WavelengthGrid │  evenly spaced, shared by every curve
///   └──────────────┘
///         │   Ion + concentration(s) + SpectrumModelConfig
///         ▼
///   ┌──────────┐
///   │  model    │  Exponential | GaussianShift response
///   └──────────┘
///         │
///         ▼
///   IntensityCurve per concentration
/// ```

pub mod grid;
pub mod ion;
pub mod model;

pub use grid::{make_grid, GridSpec, WavelengthGrid};
pub use ion::Ion;
pub use model::{
    evaluate, simulate, IntensityCurve, ModelPreset, ResponseKind, ShiftParams,
    SpectrumModelConfig, MIN_PEAK_WIDTH_NM,
};
