use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::grid::WavelengthGrid;
use super::ion::Ion;
use crate::error::{LabError, Result};

/// No Gaussian is ever evaluated narrower than this (nm).
pub const MIN_PEAK_WIDTH_NM: f64 = 5.0;

/// Shape constant `k` of the probe envelope `exp(-k (λ - λ0)²)`.
pub const DEFAULT_SHAPE_CONSTANT: f64 = 0.01;

// ---------------------------------------------------------------------------
// ResponseKind – how concentration perturbs the envelope
// ---------------------------------------------------------------------------

/// Concentration response of the probe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ResponseKind {
    /// Amplitude-only response: `exp(-k c)` for the quencher, `1 + k c` for
    /// the enhancer. With `localized` the coefficient itself follows the
    /// normalised envelope, so the response is strongest at the peak.
    Exponential {
        #[serde(default)]
        localized: bool,
    },
    /// Peak centre and width move with concentration.
    GaussianShift(ShiftParams),
}

/// Parameters of the [`ResponseKind::GaussianShift`] model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftParams {
    /// Peak displacement per µM; blue for the quencher, red for the enhancer.
    pub center_shift_nm: f64,
    /// Broadening (quencher) or narrowing (enhancer) per µM.
    pub width_change_nm: f64,
    /// Secondary enhancer band.
    pub shoulder_center_nm: f64,
    pub shoulder_width_nm: f64,
    /// Shoulder height relative to `base_amplitude`.
    pub shoulder_ratio: f64,
}

impl Default for ShiftParams {
    fn default() -> Self {
        Self {
            center_shift_nm: 2.0,
            width_change_nm: 1.5,
            shoulder_center_nm: 530.0,
            shoulder_width_nm: 12.0,
            shoulder_ratio: 0.35,
        }
    }
}

// ---------------------------------------------------------------------------
// SpectrumModelConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumModelConfig {
    pub peak_center: f64,
    /// Standard deviation of the emission band in GaussianShift mode (nm).
    pub peak_width: f64,
    pub base_amplitude: f64,
    pub response_coefficient: f64,
    /// Envelope shape constant used in Exponential mode.
    pub shape_constant: f64,
    pub response_kind: ResponseKind,
}

impl Default for SpectrumModelConfig {
    fn default() -> Self {
        ModelPreset::Exponential.config()
    }
}

impl SpectrumModelConfig {
    /// Reject parameter sets that could produce negative or undefined curves.
    pub fn validate(&self) -> Result<()> {
        let check = |ok: bool, what: &str| {
            if ok {
                Ok(())
            } else {
                Err(LabError::InvalidModel(what.to_string()))
            }
        };
        check(self.peak_center.is_finite(), "peak_center must be finite")?;
        check(
            self.peak_width.is_finite() && self.peak_width > 0.0,
            "peak_width must be > 0",
        )?;
        check(
            self.base_amplitude.is_finite() && self.base_amplitude >= 0.0,
            "base_amplitude must be >= 0",
        )?;
        check(
            self.response_coefficient.is_finite() && self.response_coefficient >= 0.0,
            "response_coefficient must be >= 0",
        )?;
        check(
            self.shape_constant.is_finite() && self.shape_constant > 0.0,
            "shape_constant must be > 0",
        )?;
        if let ResponseKind::GaussianShift(p) = &self.response_kind {
            check(
                p.center_shift_nm.is_finite()
                    && p.width_change_nm.is_finite()
                    && p.shoulder_center_nm.is_finite()
                    && p.shoulder_width_nm.is_finite(),
                "shift parameters must be finite",
            )?;
            check(
                p.shoulder_ratio.is_finite() && p.shoulder_ratio >= 0.0,
                "shoulder_ratio must be >= 0",
            )?;
        }
        Ok(())
    }

    /// Width of the main band actually used at this concentration.
    ///
    /// Only the GaussianShift model moves the width; `None` otherwise, and
    /// also when the shifted band leaves the finite range.
    pub fn effective_width(&self, ion: Ion, concentration: f64) -> Option<f64> {
        match &self.response_kind {
            ResponseKind::Exponential { .. } => None,
            ResponseKind::GaussianShift(p) => self
                .shifted_peak(p, ion, concentration)
                .ok()
                .map(|peak| peak.width),
        }
    }

    fn shifted_peak(&self, p: &ShiftParams, ion: Ion, concentration: f64) -> Result<ShiftedPeak> {
        let (center, width) = match ion {
            Ion::Quencher => (
                self.peak_center - p.center_shift_nm * concentration,
                self.peak_width + p.width_change_nm * concentration,
            ),
            Ion::Enhancer => (
                self.peak_center + p.center_shift_nm * concentration,
                self.peak_width - p.width_change_nm * concentration,
            ),
        };
        if !center.is_finite() || !width.is_finite() {
            return Err(LabError::InvalidConcentration {
                value: concentration,
            });
        }
        Ok(ShiftedPeak {
            center,
            width: width.max(MIN_PEAK_WIDTH_NM),
        })
    }
}

struct ShiftedPeak {
    center: f64,
    width: f64,
}

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-0.5 * ((x - mu) / sigma).powi(2)).exp()
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// Named model configurations selectable from the UI and the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelPreset {
    /// Exponential response with an envelope-shaped coefficient.
    Localized,
    /// Exponential response with a uniform coefficient.
    Exponential,
    /// Peak shift, broadening/narrowing and an enhancer shoulder.
    GaussianShift,
}

impl ModelPreset {
    pub const ALL: [ModelPreset; 3] = [
        ModelPreset::Localized,
        ModelPreset::Exponential,
        ModelPreset::GaussianShift,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ModelPreset::Localized => "localized",
            ModelPreset::Exponential => "exponential",
            ModelPreset::GaussianShift => "gaussian-shift",
        }
    }

    pub fn config(self) -> SpectrumModelConfig {
        let response_kind = match self {
            ModelPreset::Localized => ResponseKind::Exponential { localized: true },
            ModelPreset::Exponential => ResponseKind::Exponential { localized: false },
            ModelPreset::GaussianShift => ResponseKind::GaussianShift(ShiftParams::default()),
        };
        SpectrumModelConfig {
            peak_center: 480.0,
            peak_width: 20.0,
            base_amplitude: 30000.0,
            response_coefficient: 0.05,
            shape_constant: DEFAULT_SHAPE_CONSTANT,
            response_kind,
        }
    }
}

impl fmt::Display for ModelPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelPreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ModelPreset::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| format!("unknown model preset '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// IntensityCurve
// ---------------------------------------------------------------------------

/// One simulated emission spectrum.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityCurve {
    pub ion: Ion,
    pub concentration: f64,
    pub label: String,
    pub grid: WavelengthGrid,
    pub intensities: Vec<f64>,
}

impl IntensityCurve {
    /// `(wavelength, intensity)` pairs in grid order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.grid.iter().copied().zip(self.intensities.iter().copied())
    }

    /// Wavelength and height of the tallest sample (first one on ties).
    pub fn peak(&self) -> (f64, f64) {
        self.points()
            .fold((self.grid[0], f64::NEG_INFINITY), |best, (wl, i)| {
                if i > best.1 {
                    (wl, i)
                } else {
                    best
                }
            })
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Simulate the emission spectrum of the probe with `concentration` µM of `ion`.
pub fn evaluate(
    ion: Ion,
    concentration: f64,
    grid: &WavelengthGrid,
    config: &SpectrumModelConfig,
) -> Result<IntensityCurve> {
    if !concentration.is_finite() || concentration < 0.0 {
        return Err(LabError::InvalidConcentration {
            value: concentration,
        });
    }
    config.validate()?;

    let c = concentration;
    let amp = config.base_amplitude;
    let coef = config.response_coefficient;

    let intensities: Vec<f64> = match &config.response_kind {
        ResponseKind::Exponential { localized } => {
            let k = config.shape_constant;
            grid.iter()
                .map(|&wl| {
                    let shape = (-k * (wl - config.peak_center).powi(2)).exp();
                    let k_wl = if *localized { coef * shape } else { coef };
                    let response = match ion {
                        Ion::Quencher => (-k_wl * c).exp(),
                        Ion::Enhancer => 1.0 + k_wl * c,
                    };
                    amp * shape * response
                })
                .collect()
        }
        ResponseKind::GaussianShift(p) => {
            let peak = config.shifted_peak(p, ion, c)?;
            grid.iter()
                .map(|&wl| {
                    let main = gaussian(wl, peak.center, peak.width, amp);
                    match ion {
                        Ion::Quencher => main * (-coef * c).exp(),
                        Ion::Enhancer => {
                            let shoulder = gaussian(
                                wl,
                                p.shoulder_center_nm,
                                p.shoulder_width_nm.max(MIN_PEAK_WIDTH_NM),
                                amp * p.shoulder_ratio,
                            );
                            (main + shoulder) * (1.0 + coef * c)
                        }
                    }
                })
                .collect()
        }
    };

    log::debug!(
        "evaluated {ion} at {c} µM over {} samples ({:?})",
        grid.len(),
        config.response_kind
    );

    Ok(IntensityCurve {
        ion,
        concentration,
        label: format!("{ion} {c} µM"),
        grid: grid.clone(),
        intensities,
    })
}

/// Simulate one curve per requested concentration, in request order.
///
/// Curves are labelled "Sample 1", "Sample 2", … and share `grid`.
pub fn simulate(
    ion: Ion,
    concentrations: &[f64],
    grid: &WavelengthGrid,
    config: &SpectrumModelConfig,
) -> Result<Vec<IntensityCurve>> {
    concentrations
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let mut curve = evaluate(ion, c, grid, config)?;
            curve.label = format!("Sample {}", i + 1);
            Ok(curve)
        })
        .collect()
}
