use dbst_lab::analysis::{DatasetAnalysis, GateInputs};
use dbst_lab::data::RawDataset;
use dbst_lab::lod::compute_lod;
use dbst_lab::settings::LabSettings;
use dbst_lab::spectrum::{
    simulate, IntensityCurve, Ion, ModelPreset, SpectrumModelConfig, WavelengthGrid,
};

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Simulator,
    Analyzer,
    Lod,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Simulator, Tab::Analyzer, Tab::Lod];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Simulator => "Spectral Simulator",
            Tab::Analyzer => "Logic Gate Analyzer",
            Tab::Lod => "LOD Calculator",
        }
    }
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

/// Inputs and cached curves of the spectrum simulator.
pub struct SimulatorState {
    pub ion: Ion,
    /// `None` when the model came from the settings file.
    pub preset: Option<ModelPreset>,
    pub config: SpectrumModelConfig,
    pub grid: WavelengthGrid,
    /// One entry per sample slider.
    pub concentrations: Vec<f64>,
    pub max_concentration: f64,
    pub default_concentration: f64,
    pub curves: Vec<IntensityCurve>,
    pub error: Option<String>,
}

impl SimulatorState {
    pub fn new(settings: &LabSettings) -> Self {
        let grid = settings.grid.build().unwrap_or_else(|e| {
            log::error!("Bad grid in settings ({e}), using 400–600 nm");
            WavelengthGrid::default()
        });
        let mut state = Self {
            ion: Ion::Quencher,
            preset: if settings.model.is_some() {
                None
            } else {
                settings.preset
            },
            config: settings.model_config(),
            grid,
            concentrations: vec![settings.default_concentration],
            max_concentration: settings.max_concentration,
            default_concentration: settings.default_concentration,
            curves: Vec::new(),
            error: None,
        };
        state.recompute();
        state
    }

    pub fn add_sample(&mut self) {
        self.concentrations.push(self.default_concentration);
        self.recompute();
    }

    /// Drop the newest sample; the first one always stays.
    pub fn remove_sample(&mut self) {
        if self.concentrations.len() > 1 {
            self.concentrations.pop();
            self.recompute();
        }
    }

    pub fn set_preset(&mut self, preset: ModelPreset) {
        self.preset = Some(preset);
        self.config = preset.config();
        self.recompute();
    }

    /// Re-simulate every sample from the current inputs.
    pub fn recompute(&mut self) {
        match simulate(self.ion, &self.concentrations, &self.grid, &self.config) {
            Ok(curves) => {
                self.curves = curves;
                self.error = None;
            }
            Err(e) => {
                log::warn!("Simulation failed: {e}");
                self.curves.clear();
                self.error = Some(e.to_string());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Analyzer
// ---------------------------------------------------------------------------

/// Loaded dataset, its analysis and the user's threshold / gate inputs.
#[derive(Default)]
pub struct AnalyzerState {
    pub dataset: Option<RawDataset>,
    pub source: Option<String>,
    pub analysis: Option<DatasetAnalysis>,
    pub threshold: f64,
    pub inputs: GateInputs,
}

impl AnalyzerState {
    /// Replace the dataset; everything derived from the previous one is dropped.
    pub fn set_dataset(&mut self, dataset: RawDataset, source: String) {
        let analysis = DatasetAnalysis::new(&dataset);
        self.threshold = analysis.default_threshold();
        self.inputs = GateInputs::default();
        self.analysis = Some(analysis);
        self.dataset = Some(dataset);
        self.source = Some(source);
    }

    /// Forget the current dataset and everything derived from it.
    pub fn clear(&mut self) {
        *self = AnalyzerState::default();
    }
}

// ---------------------------------------------------------------------------
// LOD
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct LodState {
    pub sigma: f64,
    pub slope: f64,
}

impl LodState {
    pub fn result(&self) -> dbst_lab::Result<f64> {
        compute_lod(self.sigma, self.slope)
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub tab: Tab,
    pub simulator: SimulatorState,
    pub analyzer: AnalyzerState,
    pub lod: LodState,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(settings: &LabSettings) -> Self {
        Self {
            tab: Tab::default(),
            simulator: SimulatorState::new(settings),
            analyzer: AnalyzerState::default(),
            lod: LodState::default(),
            status_message: None,
        }
    }

    /// Apply the outcome of loading `source`.
    ///
    /// A failed load clears the analyzer so no result from an earlier file
    /// stays on screen under the error.
    pub fn apply_load(&mut self, result: anyhow::Result<RawDataset>, source: String) {
        match result {
            Ok(dataset) => {
                log::info!("Loaded {source}: {} rows", dataset.len());
                self.analyzer.set_dataset(dataset, source);
                self.status_message = None;
                self.tab = Tab::Analyzer;
            }
            Err(e) => {
                log::error!("Failed to load {source}: {e:#}");
                self.analyzer.clear();
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbst_lab::data::Series;

    #[test]
    fn starts_with_one_sample() {
        let state = AppState::new(&LabSettings::default());
        assert_eq!(state.tab, Tab::Simulator);
        assert_eq!(state.simulator.concentrations, vec![1.0]);
        assert_eq!(state.simulator.curves.len(), 1);
        assert_eq!(state.simulator.grid.len(), 200);
    }

    #[test]
    fn add_and_remove_samples() {
        let mut sim = SimulatorState::new(&LabSettings::default());
        sim.add_sample();
        sim.add_sample();
        assert_eq!(sim.curves.len(), 3);
        assert_eq!(sim.curves[2].label, "Sample 3");
        sim.remove_sample();
        sim.remove_sample();
        sim.remove_sample();
        assert_eq!(sim.concentrations.len(), 1);
        assert_eq!(sim.curves.len(), 1);
    }

    #[test]
    fn bad_grid_falls_back_to_default() {
        let mut settings = LabSettings::default();
        settings.grid.count = 1;
        let sim = SimulatorState::new(&settings);
        assert_eq!(sim.grid, WavelengthGrid::default());
    }

    #[test]
    fn negative_concentration_reports_error() {
        let mut sim = SimulatorState::new(&LabSettings::default());
        sim.concentrations[0] = -1.0;
        sim.recompute();
        assert!(sim.curves.is_empty());
        assert!(sim.error.is_some());
    }

    #[test]
    fn new_dataset_resets_threshold_and_inputs() {
        let mut analyzer = AnalyzerState::default();
        analyzer.inputs.pb = true;
        let ds = RawDataset::new(
            vec![400.0, 450.0, 500.0],
            vec![10.0, 50.0, 30.0],
            vec![5.0, 60.0, 20.0],
            vec![8.0, 40.0, 25.0],
        )
        .unwrap();
        analyzer.set_dataset(ds, "scenario.csv".into());
        assert_eq!(analyzer.threshold, 25.0);
        assert_eq!(analyzer.inputs, GateInputs::default());
        let analysis = analyzer.analysis.as_ref().unwrap();
        assert_eq!(analysis.peak.intensity(Series::PlusH2PO4), 60.0);
    }

    #[test]
    fn failed_load_clears_previous_dataset() {
        let mut state = AppState::new(&LabSettings::default());
        let ds = RawDataset::new(
            vec![400.0, 450.0, 500.0],
            vec![10.0, 50.0, 30.0],
            vec![5.0, 60.0, 20.0],
            vec![8.0, 40.0, 25.0],
        )
        .unwrap();
        state.apply_load(Ok(ds), "good.csv".into());
        assert_eq!(state.tab, Tab::Analyzer);
        assert!(state.analyzer.analysis.is_some());

        state.apply_load(Err(anyhow::anyhow!("bad header")), "bad.csv".into());
        assert!(state.analyzer.dataset.is_none());
        assert!(state.analyzer.analysis.is_none());
        assert!(state.analyzer.source.is_none());
        assert_eq!(state.status_message.as_deref(), Some("Error: bad header"));
    }

    #[test]
    fn lod_state_guards_slope() {
        let lod = LodState::default();
        assert!(lod.result().is_err());
    }
}
