//! Writes `sample_dbst.csv`: a synthetic DBST titration readable by the
//! analyzer (Wavelength, DBST, DBST+H2PO4-, DBST+Pb2+).

use anyhow::{Context, Result};

use dbst_lab::spectrum::{evaluate, make_grid, Ion, ModelPreset};

/// Analyte concentration of the two spiked series (µM).
const SPIKE_UM: f64 = 5.0;
/// Noise standard deviation as a fraction of the probe amplitude.
const NOISE_FRACTION: f64 = 0.01;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_dbst.csv".to_string());

    let mut rng = SimpleRng::new(42);
    let grid = make_grid(400.0, 600.0, 201)?;
    let config = ModelPreset::Localized.config();
    let noise = config.base_amplitude * NOISE_FRACTION;

    let baseline = evaluate(Ion::Quencher, 0.0, &grid, &config)?;
    let h2po4 = evaluate(Ion::Enhancer, SPIKE_UM, &grid, &config)?;
    let pb = evaluate(Ion::Quencher, SPIKE_UM, &grid, &config)?;

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["Wavelength", "DBST", "DBST+H2PO4-", "DBST+Pb2+"])?;

    for (i, wl) in grid.iter().enumerate() {
        let mut row = vec![format!("{wl:.1}")];
        for curve in [&baseline, &h2po4, &pb] {
            let value = (curve.intensities[i] + rng.gauss(0.0, noise)).max(0.0);
            row.push(format!("{value:.2}"));
        }
        writer.write_record(&row)?;
    }
    writer.flush().context("writing CSV")?;

    println!(
        "Wrote {} rows ({} µM H2PO4- / Pb2+) to {output_path}",
        grid.len(),
        SPIKE_UM
    );
    Ok(())
}
