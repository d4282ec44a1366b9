use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Write a synthetic California housing CSV.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Output CSV path.
    #[arg(default_value = "data/housing.csv")]
    output: PathBuf,

    /// Number of data rows to write.
    #[arg(default_value_t = 2000)]
    rows: usize,
}

const HEADER: [&str; 9] = [
    "longitude",
    "latitude",
    "housing_median_age",
    "total_rooms",
    "total_bedrooms",
    "population",
    "households",
    "median_income",
    "median_house_value",
];

/// Share of bedroom cells left empty, as in the real census extract.
const MISSING_BEDROOMS_RATE: f64 = 0.01;

/// Minimal deterministic PRNG (xoshiro256**)
struct Rng {
    state: [u64; 4],
}

impl Rng {
    fn new(seed: u64) -> Self {
        let mut state = [0u64; 4];
        let mut x = seed;
        for slot in &mut state {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        Rng { state }
    }

    fn next_u64(&mut self) -> u64 {
        let s = &mut self.state;
        let result = s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = s[1] << 17;
        s[2] ^= s[0];
        s[3] ^= s[1];
        s[1] ^= s[2];
        s[0] ^= s[3];
        s[2] ^= t;
        s[3] = s[3].rotate_left(45);
        result
    }

    /// Uniform in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + (hi - lo) * unit
    }

    /// Log-normal draw around `median`.
    fn log_normal(&mut self, median: f64, spread: f64) -> f64 {
        let u1 = self.uniform(1e-15, 1.0);
        let u2 = self.uniform(0.0, 1.0);
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        median * (spread * z).exp()
    }
}

/// One synthetic census block, already rounded like the source data.
fn block(rng: &mut Rng) -> [Option<f64>; 9] {
    let longitude = rng.uniform(-124.3, -114.3);
    let latitude = rng.uniform(32.5, 42.0);
    let age = rng.uniform(1.0, 52.0).floor();
    let households = rng.log_normal(400.0, 0.6).round().max(1.0);
    let rooms = (households * rng.uniform(3.5, 7.0)).round();
    let bedrooms = (rooms * rng.uniform(0.15, 0.25)).round();
    let population = (households * rng.uniform(2.0, 3.5)).round();
    let income = (rng.log_normal(3.5, 0.45) * 10_000.0).round() / 10_000.0;
    let value = (income * 40_000.0 + rng.uniform(0.0, 100_000.0))
        .round()
        .min(500_001.0);

    let bedrooms = (rng.uniform(0.0, 1.0) >= MISSING_BEDROOMS_RATE).then_some(bedrooms);
    [
        Some(longitude),
        Some(latitude),
        Some(age),
        Some(rooms),
        bedrooms,
        Some(population),
        Some(households),
        Some(income),
        Some(value),
    ]
}

fn main() -> Result<()> {
    let Args {
        output: output_path,
        rows,
    } = Args::parse();

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record(HEADER)?;

    let mut rng = Rng::new(42);
    for _ in 0..rows {
        let record: Vec<String> = block(&mut rng)
            .into_iter()
            .map(|cell| cell.map(|v| format!("{v:.4}")).unwrap_or_default())
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;

    println!("Wrote {rows} housing rows to {}", output_path.display());
    Ok(())
}
