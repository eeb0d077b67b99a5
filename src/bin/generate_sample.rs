use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

/// Write a synthetic dataset with the demo schema
/// (`name,age,group,score,hours,satisfaction,region`).
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Number of participants.
    #[arg(long, default_value_t = 200)]
    rows: usize,

    /// PRNG seed; the same seed always yields the same file.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, default_value = "sample_data.csv")]
    output: PathBuf,
}

/// Deterministic PRNG (SplitMix64).
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Normal deviate via Box-Muller.
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const FIRST_NAMES: [&str; 12] = [
    "Alice", "Bob", "Carol", "David", "Eve", "Frank", "Grace", "Hank", "Iris", "Jack", "Kim",
    "Leo",
];
const REGIONS: [&str; 4] = ["North", "South", "East", "West"];

/// One synthetic participant. Group A studies more, which drives score and
/// satisfaction up; age pulls them down slightly.
fn participant(rng: &mut SimpleRng, id: usize) -> [String; 7] {
    let group = if rng.next_f64() < 0.5 { "A" } else { "B" };
    let age = rng.gauss(33.0, 7.0).clamp(18.0, 70.0).round();
    let base_hours = if group == "A" { 14.0 } else { 7.0 };
    let hours = rng.gauss(base_hours, 2.0).clamp(0.0, 40.0).round();
    let score = (40.0 + 3.5 * hours - 0.2 * (age - 33.0) + rng.gauss(0.0, 4.0)).clamp(0.0, 100.0);
    let satisfaction = (1.0 + score / 25.0 + rng.gauss(0.0, 0.2)).clamp(1.0, 5.0);

    [
        format!("{}_{id}", rng.pick(&FIRST_NAMES)),
        age.to_string(),
        group.to_string(),
        format!("{:.0}", score),
        hours.to_string(),
        format!("{:.1}", satisfaction),
        rng.pick(&REGIONS).to_string(),
    ]
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writer.write_record(rusty_workbench::demo::DEMO_COLUMNS)?;
    for id in 1..=args.rows {
        writer.write_record(participant(&mut rng, id))?;
    }
    writer.flush()?;

    info!("seed {} produced {} rows", args.seed, args.rows);
    println!("Wrote {} participants to {}", args.rows, args.output.display());
    Ok(())
}
