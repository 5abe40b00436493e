use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
#[command(about = "Write a synthetic gene expression table")]
struct Args {
    /// Output CSV path.
    #[arg(default_value = "data/gene_expression.csv")]
    output: PathBuf,

    /// Seed for the deterministic generator.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const GENES: [&str; 12] = [
    "BRCA1", "TP53", "EGFR", "MYC", "KRAS", "PTEN", "CDK2", "GAPDH", "ACTB", "VEGFA", "HSP70",
    "IL6",
];

/// Condition name and fold change applied to each gene's baseline.
const CONDITIONS: [(&str, f64); 5] = [
    ("Control", 1.0),
    ("Treatment_A", 1.8),
    ("Treatment_B", 0.6),
    ("Heat_Shock", 2.4),
    ("Cold_Stress", 0.8),
];

/// Deterministic SplitMix64 stream; enough for reproducible sample data.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Normal sample via Box-Muller.
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.uniform().max(1e-15);
        let u2 = self.uniform();
        mean + std_dev * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SampleRng(args.seed);

    if let Some(dir) = args.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let mut header = vec!["Gene".to_string()];
    header.extend(CONDITIONS.iter().map(|(name, _)| name.to_string()));
    writer.write_record(&header)?;

    for gene in GENES {
        // Housekeeping genes barely respond to treatment.
        let housekeeping = matches!(gene, "GAPDH" | "ACTB");
        let baseline = 2.0 + rng.uniform() * 8.0;

        let mut record = vec![gene.to_string()];
        for &(_, fold) in &CONDITIONS {
            let fold = if housekeeping { 1.0 } else { fold };
            let value = (baseline * fold + rng.normal(0.0, 0.3)).max(0.0);
            record.push(format!("{value:.2}"));
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;

    println!(
        "Wrote {} genes × {} conditions to {}",
        GENES.len(),
        CONDITIONS.len(),
        args.output.display()
    );
    Ok(())
}
