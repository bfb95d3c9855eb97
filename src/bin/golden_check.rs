//! Verify (or regenerate) the golden snapshot
//!
//! Runs the standard scenario battery with default partner settings and
//! compares it against data/golden/snapshot.json.

use anyhow::{bail, Context, Result};
use clap::Parser;
use purchase_budget::golden::{
    compare_snapshot, standard_battery, take_snapshot, Snapshot, DEFAULT_SNAPSHOT_PATH,
};
use purchase_budget::Calculator;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "golden_check", about = "Compare the scenario battery against its snapshot")]
struct Cli {
    #[arg(long, default_value = DEFAULT_SNAPSHOT_PATH)]
    snapshot: PathBuf,

    /// Rewrite the snapshot instead of comparing
    #[arg(long)]
    update: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let calculator = Calculator::default();
    let actual = take_snapshot(&calculator, &standard_battery());

    if cli.update {
        actual
            .save(&cli.snapshot)
            .with_context(|| format!("writing {}", cli.snapshot.display()))?;
        println!(
            "Wrote {} scenarios to {}",
            actual.entries.len(),
            cli.snapshot.display()
        );
        return Ok(());
    }

    let expected = Snapshot::load(&cli.snapshot)
        .with_context(|| format!("reading {}", cli.snapshot.display()))?;
    let drifts = compare_snapshot(&expected, &actual);

    println!(
        "Snapshot from {} ({} scenarios)",
        expected.generated_at.format("%Y-%m-%d %H:%M UTC"),
        expected.entries.len()
    );
    if drifts.is_empty() {
        println!("No drift.");
        return Ok(());
    }

    println!("{:<30} {:<22} {:>16} {:>16}", "Scenario", "Field", "Expected", "Actual");
    println!("{}", "-".repeat(87));
    for d in &drifts {
        println!("{:<30} {:<22} {:>16} {:>16}", d.scenario, d.field, d.expected, d.actual);
    }
    bail!("{} field(s) drifted", drifts.len())
}
