//! The `calibra tips` command.

use anyhow::Result;

use calibra_core::tips::STRATEGY_TIPS;

pub fn execute() -> Result<()> {
    println!("Calibration strategies:\n");
    for (i, tip) in STRATEGY_TIPS.iter().enumerate() {
        println!("{}. {}", i + 1, tip.title);
        println!("   {}\n", tip.body);
    }
    Ok(())
}
