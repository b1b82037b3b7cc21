//! List signal policies command.

use anyhow::Result;
use ticker_strategies::{PolicyRegistry, DEFAULT_POLICY};

pub async fn run() -> Result<()> {
    let registry = PolicyRegistry::new();

    println!("Available Signal Policies");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for info in registry.list() {
        let marker = if info.key == DEFAULT_POLICY { " (default)" } else { "" };
        println!("  {} [{}]{}", info.name, info.key, marker);
        println!("  ───────────────────────────────────────────────────────");
        println!("  {}", info.description);
        println!("  Parameters: {}", info.default_config);
        println!();
    }

    println!("Select one with [policy] name = \"<key>\" in the configuration file.");

    Ok(())
}
