//! Patterns command implementation

use crate::config::Config;
use crate::error::Result;
use crate::patterns::{LearnedPatternRow, PatternStore, PatternsFile};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Statistics from a patterns load
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatternsStats {
    pub learned_recorded: usize,
    pub verification_recorded: usize,
}

/// Load patterns from a TOML file into the patterns database
pub async fn cmd_patterns_record(config: &Config, file: &Path) -> Result<PatternsStats> {
    let patterns = PatternsFile::load(file)?;
    info!(
        learned = patterns.learned.len(),
        verification = patterns.verification.len(),
        file = %file.display(),
        "Recording patterns"
    );

    let store = PatternStore::open(&config.paths.patterns_db_file).await?;

    let mut stats = PatternsStats::default();
    for pattern in &patterns.learned {
        store.record_learned(pattern).await?;
        stats.learned_recorded += 1;
    }
    for pattern in &patterns.verification {
        store.record_verification(pattern).await?;
        stats.verification_recorded += 1;
    }

    Ok(stats)
}

pub async fn cmd_patterns_list(config: &Config) -> Result<Vec<LearnedPatternRow>> {
    let store = PatternStore::open(&config.paths.patterns_db_file).await?;
    store.list_learned().await
}

pub fn print_patterns_stats(stats: &PatternsStats) {
    println!("\n🧠 Patterns recorded\n");
    println!("  Learned: {}", stats.learned_recorded);
    println!("  Verification: {}", stats.verification_recorded);
}

pub fn print_patterns(rows: &[LearnedPatternRow]) {
    println!("\n🧠 Learned Patterns\n");

    if rows.is_empty() {
        println!("No patterns recorded. Use 'guardian patterns record --file F' to add some.");
        return;
    }

    for row in rows {
        println!("• {} [{}]", row.pattern_id, row.pattern_type);
        println!("  Triggers: {}", row.trigger_conditions);
        println!("  Rule: {}", row.correction_rule);
        println!(
            "  Confidence: {:.2}, used {} times, success rate {:.2}",
            row.confidence_score, row.usage_count, row.success_rate
        );
        println!("  Updated: {}", row.last_updated);
        println!();
    }
}
