//! Status command implementation

use crate::config::Config;
use crate::error::Result;
use crate::patterns::PatternStore;
use crate::score::Framework;
use crate::store::{DocumentStore, TopicCount};
use serde::Serialize;
use tracing::info;

/// Status information
#[derive(Debug, Clone, Serialize)]
pub struct StatusInfo {
    pub config_path: String,
    pub patterns_db_path: String,
    pub document_count: i64,
    pub topic_distribution: Vec<TopicCount>,
    /// (framework display name, documents with a non-null score)
    pub scored_counts: Vec<(String, i64)>,
    pub learned_patterns: i64,
    pub verification_patterns: i64,
}

/// Get system status
pub async fn cmd_status(config: &Config, store: &DocumentStore) -> Result<StatusInfo> {
    info!("Getting status");

    let document_count = store.count().await?;
    let topic_distribution = store.topic_distribution().await?;

    let mut scored_counts = Vec::with_capacity(Framework::ALL.len());
    for framework in Framework::ALL {
        let count = store.scored_count(framework.column()).await?;
        scored_counts.push((framework.to_string(), count));
    }

    // The patterns database is optional until the first record
    let (learned_patterns, verification_patterns) =
        if config.paths.patterns_db_file.exists() {
            let patterns = PatternStore::open(&config.paths.patterns_db_file).await?;
            (
                patterns.learned_count().await?,
                patterns.verification_count().await?,
            )
        } else {
            (0, 0)
        };

    Ok(StatusInfo {
        config_path: config.paths.config_file.display().to_string(),
        patterns_db_path: config.paths.patterns_db_file.display().to_string(),
        document_count,
        topic_distribution,
        scored_counts,
        learned_patterns,
        verification_patterns,
    })
}

/// Print status to console
pub fn print_status(status: &StatusInfo) {
    println!("\n📊 guardian Status\n");
    println!("Configuration: {}", status.config_path);
    println!("Patterns database: {}", status.patterns_db_path);
    println!("\nDocuments: {}", status.document_count);

    println!("\nTopics:");
    if status.topic_distribution.is_empty() {
        println!("  (none)");
    }
    for entry in &status.topic_distribution {
        println!("  {}: {}", entry.topic, entry.count);
    }

    println!("\nScored:");
    for (framework, count) in &status.scored_counts {
        println!("  {}: {}", framework, count);
    }

    println!(
        "\nPatterns: {} learned, {} verification",
        status.learned_patterns, status.verification_patterns
    );
}
