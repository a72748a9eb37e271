//! Score command implementation

use super::{advance_progress, finish_progress, start_progress_bar};
use crate::classify::{classify_topic, Topic};
use crate::config::Config;
use crate::error::Result;
use crate::score::score_document;
use crate::store::DocumentStore;
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct ScoreOptions {
    /// Recompute scores even for documents that already have them
    pub force: bool,
    pub dry_run: bool,
}

/// Statistics from a scoring run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScoreStats {
    pub examined: usize,
    pub scored: usize,
    pub skipped_existing: usize,
    pub short_content: usize,
    pub dry_run: bool,
}

pub async fn cmd_score(
    config: &Config,
    store: &DocumentStore,
    options: ScoreOptions,
) -> Result<ScoreStats> {
    info!(force = options.force, dry_run = options.dry_run, "Scoring documents");

    let mut stats = ScoreStats {
        dry_run: options.dry_run,
        ..Default::default()
    };

    let docs = store.list_all().await?;
    stats.examined = docs.len();

    let pb = start_progress_bar(docs.len(), "Scoring frameworks");
    for doc in &docs {
        // A row without a parsable topic gets one from the classifier
        let topic = doc
            .topic
            .as_deref()
            .and_then(|t| Topic::from_str(t).ok())
            .unwrap_or_else(|| {
                classify_topic(
                    doc.title.as_deref(),
                    doc.scoring_content(),
                    doc.organization.as_deref(),
                    doc.document_type.as_deref(),
                    &config.classify,
                )
                .0
            });

        if !options.force && has_all_applicable_scores(doc, topic) {
            stats.skipped_existing += 1;
            advance_progress(&pb);
            continue;
        }

        let content = doc.scoring_content();
        if content.map_or(0, str::len) < config.scoring.min_content_chars {
            stats.short_content += 1;
        }

        let scores = score_document(content, doc.title.as_deref(), topic, &config.scoring);
        debug!(id = doc.id, topic = %topic, ?scores, "Scored");

        if !options.dry_run {
            store.update_scores(doc.id, topic, &scores).await?;
        }
        stats.scored += 1;
        advance_progress(&pb);
    }
    finish_progress(pb, "Scoring done");

    Ok(stats)
}

fn has_all_applicable_scores(doc: &crate::store::Document, topic: Topic) -> bool {
    let ai_done = doc.ai_cybersecurity_score.is_some() && doc.ai_ethics_score.is_some();
    let quantum_done =
        doc.quantum_cybersecurity_score.is_some() && doc.quantum_ethics_score.is_some();
    match topic {
        Topic::Ai => ai_done,
        Topic::Quantum => quantum_done,
        _ => ai_done && quantum_done,
    }
}

pub fn print_score_stats(stats: &ScoreStats) {
    let label = if stats.dry_run {
        "Scoring (dry run)"
    } else {
        "Scoring"
    };
    println!("\n📈 {} complete\n", label);
    println!("  Examined: {}", stats.examined);
    println!("  Scored: {}", stats.scored);
    println!("  Skipped (already scored): {}", stats.skipped_existing);
    println!("  Short content (scored 0): {}", stats.short_content);
}
