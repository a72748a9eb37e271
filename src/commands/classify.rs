//! Classify command implementation
//!
//! Two passes over the row store: a topic pass over unsettled documents
//! (or everything with `--all`), then a cybersecurity pass that relabels
//! documents with a strong pure-security signal.

use super::{advance_progress, finish_progress, start_progress_bar};
use crate::classify::{classify_topic, is_cybersecurity_focused, Topic};
use crate::config::Config;
use crate::error::Result;
use crate::store::DocumentStore;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct ClassifyOptions {
    /// Reclassify every document, not just unsettled ones
    pub all: bool,
    pub dry_run: bool,
}

/// Statistics from a classification run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassifyStats {
    pub examined: usize,
    pub reclassified: usize,
    pub cybersecurity_overrides: usize,
    pub unchanged: usize,
    pub dry_run: bool,
}

pub async fn cmd_classify(
    config: &Config,
    store: &DocumentStore,
    options: ClassifyOptions,
) -> Result<ClassifyStats> {
    info!(all = options.all, dry_run = options.dry_run, "Classifying documents");

    let mut stats = ClassifyStats {
        dry_run: options.dry_run,
        ..Default::default()
    };

    // Topic pass
    let docs = if options.all {
        store.list_all().await?
    } else {
        store.list_reclassification_candidates().await?
    };
    stats.examined = docs.len();

    let pb = start_progress_bar(docs.len(), "Classifying topics");
    for doc in &docs {
        let (topic, signal) = classify_topic(
            doc.title.as_deref(),
            doc.scoring_content(),
            doc.organization.as_deref(),
            doc.document_type.as_deref(),
            &config.classify,
        );

        if doc.topic.as_deref() != Some(&topic.to_string()) {
            debug!(
                id = doc.id,
                from = ?doc.topic,
                to = %topic,
                ai = signal.ai_count,
                quantum = signal.quantum_count,
                "Reclassifying"
            );
            if !options.dry_run {
                store.update_topic(doc.id, topic).await?;
            }
            stats.reclassified += 1;
        } else {
            stats.unchanged += 1;
        }
        advance_progress(&pb);
    }
    finish_progress(pb, "Topic pass done");

    // Cybersecurity pass: only null/AI/General documents are eligible
    let candidates = store.list_cybersecurity_candidates().await?;
    let pb = start_progress_bar(candidates.len(), "Detecting cybersecurity focus");
    for doc in &candidates {
        if is_cybersecurity_focused(doc.title.as_deref(), doc.scoring_content(), &config.classify) {
            debug!(id = doc.id, "Cybersecurity override");
            if !options.dry_run {
                store.update_topic(doc.id, Topic::Cybersecurity).await?;
            }
            stats.cybersecurity_overrides += 1;
        }
        advance_progress(&pb);
    }
    finish_progress(pb, "Cybersecurity pass done");

    Ok(stats)
}

pub fn print_classify_stats(stats: &ClassifyStats) {
    let label = if stats.dry_run {
        "Classification (dry run)"
    } else {
        "Classification"
    };
    println!("\n🏷️  {} complete\n", label);
    println!("  Examined: {}", stats.examined);
    println!("  Reclassified: {}", stats.reclassified);
    println!("  Cybersecurity overrides: {}", stats.cybersecurity_overrides);
    println!("  Unchanged: {}", stats.unchanged);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{blank_document, test_store};

    fn quantum_content() -> String {
        format!(
            "Post-quantum migration and quantum key distribution. {}",
            "Agencies should inventory cryptographic systems. ".repeat(5)
        )
    }

    #[tokio::test]
    async fn test_classify_settles_unlabeled_documents() {
        let (store, _tmp) = test_store().await;
        let config = Config::default();

        let mut doc = blank_document();
        doc.title = Some("National quantum strategy".to_string());
        doc.content = Some(quantum_content());
        doc.topic = Some("General".to_string());
        let id = store.insert_document(&doc).await.unwrap();

        // Settled documents are left alone without --all
        let mut settled = blank_document();
        settled.topic = Some("Quantum".to_string());
        settled.content = Some(quantum_content());
        let settled_id = store.insert_document(&settled).await.unwrap();

        let stats = cmd_classify(&config, &store, ClassifyOptions::default())
            .await
            .unwrap();
        assert_eq!(stats.examined, 1);
        assert_eq!(stats.reclassified, 1);

        let doc = store.get_document(id).await.unwrap().unwrap();
        assert_eq!(doc.topic.as_deref(), Some("Quantum"));
        let settled = store.get_document(settled_id).await.unwrap().unwrap();
        assert_eq!(settled.topic.as_deref(), Some("Quantum"));
    }

    #[tokio::test]
    async fn test_dry_run_reports_without_writing() {
        let (store, _tmp) = test_store().await;
        let config = Config::default();

        let mut doc = blank_document();
        doc.content = Some(quantum_content());
        doc.topic = Some("General".to_string());
        let id = store.insert_document(&doc).await.unwrap();

        let stats = cmd_classify(
            &config,
            &store,
            ClassifyOptions {
                all: false,
                dry_run: true,
            },
        )
        .await
        .unwrap();
        assert_eq!(stats.reclassified, 1);

        let doc = store.get_document(id).await.unwrap().unwrap();
        assert_eq!(doc.topic.as_deref(), Some("General"));
    }

    #[tokio::test]
    async fn test_cybersecurity_override() {
        let (store, _tmp) = test_store().await;
        let config = Config::default();

        let mut doc = blank_document();
        doc.title = Some("Security controls catalog".to_string());
        doc.content = Some(
            "Authentication, access control, encryption, incident response, \
             and vulnerability management for enterprise networks."
                .to_string(),
        );
        doc.topic = Some("General".to_string());
        let id = store.insert_document(&doc).await.unwrap();

        let stats = cmd_classify(&config, &store, ClassifyOptions::default())
            .await
            .unwrap();
        assert_eq!(stats.cybersecurity_overrides, 1);

        let doc = store.get_document(id).await.unwrap().unwrap();
        assert_eq!(doc.topic.as_deref(), Some("Cybersecurity"));
    }
}
