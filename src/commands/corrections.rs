//! Corrections command implementation

use crate::corrections::{
    apply_corrections, template, AppliedCorrection, CorrectionsFile, CorrectionsStats, Outcome,
};
use crate::error::Result;
use crate::store::DocumentStore;
use std::path::Path;
use tracing::info;

pub async fn cmd_corrections_apply(
    store: &DocumentStore,
    file: &Path,
    dry_run: bool,
) -> Result<(CorrectionsStats, Vec<AppliedCorrection>)> {
    let corrections = CorrectionsFile::load(file)?;
    info!(
        count = corrections.corrections.len(),
        file = %file.display(),
        dry_run,
        "Applying corrections"
    );
    apply_corrections(store, &corrections.corrections, dry_run).await
}

/// Print an example corrections file to stdout
pub fn cmd_corrections_template() {
    print!("{}", template());
}

fn render_value(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("(null)")
}

pub fn print_corrections_report(stats: &CorrectionsStats, report: &[AppliedCorrection]) {
    let label = if stats.dry_run {
        "Corrections (dry run)"
    } else {
        "Corrections"
    };
    println!("\n🛠  {} complete\n", label);

    for entry in report {
        match &entry.outcome {
            Outcome::Applied => {
                println!(
                    "✓ #{} {}: {:?} -> {:?}",
                    entry.document_id,
                    entry.field.column(),
                    render_value(&entry.old_value),
                    entry.new_value
                );
                println!("    {}", entry.justification);
            }
            Outcome::MissingRow => {
                println!(
                    "✗ #{} {}: skipped, document not found",
                    entry.document_id,
                    entry.field.column()
                );
            }
            Outcome::ValueMismatch { current } => {
                println!(
                    "✗ #{} {}: skipped, expected {:?} but found {:?}",
                    entry.document_id,
                    entry.field.column(),
                    render_value(&entry.old_value),
                    render_value(current)
                );
            }
        }
    }

    println!(
        "\n  Applied: {} / {}  (missing: {}, mismatched: {})",
        stats.applied, stats.total, stats.skipped_missing, stats.skipped_mismatch
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{blank_document, test_store};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_apply_from_file() {
        let (store, _tmp) = test_store().await;
        let mut doc = blank_document();
        doc.topic = Some("General".to_string());
        let id = store.insert_document(&doc).await.unwrap();

        let dir = TempDir::new().unwrap();
        let file = dir.path().join("corrections.toml");
        std::fs::write(
            &file,
            format!(
                r#"
                [[correction]]
                document_id = {}
                field = "topic"
                old_value = "General"
                new_value = "AI"
                justification = "Manual review"
                "#,
                id
            ),
        )
        .unwrap();

        let (stats, report) = cmd_corrections_apply(&store, &file, false).await.unwrap();
        assert_eq!(stats.applied, 1);
        assert_eq!(report[0].outcome, Outcome::Applied);

        let doc = store.get_document(id).await.unwrap().unwrap();
        assert_eq!(doc.topic.as_deref(), Some("AI"));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let (store, _tmp) = test_store().await;
        let result = cmd_corrections_apply(&store, Path::new("/nonexistent.toml"), false).await;
        assert!(result.is_err());
    }
}
