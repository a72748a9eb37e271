//! Declarative record corrections
//!
//! Replaces one-off patch scripts with a data-driven replayer: corrections
//! are declared in a TOML file and applied by one generic procedure inside a
//! single transaction. A record whose row is missing or whose current value
//! no longer matches `old_value` is skipped with a log line; any store error
//! rolls the whole batch back.

use crate::error::{Error, Result};
use crate::store::{field_value, DocField, Document, DocumentStore};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// One field correction against one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Correction {
    pub document_id: i64,
    pub field: DocField,
    /// Expected current value; `None` asserts the field is currently null
    pub old_value: Option<String>,
    pub new_value: String,
    pub justification: String,
}

/// Corrections file layout for `guardian corrections apply`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorrectionsFile {
    #[serde(default, rename = "correction")]
    pub corrections: Vec<Correction>,
}

impl CorrectionsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: CorrectionsFile = toml::from_str(&content)?;
        if file.corrections.is_empty() {
            return Err(Error::Correction(format!(
                "No corrections found in {}",
                path.display()
            )));
        }
        for correction in &file.corrections {
            correction.validate()?;
        }
        Ok(file)
    }
}

impl Correction {
    /// Score corrections must carry an integer in [0, 100]
    pub fn validate(&self) -> Result<()> {
        if self.field.is_score() {
            let value: i64 = self.new_value.parse().map_err(|_| {
                Error::Correction(format!(
                    "Document {}: {} requires an integer, got {:?}",
                    self.document_id,
                    self.field.column(),
                    self.new_value
                ))
            })?;
            if !(0..=100).contains(&value) {
                return Err(Error::Correction(format!(
                    "Document {}: score {} out of range [0, 100]",
                    self.document_id, value
                )));
            }
        }
        Ok(())
    }
}

/// How one correction record was handled
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    MissingRow,
    ValueMismatch { current: Option<String> },
}

/// Per-record result for the before/after report
#[derive(Debug, Clone, Serialize)]
pub struct AppliedCorrection {
    pub document_id: i64,
    pub field: DocField,
    pub old_value: Option<String>,
    pub new_value: String,
    pub justification: String,
    pub outcome: Outcome,
}

/// Batch outcome counts
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorrectionsStats {
    pub total: usize,
    pub applied: usize,
    pub skipped_missing: usize,
    pub skipped_mismatch: usize,
    pub dry_run: bool,
}

/// Apply a batch of corrections in a single transaction.
///
/// With `dry_run` every record is checked against the live row and reported,
/// but the transaction is rolled back instead of committed.
pub async fn apply_corrections(
    store: &DocumentStore,
    corrections: &[Correction],
    dry_run: bool,
) -> Result<(CorrectionsStats, Vec<AppliedCorrection>)> {
    let mut tx = store.pool().begin().await?;
    let mut stats = CorrectionsStats {
        total: corrections.len(),
        dry_run,
        ..Default::default()
    };
    let mut report = Vec::with_capacity(corrections.len());

    for correction in corrections {
        correction.validate()?;

        let doc = sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = ?")
            .bind(correction.document_id)
            .fetch_optional(&mut *tx)
            .await?;

        let doc = match doc {
            Some(doc) => doc,
            None => {
                warn!(
                    document_id = correction.document_id,
                    field = correction.field.column(),
                    "Skipping correction: document not found"
                );
                stats.skipped_missing += 1;
                report.push(AppliedCorrection {
                    document_id: correction.document_id,
                    field: correction.field,
                    old_value: correction.old_value.clone(),
                    new_value: correction.new_value.clone(),
                    justification: correction.justification.clone(),
                    outcome: Outcome::MissingRow,
                });
                continue;
            }
        };

        let current = field_value(&doc, correction.field);
        if current != correction.old_value {
            warn!(
                document_id = correction.document_id,
                field = correction.field.column(),
                expected = ?correction.old_value,
                found = ?current,
                "Skipping correction: current value does not match"
            );
            stats.skipped_mismatch += 1;
            report.push(AppliedCorrection {
                document_id: correction.document_id,
                field: correction.field,
                old_value: correction.old_value.clone(),
                new_value: correction.new_value.clone(),
                justification: correction.justification.clone(),
                outcome: Outcome::ValueMismatch { current },
            });
            continue;
        }

        let now = Utc::now().to_rfc3339();
        let sql = format!(
            "UPDATE documents SET {} = ?, updated_at = ? WHERE id = ?",
            correction.field.column()
        );
        let query = if correction.field.is_score() {
            let value: i64 = correction.new_value.parse().map_err(|_| {
                Error::Correction(format!(
                    "Document {}: invalid score {:?}",
                    correction.document_id, correction.new_value
                ))
            })?;
            sqlx::query(&sql).bind(value)
        } else {
            sqlx::query(&sql).bind(&correction.new_value)
        };
        query
            .bind(&now)
            .bind(correction.document_id)
            .execute(&mut *tx)
            .await?;

        info!(
            document_id = correction.document_id,
            field = correction.field.column(),
            "Applied correction"
        );
        stats.applied += 1;
        report.push(AppliedCorrection {
            document_id: correction.document_id,
            field: correction.field,
            old_value: correction.old_value.clone(),
            new_value: correction.new_value.clone(),
            justification: correction.justification.clone(),
            outcome: Outcome::Applied,
        });
    }

    if dry_run {
        tx.rollback().await?;
    } else {
        tx.commit().await?;
    }

    Ok((stats, report))
}

/// Example corrections file for `guardian corrections template`
pub fn template() -> &'static str {
    r#"# Corrections file for `guardian corrections apply`
#
# Each [[correction]] sets one field on one document. The correction is
# applied only when the field still holds `old_value`; omit `old_value`
# to assert the field is currently null. Score fields take integers
# in [0, 100] written as strings.

[[correction]]
document_id = 43
field = "topic"
old_value = "General"
new_value = "AI"
justification = "NIST AI RMF is an AI governance framework"

[[correction]]
document_id = 43
field = "organization"
old_value = "Unknown"
new_value = "NIST"
justification = "Publisher identified from the document header"

[[correction]]
document_id = 43
field = "ai_cybersecurity_score"
new_value = "45"
justification = "Manual review: substantial AI security guidance"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{blank_document, test_store};

    fn correction(
        document_id: i64,
        field: DocField,
        old_value: Option<&str>,
        new_value: &str,
    ) -> Correction {
        Correction {
            document_id,
            field,
            old_value: old_value.map(str::to_string),
            new_value: new_value.to_string(),
            justification: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_apply_and_skip() {
        let (store, _tmp) = test_store().await;
        let mut doc = blank_document();
        doc.topic = Some("General".to_string());
        let id = store.insert_document(&doc).await.unwrap();

        let corrections = vec![
            correction(id, DocField::Topic, Some("General"), "AI"),
            // Wrong expected value
            correction(id, DocField::Organization, Some("ACME"), "NIST"),
            // Row does not exist
            correction(id + 100, DocField::Topic, Some("General"), "AI"),
        ];

        let (stats, report) = apply_corrections(&store, &corrections, false).await.unwrap();
        assert_eq!(stats.applied, 1);
        assert_eq!(stats.skipped_mismatch, 1);
        assert_eq!(stats.skipped_missing, 1);
        assert_eq!(report.len(), 3);
        assert_eq!(report[0].outcome, Outcome::Applied);

        let updated = store.get_document(id).await.unwrap().unwrap();
        assert_eq!(updated.topic.as_deref(), Some("AI"));
        // The mismatched correction left organization alone
        assert_eq!(updated.organization, None);
    }

    #[tokio::test]
    async fn test_null_old_value_asserts_null() {
        let (store, _tmp) = test_store().await;
        let id = store.insert_document(&blank_document()).await.unwrap();

        let (stats, _) = apply_corrections(
            &store,
            &[correction(id, DocField::Organization, None, "NIST")],
            false,
        )
        .await
        .unwrap();
        assert_eq!(stats.applied, 1);

        let doc = store.get_document(id).await.unwrap().unwrap();
        assert_eq!(doc.organization.as_deref(), Some("NIST"));
    }

    #[tokio::test]
    async fn test_dry_run_changes_nothing() {
        let (store, _tmp) = test_store().await;
        let mut doc = blank_document();
        doc.topic = Some("General".to_string());
        let id = store.insert_document(&doc).await.unwrap();

        let (stats, _) = apply_corrections(
            &store,
            &[correction(id, DocField::Topic, Some("General"), "AI")],
            true,
        )
        .await
        .unwrap();
        assert_eq!(stats.applied, 1);
        assert!(stats.dry_run);

        let unchanged = store.get_document(id).await.unwrap().unwrap();
        assert_eq!(unchanged.topic.as_deref(), Some("General"));
    }

    #[tokio::test]
    async fn test_score_correction_parses_integer() {
        let (store, _tmp) = test_store().await;
        let id = store.insert_document(&blank_document()).await.unwrap();

        let (stats, _) = apply_corrections(
            &store,
            &[correction(id, DocField::AiEthicsScore, None, "45")],
            false,
        )
        .await
        .unwrap();
        assert_eq!(stats.applied, 1);

        let doc = store.get_document(id).await.unwrap().unwrap();
        assert_eq!(doc.ai_ethics_score, Some(45));
    }

    #[test]
    fn test_score_validation() {
        let bad = correction(1, DocField::AiEthicsScore, None, "150");
        assert!(bad.validate().is_err());
        let not_a_number = correction(1, DocField::AiEthicsScore, None, "high");
        assert!(not_a_number.validate().is_err());
        let ok = correction(1, DocField::AiEthicsScore, None, "100");
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_template_parses() {
        let file: CorrectionsFile = toml::from_str(template()).unwrap();
        assert_eq!(file.corrections.len(), 3);
        assert!(file.corrections.iter().all(|c| c.validate().is_ok()));
        assert_eq!(file.corrections[2].field, DocField::AiCybersecurityScore);
    }
}
