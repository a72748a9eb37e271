//! Clean command implementation

use super::{advance_progress, finish_progress, start_progress_bar};
use crate::config::Config;
use crate::error::Result;
use crate::sanitize::{clean_date_field, clean_field};
use crate::store::DocumentStore;
use serde::Serialize;
use tracing::{debug, info};

/// Statistics from a metadata cleaning run
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanStats {
    pub examined: usize,
    pub updated: usize,
    pub dry_run: bool,
}

/// Sanitize title, organization, document type and publish date across the
/// whole table
pub async fn cmd_clean(config: &Config, store: &DocumentStore, dry_run: bool) -> Result<CleanStats> {
    info!(dry_run, "Cleaning document metadata");

    let mut stats = CleanStats {
        dry_run,
        ..Default::default()
    };

    let docs = store.list_all().await?;
    stats.examined = docs.len();
    let passes = config.sanitize.passes;

    let pb = start_progress_bar(docs.len(), "Cleaning metadata");
    for doc in &docs {
        let title = clean_field(doc.title.as_deref(), passes);
        let organization = clean_field(doc.organization.as_deref(), passes);
        let document_type = clean_field(doc.document_type.as_deref(), passes);
        let publish_date = clean_date_field(doc.publish_date.as_deref(), passes);

        let changed = doc.title.as_deref() != Some(&title)
            || doc.organization.as_deref() != Some(&organization)
            || doc.document_type.as_deref() != Some(&document_type)
            || doc.publish_date.as_deref() != Some(&publish_date);

        if changed {
            debug!(id = doc.id, %title, %organization, "Cleaned");
            if !dry_run {
                store
                    .update_metadata(doc.id, &title, &organization, &document_type, &publish_date)
                    .await?;
            }
            stats.updated += 1;
        }
        advance_progress(&pb);
    }
    finish_progress(pb, "Cleaning done");

    Ok(stats)
}

pub fn print_clean_stats(stats: &CleanStats) {
    let label = if stats.dry_run {
        "Metadata cleaning (dry run)"
    } else {
        "Metadata cleaning"
    };
    println!("\n🧹 {} complete\n", label);
    println!("  Examined: {}", stats.examined);
    println!("  Updated: {}", stats.updated);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{blank_document, test_store};

    #[tokio::test]
    async fn test_clean_repairs_polluted_fields() {
        let (store, _tmp) = test_store().await;
        let config = Config::default();

        let mut doc = blank_document();
        doc.title = Some("</div>Special<div>Committee".to_string());
        doc.organization = Some("pecial Report Office".to_string());
        doc.document_type = Some("None".to_string());
        doc.publish_date = Some("<b></b>".to_string());
        let id = store.insert_document(&doc).await.unwrap();

        let stats = cmd_clean(&config, &store, false).await.unwrap();
        assert_eq!(stats.updated, 1);

        let doc = store.get_document(id).await.unwrap().unwrap();
        assert_eq!(doc.title.as_deref(), Some("Special Committee"));
        assert_eq!(doc.organization.as_deref(), Some("Special Report Office"));
        assert_eq!(doc.document_type.as_deref(), Some("Unknown"));
        assert_eq!(doc.publish_date.as_deref(), Some("Date not available"));
    }

    #[tokio::test]
    async fn test_clean_is_stable_on_second_run() {
        let (store, _tmp) = test_store().await;
        let config = Config::default();

        let mut doc = blank_document();
        doc.title = Some("<p>European&nbsp;Commission</p>".to_string());
        doc.organization = Some("European Commission".to_string());
        doc.document_type = Some("Policy".to_string());
        doc.publish_date = Some("2023-10-30".to_string());
        store.insert_document(&doc).await.unwrap();

        let first = cmd_clean(&config, &store, false).await.unwrap();
        assert_eq!(first.updated, 1);
        let second = cmd_clean(&config, &store, false).await.unwrap();
        assert_eq!(second.updated, 0);
    }
}
