//! Document row-store access
//!
//! All reads and writes against the external `documents` table. Connection
//! comes from the `DATABASE_URL` environment variable; each batch command
//! uses one pool and commits per statement, except corrections, which run in
//! a single transaction (see `corrections`).

mod schema;

pub use schema::*;

use crate::classify::Topic;
use crate::error::{Error, Result};
use crate::score::ScoreSet;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::str::FromStr;
use tracing::{debug, info};

/// Fields a correction is allowed to touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocField {
    Title,
    Organization,
    DocumentType,
    PublishDate,
    Topic,
    UrlStatus,
    AiCybersecurityScore,
    AiEthicsScore,
    QuantumCybersecurityScore,
    QuantumEthicsScore,
}

impl DocField {
    /// Column name; the whitelist keeps corrections away from arbitrary SQL
    pub fn column(&self) -> &'static str {
        match self {
            DocField::Title => "title",
            DocField::Organization => "organization",
            DocField::DocumentType => "document_type",
            DocField::PublishDate => "publish_date",
            DocField::Topic => "topic",
            DocField::UrlStatus => "url_status",
            DocField::AiCybersecurityScore => "ai_cybersecurity_score",
            DocField::AiEthicsScore => "ai_ethics_score",
            DocField::QuantumCybersecurityScore => "quantum_cybersecurity_score",
            DocField::QuantumEthicsScore => "quantum_ethics_score",
        }
    }

    pub fn is_score(&self) -> bool {
        matches!(
            self,
            DocField::AiCybersecurityScore
                | DocField::AiEthicsScore
                | DocField::QuantumCybersecurityScore
                | DocField::QuantumEthicsScore
        )
    }
}

/// A document row
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub text_content: Option<String>,
    pub topic: Option<String>,
    pub document_type: Option<String>,
    pub organization: Option<String>,
    pub publish_date: Option<String>,
    pub ai_cybersecurity_score: Option<i64>,
    pub ai_ethics_score: Option<i64>,
    pub quantum_cybersecurity_score: Option<i64>,
    pub quantum_ethics_score: Option<i64>,
    pub url_status: Option<String>,
    pub url_valid: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl Document {
    /// Preferred scoring text: `text_content` when present, else `content`
    pub fn scoring_content(&self) -> Option<&str> {
        self.text_content
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.content.as_deref())
    }

    pub fn scores(&self) -> ScoreSet {
        ScoreSet {
            ai_cybersecurity: self.ai_cybersecurity_score,
            ai_ethics: self.ai_ethics_score,
            quantum_cybersecurity: self.quantum_cybersecurity_score,
            quantum_ethics: self.quantum_ethics_score,
        }
    }
}

/// Per-topic document count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicCount {
    pub topic: String,
    pub count: i64,
}

/// Document store handle
#[derive(Clone)]
pub struct DocumentStore {
    pool: SqlitePool,
}

impl DocumentStore {
    /// Connect using the `DATABASE_URL` environment variable
    pub async fn connect() -> Result<Self> {
        let url = crate::config::database_url()?;
        Self::connect_with(&url).await
    }

    /// Connect to an explicit database URL
    pub async fn connect_with(url: &str) -> Result<Self> {
        debug!("Connecting to document store");

        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| Error::Config(format!("Invalid DATABASE_URL: {}", e)))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// The underlying pool, for multi-statement transactions
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the documents schema
    pub async fn init_schema(&self) -> Result<()> {
        info!("Initializing document schema");
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Get document by ID
    pub async fn get_document(&self, id: i64) -> Result<Option<Document>> {
        let doc = sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc)
    }

    /// Insert a new document, returning its id
    pub async fn insert_document(&self, doc: &Document) -> Result<i64> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            r#"
            INSERT INTO documents (title, content, text_content, topic, document_type,
                organization, publish_date, ai_cybersecurity_score, ai_ethics_score,
                quantum_cybersecurity_score, quantum_ethics_score, url_status, url_valid,
                created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&doc.title)
        .bind(&doc.content)
        .bind(&doc.text_content)
        .bind(&doc.topic)
        .bind(&doc.document_type)
        .bind(&doc.organization)
        .bind(&doc.publish_date)
        .bind(doc.ai_cybersecurity_score)
        .bind(doc.ai_ethics_score)
        .bind(doc.quantum_cybersecurity_score)
        .bind(doc.quantum_ethics_score)
        .bind(&doc.url_status)
        .bind(doc.url_valid)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// List all documents ordered by id
    pub async fn list_all(&self) -> Result<Vec<Document>> {
        let docs = sqlx::query_as::<_, Document>("SELECT * FROM documents ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(docs)
    }

    /// Documents needing topic reclassification: General, Both, empty or null
    pub async fn list_reclassification_candidates(&self) -> Result<Vec<Document>> {
        let docs = sqlx::query_as::<_, Document>(
            r#"
            SELECT * FROM documents
            WHERE topic = 'General' OR topic IS NULL OR topic = '' OR topic = 'Both'
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(docs)
    }

    /// Candidates for the pure-cybersecurity override: null, AI or General
    pub async fn list_cybersecurity_candidates(&self) -> Result<Vec<Document>> {
        let docs = sqlx::query_as::<_, Document>(
            r#"
            SELECT * FROM documents
            WHERE topic IS NULL OR topic = 'AI' OR topic = 'General'
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(docs)
    }

    /// Update a document's topic, bumping updated_at
    pub async fn update_topic(&self, id: i64, topic: Topic) -> Result<()> {
        sqlx::query("UPDATE documents SET topic = ?, updated_at = ? WHERE id = ?")
            .bind(topic.to_string())
            .bind(Utc::now().to_rfc3339())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Write topic and all four framework scores in one statement.
    ///
    /// Scores and topic always move together so the applicability invariant
    /// (pure AI => null quantum scores, and vice versa) cannot be violated
    /// between statements.
    pub async fn update_scores(&self, id: i64, topic: Topic, scores: &ScoreSet) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE documents
            SET topic = ?,
                ai_cybersecurity_score = ?,
                ai_ethics_score = ?,
                quantum_cybersecurity_score = ?,
                quantum_ethics_score = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(topic.to_string())
        .bind(scores.ai_cybersecurity)
        .bind(scores.ai_ethics)
        .bind(scores.quantum_cybersecurity)
        .bind(scores.quantum_ethics)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Update display metadata fields, bumping updated_at
    pub async fn update_metadata(
        &self,
        id: i64,
        title: &str,
        organization: &str,
        document_type: &str,
        publish_date: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE documents
            SET title = ?, organization = ?, document_type = ?, publish_date = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(title)
        .bind(organization)
        .bind(document_type)
        .bind(publish_date)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Current value of a correctable field, rendered as text
    pub async fn get_field(&self, id: i64, field: DocField) -> Result<Option<String>> {
        let doc = self
            .get_document(id)
            .await?
            .ok_or(Error::DocumentNotFound(id))?;
        Ok(field_value(&doc, field))
    }

    /// Topic distribution across all documents
    pub async fn topic_distribution(&self) -> Result<Vec<TopicCount>> {
        let rows: Vec<(Option<String>, i64)> = sqlx::query_as(
            r#"
            SELECT topic, COUNT(*) as count
            FROM documents
            GROUP BY topic
            ORDER BY count DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(topic, count)| TopicCount {
                topic: topic.unwrap_or_else(|| "(none)".to_string()),
                count,
            })
            .collect())
    }

    /// Total number of documents
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// How many documents carry a non-null score in the given column
    pub async fn scored_count(&self, column: &'static str) -> Result<i64> {
        let query = format!("SELECT COUNT(*) FROM documents WHERE {} IS NOT NULL", column);
        let count: i64 = sqlx::query_scalar(&query).fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// The first `limit` documents with display fields, for the API
    pub async fn api_documents(&self, limit: i64) -> Result<Vec<Document>> {
        let docs = sqlx::query_as::<_, Document>("SELECT * FROM documents ORDER BY id LIMIT ?")
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(docs)
    }
}

/// Render a document field to the text form corrections compare against
pub fn field_value(doc: &Document, field: DocField) -> Option<String> {
    match field {
        DocField::Title => doc.title.clone(),
        DocField::Organization => doc.organization.clone(),
        DocField::DocumentType => doc.document_type.clone(),
        DocField::PublishDate => doc.publish_date.clone(),
        DocField::Topic => doc.topic.clone(),
        DocField::UrlStatus => doc.url_status.clone(),
        DocField::AiCybersecurityScore => doc.ai_cybersecurity_score.map(|v| v.to_string()),
        DocField::AiEthicsScore => doc.ai_ethics_score.map(|v| v.to_string()),
        DocField::QuantumCybersecurityScore => {
            doc.quantum_cybersecurity_score.map(|v| v.to_string())
        }
        DocField::QuantumEthicsScore => doc.quantum_ethics_score.map(|v| v.to_string()),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Blank document for tests; callers fill in what they need
    pub(crate) fn blank_document() -> Document {
        Document {
            id: 0,
            title: None,
            content: None,
            text_content: None,
            topic: None,
            document_type: None,
            organization: None,
            publish_date: None,
            ai_cybersecurity_score: None,
            ai_ethics_score: None,
            quantum_cybersecurity_score: None,
            quantum_ethics_score: None,
            url_status: None,
            url_valid: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    /// File-backed test store; a pooled `:memory:` database would give each
    /// connection its own empty schema
    pub(crate) async fn test_store() -> (DocumentStore, tempfile::TempDir) {
        let tmp = tempfile::TempDir::new().unwrap();
        let url = format!("sqlite://{}", tmp.path().join("test.db").display());
        let store = DocumentStore::connect_with(&url).await.unwrap();
        store.init_schema().await.unwrap();
        (store, tmp)
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let (store, _tmp) = test_store().await;

        let mut doc = blank_document();
        doc.title = Some("NIST AI Risk Management Framework".to_string());
        doc.topic = Some("AI".to_string());
        let id = store.insert_document(&doc).await.unwrap();

        let loaded = store.get_document(id).await.unwrap().unwrap();
        assert_eq!(loaded.title.as_deref(), Some("NIST AI Risk Management Framework"));
        assert_eq!(loaded.topic.as_deref(), Some("AI"));
        assert!(store.get_document(id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reclassification_candidates() {
        let (store, _tmp) = test_store().await;

        for topic in [Some("General"), Some("Both"), Some("AI"), None, Some("")] {
            let mut doc = blank_document();
            doc.topic = topic.map(|t| t.to_string());
            store.insert_document(&doc).await.unwrap();
        }

        let candidates = store.list_reclassification_candidates().await.unwrap();
        // General, Both, null and empty qualify; a settled AI topic does not
        assert_eq!(candidates.len(), 4);

        let cyber = store.list_cybersecurity_candidates().await.unwrap();
        // null, AI and General qualify
        assert_eq!(cyber.len(), 3);
    }

    #[tokio::test]
    async fn test_update_scores_is_atomic_with_topic() {
        let (store, _tmp) = test_store().await;

        let mut doc = blank_document();
        doc.topic = Some("Both".to_string());
        doc.quantum_ethics_score = Some(40);
        let id = store.insert_document(&doc).await.unwrap();
        let before = store.get_document(id).await.unwrap().unwrap();

        let scores = ScoreSet {
            ai_cybersecurity: Some(45),
            ai_ethics: Some(10),
            quantum_cybersecurity: None,
            quantum_ethics: None,
        };
        store.update_scores(id, Topic::Ai, &scores).await.unwrap();

        let after = store.get_document(id).await.unwrap().unwrap();
        assert_eq!(after.topic.as_deref(), Some("AI"));
        assert_eq!(after.ai_cybersecurity_score, Some(45));
        // Quantum scores nulled in the same statement as the topic change
        assert_eq!(after.quantum_ethics_score, None);
        assert_ne!(after.updated_at, before.updated_at);
    }

    #[tokio::test]
    async fn test_topic_distribution() {
        let (store, _tmp) = test_store().await;

        for topic in ["AI", "AI", "Quantum", "Cybersecurity"] {
            let mut doc = blank_document();
            doc.topic = Some(topic.to_string());
            store.insert_document(&doc).await.unwrap();
        }

        let dist = store.topic_distribution().await.unwrap();
        assert_eq!(dist[0].topic, "AI");
        assert_eq!(dist[0].count, 2);
        assert_eq!(store.count().await.unwrap(), 4);
        assert_eq!(store.scored_count("ai_ethics_score").await.unwrap(), 0);
    }

    #[test]
    fn test_scoring_content_prefers_text_content() {
        let mut doc = blank_document();
        doc.content = Some("short html".to_string());
        assert_eq!(doc.scoring_content(), Some("short html"));

        doc.text_content = Some("extracted text".to_string());
        assert_eq!(doc.scoring_content(), Some("extracted text"));

        doc.text_content = Some(String::new());
        assert_eq!(doc.scoring_content(), Some("short html"));
    }
}
