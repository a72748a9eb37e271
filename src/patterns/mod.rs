//! Learned-patterns store
//!
//! A secondary SQLite database (default `~/.guardian/patterns.db`) holding
//! correction patterns accumulated from manual review sessions. Patterns are
//! recorded and listed here; nothing in the scoring pipeline consults them.

use crate::error::{Error, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

const PATTERNS_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS learned_patterns (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pattern_id TEXT UNIQUE,
    pattern_type TEXT,
    trigger_conditions TEXT,
    correction_rule TEXT,
    confidence_score REAL,
    usage_count INTEGER,
    success_rate REAL,
    created_at TEXT,
    last_updated TEXT
);

CREATE TABLE IF NOT EXISTS verification_patterns (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    document_id TEXT,
    original_extraction TEXT,
    verified_extraction TEXT,
    user_corrections TEXT,
    content_sample TEXT,
    extraction_confidence TEXT,
    timestamp TEXT,
    document_type TEXT,
    source_type TEXT,
    content_hash TEXT UNIQUE
);
"#;

/// A reusable correction rule keyed by `pattern_id`.
///
/// `trigger_conditions` and `correction_rule` are free-form JSON; their shape
/// belongs to the review tooling, not to this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnedPattern {
    pub pattern_id: String,
    pub pattern_type: String,
    pub trigger_conditions: serde_json::Value,
    pub correction_rule: serde_json::Value,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub usage_count: i64,
    #[serde(default)]
    pub success_rate: f64,
}

/// One manually verified extraction, with the original for contrast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationPattern {
    pub document_id: String,
    pub original_extraction: serde_json::Value,
    pub verified_extraction: serde_json::Value,
    pub user_corrections: serde_json::Value,
    pub content_sample: String,
    #[serde(default)]
    pub extraction_confidence: serde_json::Value,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub source_type: Option<String>,
}

/// Patterns file layout for `guardian patterns record`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternsFile {
    #[serde(default)]
    pub learned: Vec<LearnedPattern>,
    #[serde(default)]
    pub verification: Vec<VerificationPattern>,
}

impl PatternsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: PatternsFile = toml::from_str(&content)?;
        if file.learned.is_empty() && file.verification.is_empty() {
            return Err(Error::Config(format!(
                "No patterns found in {}",
                path.display()
            )));
        }
        Ok(file)
    }
}

/// A learned pattern as stored, with bookkeeping columns
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LearnedPatternRow {
    pub pattern_id: String,
    pub pattern_type: String,
    pub trigger_conditions: String,
    pub correction_rule: String,
    pub confidence_score: f64,
    pub usage_count: i64,
    pub success_rate: f64,
    pub created_at: String,
    pub last_updated: String,
}

/// Handle to the patterns database
#[derive(Clone)]
pub struct PatternStore {
    pool: SqlitePool,
}

impl PatternStore {
    /// Open (creating if missing) the patterns database at `path`
    pub async fn open(path: &Path) -> Result<Self> {
        debug!("Opening patterns store at {:?}", path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let url = format!("sqlite://{}", path.display());
        let options = SqliteConnectOptions::from_str(&url)
            .map_err(|e| Error::Config(format!("Invalid patterns db path: {}", e)))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(PATTERNS_SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert or replace a learned pattern by `pattern_id`
    pub async fn record_learned(&self, pattern: &LearnedPattern) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO learned_patterns
                (pattern_id, pattern_type, trigger_conditions, correction_rule,
                 confidence_score, usage_count, success_rate, created_at, last_updated)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&pattern.pattern_id)
        .bind(&pattern.pattern_type)
        .bind(serde_json::to_string(&pattern.trigger_conditions)?)
        .bind(serde_json::to_string(&pattern.correction_rule)?)
        .bind(pattern.confidence_score)
        .bind(pattern.usage_count)
        .bind(pattern.success_rate)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        info!(pattern_id = %pattern.pattern_id, "Recorded learned pattern");
        Ok(())
    }

    /// Insert or replace a verification pattern, fingerprinted by a blake3
    /// hash of its content sample
    pub async fn record_verification(&self, pattern: &VerificationPattern) -> Result<()> {
        let content_hash = blake3::hash(pattern.content_sample.as_bytes()).to_hex();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO verification_patterns
                (document_id, original_extraction, verified_extraction, user_corrections,
                 content_sample, extraction_confidence, timestamp, document_type,
                 source_type, content_hash)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&pattern.document_id)
        .bind(serde_json::to_string(&pattern.original_extraction)?)
        .bind(serde_json::to_string(&pattern.verified_extraction)?)
        .bind(serde_json::to_string(&pattern.user_corrections)?)
        .bind(&pattern.content_sample)
        .bind(serde_json::to_string(&pattern.extraction_confidence)?)
        .bind(&now)
        .bind(&pattern.document_type)
        .bind(&pattern.source_type)
        .bind(content_hash.as_str())
        .execute(&self.pool)
        .await?;

        info!(document_id = %pattern.document_id, "Recorded verification pattern");
        Ok(())
    }

    /// All learned patterns, ordered by id
    pub async fn list_learned(&self) -> Result<Vec<LearnedPatternRow>> {
        let rows = sqlx::query_as::<_, LearnedPatternRow>(
            r#"
            SELECT pattern_id, pattern_type, trigger_conditions, correction_rule,
                   confidence_score, usage_count, success_rate, created_at, last_updated
            FROM learned_patterns ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn learned_count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM learned_patterns")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn verification_count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM verification_patterns")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
