//! SQLite schema for the document row store

/// SQL schema for the documents table.
///
/// The row store is owned by the wider GUARDIAN deployment; this DDL exists
/// so `guardian init` and the test suite can stand up a fresh database.
pub const SCHEMA_SQL: &str = r#"
-- Documents: policy/technical documents with topic and framework scores
CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    content TEXT,
    text_content TEXT,
    topic TEXT,
    document_type TEXT,
    organization TEXT,
    publish_date TEXT,
    ai_cybersecurity_score INTEGER,
    ai_ethics_score INTEGER,
    quantum_cybersecurity_score INTEGER,
    quantum_ethics_score INTEGER,
    url_status TEXT,
    url_valid INTEGER,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_documents_topic ON documents(topic);
"#;
