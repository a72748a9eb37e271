//! Topic classification
//!
//! Keyword-presence classifier over lowercased document text. Each indicator
//! phrase counts once no matter how often it repeats; precedence rules then
//! pick exactly one label. No stemming, no punctuation normalization;
//! literal case-insensitive substring containment only.

use crate::config::TopicIndicators;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Topic label assigned to a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topic {
    #[serde(rename = "AI")]
    Ai,
    Quantum,
    Cybersecurity,
    Both,
    General,
}

/// Fallback when neither AI nor quantum indicators are found.
///
/// The historical pipeline defaulted unmatched documents to AI rather than
/// General so nothing accumulates unclassified; see DESIGN.md.
pub const DEFAULT_TOPIC: Topic = Topic::Ai;

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::Ai => write!(f, "AI"),
            Topic::Quantum => write!(f, "Quantum"),
            Topic::Cybersecurity => write!(f, "Cybersecurity"),
            Topic::Both => write!(f, "Both"),
            Topic::General => write!(f, "General"),
        }
    }
}

impl FromStr for Topic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ai" => Ok(Topic::Ai),
            "quantum" => Ok(Topic::Quantum),
            "cybersecurity" => Ok(Topic::Cybersecurity),
            "both" => Ok(Topic::Both),
            "general" => Ok(Topic::General),
            _ => Err(Error::Config(format!("Unknown topic: {}", s))),
        }
    }
}

/// How many of the given phrases occur in the haystack (presence, not
/// occurrence count)
fn presence_count(haystack: &str, phrases: &[String]) -> usize {
    phrases
        .iter()
        .filter(|p| !p.is_empty() && haystack.contains(p.as_str()))
        .count()
}

/// Indicator counts behind a classification decision
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TopicSignal {
    pub ai_count: usize,
    pub quantum_count: usize,
}

/// Classify a document into exactly one topic label.
///
/// Title, content, organization and document type are lowercased and
/// concatenated into one search string. Total: every input, including empty
/// title and content, yields a label.
pub fn classify_topic(
    title: Option<&str>,
    content: Option<&str>,
    organization: Option<&str>,
    document_type: Option<&str>,
    tables: &TopicIndicators,
) -> (Topic, TopicSignal) {
    let combined = format!(
        "{} {} {} {}",
        title.unwrap_or_default(),
        content.unwrap_or_default(),
        organization.unwrap_or_default(),
        document_type.unwrap_or_default()
    )
    .to_lowercase();

    let ai_count = presence_count(&combined, &tables.ai);
    let quantum_count = presence_count(&combined, &tables.quantum);
    let signal = TopicSignal {
        ai_count,
        quantum_count,
    };

    let topic = if quantum_count >= 2 && quantum_count > ai_count {
        Topic::Quantum
    } else if ai_count >= 1 && ai_count >= quantum_count {
        Topic::Ai
    } else if quantum_count >= 1 && ai_count >= 1 {
        Topic::Both
    } else {
        DEFAULT_TOPIC
    };

    (topic, signal)
}

/// Detect documents focused on cybersecurity without AI/quantum content.
///
/// Requires a strong cybersecurity signal (5+ indicators) and minimal
/// AI/quantum signal (fewer than 3 each, over the narrow phrase sets).
/// Documents without content are never pure cybersecurity.
pub fn is_cybersecurity_focused(
    title: Option<&str>,
    content: Option<&str>,
    tables: &TopicIndicators,
) -> bool {
    let content = match content {
        Some(c) if !c.is_empty() => c,
        _ => return false,
    };

    let combined = format!("{} {}", title.unwrap_or_default(), content).to_lowercase();

    let cyber_count = presence_count(&combined, &tables.cybersecurity);
    let ai_count = presence_count(&combined, &tables.cyber_ai);
    let quantum_count = presence_count(&combined, &tables.cyber_quantum);

    cyber_count >= 5 && ai_count < 3 && quantum_count < 3
}
