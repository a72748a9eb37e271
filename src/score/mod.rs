//! Framework scoring
//!
//! Weighted keyword scoring over document content. For each phrase in a
//! framework table the occurrence count (not just presence) contributes
//! `min(weight * count, weight * cap)`, title/content boosts are added, and
//! the total is clamped to [0, 100]. Content shorter than the configured
//! minimum scores 0.

use crate::classify::Topic;
use crate::config::{FrameworkTable, ScoringConfig};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four scored frameworks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Framework {
    AiCybersecurity,
    AiEthics,
    QuantumCybersecurity,
    QuantumEthics,
}

impl Framework {
    pub const ALL: [Framework; 4] = [
        Framework::AiCybersecurity,
        Framework::AiEthics,
        Framework::QuantumCybersecurity,
        Framework::QuantumEthics,
    ];

    /// Short code used in API routes (`ai_cyber`, `q_ethics`, ...)
    pub fn code(&self) -> &'static str {
        match self {
            Framework::AiCybersecurity => "ai_cyber",
            Framework::AiEthics => "ai_ethics",
            Framework::QuantumCybersecurity => "q_cyber",
            Framework::QuantumEthics => "q_ethics",
        }
    }

    /// Row-store column holding this framework's score
    pub fn column(&self) -> &'static str {
        match self {
            Framework::AiCybersecurity => "ai_cybersecurity_score",
            Framework::AiEthics => "ai_ethics_score",
            Framework::QuantumCybersecurity => "quantum_cybersecurity_score",
            Framework::QuantumEthics => "quantum_ethics_score",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Framework::AiCybersecurity => write!(f, "AI Cybersecurity"),
            Framework::AiEthics => write!(f, "AI Ethics"),
            Framework::QuantumCybersecurity => write!(f, "Quantum Cybersecurity"),
            Framework::QuantumEthics => write!(f, "Quantum Ethics"),
        }
    }
}

impl FromStr for Framework {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ai_cyber" | "ai_cybersecurity" => Ok(Framework::AiCybersecurity),
            "ai_ethics" => Ok(Framework::AiEthics),
            "q_cyber" | "quantum_cybersecurity" => Ok(Framework::QuantumCybersecurity),
            "q_ethics" | "quantum_ethics" => Ok(Framework::QuantumEthics),
            _ => Err(Error::Config(format!("Unknown framework: {}", s))),
        }
    }
}

/// Score plus the terms that produced it, for before/after diffs
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub score: i64,
    pub matched_terms: Vec<String>,
}

fn count_occurrences(haystack: &str, needle: &str) -> u32 {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count() as u32
}

/// Score one framework for a document.
///
/// Returns 0 with no matched terms when content is missing or shorter than
/// `min_content_chars`; that is a skip condition, not an error.
pub fn score_framework(
    content: Option<&str>,
    title: Option<&str>,
    table: &FrameworkTable,
    min_content_chars: usize,
) -> ScoreBreakdown {
    let content = match content {
        Some(c) if c.len() >= min_content_chars => c,
        _ => {
            return ScoreBreakdown {
                score: 0,
                matched_terms: Vec::new(),
            }
        }
    };

    let content_lower = content.to_lowercase();
    let title_lower = title.unwrap_or_default().to_lowercase();

    let mut score: u32 = 0;
    let mut matched_terms = Vec::new();

    for indicator in &table.indicators {
        let phrase = indicator.phrase.to_lowercase();
        let count = count_occurrences(&content_lower, &phrase);
        if count > 0 {
            let contribution =
                (indicator.weight * count).min(indicator.weight * table.cap_multiplier);
            score += contribution;
            matched_terms.push(format!("{}({})", indicator.phrase, count));
        }
    }

    for b in &table.title_boosts {
        if b.any_of.iter().any(|p| title_lower.contains(&p.to_lowercase())) {
            score += b.points;
            matched_terms.push(format!("title_boost(+{})", b.points));
        }
    }

    for b in &table.content_boosts {
        if b.any_of
            .iter()
            .any(|p| content_lower.contains(&p.to_lowercase()))
        {
            score += b.points;
            matched_terms.push(format!("content_boost(+{})", b.points));
        }
    }

    ScoreBreakdown {
        score: score.min(100) as i64,
        matched_terms,
    }
}

/// The four framework scores for one document; `None` means not applicable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreSet {
    pub ai_cybersecurity: Option<i64>,
    pub ai_ethics: Option<i64>,
    pub quantum_cybersecurity: Option<i64>,
    pub quantum_ethics: Option<i64>,
}

impl ScoreSet {
    pub fn get(&self, framework: Framework) -> Option<i64> {
        match framework {
            Framework::AiCybersecurity => self.ai_cybersecurity,
            Framework::AiEthics => self.ai_ethics,
            Framework::QuantumCybersecurity => self.quantum_cybersecurity,
            Framework::QuantumEthics => self.quantum_ethics,
        }
    }
}

/// Which frameworks apply to a topic: purely AI documents get null quantum
/// scores and vice versa
fn framework_applies(topic: Topic, framework: Framework) -> bool {
    match (topic, framework) {
        (Topic::Ai, Framework::QuantumCybersecurity | Framework::QuantumEthics) => false,
        (Topic::Quantum, Framework::AiCybersecurity | Framework::AiEthics) => false,
        _ => true,
    }
}

/// Score all applicable frameworks for a document
pub fn score_document(
    content: Option<&str>,
    title: Option<&str>,
    topic: Topic,
    config: &ScoringConfig,
) -> ScoreSet {
    let table_for = |framework: Framework| -> &FrameworkTable {
        match framework {
            Framework::AiCybersecurity => &config.ai_cybersecurity,
            Framework::AiEthics => &config.ai_ethics,
            Framework::QuantumCybersecurity => &config.quantum_cybersecurity,
            Framework::QuantumEthics => &config.quantum_ethics,
        }
    };

    let mut scores = ScoreSet::default();
    for framework in Framework::ALL {
        if !framework_applies(topic, framework) {
            continue;
        }
        let breakdown =
            score_framework(content, title, table_for(framework), config.min_content_chars);
        let slot = match framework {
            Framework::AiCybersecurity => &mut scores.ai_cybersecurity,
            Framework::AiEthics => &mut scores.ai_ethics,
            Framework::QuantumCybersecurity => &mut scores.quantum_cybersecurity,
            Framework::QuantumEthics => &mut scores.quantum_ethics,
        };
        *slot = Some(breakdown.score);
    }
    scores
}
