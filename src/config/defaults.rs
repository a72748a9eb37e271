//! Default values for configuration
//!
//! The indicator tables below are the canonical "enhanced" variants that the
//! drifted maintenance scripts converged on; they ship as defaults and can be
//! overridden wholesale from the config file.

use super::{Boost, FrameworkTable, Indicator};

/// Default bind address for the scoring API
pub fn default_server_bind() -> String {
    "0.0.0.0".to_string()
}

/// Default port for the scoring API
pub fn default_server_port() -> u16 {
    5002
}

/// Default maximum sanitizer passes
pub fn default_sanitize_passes() -> usize {
    5
}

/// Default minimum content length for scoring
pub fn default_min_content_chars() -> usize {
    100
}

/// Default per-phrase contribution cap multiplier
pub fn default_cap_multiplier() -> u32 {
    2
}

fn phrases(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn indicators(pairs: &[(&str, u32)]) -> Vec<Indicator> {
    pairs
        .iter()
        .map(|(phrase, weight)| Indicator {
            phrase: phrase.to_string(),
            weight: *weight,
        })
        .collect()
}

fn boost(any_of: &[&str], points: u32) -> Boost {
    Boost {
        any_of: phrases(any_of),
        points,
    }
}

/// AI indicator phrases for the general topic classifier
pub fn default_ai_indicators() -> Vec<String> {
    phrases(&[
        "artificial intelligence",
        "machine learning",
        "ai policy",
        "ai framework",
        "ai strategy",
        "ai governance",
        "neural network",
        "deep learning",
        "ai ethics",
        "ai safety",
        "ai risk",
        "generative ai",
        "ai system",
        "ethics of artificial intelligence",
        "recommendation on the ethics",
        "ai technologies",
        "ethical ai",
        "responsible ai",
        "ai development",
        "ai deployment",
        "algorithmic",
        "automated decision",
        "intelligent system",
    ])
}

/// Quantum indicator phrases for the general topic classifier
pub fn default_quantum_indicators() -> Vec<String> {
    phrases(&[
        "quantum policy",
        "quantum approach",
        "quantum technology",
        "quantum computing",
        "quantum cryptography",
        "quantum security",
        "post-quantum",
        "quantum-safe",
        "quantum initiative",
        "quantum strategy",
        "quantum framework",
        "qkd",
        "quantum key distribution",
        "quantum resistant",
        "quantum threat",
        "quantum",
        "qubit",
        "quantum state",
        "quantum mechanics",
        "quantum information",
    ])
}

/// Cybersecurity indicator phrases for the pure-cybersecurity detector
pub fn default_cybersecurity_indicators() -> Vec<String> {
    phrases(&[
        "digital identity",
        "authentication",
        "authorization",
        "access control",
        "identity management",
        "credential",
        "verification",
        "digital certificates",
        "password",
        "multifactor",
        "biometric",
        "encryption",
        "cryptography",
        "security controls",
        "threat assessment",
        "vulnerability",
        "risk management",
        "incident response",
        "security framework",
        "cybersecurity",
        "information security",
        "network security",
        "data protection",
        "privacy",
        "security policy",
        "security standards",
        "compliance",
        "audit",
        "penetration testing",
        "intrusion detection",
        "firewall",
        "security monitoring",
    ])
}

/// Narrow AI phrase set for the cybersecurity detector; a document with 3+
/// of these is not "pure cybersecurity"
pub fn default_cyber_ai_indicators() -> Vec<String> {
    phrases(&[
        "artificial intelligence",
        "machine learning",
        "neural network",
        "deep learning",
        "ai model",
        "algorithm training",
        "predictive analytics",
        "natural language processing",
        "computer vision",
        "ai system",
    ])
}

/// Narrow quantum phrase set for the cybersecurity detector
pub fn default_cyber_quantum_indicators() -> Vec<String> {
    phrases(&[
        "quantum computing",
        "quantum cryptography",
        "quantum key",
        "post-quantum",
        "quantum resistant",
        "quantum algorithm",
        "quantum supremacy",
        "qubit",
        "quantum entanglement",
    ])
}

/// Default AI cybersecurity scoring table
pub fn default_ai_cybersecurity_table() -> FrameworkTable {
    FrameworkTable {
        cap_multiplier: 3,
        indicators: indicators(&[
            ("ai security", 15),
            ("artificial intelligence security", 15),
            ("ai governance", 12),
            ("ai risk", 12),
            ("algorithmic bias", 10),
            ("ai ethics", 10),
            ("ai safety", 10),
            ("machine learning security", 8),
            ("ai transparency", 8),
            ("ai accountability", 8),
            ("ai fairness", 8),
            ("ai robustness", 6),
            ("ai privacy", 6),
            ("ai explainability", 6),
            ("responsible ai", 6),
            ("ai regulation", 5),
            ("ai standards", 5),
            ("ai compliance", 5),
        ]),
        title_boosts: vec![boost(&["security", "secure", "cybersecurity"], 5)],
        content_boosts: Vec::new(),
    }
}

/// Default AI ethics scoring table
pub fn default_ai_ethics_table() -> FrameworkTable {
    FrameworkTable {
        cap_multiplier: 2,
        indicators: indicators(&[
            ("ai ethics", 12),
            ("artificial intelligence ethics", 12),
            ("ethical ai", 10),
            ("ai governance", 8),
            ("ai fairness", 8),
            ("algorithmic bias", 8),
            ("ai transparency", 6),
            ("ai accountability", 6),
            ("responsible ai", 6),
            ("ai human rights", 6),
            ("ai dignity", 5),
            ("ai justice", 5),
            ("ai equity", 5),
            ("ai inclusion", 5),
            ("ai diversity", 4),
            ("ai discrimination", 6),
            ("ai privacy", 5),
            ("ai autonomy", 4),
            ("ai values", 4),
            ("ai principles", 4),
            ("bias detection", 5),
            ("fairness testing", 5),
            ("ethical considerations", 4),
            ("responsible development", 4),
            ("ai safety", 5),
            ("trustworthy ai", 6),
        ]),
        title_boosts: vec![
            boost(&["ai", "artificial intelligence"], 8),
            boost(&["security", "secure", "cybersecurity"], 5),
            boost(&["red team", "evaluation", "testing"], 6),
            boost(&["deploy", "guidance", "playbook", "principles"], 5),
        ],
        content_boosts: Vec::new(),
    }
}

/// Default quantum cybersecurity scoring table
pub fn default_quantum_cybersecurity_table() -> FrameworkTable {
    FrameworkTable {
        cap_multiplier: 2,
        indicators: indicators(&[
            ("quantum cryptography", 15),
            ("quantum security", 15),
            ("quantum-safe", 12),
            ("post-quantum cryptography", 12),
            ("quantum key distribution", 10),
            ("quantum-resistant", 10),
            ("quantum computing security", 10),
            ("quantum threat", 8),
            ("quantum-proof", 8),
            ("quantum encryption", 8),
            ("shor algorithm", 8),
            ("quantum vulnerability", 6),
            ("quantum attack", 6),
            ("grover algorithm", 6),
            ("quantum algorithm", 5),
            ("quantum supremacy", 5),
            ("quantum advantage", 5),
            ("quantum entanglement", 4),
            ("quantum superposition", 4),
            ("qubits", 3),
        ]),
        title_boosts: vec![
            boost(&["quantum", "post-quantum"], 10),
            boost(
                &[
                    "regulating",
                    "transformative technology",
                    "intellectual property",
                ],
                12,
            ),
        ],
        content_boosts: vec![boost(
            &[
                "national security",
                "nsm-",
                "national security memorandum",
            ],
            8,
        )],
    }
}

/// Default quantum ethics scoring table
pub fn default_quantum_ethics_table() -> FrameworkTable {
    FrameworkTable {
        cap_multiplier: 2,
        indicators: indicators(&[
            ("quantum ethics", 15),
            ("quantum governance", 12),
            ("quantum regulation", 10),
            ("ethical quantum", 10),
            ("quantum policy", 8),
            ("quantum responsibility", 8),
            ("quantum fairness", 8),
            ("quantum inclusion", 8),
            ("quantum sustainability", 8),
            ("responsible quantum", 8),
            ("quantum oversight", 6),
            ("quantum standards", 6),
            ("quantum access", 6),
            ("quantum equity", 6),
            ("quantum society", 6),
            ("quantum implications", 5),
            ("quantum impact", 5),
            ("quantum development", 4),
            ("quantum future", 4),
        ]),
        title_boosts: vec![
            boost(&["ethics", "inclusion", "sustainability", "governance"], 15),
            boost(
                &[
                    "transformative technology",
                    "intellectual property",
                    "sustainable innovation",
                ],
                10,
            ),
        ],
        content_boosts: Vec::new(),
    }
}
