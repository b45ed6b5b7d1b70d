// Lexicon-based polarity scorer.
//
// Each lowercase word is looked up in a polarity lexicon. A run of modifier
// words directly before a polar word scales it: intensifiers multiply it,
// negations flip and dampen it (factor -0.5). The text's polarity is the mean
// over the polar words found, or 0.0 when there are none.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use regex_lite::Regex;
use tracing::{debug, info};

use super::traits::SentimentScorer;

/// Multiplier applied by a negation word ("not good" scores -0.5 * good).
const NEGATION_FACTOR: f64 = -0.5;

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nobody", "nothing", "none", "neither", "nor", "hardly", "cannot",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.2),
    ("too", 1.2),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("super", 1.3),
    ("totally", 1.2),
    ("absolutely", 1.4),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("somewhat", 0.7),
    ("slightly", 0.6),
    ("barely", 0.5),
];

const POLARITIES: &[(&str, f64)] = &[
    // Positive
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("better", 0.5),
    ("brilliant", 0.9),
    ("celebrate", 0.5),
    ("cool", 0.35),
    ("enjoy", 0.4),
    ("excellent", 1.0),
    ("excited", 0.4),
    ("fantastic", 0.4),
    ("fun", 0.3),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("hope", 0.3),
    ("inspiring", 0.6),
    ("like", 0.2),
    ("love", 0.5),
    ("lovely", 0.5),
    ("lucky", 0.4),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("proud", 0.8),
    ("strong", 0.4),
    ("support", 0.3),
    ("thanks", 0.2),
    ("thank", 0.2),
    ("win", 0.8),
    ("wonderful", 1.0),
    ("wow", 0.1),
    // Negative
    ("angry", -0.5),
    ("annoying", -0.8),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("broken", -0.4),
    ("crazy", -0.6),
    ("dangerous", -0.6),
    ("dead", -0.2),
    ("disappointed", -0.75),
    ("disgusting", -1.0),
    ("dumb", -0.4),
    ("evil", -1.0),
    ("fail", -0.5),
    ("fake", -0.5),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("hurt", -0.4),
    ("lose", -0.3),
    ("mad", -0.6),
    ("poor", -0.4),
    ("sad", -0.5),
    ("scary", -0.5),
    ("sick", -0.7),
    ("stupid", -0.8),
    ("terrible", -1.0),
    ("ugly", -0.7),
    ("useless", -0.5),
    ("weak", -0.4),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

/// Local polarity scorer backed by a word lexicon.
pub struct LexiconScorer {
    polarities: HashMap<String, f64>,
    intensifiers: HashMap<&'static str, f64>,
    word_pattern: Regex,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    /// Build a scorer with the built-in lexicon.
    pub fn new() -> Self {
        Self {
            polarities: POLARITIES
                .iter()
                .map(|&(word, score)| (word.to_string(), score))
                .collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            word_pattern: Regex::new(r"[a-z][a-z']*").expect("word pattern is valid"),
        }
    }

    /// Build a scorer whose lexicon is the built-in one overlaid with the
    /// entries of a JSON object file (`{"word": polarity, ...}`).
    pub fn with_overrides(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file {}", path.display()))?;
        let overrides: HashMap<String, f64> = serde_json::from_str(&raw)
            .with_context(|| format!("Lexicon file {} is not a JSON object of numbers", path.display()))?;

        let mut scorer = Self::new();
        scorer.extend(overrides)?;
        info!(
            path = %path.display(),
            words = scorer.polarities.len(),
            "Loaded sentiment lexicon overrides"
        );
        Ok(scorer)
    }

    /// Add or replace lexicon entries. Words are lowercased.
    pub fn extend(&mut self, entries: HashMap<String, f64>) -> Result<()> {
        for (word, score) in entries {
            if !score.is_finite() || !(-1.0..=1.0).contains(&score) {
                anyhow::bail!("Lexicon polarity for {word:?} must be within [-1, 1], got {score}");
            }
            self.polarities.insert(word.to_lowercase(), score);
        }
        Ok(())
    }

    /// Number of words in the lexicon.
    pub fn len(&self) -> usize {
        self.polarities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polarities.is_empty()
    }

    fn modifier(&self, word: &str) -> Option<f64> {
        if NEGATIONS.contains(&word) || word.ends_with("n't") {
            return Some(NEGATION_FACTOR);
        }
        self.intensifiers.get(word).copied()
    }
}

impl SentimentScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> Result<f64> {
        let lower = text.to_lowercase();

        let mut total = 0.0;
        let mut matched = 0usize;
        let mut multiplier = 1.0;

        for word in self.word_pattern.find_iter(&lower).map(|m| m.as_str()) {
            if let Some(score) = self.polarities.get(word) {
                total += (score * multiplier).clamp(-1.0, 1.0);
                matched += 1;
                multiplier = 1.0;
            } else if let Some(factor) = self.modifier(word) {
                multiplier *= factor;
            } else {
                multiplier = 1.0;
            }
        }

        let polarity = if matched == 0 {
            0.0
        } else {
            (total / matched as f64).clamp(-1.0, 1.0)
        };

        debug!(matched, polarity, "Scored text");
        Ok(polarity)
    }
}
