//! Financial headline lexicon for rule-based polarity scoring.

use std::collections::HashMap;

use crate::services::sentiment_service::{ClassificationError, PolarityScorer};

/// Word polarities tuned for market headlines.
const POSITIVE_WORDS: &[(&str, f64)] = &[
    ("accelerate", 0.4),
    ("advance", 0.4),
    ("beat", 0.6),
    ("best", 0.7),
    ("boom", 0.6),
    ("boost", 0.5),
    ("breakout", 0.6),
    ("breakthrough", 0.6),
    ("bullish", 0.8),
    ("climb", 0.5),
    ("confident", 0.5),
    ("dividend", 0.2),
    ("exceed", 0.6),
    ("expand", 0.4),
    ("gain", 0.5),
    ("good", 0.6),
    ("great", 0.7),
    ("grow", 0.5),
    ("growth", 0.6),
    ("high", 0.3),
    ("improve", 0.5),
    ("innovative", 0.5),
    ("jump", 0.5),
    ("optimistic", 0.6),
    ("outperform", 0.7),
    ("positive", 0.5),
    ("profit", 0.6),
    ("profitable", 0.6),
    ("rally", 0.7),
    ("rebound", 0.5),
    ("record", 0.5),
    ("recover", 0.5),
    ("recovery", 0.5),
    ("rise", 0.5),
    ("robust", 0.5),
    ("soar", 0.8),
    ("solid", 0.4),
    ("strong", 0.5),
    ("success", 0.6),
    ("successful", 0.6),
    ("surge", 0.7),
    ("top", 0.4),
    ("upbeat", 0.6),
    ("upgrade", 0.6),
    ("win", 0.6),
];

const NEGATIVE_WORDS: &[(&str, f64)] = &[
    ("bad", -0.7),
    ("bankrupt", -0.9),
    ("bankruptcy", -0.9),
    ("bearish", -0.8),
    ("collapse", -0.8),
    ("concern", -0.5),
    ("crash", -0.9),
    ("crisis", -0.8),
    ("cut", -0.4),
    ("decline", -0.6),
    ("default", -0.7),
    ("delay", -0.4),
    ("disappoint", -0.7),
    ("disappointing", -0.7),
    ("downgrade", -0.6),
    ("drop", -0.6),
    ("fail", -0.7),
    ("fall", -0.5),
    ("fear", -0.6),
    ("fraud", -0.9),
    ("layoff", -0.6),
    ("loss", -0.6),
    ("lawsuit", -0.5),
    ("low", -0.3),
    ("miss", -0.6),
    ("negative", -0.5),
    ("plummet", -0.9),
    ("plunge", -0.8),
    ("poor", -0.6),
    ("investigation", -0.4),
    ("recall", -0.4),
    ("recession", -0.7),
    ("risk", -0.3),
    ("selloff", -0.6),
    ("shortfall", -0.6),
    ("sink", -0.6),
    ("slide", -0.5),
    ("slip", -0.4),
    ("slump", -0.7),
    ("tumble", -0.7),
    ("uncertain", -0.4),
    ("uncertainty", -0.5),
    ("warn", -0.5),
    ("warning", -0.5),
    ("weak", -0.5),
    ("worst", -0.8),
    ("worry", -0.5),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "none", "nothing", "without", "hardly", "barely",
    "cannot",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("extremely", 1.6),
    ("highly", 1.3),
    ("sharply", 1.4),
    ("significantly", 1.3),
    ("dramatically", 1.5),
    ("hugely", 1.5),
    ("massively", 1.5),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("modestly", 0.6),
];

/// Inflections tried, in order, when a token is not in the lexicon as-is.
const SUFFIXES: &[&str] = &["s", "es", "ed", "d", "ing"];

/// Irregular verb forms common in headlines, mapped to their lexicon entry.
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("fell", "fall"),
    ("fallen", "fall"),
    ("rose", "rise"),
    ("risen", "rise"),
    ("sank", "sink"),
    ("sunk", "sink"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("slid", "slide"),
    ("won", "win"),
    ("beaten", "beat"),
];

/// How many preceding tokens a negation reaches.
const NEGATION_WINDOW: usize = 3;

/// TextBlob-style: a negated hit keeps half its weight with the sign flipped.
const NEGATION_FACTOR: f64 = -0.5;

/// Deterministic bag-of-words polarity scorer.
///
/// Polarity is the mean score of matched lexicon words in [-1.0, 1.0];
/// text without any match scores 0.0.
pub struct LexiconScorer {
    words: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            words: POSITIVE_WORDS
                .iter()
                .chain(NEGATIVE_WORDS)
                .copied()
                .collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    fn word_score(&self, token: &str) -> Option<f64> {
        let token = IRREGULAR_FORMS
            .iter()
            .find(|(form, _)| *form == token)
            .map_or(token, |(_, base)| *base);

        if let Some(score) = self.words.get(token) {
            return Some(*score);
        }

        SUFFIXES.iter().find_map(|suffix| {
            let stem = token.strip_suffix(suffix).filter(|stem| stem.len() > 2)?;
            self.stem_score(stem, suffix)
        })
    }

    fn stem_score(&self, stem: &str, suffix: &str) -> Option<f64> {
        if let Some(score) = self.words.get(stem) {
            return Some(*score);
        }
        if !matches!(suffix, "ed" | "ing") {
            return None;
        }

        // "surging" -> "surge"
        if let Some(score) = self.words.get(format!("{}e", stem).as_str()) {
            return Some(*score);
        }

        // "dropped" -> "drop"
        undouble(stem).and_then(|base| self.words.get(base).copied())
    }

    fn is_negation(token: &str) -> bool {
        NEGATIONS.contains(&token) || token.ends_with("n't")
    }

    pub fn polarity(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        let mut hits: Vec<f64> = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            let Some(mut score) = self.word_score(token) else {
                continue;
            };

            if let Some(mult) = i
                .checked_sub(1)
                .and_then(|prev| self.intensifiers.get(tokens[prev].as_str()))
            {
                score = (score * mult).clamp(-1.0, 1.0);
            }

            let window = &tokens[i.saturating_sub(NEGATION_WINDOW)..i];
            if window.iter().any(|t| Self::is_negation(t)) {
                score *= NEGATION_FACTOR;
            }

            hits.push(score);
        }

        if hits.is_empty() {
            return 0.0;
        }

        let mean = hits.iter().sum::<f64>() / hits.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<f64, ClassificationError> {
        Ok(self.polarity(text))
    }
}

/// Drops a doubled final consonant: "dropp" -> "drop".
fn undouble(stem: &str) -> Option<&str> {
    let mut chars = stem.chars().rev();
    let last = chars.next()?;
    let prev = chars.next()?;

    if last == prev && !"aeiou".contains(last) {
        Some(&stem[..stem.len() - last.len_utf8()])
    } else {
        None
    }
}

/// Lower-cased word tokens; apostrophes stay inside words, hyphens split
/// except inside known compounds such as "sell-off".
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace("sell-off", "selloff")
        .replace('\u{2019}', "'")
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
