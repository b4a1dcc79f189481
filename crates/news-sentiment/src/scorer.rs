//! Lexicon polarity scorer. Counts positive/negative word hits with a
//! short negation window, then squashes the raw count into a compound
//! score in [-1, 1].

use std::collections::HashSet;

const POSITIVE_WORDS: &[&str] = &[
    "gain", "gains", "surge", "surges", "rally", "rallies", "record", "strong", "growth",
    "profit", "profits", "beat", "beats", "upgrade", "upgraded", "outperform", "rise",
    "rises", "jump", "jumps", "boost", "boosts", "positive", "bullish", "buy", "expand",
    "expands", "expansion", "recovery", "rebound", "wins", "win", "success", "successful",
    "high", "soar", "soars", "dividend", "buyback", "upbeat", "optimistic", "momentum",
    "good", "robust", "advance", "advances",
];

const NEGATIVE_WORDS: &[&str] = &[
    "loss", "losses", "fall", "falls", "drop", "drops", "plunge", "plunges", "slump",
    "slumps", "weak", "miss", "misses", "downgrade", "downgraded", "underperform",
    "decline", "declines", "crash", "crashes", "sell", "selloff", "bearish", "negative",
    "concern", "concerns", "risk", "risks", "probe", "lawsuit", "investigation", "fraud",
    "fine", "fined", "penalty", "recall", "layoff", "layoffs", "bankruptcy", "default",
    "warning", "warns", "fear", "fears", "low", "trouble", "bad", "disappointing",
];

const NEGATION_WORDS: &[&str] = &[
    "not", "no", "never", "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't",
    "weren't", "won't", "wouldn't", "couldn't", "shouldn't", "hardly", "barely",
    "neither", "nor", "without",
];

const NEGATION_WINDOW: usize = 3;

pub struct SentimentScorer {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
    negation: HashSet<&'static str>,
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
            negation: NEGATION_WORDS.iter().copied().collect(),
        }
    }

    /// Compound polarity of `text`, in [-1, 1]; 0.0 when no lexicon
    /// word matches.
    pub fn compound(&self, text: &str) -> f64 {
        let raw = self.raw_score(text);
        // VADER-style squashing into the compound range
        let compound = raw / (raw * raw + 15.0).sqrt();
        compound.clamp(-1.0, 1.0)
    }

    fn raw_score(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '.' | '!' | '?' | ':'))
            .filter(|w| !w.is_empty())
            .collect();

        let negation_positions: Vec<usize> = words
            .iter()
            .enumerate()
            .filter(|(_, w)| self.negation.contains(*w))
            .map(|(i, _)| i)
            .collect();

        let mut score = 0i32;
        for (i, word) in words.iter().enumerate() {
            let is_positive = self.positive.contains(word);
            let is_negative = self.negative.contains(word);
            if !is_positive && !is_negative {
                continue;
            }

            let negated = negation_positions
                .iter()
                .any(|&p| p < i && i - p <= NEGATION_WINDOW);

            if is_positive {
                score += if negated { -1 } else { 1 };
            } else {
                score += if negated { 1 } else { -1 };
            }
        }

        score as f64
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}
