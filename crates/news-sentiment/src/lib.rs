pub mod extract;
pub mod fetch;
pub mod scorer;

pub use extract::extract_headlines;
pub use fetch::GoogleNewsClient;
pub use scorer::SentimentScorer;

use dashboard_core::{Headline, NewsSource};
use std::sync::Arc;

/// Headlines returned per request, in source order
pub const MAX_HEADLINES: usize = 10;

/// Shorter anchor texts are navigation chrome, not headlines
pub const MIN_HEADLINE_LEN: usize = 30;

/// Filters candidate texts to ones mentioning the company, scores each
/// with the lexicon scorer, and degrades to a single neutral
/// placeholder pair when the news source fails. This stage never
/// halts a render.
pub struct NewsSentimentEngine {
    source: Arc<dyn NewsSource>,
    scorer: SentimentScorer,
    min_len: usize,
    cap: usize,
}

impl NewsSentimentEngine {
    pub fn new(source: Arc<dyn NewsSource>) -> Self {
        Self {
            source,
            scorer: SentimentScorer::new(),
            min_len: MIN_HEADLINE_LEN,
            cap: MAX_HEADLINES,
        }
    }

    pub async fn scored_headlines(&self, keyword: &str) -> Vec<Headline> {
        match self.source.headlines(keyword).await {
            Ok(texts) => self.score_texts(keyword, &texts),
            Err(e) => {
                tracing::warn!("news fetch failed for {}: {}", keyword, e);
                vec![Headline::new(format!("Failed to fetch news: {}", e), 0.0)]
            }
        }
    }

    /// Score pre-fetched texts: substring match on the keyword, minimum
    /// length floor, capped, source order preserved.
    pub fn score_texts(&self, keyword: &str, texts: &[String]) -> Vec<Headline> {
        let needle = keyword.to_lowercase();
        texts
            .iter()
            .map(|t| t.trim())
            .filter(|t| t.len() > self.min_len && t.to_lowercase().contains(&needle))
            .take(self.cap)
            .map(|t| Headline::new(t, self.scorer.compound(t)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dashboard_core::DashboardError;

    struct FixedSource(Vec<String>);

    #[async_trait]
    impl NewsSource for FixedSource {
        async fn headlines(&self, _keyword: &str) -> Result<Vec<String>, DashboardError> {
            Ok(self.0.clone())
        }
    }

    struct DeadSource;

    #[async_trait]
    impl NewsSource for DeadSource {
        async fn headlines(&self, _keyword: &str) -> Result<Vec<String>, DashboardError> {
            Err(DashboardError::Network("connection refused".to_string()))
        }
    }

    fn headline_pool() -> Vec<String> {
        let mut texts = vec![
            "Reliance Industries posts record quarterly profit on retail surge".to_string(),
            "Menu".to_string(),
            "Sign in".to_string(),
            "Analysts downgrade Reliance Industries on weak refining margins".to_string(),
            "Unrelated market wrap: indices end the week flat".to_string(),
        ];
        for i in 0..12 {
            texts.push(format!(
                "Reliance Industries expands green energy portfolio, phase {}",
                i
            ));
        }
        texts
    }

    #[test]
    fn filters_by_keyword_and_length_and_caps_at_ten() {
        let engine = NewsSentimentEngine::new(Arc::new(DeadSource));
        let scored = engine.score_texts("Reliance", &headline_pool());

        assert_eq!(scored.len(), MAX_HEADLINES);
        for h in &scored {
            assert!(h.text.to_lowercase().contains("reliance"));
            assert!(h.text.len() > MIN_HEADLINE_LEN);
            assert!((-1.0..=1.0).contains(&h.score));
        }
        // source order, not score order
        assert!(scored[0].text.contains("record quarterly profit"));
    }

    #[test]
    fn positive_and_negative_headlines_score_with_matching_sign() {
        let engine = NewsSentimentEngine::new(Arc::new(DeadSource));
        let texts = vec![
            "Reliance Industries shares surge after strong record profit growth".to_string(),
            "Reliance Industries shares plunge on weak results and lawsuit concern".to_string(),
        ];
        let scored = engine.score_texts("Reliance", &texts);

        assert_eq!(scored.len(), 2);
        assert!(scored[0].score > 0.0);
        assert!(scored[1].score < 0.0);
    }

    #[tokio::test]
    async fn unreachable_source_degrades_to_single_neutral_pair() {
        let engine = NewsSentimentEngine::new(Arc::new(DeadSource));
        let scored = engine.scored_headlines("Reliance").await;

        assert_eq!(scored.len(), 1);
        assert!(scored[0].text.starts_with("Failed to fetch news"));
        assert_eq!(scored[0].score, 0.0);
    }

    #[tokio::test]
    async fn no_qualifying_headlines_is_an_empty_set_not_an_error() {
        let engine = NewsSentimentEngine::new(Arc::new(FixedSource(vec![
            "Completely unrelated story about commodity futures markets".to_string(),
        ])));
        let scored = engine.scored_headlines("Reliance").await;
        assert!(scored.is_empty());
    }
}
