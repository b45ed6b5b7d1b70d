// Sentiment scorer trait: the seam between the graph builder and whatever
// produces polarity scores.

use anyhow::Result;

/// Trait for scoring the polarity of a piece of text.
///
/// Implementations return a value in [-1.0, 1.0]: negative for negative
/// sentiment, positive for positive sentiment, 0.0 for neutral.
pub trait SentimentScorer {
    /// Score a single text.
    fn polarity(&self, text: &str) -> Result<f64>;

    /// Score multiple texts, returning results in the same order.
    /// Default implementation calls `polarity` sequentially.
    fn polarity_batch(&self, texts: &[String]) -> Result<Vec<f64>> {
        texts.iter().map(|text| self.polarity(text)).collect()
    }
}
