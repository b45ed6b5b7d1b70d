// Sentiment scoring: trait-based abstraction for swappable polarity models.
//
// The SentimentScorer trait defines the interface the graph builder consumes.
// LexiconScorer implements it locally with a word-polarity lexicon; a model
// backed scorer can replace it without touching the rest of the pipeline.

pub mod lexicon;
pub mod traits;
