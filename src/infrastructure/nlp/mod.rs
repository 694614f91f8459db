pub mod keywords;
pub mod vader;

pub use keywords::KeywordThemeExtractor;
pub use vader::VaderSentimentClassifier;
