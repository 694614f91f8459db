pub mod mock;
pub mod rss;

pub use mock::MockMentionSource;
pub use rss::RssMentionSource;
