pub mod traits;
pub mod newsapi;

pub use traits::ArticleFetcher;
pub use newsapi::NewsApiSource;
