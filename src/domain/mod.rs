pub mod article;
pub mod news_page;

pub use article::{format_published_date, Article};
pub use news_page::NewsPage;
