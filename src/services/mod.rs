pub mod news_service;
pub mod pagination;
pub mod publisher;

pub use news_service::NewsService;
pub use pagination::{
    ArticleList, HeadlineUpdate, PageOutcome, PaginationState, RequestStatus,
};
pub use publisher::Publisher;
