//! Port adapters.

mod reqwest_article_api;
mod system_clock;

pub use reqwest_article_api::ReqwestArticleApi;
pub use system_clock::SystemClock;
