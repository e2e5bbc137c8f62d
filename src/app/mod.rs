pub mod crawl;
pub mod handler;

pub use crawl::TrendCrawl;
pub use handler::{handle_invocation, InvocationResponse};
