//! The lookup core: classify a query, resolve it on a cluster, render the
//! result and link it to a block explorer.

pub mod classify;
pub mod explorer;
pub mod format;
pub mod resolve;

pub use explorer::explorer_url;
pub use format::format_result;
pub use resolve::Resolver;
