//! Site-wide output files derived from the post list.

pub mod rss;
pub mod sitemap;

pub use rss::build_rss;
pub use sitemap::build_sitemap;
