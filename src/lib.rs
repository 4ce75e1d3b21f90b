//! medial - rewrites MEDIAL launch links in rendered HTML into embedded
//! players, modal links and thumbnails.
//!
//! ```ignore
//! use medial::{FilterOptions, MedialFilter, config::MedialConfig};
//!
//! let filter = MedialFilter::from_config(Arc::new(config));
//! let html = filter.filter(text, &FilterOptions::with_format("1"));
//! ```

pub mod cli;
pub mod config;
pub mod filter;
pub mod logger;
pub mod render;
pub mod utils;

pub use filter::{FilterOptions, MedialFilter};
pub use render::{EmbedRenderer, HtmlEmbedRenderer};
