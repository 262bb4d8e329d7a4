//! Content-based movie recommendation service.
//!
//! The core is the recommendation engine in [`engine`]: per-movie text
//! fields are tokenized into content tags, weighted into a TF-IDF vector
//! space, and queried through a cosine-similarity index. Everything else is
//! glue around that engine: catalog snapshot loading ([`catalog`]), display
//! metadata enrichment ([`services::providers`]), and the HTTP query
//! surface ([`api`]).

pub mod api;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
