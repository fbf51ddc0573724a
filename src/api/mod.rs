//! JSON API module.

mod news_generator;

pub use news_generator::*;
