//! Native plant lookup: a local catalog matcher plus completion-backed
//! recommendations, care information and wiki thumbnails.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod image;
pub mod log;
pub mod matcher;
pub mod model;
pub mod prompt;
pub mod provider;
pub mod recommend;
pub mod ux;
