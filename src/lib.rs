// src/lib.rs

//! Job Search Crawler Library
//!
//! Walks a job board's paged search results in a browser session and
//! yields the postings that pass a configurable filter pipeline.

pub mod browser;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
