//! Sleuth - tool-using research agent
//!
//! This library drives a bounded dialogue between a language model and a
//! small set of research tools (web search, summarization) to produce a
//! free-text report for a task.

pub mod agent;
pub mod tools;
pub mod config;
pub mod error;
pub mod ui;

pub use error::{Error, Result};
