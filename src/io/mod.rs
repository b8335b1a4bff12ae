//! Input loading and report rendering
//!
//! Reading numbers from a text source and turning a [`RankResult`] back
//! into text or JSON. Neither the matrix nor the engine touches I/O.
//!
//! [`RankResult`]: crate::pagerank::RankResult

pub mod reader;
pub mod report;

pub use reader::{parse_links, read_links};
pub use report::{render_json, render_report};
