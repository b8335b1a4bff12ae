//! Rendering a finished ranking as text or JSON.

use crate::errors::Result;
use crate::matrix::DenseMatrix;
use crate::pagerank::RankResult;

/// Text report: the echoed input matrix followed by one line per page.
pub fn render_report(input: &DenseMatrix, result: &RankResult) -> String {
    let mut out = String::new();
    out.push_str("Input matrix : \n");
    out.push_str(&input.to_string());
    out.push('\n');
    out.push_str("Rank Result \n");
    out.push_str(&result.format_ranked());
    out
}

/// Pretty-printed JSON of [`RankResult::to_report`].
pub fn render_json(result: &RankResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(&result.to_report())?)
}
