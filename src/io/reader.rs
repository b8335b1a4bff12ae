//! Link-matrix input
//!
//! Values are whitespace separated finite numbers, read row-major. Reading
//! stops quietly at the first token that is not one.

use std::path::Path;

use crate::errors::{RankError, Result};

/// Parse whitespace separated numbers until the text runs out.
///
/// The first token that is not a finite number (`nan` and `inf` included)
/// ends the read; everything before it is returned. More than `max_values`
/// numbers is an error.
pub fn parse_links(text: &str, max_values: usize) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for token in text.split_whitespace() {
        let Some(value) = token.parse::<f64>().ok().filter(|v| v.is_finite()) else {
            trace_event!(debug, token, read = values.len(), "stopped at non-numeric token");
            break;
        };
        if values.len() == max_values {
            return Err(RankError::InputTooLarge { limit: max_values });
        }
        values.push(value);
    }
    Ok(values)
}

/// Read link values from a file, see [`parse_links`].
pub fn read_links(path: impl AsRef<Path>, max_values: usize) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| RankError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let values = parse_links(&text, max_values)?;
    trace_event!(debug, path = %path.display(), values = values.len(), "read link values");
    Ok(values)
}
