//! Value interpolation for `hoist.ini`.
//!
//! # Syntax
//!
//! - `%(name)s` - replaced with the (interpolated) value of key `name`
//! - `%%` - produces a literal `%`
//!
//! Any other use of `%` is an error. References are resolved against the
//! DEFAULT section and may nest up to [`MAX_DEPTH`] levels.
//!
//! # Example
//!
//! ```ini
//! mirror = https://downloads.example.com
//! artifact_base_url = %(mirror)s/artifacts
//! ```

use std::collections::HashMap;

use crate::error::{HoistError, Result};

/// Maximum nesting of `%(name)s` references.
pub const MAX_DEPTH: usize = 10;

/// A segment of an interpolated value.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Reference: %(name)s
    Reference(String),
}

/// Parse a value containing `%(name)s` references.
///
/// Reference names are lowercased, matching how keys are stored.
pub fn parse_interpolation(input: &str) -> std::result::Result<Vec<Segment>, String> {
    let mut segments = Vec::new();
    let mut current_literal = String::new();
    let mut rest = input;

    while let Some(pos) = rest.find('%') {
        current_literal.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if let Some(after) = rest.strip_prefix("%%") {
            current_literal.push('%');
            rest = after;
        } else if let Some(after) = rest.strip_prefix("%(") {
            let close = after
                .find(")s")
                .ok_or_else(|| format!("bad interpolation variable reference {rest:?}"))?;
            let name = &after[..close];
            if name.is_empty() || name.contains('(') {
                return Err(format!("bad interpolation variable reference {rest:?}"));
            }
            if !current_literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
            }
            segments.push(Segment::Reference(name.trim().to_lowercase()));
            rest = &after[close + 2..];
        } else {
            return Err(format!("'%' must be followed by '%' or '(', found: {rest:?}"));
        }
    }

    current_literal.push_str(rest);
    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    Ok(segments)
}

/// Expand `raw`, the value of `key`, against `defaults`.
pub fn interpolate(key: &str, raw: &str, defaults: &HashMap<String, String>) -> Result<String> {
    expand(key, raw, defaults, 1)
}

fn expand(key: &str, raw: &str, defaults: &HashMap<String, String>, depth: usize) -> Result<String> {
    if depth > MAX_DEPTH {
        return Err(HoistError::InvalidConfig {
            message: format!(
                "interpolation of '{key}' exceeds {MAX_DEPTH} levels of %(name)s references"
            ),
        });
    }

    let segments = parse_interpolation(raw).map_err(|message| HoistError::InvalidConfig {
        message: format!("value of '{key}': {message}"),
    })?;

    let mut out = String::with_capacity(raw.len());
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(&text),
            Segment::Reference(name) => {
                let value = defaults.get(&name).ok_or_else(|| HoistError::InvalidConfig {
                    message: format!("value of '{key}' references missing key '{name}'"),
                })?;
                out.push_str(&expand(key, value, defaults, depth + 1)?);
            }
        }
    }
    Ok(out)
}
