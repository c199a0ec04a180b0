//! Loading [`ConvertOptions`] from TOML files and the environment.
//!
//! Precedence: environment variables > config file > defaults.
//!
//! ```toml
//! write_headers = true
//! headers = ["Name", "Age", "Birthday"]
//! time_format = "%Y-%m-%dT%H:%M:%S%:z"
//! delimiter = ";"
//! ```

use crate::convert::ConvertOptions;
use crate::errors::{ConvertError, Result};
use std::path::Path;

pub const ENV_WRITE_HEADERS: &str = "ROWCSV_WRITE_HEADERS";
pub const ENV_HEADERS: &str = "ROWCSV_HEADERS";
pub const ENV_TIME_FORMAT: &str = "ROWCSV_TIME_FORMAT";
pub const ENV_DELIMITER: &str = "ROWCSV_DELIMITER";

/// # Errors
/// Returns `Config` if the text is not valid TOML for [`ConvertOptions`].
pub fn parse_options(text: &str) -> Result<ConvertOptions> {
    Ok(toml::from_str::<ConvertOptions>(text)?)
}

/// Reads options from `path` when given, then applies environment overrides.
///
/// # Errors
/// Returns `FileOpen` if the file cannot be read and `Config` if it or an
/// override does not parse.
pub fn load_options(path: Option<&Path>) -> Result<ConvertOptions> {
    let mut opts = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .map_err(|source| ConvertError::FileOpen { path: p.to_path_buf(), source })?;
            log::debug!("loaded convert options from {}", p.display());
            parse_options(&text)?
        }
        None => ConvertOptions::default(),
    };
    apply_env(&mut opts, |k| std::env::var(k).ok())?;
    Ok(opts)
}

/// Applies overrides from `lookup`, which maps a variable name to its value.
///
/// # Errors
/// Returns `Config` for a malformed boolean or a delimiter that is not one character.
pub fn apply_env(
    opts: &mut ConvertOptions,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(v) = lookup(ENV_WRITE_HEADERS) {
        opts.write_headers = parse_bool(&v)
            .ok_or_else(|| ConvertError::Config(format!("{ENV_WRITE_HEADERS}: not a boolean: {v:?}")))?;
    }
    if let Some(v) = lookup(ENV_HEADERS) {
        opts.headers = Some(split_list(&v));
    }
    if let Some(v) = lookup(ENV_TIME_FORMAT) {
        opts.time_format = if v.is_empty() { None } else { Some(v) };
    }
    if let Some(v) = lookup(ENV_DELIMITER) {
        opts.delimiter = parse_delimiter(&v)?;
    }
    Ok(())
}

/// Comma separated list, trimmed, empties removed.
#[must_use]
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',').map(str::trim).filter(|p| !p.is_empty()).map(str::to_string).collect()
}

/// Accepts a single character or the escape `\t`.
///
/// # Errors
/// Returns `Config` for anything else.
pub fn parse_delimiter(s: &str) -> Result<char> {
    if s == "\\t" {
        return Ok('\t');
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConvertError::Config(format!("delimiter must be one character: {s:?}"))),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
