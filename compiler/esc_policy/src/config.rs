//! Escape configuration and its JSON file format.
//!
//! ```json
//! {
//!   "leftDelimiter": "<&",
//!   "rightDelimiter": "&>",
//!   "escapeMap": { "html": "e_html", "js": "e_js", "no_escape": "raw" },
//!   "modifier_conflict_map": { "data": ["js", "html"] },
//!   "xssSafeVars": ["^smarty\\.config\\."],
//!   "isXssAutoFixed": true,
//!   "documentKind": "markup"
//! }
//! ```
//!
//! Every key is optional. A context missing from `escapeMap` is not
//! enforced at all.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use esc_lexer_core::Delimiters;
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{Context, DocumentKind};

/// `escapeMap` key for the marker modifier that opts an expression out of
/// escaping.
const NO_ESCAPE_KEY: &str = "no_escape";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown escape context `{0}`")]
    UnknownContext(String),
    #[error("invalid safe variable pattern `{pattern}`: {source}")]
    InvalidSafeVar {
        pattern: String,
        source: regex::Error,
    },
}

/// The configured modifier for each context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EscapeMap {
    modifiers: FxHashMap<Context, String>,
    no_escape: Option<String>,
}

impl EscapeMap {
    /// The modifier required by `context`, if that context is enforced.
    pub fn get(&self, context: Context) -> Option<&str> {
        self.modifiers
            .get(&context)
            .map(String::as_str)
            .filter(|m| !m.is_empty())
    }

    pub fn set(&mut self, context: Context, modifier: impl Into<String>) {
        self.modifiers.insert(context, modifier.into());
    }

    /// The opt-out marker modifier.
    pub fn no_escape(&self) -> Option<&str> {
        self.no_escape.as_deref().filter(|m| !m.is_empty())
    }

    pub fn set_no_escape(&mut self, modifier: impl Into<String>) {
        self.no_escape = Some(modifier.into());
    }
}

/// Which modifiers must not appear together, keyed by context.
///
/// Entries keep a fixed order so conflict reports are deterministic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConflictMap {
    entries: Vec<(Context, Vec<Context>)>,
}

impl ConflictMap {
    pub fn empty() -> Self {
        ConflictMap {
            entries: Vec::new(),
        }
    }

    /// Contexts whose modifiers conflict with `context`'s.
    pub fn conflicts_of(&self, context: Context) -> &[Context] {
        self.entries
            .iter()
            .find(|(c, _)| *c == context)
            .map_or(&[], |(_, list)| list.as_slice())
    }

    /// Replace the conflict list of `context`.
    pub fn insert(&mut self, context: Context, conflicts: Vec<Context>) {
        match self.entries.iter_mut().find(|(c, _)| *c == context) {
            Some(entry) => entry.1 = conflicts,
            None => self.entries.push((context, conflicts)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Context, &[Context])> {
        self.entries.iter().map(|(c, list)| (*c, list.as_slice()))
    }
}

impl Default for ConflictMap {
    /// `data` supersedes `js` and `html`; `path` supersedes `html`.
    fn default() -> Self {
        ConflictMap {
            entries: vec![
                (Context::Data, vec![Context::Js, Context::Html]),
                (Context::Path, vec![Context::Html]),
            ],
        }
    }
}

/// Everything the engine needs besides the file text.
#[derive(Clone, Debug)]
pub struct EscapeConfig {
    pub delimiters: Delimiters,
    pub escape_map: EscapeMap,
    pub conflict_map: ConflictMap,
    /// Expressions matching any of these are trusted.
    pub safe_vars: Vec<Regex>,
    pub auto_fix: bool,
    /// Skip markup detection and treat the file as this kind.
    pub document_override: Option<DocumentKind>,
}

impl Default for EscapeConfig {
    fn default() -> Self {
        EscapeConfig {
            delimiters: Delimiters::default(),
            escape_map: EscapeMap::default(),
            conflict_map: ConflictMap::default(),
            safe_vars: Vec::new(),
            auto_fix: true,
            document_override: None,
        }
    }
}

/// The on-disk shape of the configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    #[serde(rename = "leftDelimiter")]
    left_delimiter: Option<String>,
    #[serde(rename = "rightDelimiter")]
    right_delimiter: Option<String>,
    #[serde(rename = "xssSafeVars")]
    safe_vars: Vec<String>,
    #[serde(rename = "escapeMap")]
    escape_map: BTreeMap<String, String>,
    #[serde(rename = "modifier_conflict_map")]
    conflict_map: Option<BTreeMap<String, Vec<String>>>,
    #[serde(rename = "isXssAutoFixed")]
    auto_fix: Option<bool>,
    #[serde(rename = "documentKind")]
    document_kind: Option<DocumentKind>,
}

fn parse_context(name: &str) -> Result<Context, ConfigError> {
    name.parse().map_err(ConfigError::UnknownContext)
}

impl EscapeConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        let defaults = Delimiters::default();
        let mut config = EscapeConfig {
            delimiters: Delimiters::new(
                raw.left_delimiter.unwrap_or(defaults.left),
                raw.right_delimiter.unwrap_or(defaults.right),
            ),
            auto_fix: raw.auto_fix.unwrap_or(true),
            document_override: raw.document_kind,
            ..EscapeConfig::default()
        };

        for (key, modifier) in raw.escape_map {
            if key == NO_ESCAPE_KEY {
                config.escape_map.set_no_escape(modifier);
            } else {
                config.escape_map.set(parse_context(&key)?, modifier);
            }
        }

        if let Some(map) = raw.conflict_map {
            config.conflict_map = ConflictMap::empty();
            for (key, list) in map {
                let conflicts = list
                    .iter()
                    .map(|name| parse_context(name))
                    .collect::<Result<Vec<_>, _>>()?;
                config.conflict_map.insert(parse_context(&key)?, conflicts);
            }
        }

        for pattern in &raw.safe_vars {
            config = config.with_safe_var(pattern)?;
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    // ─── Builders ───

    #[must_use]
    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    #[must_use]
    pub fn with_modifier(mut self, context: Context, modifier: impl Into<String>) -> Self {
        self.escape_map.set(context, modifier);
        self
    }

    #[must_use]
    pub fn with_no_escape(mut self, modifier: impl Into<String>) -> Self {
        self.escape_map.set_no_escape(modifier);
        self
    }

    #[must_use]
    pub fn with_conflicts(mut self, context: Context, conflicts: Vec<Context>) -> Self {
        self.conflict_map.insert(context, conflicts);
        self
    }

    #[must_use]
    pub fn with_conflict_map(mut self, conflict_map: ConflictMap) -> Self {
        self.conflict_map = conflict_map;
        self
    }

    pub fn with_safe_var(mut self, pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidSafeVar {
            pattern: pattern.to_owned(),
            source,
        })?;
        self.safe_vars.push(regex);
        Ok(self)
    }

    #[must_use]
    pub fn with_auto_fix(mut self, auto_fix: bool) -> Self {
        self.auto_fix = auto_fix;
        self
    }

    #[must_use]
    pub fn with_document_override(mut self, kind: DocumentKind) -> Self {
        self.document_override = Some(kind);
        self
    }

    /// Index of the first safe-variable pattern matching `value`.
    pub fn safe_var_match(&self, value: &str) -> Option<usize> {
        self.safe_vars.iter().position(|re| re.is_match(value))
    }
}
