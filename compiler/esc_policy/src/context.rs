//! Output contexts an interpolated expression can be written into.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The sink an expression's value ends up in, which decides the escape
/// modifier it needs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    /// Text content and ordinary attribute values.
    Html,
    /// String literals and bare expressions inside `<script>`.
    Js,
    /// `src`/`href` attributes and form actions.
    Path,
    /// `on*` event handler attributes.
    Event,
    /// A whole non-markup file such as an async JSON response.
    Data,
    /// JSONP callback names.
    Callback,
}

impl Context {
    pub const ALL: [Context; 6] = [
        Context::Html,
        Context::Js,
        Context::Path,
        Context::Event,
        Context::Data,
        Context::Callback,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Context::Html => "html",
            Context::Js => "js",
            Context::Path => "path",
            Context::Event => "event",
            Context::Data => "data",
            Context::Callback => "callback",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Context {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Context::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| s.to_owned())
    }
}

#[cfg(test)]
mod tests;
