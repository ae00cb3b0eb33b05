use std::fmt;

use serde::Serialize;

/// Error codes for escape-policy diagnostics.
///
/// Format: X#### (cross-site scripting checks).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub enum ErrorCode {
    /// Interpolated expression lacks the escape modifier its context requires
    X0001,
    /// Interpolated expression carries two modifiers that must not be combined
    X0002,
}

impl ErrorCode {
    /// All codes, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[ErrorCode::X0001, ErrorCode::X0002];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::X0001 => "X0001",
            ErrorCode::X0002 => "X0002",
        }
    }

    /// Short description, shown next to the code in summaries.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::X0001 => "missing escape modifier",
            ErrorCode::X0002 => "conflicting escape modifiers",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests;
