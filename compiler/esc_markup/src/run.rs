//! Typed runs produced by the segmenter.

use std::fmt;

use esc_diagnostic::Span;

/// The kind of a contiguous slice of a template file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RunKind {
    /// Text between tags, template spans included.
    Content,
    /// `<name attr=value ...>` for any tag other than `script`/`style`.
    TagStart,
    /// `</name>`.
    TagEnd,
    ScriptStart,
    /// Raw text between `<script ...>` and `</script>`.
    ScriptContent,
    ScriptEnd,
    StyleStart,
    /// Raw text between `<style ...>` and `</style>`.
    StyleContent,
    StyleEnd,
    /// `<!-- ... -->`.
    Comment,
    /// `<!DOCTYPE ...>`.
    Doctype,
    /// `<?...?>` processing instructions and `<![CDATA[...]]>` sections.
    Xml,
}

impl RunKind {
    pub fn name(self) -> &'static str {
        match self {
            RunKind::Content => "content",
            RunKind::TagStart => "tag-start",
            RunKind::TagEnd => "tag-end",
            RunKind::ScriptStart => "script-start",
            RunKind::ScriptContent => "script-content",
            RunKind::ScriptEnd => "script-end",
            RunKind::StyleStart => "style-start",
            RunKind::StyleContent => "style-content",
            RunKind::StyleEnd => "style-end",
            RunKind::Comment => "comment",
            RunKind::Doctype => "doctype",
            RunKind::Xml => "xml",
        }
    }

    /// Runs whose text is a start tag with attributes.
    pub fn has_attributes(self) -> bool {
        matches!(
            self,
            RunKind::TagStart | RunKind::ScriptStart | RunKind::StyleStart
        )
    }
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed slice of the file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub kind: RunKind,
    pub span: Span,
}

impl Run {
    pub fn new(kind: RunKind, span: Span) -> Self {
        Run { kind, span }
    }

    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span.slice(source)
    }
}

#[cfg(test)]
mod tests;
