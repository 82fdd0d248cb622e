//! Source locations attached to every AST node.

use std::fmt;
use std::sync::Arc;

use crate::Span;

/// Position of a node inside its template source.
///
/// `tag` covers the whole tag including delimiters (`<?print x?>`), `code`
/// covers the code after the tag keyword (`x`). For literal text both spans are equal.
/// `tag_type` is the tag keyword (`print`, `for`, ...) or `None` for text.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub source: Arc<str>,
    pub tag_type: Option<String>,
    pub tag: Span,
    pub code: Span,
}

impl Location {
    pub fn new(source: Arc<str>, tag_type: Option<String>, tag: Span, code: Span) -> Self {
        Location {
            source,
            tag_type,
            tag,
            code,
        }
    }

    /// Location covering a piece of literal text.
    pub fn text(source: Arc<str>, span: Span) -> Self {
        Location::new(source, None, span, span)
    }

    /// Source text of the whole tag.
    pub fn tag(&self) -> &str {
        self.tag.slice(&self.source)
    }

    /// Code part of the tag.
    pub fn code(&self) -> &str {
        self.code.slice(&self.source)
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({:?} @ {:?})", self.tag(), self.tag)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset {}:{}", self.tag.start, self.tag.end)?;
        match &self.tag_type {
            Some(tag_type) => write!(f, "; tag {tag_type} {:?}", self.tag()),
            None => write!(f, "; text {:?}", self.tag()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_and_code() {
        let source: Arc<str> = Arc::from("Hello <?print name?>!");
        let loc = Location::new(
            source,
            Some("print".to_string()),
            Span::new(6, 20),
            Span::new(14, 18),
        );
        assert_eq!(loc.tag(), "<?print name?>");
        assert_eq!(loc.code(), "name");
    }

    #[test]
    fn text_location() {
        let loc = Location::text(Arc::from("abc"), Span::new(0, 3));
        assert_eq!(loc.tag(), "abc");
        assert_eq!(loc.code(), "abc");
        assert_eq!(loc.to_string(), "offset 0:3; text \"abc\"");
    }
}
