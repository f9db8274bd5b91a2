//! Symbol records stored in scope tables

use std::fmt;

/// A declared identifier, owned by exactly one scope's bucket chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Identifier text, unique within its scope.
    pub name: String,
    /// Classification tag such as `VAR`, `FUNCTION` or `STRUCT`.
    pub kind: String,
    /// Optional structured detail (a signature, a field list). Stored and
    /// rendered verbatim; the engine never interprets it.
    pub descriptor: Option<String>,
}

impl Symbol {
    /// Creates a symbol with no descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            descriptor: None,
        }
    }

    /// Attaches a descriptor.
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.descriptor = Some(descriptor.into());
        self
    }
}

impl fmt::Display for Symbol {
    /// Renders as `<name,kind>` or `<name,kind,descriptor>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{}", self.name, self.kind)?;
        if let Some(descriptor) = &self.descriptor {
            write!(f, ",{descriptor}")?;
        }
        write!(f, ">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_descriptor() {
        let symbol = Symbol::new("x", "INT");
        assert_eq!(symbol.to_string(), "<x,INT>");
    }

    #[test]
    fn test_display_with_descriptor() {
        let symbol = Symbol::new("foo", "FUNCTION").with_descriptor("INT<==(FLOAT,CHAR)");
        assert_eq!(symbol.to_string(), "<foo,FUNCTION,INT<==(FLOAT,CHAR)>");
    }

    #[test]
    fn test_descriptor_is_opaque() {
        let symbol = Symbol::new("p", "STRUCT").with_descriptor("{(FLOAT,x),(FLOAT,y)}");
        assert_eq!(symbol.descriptor.as_deref(), Some("{(FLOAT,x),(FLOAT,y)}"));
    }
}
