//! Parse context threaded through the grammar.

/// Flags inherited by sub-parses.
///
/// `project_default` starts on and is cleared where an expression is a
/// value rather than a candidate predicate: ternary conditions, list
/// elements, call arguments, and dynamic variable names.
#[derive(Clone, Copy, Debug)]
pub struct ParseContext {
    /// Recognise `@pattern@flags` literals (and treat `@…@` as an
    /// ignored span during terminator scans).
    pub allow_regex_literals: bool,
    /// Wrap comparison-layer results in the default-left projection.
    pub project_default: bool,
}

impl Default for ParseContext {
    fn default() -> Self {
        ParseContext {
            allow_regex_literals: false,
            project_default: true,
        }
    }
}

impl ParseContext {
    /// Same context with the projection flag replaced.
    #[must_use]
    pub fn with_project(self, project_default: bool) -> Self {
        ParseContext {
            project_default,
            ..self
        }
    }
}
