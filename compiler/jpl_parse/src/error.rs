//! Syntax errors.

/// The construct being parsed when an error occurred.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum ErrorContext {
    Program,
    IfStatement,
    FunctionDefinition,
    FieldAccess,
    ArraySlice,
    VariableAccess,
    BoundCall,
    FunctionCall,
    Number,
    String,
    Group,
    ArrayConstructor,
    ObjectConstructor,
    Value,
    Comment,
}

impl ErrorContext {
    /// Operator name used in error messages.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Program => "program",
            Self::IfStatement => "if statement",
            Self::FunctionDefinition => "function definition",
            Self::FieldAccess => "field access operator",
            Self::ArraySlice => "array slice operator",
            Self::VariableAccess => "variable access operator",
            Self::BoundCall => "bound function call",
            Self::FunctionCall => "function call",
            Self::Number => "number",
            Self::String => "string",
            Self::Group => "group",
            Self::ArrayConstructor => "array constructor",
            Self::ObjectConstructor => "object constructor",
            Self::Value => "value",
            Self::Comment => "comment",
        }
    }
}

/// A syntax error. Parsing stops at the first one.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
#[error("unexpected token in {}: {message} at offset {offset}", context.description())]
pub struct ParseError {
    /// Construct being parsed.
    pub context: ErrorContext,
    /// What was expected.
    pub message: String,
    /// Byte offset into the source.
    pub offset: usize,
}

impl ParseError {
    #[cold]
    pub fn new(context: ErrorContext, message: impl Into<String>, offset: usize) -> Self {
        ParseError {
            context,
            message: message.into(),
            offset,
        }
    }

    /// One-based line and column of the error in `source`.
    pub fn location(&self, source: &str) -> (usize, usize) {
        let end = self.offset.min(source.len());
        let before = source.get(..end).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let column = before
            .rsplit('\n')
            .next()
            .map_or(0, |tail| tail.chars().count())
            + 1;
        (line, column)
    }
}
