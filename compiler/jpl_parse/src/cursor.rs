//! Character cursor with inline matching.
//!
//! There is no token stream. Every successful match advances past the
//! matched text and then past any following whitespace and comments, so the
//! cursor always rests on the first character of the next token.

use crate::error::{ErrorContext, ParseError};

/// Words that can never name a variable or parameter.
pub(crate) const KEYWORDS: &[&str] = &[
    "and", "catch", "elif", "else", "end", "false", "func", "if", "not", "null", "or", "then",
    "true", "try",
];

#[inline]
pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
pub(crate) fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub(crate) fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Cursor { src, pos: 0 }
    }

    /// Current byte offset.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Consume one character without skipping trivia.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Build an error at the current position.
    #[cold]
    pub fn error(&self, context: ErrorContext, message: &str) -> ParseError {
        ParseError::new(context, message, self.pos)
    }

    /// Skip whitespace, `# line` comments and `/* block */` comments.
    pub fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with('#') {
                let line = trimmed.find('\n').map_or(trimmed.len(), |i| i + 1);
                self.pos += line;
            } else if let Some(body) = trimmed.strip_prefix("/*") {
                let Some(end) = body.find("*/") else {
                    return Err(self.error(ErrorContext::Comment, "expected '*/'"));
                };
                self.pos += 2 + end + 2;
            } else {
                return Ok(());
            }
        }
    }

    /// Match `phrase` literally.
    pub fn eat(&mut self, phrase: &str) -> Result<bool, ParseError> {
        self.eat_not_before(phrase, "")
    }

    /// Match `phrase` unless the character right after it is in `not_before`.
    ///
    /// Used where one operator is a prefix of another (`-` and `->`, `?` and
    /// `??`, `=` and `==`).
    pub fn eat_not_before(&mut self, phrase: &str, not_before: &str) -> Result<bool, ParseError> {
        let Some(after) = self.rest().strip_prefix(phrase) else {
            return Ok(false);
        };
        if after.chars().next().is_some_and(|c| not_before.contains(c)) {
            return Ok(false);
        }
        self.pos += phrase.len();
        self.skip_trivia()?;
        Ok(true)
    }

    /// Match a keyword on word boundaries, so `or` does not match `orange`.
    pub fn eat_keyword(&mut self, word: &str) -> Result<bool, ParseError> {
        let Some(after) = self.rest().strip_prefix(word) else {
            return Ok(false);
        };
        if after.chars().next().is_some_and(is_ident_continue) {
            return Ok(false);
        }
        let before = self.src[..self.pos].chars().next_back();
        if before.is_some_and(is_ident_continue) {
            return Ok(false);
        }
        self.pos += word.len();
        self.skip_trivia()?;
        Ok(true)
    }

    fn peek_identifier(&self) -> Option<&'a str> {
        let rest = self.rest();
        if !rest.chars().next().is_some_and(is_ident_start) {
            return None;
        }
        let len = rest
            .find(|c: char| !is_ident_continue(c))
            .unwrap_or(rest.len());
        Some(&rest[..len])
    }

    /// Match any identifier, keywords included.
    pub fn identifier(&mut self) -> Result<Option<String>, ParseError> {
        let Some(name) = self.peek_identifier() else {
            return Ok(None);
        };
        self.pos += name.len();
        self.skip_trivia()?;
        Ok(Some(name.to_owned()))
    }

    /// Match an identifier that is not a keyword.
    pub fn variable_name(&mut self) -> Result<Option<String>, ParseError> {
        match self.peek_identifier() {
            Some(name) if !is_keyword(name) => self.identifier(),
            _ => Ok(None),
        }
    }

    /// Match `phrase` literally without skipping trivia.
    pub fn eat_raw(&mut self, phrase: &str) -> bool {
        if !self.rest().starts_with(phrase) {
            return false;
        }
        self.pos += phrase.len();
        true
    }

    /// Source text between two offsets.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.src[start..end]
    }

    /// Consume a run of ASCII digits without skipping trivia.
    pub fn digits(&mut self) -> &'a str {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Consume one character from `set` without skipping trivia.
    pub fn one_of(&mut self, set: &str) -> Option<char> {
        let c = self.peek().filter(|c| set.contains(*c))?;
        self.pos += c.len_utf8();
        Some(c)
    }
}
