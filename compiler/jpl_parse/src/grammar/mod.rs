//! Grammar productions, one method per precedence level.
//!
//! Each production returns the instructions it parsed as a plain `Vec`;
//! callers splice them into their own pipeline or freeze them into a
//! [`Pipeline`] when storing them as an operand.

mod access;
mod operators;
mod primary;

use jpl_ir::{Instruction, Pipeline};
use jpl_stack::ensure_sufficient_stack;

use crate::error::ParseError;
use crate::Parser;

pub(crate) type ParseResult<T = Vec<Instruction>> = Result<T, ParseError>;

impl Parser<'_> {
    /// `a | b | ...` concatenated into one pipeline.
    pub(crate) fn parse_pipe(&mut self) -> ParseResult {
        let mut pipe = Vec::new();
        loop {
            pipe.extend(self.parse_output_concat()?);
            if !self.cursor.eat_not_before("|", "=")? {
                return Ok(pipe);
            }
        }
    }

    /// Like [`parse_pipe`](Self::parse_pipe) but without `,`, for call arguments.
    pub(crate) fn parse_sub_pipe(&mut self) -> ParseResult {
        let mut pipe = Vec::new();
        loop {
            pipe.extend(self.parse_try()?);
            if !self.cursor.eat_not_before("|", "=")? {
                return Ok(pipe);
            }
        }
    }

    /// Function bodies, assignment right-hand sides and object values.
    #[inline]
    pub(crate) fn parse_sub_route(&mut self) -> ParseResult {
        self.parse_try()
    }

    fn parse_output_concat(&mut self) -> ParseResult {
        let mut pipes = self.parse_separated(",", Self::parse_try)?;
        if pipes.len() == 1 {
            return Ok(pipes.pop().unwrap_or_default());
        }
        Ok(vec![Instruction::OutputConcat {
            pipes: pipes.into_iter().map(Pipeline::from).collect(),
        }])
    }

    /// `try a [catch b]`, wrapped for stack safety: every nested operand
    /// comes back through here.
    pub(crate) fn parse_try(&mut self) -> ParseResult {
        ensure_sufficient_stack(|| self.parse_try_inner())
    }

    fn parse_try_inner(&mut self) -> ParseResult {
        if !self.cursor.eat_keyword("try")? {
            return self.parse_or();
        }
        let try_ = self.parse_or()?;
        let catch = if self.cursor.eat_keyword("catch")? {
            Pipeline::from(self.parse_or()?)
        } else {
            Pipeline::void()
        };
        Ok(vec![Instruction::Try {
            try_: try_.into(),
            catch,
        }])
    }

    fn parse_or(&mut self) -> ParseResult {
        let mut pipes = self.parse_keyword_separated("or", Self::parse_and)?;
        if pipes.len() == 1 {
            return Ok(pipes.pop().unwrap_or_default());
        }
        Ok(vec![Instruction::Or {
            pipes: pipes.into_iter().map(Pipeline::from).collect(),
        }])
    }

    fn parse_and(&mut self) -> ParseResult {
        let mut pipes = self.parse_keyword_separated("and", Self::parse_equality)?;
        if pipes.len() == 1 {
            return Ok(pipes.pop().unwrap_or_default());
        }
        Ok(vec![Instruction::And {
            pipes: pipes.into_iter().map(Pipeline::from).collect(),
        }])
    }

    /// One or more `operand`s separated by the symbol `separator`.
    fn parse_separated(
        &mut self,
        separator: &str,
        mut operand: impl FnMut(&mut Self) -> ParseResult,
    ) -> ParseResult<Vec<Vec<Instruction>>> {
        let mut pipes = vec![operand(self)?];
        while self.cursor.eat(separator)? {
            pipes.push(operand(self)?);
        }
        Ok(pipes)
    }

    /// One or more `operand`s separated by the keyword `separator`.
    fn parse_keyword_separated(
        &mut self,
        separator: &str,
        mut operand: impl FnMut(&mut Self) -> ParseResult,
    ) -> ParseResult<Vec<Vec<Instruction>>> {
        let mut pipes = vec![operand(self)?];
        while self.cursor.eat_keyword(separator)? {
            pipes.push(operand(self)?);
        }
        Ok(pipes)
    }
}
