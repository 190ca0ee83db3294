//! Access chains, assignment operators and function headers.

use jpl_ir::{Assignment, AssignmentOp, Instruction, Pipeline, Selector, SelectorKind};

use super::ParseResult;
use crate::error::ErrorContext;
use crate::Parser;

/// Tried in order; `=` must not swallow the first half of `==`.
const ASSIGNMENT_OPS: &[(&str, &str, AssignmentOp)] = &[
    ("=", "=", AssignmentOp::Set),
    ("|=", "", AssignmentOp::Update),
    ("+=", "", AssignmentOp::Addition),
    ("-=", "", AssignmentOp::Subtraction),
    ("*=", "", AssignmentOp::Multiplication),
    ("/=", "", AssignmentOp::Division),
    ("%=", "", AssignmentOp::Remainder),
    ("?=", "", AssignmentOp::NullCoalescence),
];

impl Parser<'_> {
    /// Zero or more selectors: `.name`, `[...]`, `(args)`, `->(args)`, each
    /// with an optional trailing `?`.
    ///
    /// With `identity`, the chain directly follows a lone `.`, so a second
    /// `.` is not read as field access.
    ///
    /// Also reports whether the chain can be assigned to: it must not
    /// contain a call.
    pub(super) fn parse_access_chain(
        &mut self,
        identity: bool,
    ) -> ParseResult<(Vec<Selector>, bool)> {
        let mut operations: Vec<Selector> = Vec::new();
        let mut can_assign = true;

        loop {
            let kind = if !(identity && operations.is_empty()) && self.cursor.eat(".")? {
                self.parse_field_name()?
            } else if self.cursor.eat("[")? {
                self.parse_bracket()?
            } else if self.cursor.eat("->")? {
                if !self.cursor.eat("(")? {
                    return Err(self.cursor.error(ErrorContext::BoundCall, "expected '('"));
                }
                self.parse_call_args(true)?
            } else if self.cursor.eat("(")? {
                self.parse_call_args(false)?
            } else {
                return Ok((operations, can_assign));
            };

            can_assign &= kind.is_assignable();
            let optional = self.parse_optional()?;
            operations.push(Selector { kind, optional });
        }
    }

    /// The name after `.`, either bare or quoted.
    fn parse_field_name(&mut self) -> ParseResult<SelectorKind> {
        if let Some(name) = self.cursor.variable_name()? {
            return Ok(SelectorKind::Field {
                pipe: Pipeline::single(Instruction::string(name)),
            });
        }
        if self.cursor.peek() == Some('"') {
            return Ok(SelectorKind::Field {
                pipe: Pipeline::single(self.parse_string()?),
            });
        }
        Err(self
            .cursor
            .error(ErrorContext::FieldAccess, "expected field name"))
    }

    /// `[]`, `[key]`, `[from:to]` with either bound optional. The `[` is
    /// already consumed.
    fn parse_bracket(&mut self) -> ParseResult<SelectorKind> {
        if self.cursor.eat("]")? {
            return Ok(SelectorKind::Iterate);
        }

        let from = if self.cursor.eat(":")? {
            None
        } else {
            let key = self.parse_pipe()?;
            if self.cursor.eat("]")? {
                return Ok(SelectorKind::Field { pipe: key.into() });
            }
            if !self.cursor.eat(":")? {
                return Err(self
                    .cursor
                    .error(ErrorContext::VariableAccess, "expected ':' or ']'"));
            }
            Some(Pipeline::from(key))
        };

        let to = if self.cursor.eat("]")? {
            None
        } else {
            let to = self.parse_pipe()?;
            if !self.cursor.eat("]")? {
                return Err(self.cursor.error(ErrorContext::ArraySlice, "expected ']'"));
            }
            Some(Pipeline::from(to))
        };

        let null = || Pipeline::single(Instruction::ConstantNull);
        Ok(SelectorKind::Slice {
            from: from.unwrap_or_else(null),
            to: to.unwrap_or_else(null),
        })
    }

    /// Arguments up to the closing `)`. The `(` is already consumed.
    fn parse_call_args(&mut self, bound: bool) -> ParseResult<SelectorKind> {
        let mut args = Vec::new();
        if !self.cursor.eat(")")? {
            loop {
                args.push(Pipeline::from(self.parse_sub_pipe()?));
                if self.cursor.eat(")")? {
                    break;
                }
                if !self.cursor.eat(",")? {
                    return Err(self
                        .cursor
                        .error(ErrorContext::FunctionCall, "expected ',' or ')'"));
                }
            }
        }
        Ok(SelectorKind::Call { args, bound })
    }

    /// A trailing `?`, but not the start of `??` or `?=`.
    pub(super) fn parse_optional(&mut self) -> ParseResult<bool> {
        self.cursor.eat_not_before("?", "?=")
    }

    /// An assignment operator and its right-hand side, if one follows.
    pub(super) fn parse_assignment(&mut self) -> ParseResult<Option<Assignment>> {
        for &(symbol, not_before, op) in ASSIGNMENT_OPS {
            if self.cursor.eat_not_before(symbol, not_before)? {
                let pipe = self.parse_sub_route()?;
                return Ok(Some(Assignment {
                    op,
                    pipe: pipe.into(),
                }));
            }
        }
        Ok(None)
    }

    /// `(a, b, ...):` after `func`.
    pub(crate) fn parse_function_header(&mut self) -> ParseResult<Vec<String>> {
        if !self.cursor.eat("(")? {
            return Err(self
                .cursor
                .error(ErrorContext::FunctionDefinition, "expected '('"));
        }
        let mut arg_names = Vec::new();
        if !self.cursor.eat(")")? {
            loop {
                let Some(name) = self.cursor.variable_name()? else {
                    return Err(self
                        .cursor
                        .error(ErrorContext::FunctionDefinition, "expected argument name"));
                };
                arg_names.push(name);
                if self.cursor.eat(")")? {
                    break;
                }
                if !self.cursor.eat(",")? {
                    return Err(self
                        .cursor
                        .error(ErrorContext::FunctionDefinition, "expected ',' or ')'"));
                }
            }
        }
        if !self.cursor.eat(":")? {
            return Err(self
                .cursor
                .error(ErrorContext::FunctionDefinition, "expected ':'"));
        }
        Ok(arg_names)
    }
}
