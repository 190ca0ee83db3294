//! Primary expressions: `if`, literals, functions, variables, value access
//! and constructors.

use jpl_ir::{
    AssignmentOp, IfThen, Instruction, Interpolation, ObjectField, Pipeline, Selector, SelectorKind,
};
use tracing::trace;

use super::ParseResult;
use crate::error::ErrorContext;
use crate::Parser;

impl Parser<'_> {
    /// `if c then t [elif c then t]* [else e] end`
    pub(super) fn parse_if(&mut self) -> ParseResult {
        if !self.cursor.eat_keyword("if")? {
            return self.parse_constant();
        }

        let mut ifs = Vec::new();
        loop {
            let if_ = self.parse_pipe()?;
            if !self.cursor.eat_keyword("then")? {
                return Err(self
                    .cursor
                    .error(ErrorContext::IfStatement, "expected 'then'"));
            }
            let then = self.parse_pipe()?;
            ifs.push(IfThen {
                if_: if_.into(),
                then: then.into(),
            });
            if !self.cursor.eat_keyword("elif")? {
                break;
            }
        }

        let else_ = if self.cursor.eat_keyword("else")? {
            Some(Pipeline::from(self.parse_pipe()?))
        } else {
            None
        };

        if !self.cursor.eat_keyword("end")? {
            return Err(self
                .cursor
                .error(ErrorContext::IfStatement, "expected 'end'"));
        }
        Ok(vec![Instruction::If { ifs, else_ }])
    }

    fn parse_constant(&mut self) -> ParseResult {
        if self.cursor.eat_keyword("true")? {
            return Ok(vec![Instruction::ConstantTrue]);
        }
        if self.cursor.eat_keyword("false")? {
            return Ok(vec![Instruction::ConstantFalse]);
        }
        if self.cursor.eat_keyword("null")? {
            return Ok(vec![Instruction::ConstantNull]);
        }
        if let Some(number) = self.parse_number()? {
            return Ok(vec![number]);
        }
        self.parse_function_definition()
    }

    /// `digits [. digits] [(e|E) [+|-] digits]`
    fn parse_number(&mut self) -> ParseResult<Option<Instruction>> {
        let start = self.cursor.position();
        if self.cursor.digits().is_empty() {
            return Ok(None);
        }
        if self.cursor.one_of(".").is_some() {
            self.cursor.digits();
        }
        if self.cursor.one_of("eE").is_some() {
            self.cursor.one_of("+-");
            if self.cursor.digits().is_empty() {
                return Err(self.cursor.error(ErrorContext::Number, "expected digit"));
            }
        }
        let end = self.cursor.position();
        let text = self.cursor.slice(start, end);
        let value = text
            .parse::<f64>()
            .map_err(|_| self.cursor.error(ErrorContext::Number, "invalid number"))?;
        self.cursor.skip_trivia()?;
        Ok(Some(Instruction::Number { value }))
    }

    /// `func name(args): body` binds the function to `name` for the rest of
    /// the pipeline; `func (args): body` is an anonymous function value.
    fn parse_function_definition(&mut self) -> ParseResult {
        if !self.cursor.eat_keyword("func")? {
            return self.parse_variable_access();
        }
        let name = self.cursor.variable_name()?;
        let arg_names = self.parse_function_header()?;
        let body = self.parse_sub_route()?;
        trace!(?name, ?arg_names, "function definition");

        let function = Instruction::FunctionDefinition {
            arg_names,
            pipe: body.into(),
        };
        Ok(vec![match name {
            Some(name) => Instruction::VariableDefinition {
                name,
                pipe: Pipeline::single(function),
            },
            None => function,
        }])
    }

    /// `name`, `name<access>`, or an assignment to either.
    ///
    /// `name = rhs` without any access becomes a plain variable definition.
    /// Any other assignment rewrites the variable's current value and binds
    /// the result back to `name`.
    fn parse_variable_access(&mut self) -> ParseResult {
        let Some(name) = self.cursor.variable_name()? else {
            return self.parse_value_access();
        };
        let (operations, can_assign) = self.parse_access_chain(false)?;

        if can_assign {
            if let Some(assignment) = self.parse_assignment()? {
                trace!(%name, op = assignment.op.as_symbol(), "variable assignment");
                if operations.is_empty() && assignment.op == AssignmentOp::Set {
                    return Ok(vec![Instruction::VariableDefinition {
                        name,
                        pipe: assignment.pipe,
                    }]);
                }
                let target = Pipeline::single(Instruction::variable(name.clone()));
                return Ok(vec![Instruction::VariableDefinition {
                    name,
                    pipe: Pipeline::single(Instruction::Assignment {
                        pipe: target,
                        operations,
                        assignment,
                    }),
                }]);
            }
        }

        let variable = Instruction::variable(name);
        if operations.is_empty() {
            return Ok(vec![variable]);
        }
        Ok(vec![Instruction::Access {
            pipe: Pipeline::single(variable),
            operations,
        }])
    }

    /// `.`, `.name<access>`, `<primary><access>` and assignments to them.
    fn parse_value_access(&mut self) -> ParseResult {
        let mut operations = Vec::new();
        let base = if self.cursor.eat(".")? {
            if let Some(name) = self.cursor.variable_name()? {
                let optional = self.parse_optional()?;
                operations.push(Selector::field(name, optional));
            } else if self.cursor.peek() == Some('"') {
                let kind = SelectorKind::Field {
                    pipe: Pipeline::single(self.parse_string()?),
                };
                let optional = self.parse_optional()?;
                operations.push(Selector { kind, optional });
            }
            Vec::new()
        } else {
            self.parse_primary()?
        };

        let identity = base.is_empty() && operations.is_empty();
        let (chain, chain_can_assign) = self.parse_access_chain(identity)?;
        let can_assign = if chain.is_empty() {
            !operations.is_empty()
        } else {
            chain_can_assign
        };
        operations.extend(chain);

        if operations.is_empty() {
            return Ok(base);
        }
        if can_assign {
            if let Some(assignment) = self.parse_assignment()? {
                trace!(op = assignment.op.as_symbol(), "value assignment");
                return Ok(vec![Instruction::Assignment {
                    pipe: base.into(),
                    operations,
                    assignment,
                }]);
            }
        }
        Ok(vec![Instruction::Access {
            pipe: base.into(),
            operations,
        }])
    }

    /// Groups, strings and constructors.
    fn parse_primary(&mut self) -> ParseResult {
        match self.cursor.peek() {
            Some('(') => self.parse_group(),
            Some('"') => Ok(vec![self.parse_string()?]),
            Some('[') => self.parse_array_constructor(),
            Some('{') => self.parse_object_constructor(),
            _ => Err(self.cursor.error(ErrorContext::Value, "expected value")),
        }
    }

    /// `( pipe )` splices the inner pipeline into the surrounding one.
    fn parse_group(&mut self) -> ParseResult {
        self.cursor.eat("(")?;
        let pipe = self.parse_pipe()?;
        if !self.cursor.eat(")")? {
            return Err(self.cursor.error(ErrorContext::Group, "expected ')'"));
        }
        Ok(pipe)
    }

    /// `[]` or `[ pipe ]`
    fn parse_array_constructor(&mut self) -> ParseResult {
        self.cursor.eat("[")?;
        let pipe = if self.cursor.eat("]")? {
            Pipeline::void()
        } else {
            let pipe = self.parse_pipe()?;
            if !self.cursor.eat("]")? {
                return Err(self
                    .cursor
                    .error(ErrorContext::ArrayConstructor, "expected ']'"));
            }
            pipe.into()
        };
        Ok(vec![Instruction::ArrayConstructor { pipe }])
    }

    /// `{ key[?]: value, name, ... }`
    ///
    /// Keys are identifiers, string literals or `(pipe)`. A bare identifier
    /// `name` is shorthand for `name: .name`.
    fn parse_object_constructor(&mut self) -> ParseResult {
        self.cursor.eat("{")?;
        let mut fields = Vec::new();
        if self.cursor.eat("}")? {
            return Ok(vec![Instruction::ObjectConstructor { fields }]);
        }

        loop {
            let (key, shorthand) = if let Some(name) = self.cursor.identifier()? {
                (Pipeline::single(Instruction::string(name.clone())), Some(name))
            } else if self.cursor.peek() == Some('"') {
                (Pipeline::single(self.parse_string()?), None)
            } else if self.cursor.peek() == Some('(') {
                (Pipeline::from(self.parse_group()?), None)
            } else {
                return Err(self
                    .cursor
                    .error(ErrorContext::ObjectConstructor, "expected field name"));
            };
            let optional = self.cursor.eat_not_before("?", "?")?;

            let value = if self.cursor.eat(":")? {
                Pipeline::from(self.parse_sub_route()?)
            } else if let Some(name) = shorthand {
                Pipeline::single(Instruction::Access {
                    pipe: Pipeline::empty(),
                    operations: vec![Selector::field(name, false)],
                })
            } else {
                return Err(self
                    .cursor
                    .error(ErrorContext::ObjectConstructor, "expected ':'"));
            };
            fields.push(ObjectField {
                key,
                value,
                optional,
            });

            if self.cursor.eat("}")? {
                return Ok(vec![Instruction::ObjectConstructor { fields }]);
            }
            if !self.cursor.eat(",")? {
                return Err(self
                    .cursor
                    .error(ErrorContext::ObjectConstructor, "expected ',' or '}'"));
            }
        }
    }

    /// `"..."` with JSON escapes and `\( pipe )` interpolation.
    pub(super) fn parse_string(&mut self) -> ParseResult<Instruction> {
        self.cursor.bump();
        let mut interpolations = Vec::new();
        let mut current = String::new();

        loop {
            let Some(c) = self.cursor.bump() else {
                return Err(self.cursor.error(ErrorContext::String, "expected '\"'"));
            };
            match c {
                '"' => break,
                '\\' => {
                    if self.cursor.one_of("(").is_some() {
                        self.cursor.skip_trivia()?;
                        let pipe = self.parse_pipe()?;
                        if self.cursor.one_of(")").is_none() {
                            return Err(self.cursor.error(ErrorContext::String, "expected ')'"));
                        }
                        interpolations.push(Interpolation {
                            before: std::mem::take(&mut current),
                            pipe: pipe.into(),
                        });
                    } else {
                        current.push(self.parse_escape()?);
                    }
                }
                c => current.push(c),
            }
        }
        self.cursor.skip_trivia()?;

        if interpolations.is_empty() {
            return Ok(Instruction::String { value: current });
        }
        Ok(Instruction::InterpolatedString {
            interpolations,
            after: current,
        })
    }

    /// The character after a backslash.
    fn parse_escape(&mut self) -> ParseResult<char> {
        let escaped = match self.cursor.bump() {
            Some('"') => '"',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\u{8}',
            Some('f') => '\u{c}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') => return self.parse_unicode_escape(),
            _ => {
                return Err(self
                    .cursor
                    .error(ErrorContext::String, "invalid escape sequence"))
            }
        };
        Ok(escaped)
    }

    /// `\uXXXX`, combining a surrogate pair written as two escapes.
    fn parse_unicode_escape(&mut self) -> ParseResult<char> {
        let first = self.parse_hex4()?;
        if (0xD800..0xDC00).contains(&first) && self.cursor.eat_raw("\\u") {
            let second = self.parse_hex4()?;
            if (0xDC00..0xE000).contains(&second) {
                let code = 0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00);
                if let Some(c) = char::from_u32(code) {
                    return Ok(c);
                }
            }
        }
        char::from_u32(first).ok_or_else(|| {
            self.cursor
                .error(ErrorContext::String, "invalid unicode escape")
        })
    }

    fn parse_hex4(&mut self) -> ParseResult<u32> {
        let mut code = 0;
        for _ in 0..4 {
            let digit = self
                .cursor
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.cursor.error(ErrorContext::String, "expected hex digit"))?;
            self.cursor.bump();
            code = code * 16 + digit;
        }
        Ok(code)
    }
}
