//! Operator levels from equality down to unary negation.

use jpl_ir::{ArithmeticOp, CalculationStep, ComparisonOp, ComparisonStep, Instruction, Pipeline};

use super::ParseResult;
use crate::Parser;

/// `(symbol, excluded next characters, operator)`, tried in order.
const EQUALITY_OPS: &[(&str, &str, ComparisonOp)] = &[
    ("==", "", ComparisonOp::Equal),
    ("!=", "", ComparisonOp::Unequal),
];

const RELATIONAL_OPS: &[(&str, &str, ComparisonOp)] = &[
    ("<=", "", ComparisonOp::LessEqual),
    ("<", "", ComparisonOp::Less),
    (">=", "", ComparisonOp::GreaterEqual),
    (">", "", ComparisonOp::Greater),
];

const ADDITIVE_OPS: &[(&str, &str, ArithmeticOp)] = &[
    ("+", "=", ArithmeticOp::Addition),
    ("-", "=>", ArithmeticOp::Subtraction),
];

const MULTIPLICATIVE_OPS: &[(&str, &str, ArithmeticOp)] = &[
    ("*", "=", ArithmeticOp::Multiplication),
    ("/", "=", ArithmeticOp::Division),
    ("%", "=", ArithmeticOp::Remainder),
];

impl Parser<'_> {
    pub(super) fn parse_equality(&mut self) -> ParseResult {
        self.parse_comparison_chain(EQUALITY_OPS, Self::parse_relational)
    }

    fn parse_relational(&mut self) -> ParseResult {
        self.parse_comparison_chain(RELATIONAL_OPS, Self::parse_not)
    }

    /// `a op b op c ...` as one comparison instruction, or `a` untouched
    /// when no operator follows.
    fn parse_comparison_chain(
        &mut self,
        ops: &[(&str, &str, ComparisonOp)],
        operand: fn(&mut Self) -> ParseResult,
    ) -> ParseResult {
        let pipe = operand(self)?;
        let mut comparisons = Vec::new();
        while let Some(op) = self.match_operator(ops)? {
            let by = operand(self)?;
            comparisons.push(ComparisonStep {
                op,
                by: by.into(),
            });
        }
        if comparisons.is_empty() {
            return Ok(pipe);
        }
        Ok(vec![Instruction::Comparison {
            pipe: pipe.into(),
            comparisons,
        }])
    }

    /// `not a` appends a `not` instruction after `a`.
    fn parse_not(&mut self) -> ParseResult {
        if !self.cursor.eat_keyword("not")? {
            return self.parse_error_suppression();
        }
        let mut pipe = self.parse_error_suppression()?;
        pipe.push(Instruction::Not);
        Ok(pipe)
    }

    /// `a?` is `try a` with a catch arm that produces nothing.
    fn parse_error_suppression(&mut self) -> ParseResult {
        let pipe = self.parse_additive()?;
        if !self.cursor.eat_not_before("?", "?=")? {
            return Ok(pipe);
        }
        Ok(vec![Instruction::Try {
            try_: pipe.into(),
            catch: Pipeline::void(),
        }])
    }

    fn parse_additive(&mut self) -> ParseResult {
        self.parse_calculation_chain(ADDITIVE_OPS, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> ParseResult {
        self.parse_calculation_chain(MULTIPLICATIVE_OPS, Self::parse_null_coalescence)
    }

    fn parse_calculation_chain(
        &mut self,
        ops: &[(&str, &str, ArithmeticOp)],
        operand: fn(&mut Self) -> ParseResult,
    ) -> ParseResult {
        let pipe = operand(self)?;
        let mut operations = Vec::new();
        while let Some(op) = self.match_operator(ops)? {
            let by = operand(self)?;
            operations.push(CalculationStep {
                op,
                by: by.into(),
            });
        }
        if operations.is_empty() {
            return Ok(pipe);
        }
        Ok(vec![Instruction::Calculation {
            pipe: pipe.into(),
            operations,
        }])
    }

    fn parse_null_coalescence(&mut self) -> ParseResult {
        let mut pipes = vec![self.parse_negation()?];
        while self.cursor.eat("??")? {
            pipes.push(self.parse_negation()?);
        }
        if pipes.len() == 1 {
            return Ok(pipes.pop().unwrap_or_default());
        }
        Ok(vec![Instruction::NullCoalescence {
            pipes: pipes.into_iter().map(Pipeline::from).collect(),
        }])
    }

    /// `-a` appends a `negation` instruction after `a`.
    fn parse_negation(&mut self) -> ParseResult {
        if !self.cursor.eat_not_before("-", "=>")? {
            return self.parse_if();
        }
        let mut pipe = self.parse_if()?;
        pipe.push(Instruction::Negation);
        Ok(pipe)
    }

    fn match_operator<Op: Copy>(&mut self, ops: &[(&str, &str, Op)]) -> ParseResult<Option<Op>> {
        for &(symbol, not_before, op) in ops {
            if self.cursor.eat_not_before(symbol, not_before)? {
                return Ok(Some(op));
            }
        }
        Ok(None)
    }
}
