//! Instruction tree to source text.
//!
//! Every operand pipeline is printed inside parentheses. The parser splices
//! a parenthesized group into the surrounding pipeline, so the parentheses
//! never show up in the reparsed tree.


use jpl_ir::{
    Assignment, AssignmentOp, Instruction, Interpolation, ObjectField, Pipeline, Selector,
    SelectorKind,
};
use jpl_stack::ensure_sufficient_stack;

use crate::emitter::Emitter;

pub struct Printer<'e, E: Emitter> {
    out: &'e mut E,
}

impl<'e, E: Emitter> Printer<'e, E> {
    pub fn new(out: &'e mut E) -> Self {
        Printer { out }
    }

    /// Instructions joined by ` | `; the empty pipeline prints as `.`.
    pub fn print_pipeline(&mut self, pipe: &Pipeline) {
        if pipe.is_empty() {
            self.out.emit(".");
            return;
        }
        for (i, instruction) in pipe.iter().enumerate() {
            if i > 0 {
                self.out.emit(" | ");
            }
            self.print_instruction(instruction);
        }
    }

    /// An operand pipeline: `(pipe)`.
    fn print_operand(&mut self, pipe: &Pipeline) {
        self.out.emit_char('(');
        self.print_pipeline(pipe);
        self.out.emit_char(')');
    }

    /// Operands separated by `separator`, each parenthesized.
    fn print_separated(&mut self, pipes: &[Pipeline], separator: &str) {
        for (i, pipe) in pipes.iter().enumerate() {
            if i > 0 {
                self.out.emit(separator);
            }
            self.print_operand(pipe);
        }
    }

    fn print_instruction(&mut self, instruction: &Instruction) {
        ensure_sufficient_stack(|| self.print_instruction_inner(instruction));
    }

    fn print_instruction_inner(&mut self, instruction: &Instruction) {
        match instruction {
            Instruction::ConstantTrue => self.out.emit("true"),
            Instruction::ConstantFalse => self.out.emit("false"),
            Instruction::ConstantNull => self.out.emit("null"),
            Instruction::Number { value } => self.print_number(*value),
            Instruction::String { value } => {
                self.out.emit_char('"');
                self.print_string_content(value);
                self.out.emit_char('"');
            }
            Instruction::InterpolatedString {
                interpolations,
                after,
            } => self.print_interpolated(interpolations, after),
            Instruction::Variable { name } => self.out.emit(name),
            Instruction::VariableDefinition { name, pipe } => {
                self.print_variable_definition(name, pipe);
            }
            Instruction::FunctionDefinition { arg_names, pipe } => {
                self.out.emit("func ");
                self.print_function(arg_names, pipe);
            }
            Instruction::Access { pipe, operations } => {
                self.print_access(pipe, operations);
            }
            Instruction::Assignment {
                pipe,
                operations,
                assignment,
            } => {
                self.print_access(pipe, operations);
                self.print_assignment(assignment);
            }
            Instruction::Calculation { pipe, operations } => {
                self.print_operand(pipe);
                for step in operations {
                    self.out.emit_char(' ');
                    self.out.emit(step.op.as_symbol());
                    self.out.emit_char(' ');
                    self.print_operand(&step.by);
                }
            }
            Instruction::Comparison { pipe, comparisons } => {
                self.print_operand(pipe);
                for step in comparisons {
                    self.out.emit_char(' ');
                    self.out.emit(step.op.as_symbol());
                    self.out.emit_char(' ');
                    self.print_operand(&step.by);
                }
            }
            Instruction::If { ifs, else_ } => {
                for (i, branch) in ifs.iter().enumerate() {
                    self.out.emit(if i == 0 { "if " } else { " elif " });
                    self.print_operand(&branch.if_);
                    self.out.emit(" then ");
                    self.print_operand(&branch.then);
                }
                if let Some(else_) = else_ {
                    self.out.emit(" else ");
                    self.print_operand(else_);
                }
                self.out.emit(" end");
            }
            Instruction::And { pipes } => self.print_separated(pipes, " and "),
            Instruction::Or { pipes } => self.print_separated(pipes, " or "),
            Instruction::NullCoalescence { pipes } => self.print_separated(pipes, " ?? "),
            Instruction::OutputConcat { pipes } => self.print_separated(pipes, ", "),
            Instruction::Negation => self.out.emit("-."),
            Instruction::Not => self.out.emit("not ."),
            Instruction::Try { try_, catch } => {
                self.out.emit("try ");
                self.print_operand(try_);
                if !catch.is_void() {
                    self.out.emit(" catch ");
                    self.print_operand(catch);
                }
            }
            Instruction::ArrayConstructor { pipe } => {
                self.out.emit_char('[');
                if !pipe.is_void() {
                    self.print_pipeline(pipe);
                }
                self.out.emit_char(']');
            }
            Instruction::ObjectConstructor { fields } => self.print_object(fields),
            // Iterating an empty array yields nothing, just like `void`.
            Instruction::Void => self.out.emit("[][]"),
        }
    }

    /// Finite non-negative numbers in plain decimal notation. Anything else
    /// prints as an expression that evaluates to it.
    fn print_number(&mut self, value: f64) {
        if value.is_nan() {
            self.out.emit("(1e999 - 1e999)");
        } else if value.is_infinite() {
            self.out
                .emit(if value > 0.0 { "1e999" } else { "-(1e999)" });
        } else if value.is_sign_negative() {
            self.out.emit("-(");
            self.print_number(-value);
            self.out.emit_char(')');
        } else {
            self.out.emit(&value.to_string());
        }
    }

    /// String content with JSON escapes. A backslash is always escaped, so
    /// `\(` never appears by accident.
    fn print_string_content(&mut self, value: &str) {
        for c in value.chars() {
            match c {
                '"' => self.out.emit("\\\""),
                '\\' => self.out.emit("\\\\"),
                '\n' => self.out.emit("\\n"),
                '\r' => self.out.emit("\\r"),
                '\t' => self.out.emit("\\t"),
                '\u{8}' => self.out.emit("\\b"),
                '\u{c}' => self.out.emit("\\f"),
                c if c.is_control() => {
                    self.out.emit(&format!("\\u{:04x}", u32::from(c)));
                }
                c => self.out.emit_char(c),
            }
        }
    }

    fn print_interpolated(&mut self, interpolations: &[Interpolation], after: &str) {
        self.out.emit_char('"');
        for interpolation in interpolations {
            self.print_string_content(&interpolation.before);
            self.out.emit("\\(");
            self.print_pipeline(&interpolation.pipe);
            self.out.emit_char(')');
        }
        self.print_string_content(after);
        self.out.emit_char('"');
    }

    /// `func name(...)`, `name<path> op= (rhs)` or `name = (rhs)`.
    fn print_variable_definition(&mut self, name: &str, pipe: &Pipeline) {
        if let [Instruction::FunctionDefinition { arg_names, pipe }] = &pipe[..] {
            self.out.emit("func ");
            self.out.emit(name);
            self.print_function(arg_names, pipe);
            return;
        }

        if let [Instruction::Assignment {
            pipe: target,
            operations,
            assignment,
        }] = &pipe[..]
        {
            let rebinds_self = matches!(
                &target[..],
                [Instruction::Variable { name: variable }] if variable == name
            );
            if rebinds_self && !(operations.is_empty() && assignment.op == AssignmentOp::Set) {
                self.out.emit(name);
                self.print_selectors(operations);
                self.print_assignment(assignment);
                return;
            }
        }

        self.out.emit(name);
        self.out.emit(" = ");
        self.print_operand(pipe);
    }

    fn print_function(&mut self, arg_names: &[String], body: &Pipeline) {
        self.out.emit_char('(');
        self.out.emit(&arg_names.join(", "));
        self.out.emit("): ");
        self.print_operand(body);
    }

    fn print_access(&mut self, base: &Pipeline, operations: &[Selector]) {
        if base.is_empty() {
            self.out.emit_char('.');
        } else {
            self.print_operand(base);
        }
        self.print_selectors(operations);
    }

    fn print_selectors(&mut self, operations: &[Selector]) {
        for selector in operations {
            match &selector.kind {
                SelectorKind::Field { pipe } => {
                    self.out.emit_char('[');
                    self.print_operand(pipe);
                    self.out.emit_char(']');
                }
                SelectorKind::Iterate => self.out.emit("[]"),
                SelectorKind::Slice { from, to } => {
                    self.out.emit_char('[');
                    self.print_operand(from);
                    self.out.emit_char(':');
                    self.print_operand(to);
                    self.out.emit_char(']');
                }
                SelectorKind::Call { args, bound } => {
                    if *bound {
                        self.out.emit("->");
                    }
                    self.out.emit_char('(');
                    self.print_separated(args, ", ");
                    self.out.emit_char(')');
                }
            }
            if selector.optional {
                self.out.emit_char('?');
            }
        }
    }

    fn print_assignment(&mut self, assignment: &Assignment) {
        self.out.emit_char(' ');
        self.out.emit(assignment.op.as_symbol());
        self.out.emit_char(' ');
        self.print_operand(&assignment.pipe);
    }

    fn print_object(&mut self, fields: &[ObjectField]) {
        self.out.emit_char('{');
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.out.emit(", ");
            }
            self.print_operand(&field.key);
            if field.optional {
                self.out.emit_char('?');
            }
            self.out.emit(": ");
            self.print_operand(&field.value);
        }
        self.out.emit_char('}');
    }
}
