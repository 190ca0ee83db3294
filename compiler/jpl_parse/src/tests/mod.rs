//! Parser tests.
//!
//! - `grammar`: the instruction trees each construct produces
//! - `errors`: syntax error contexts, messages and offsets

#![allow(clippy::unwrap_used, clippy::expect_used)]


use jpl_ir::{Instruction, Pipeline, Selector};

use crate::{parse, ParseError};

fn parse_ok(source: &str) -> Vec<Instruction> {
    match parse(source) {
        Ok(pipeline) => pipeline.to_vec(),
        Err(err) => panic!("failed to parse {source:?}: {err}"),
    }
}

fn parse_err(source: &str) -> ParseError {
    match parse(source) {
        Ok(pipeline) => panic!("expected {source:?} to fail, got {pipeline:?}"),
        Err(err) => err,
    }
}

fn pipe(instructions: Vec<Instruction>) -> Pipeline {
    Pipeline::new(instructions)
}

fn num(value: f64) -> Pipeline {
    Pipeline::single(Instruction::Number { value })
}

fn field(name: &str) -> Selector {
    Selector::field(name, false)
}

/// `.a.b...` on the input value.
fn dot(names: &[&str]) -> Instruction {
    Instruction::Access {
        pipe: Pipeline::empty(),
        operations: names.iter().map(|name| field(name)).collect(),
    }
}
