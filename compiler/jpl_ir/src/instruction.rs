//! Instructions and pipelines.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::operators::{ArithmeticOp, AssignmentOp, ComparisonOp};

/// An ordered sequence of instructions.
///
/// The outputs of instruction *k* feed instruction *k + 1*, one value at a
/// time. An empty pipeline is the identity.
#[derive(Clone, PartialEq)]
pub struct Pipeline(Arc<[Instruction]>);

impl Pipeline {
    /// Create a pipeline from a list of instructions.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Pipeline(Arc::from(instructions))
    }

    /// The identity pipeline.
    pub fn empty() -> Self {
        Pipeline::new(Vec::new())
    }

    /// A pipeline holding a single instruction.
    pub fn single(instruction: Instruction) -> Self {
        Pipeline::new(vec![instruction])
    }

    /// A pipeline that produces no outputs.
    pub fn void() -> Self {
        Pipeline::single(Instruction::Void)
    }

    /// Returns `true` if this pipeline is exactly `[void]`.
    pub fn is_void(&self) -> bool {
        matches!(&*self.0, [Instruction::Void])
    }

    /// Returns the instructions as a slice.
    #[inline]
    pub fn instructions(&self) -> &[Instruction] {
        &self.0
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline::empty()
    }
}

impl Deref for Pipeline {
    type Target = [Instruction];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Instruction>> for Pipeline {
    fn from(instructions: Vec<Instruction>) -> Self {
        Pipeline::new(instructions)
    }
}

impl FromIterator<Instruction> for Pipeline {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Pipeline::new(iter.into_iter().collect())
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// A single node of the instruction tree.
#[derive(Clone, PartialEq, Debug)]
pub enum Instruction {
    ConstantTrue,
    ConstantFalse,
    ConstantNull,
    Number {
        value: f64,
    },
    String {
        value: String,
    },
    /// `"before\(pipe)...after"`
    InterpolatedString {
        interpolations: Vec<Interpolation>,
        after: String,
    },
    Variable {
        name: String,
    },
    /// Binds every output of `pipe` to `name` for the rest of the enclosing
    /// pipeline, passing the input through unchanged.
    VariableDefinition {
        name: String,
        pipe: Pipeline,
    },
    FunctionDefinition {
        arg_names: Vec<String>,
        pipe: Pipeline,
    },
    Access {
        pipe: Pipeline,
        operations: Vec<Selector>,
    },
    Assignment {
        pipe: Pipeline,
        operations: Vec<Selector>,
        assignment: Assignment,
    },
    Calculation {
        pipe: Pipeline,
        operations: Vec<CalculationStep>,
    },
    Comparison {
        pipe: Pipeline,
        comparisons: Vec<ComparisonStep>,
    },
    If {
        ifs: Vec<IfThen>,
        else_: Option<Pipeline>,
    },
    And {
        pipes: Vec<Pipeline>,
    },
    Or {
        pipes: Vec<Pipeline>,
    },
    NullCoalescence {
        pipes: Vec<Pipeline>,
    },
    Negation,
    Not,
    Try {
        try_: Pipeline,
        catch: Pipeline,
    },
    ArrayConstructor {
        pipe: Pipeline,
    },
    ObjectConstructor {
        fields: Vec<ObjectField>,
    },
    OutputConcat {
        pipes: Vec<Pipeline>,
    },
    Void,
}

impl Instruction {
    /// Shorthand for a string literal instruction.
    pub fn string(value: impl Into<String>) -> Self {
        Instruction::String {
            value: value.into(),
        }
    }

    /// Shorthand for a variable reference.
    pub fn variable(name: impl Into<String>) -> Self {
        Instruction::Variable { name: name.into() }
    }

    /// Short lowercase name of the instruction kind, used in traces.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::ConstantTrue | Self::ConstantFalse | Self::ConstantNull => "constant",
            Self::Number { .. } => "number",
            Self::String { .. } => "string",
            Self::InterpolatedString { .. } => "interpolated string",
            Self::Variable { .. } => "variable",
            Self::VariableDefinition { .. } => "variable definition",
            Self::FunctionDefinition { .. } => "function definition",
            Self::Access { .. } => "access",
            Self::Assignment { .. } => "assignment",
            Self::Calculation { .. } => "calculation",
            Self::Comparison { .. } => "comparison",
            Self::If { .. } => "if",
            Self::And { .. } => "and",
            Self::Or { .. } => "or",
            Self::NullCoalescence { .. } => "null coalescence",
            Self::Negation => "negation",
            Self::Not => "not",
            Self::Try { .. } => "try",
            Self::ArrayConstructor { .. } => "array constructor",
            Self::ObjectConstructor { .. } => "object constructor",
            Self::OutputConcat { .. } => "output concat",
            Self::Void => "void",
        }
    }
}

/// One literal segment plus the pipeline interpolated after it.
#[derive(Clone, PartialEq, Debug)]
pub struct Interpolation {
    pub before: String,
    pub pipe: Pipeline,
}

/// One step of an access or assignment path.
#[derive(Clone, PartialEq, Debug)]
pub struct Selector {
    pub kind: SelectorKind,
    /// Degrade missing data and type mismatches to zero outputs.
    pub optional: bool,
}

impl Selector {
    /// `.name` style field access with a literal key.
    pub fn field(name: impl Into<String>, optional: bool) -> Self {
        Selector {
            kind: SelectorKind::Field {
                pipe: Pipeline::single(Instruction::string(name)),
            },
            optional,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum SelectorKind {
    /// `.name` or `[key]`
    Field { pipe: Pipeline },
    /// `[]`
    Iterate,
    /// `[from:to]`; an absent bound is `[null]`.
    Slice { from: Pipeline, to: Pipeline },
    /// `(args)`, or `->(args)` when `bound`.
    Call { args: Vec<Pipeline>, bound: bool },
}

impl SelectorKind {
    /// Returns `true` if this step may appear on the left of an assignment.
    pub const fn is_assignable(&self) -> bool {
        !matches!(self, Self::Call { .. })
    }
}

/// Right-hand side of an assignment.
#[derive(Clone, PartialEq, Debug)]
pub struct Assignment {
    pub op: AssignmentOp,
    pub pipe: Pipeline,
}

#[derive(Clone, PartialEq, Debug)]
pub struct CalculationStep {
    pub op: ArithmeticOp,
    pub by: Pipeline,
}

#[derive(Clone, PartialEq, Debug)]
pub struct ComparisonStep {
    pub op: ComparisonOp,
    pub by: Pipeline,
}

#[derive(Clone, PartialEq, Debug)]
pub struct IfThen {
    pub if_: Pipeline,
    pub then: Pipeline,
}

/// A single `key: value` entry of an object constructor.
#[derive(Clone, PartialEq, Debug)]
pub struct ObjectField {
    pub key: Pipeline,
    pub value: Pipeline,
    /// Omit the field when its value is `null`.
    pub optional: bool,
}
