//! Operator tags carried by calculation, comparison and assignment instructions.

/// Arithmetic operators of a calculation chain.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArithmeticOp {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Remainder,
}

impl ArithmeticOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Addition => "+",
            Self::Subtraction => "-",
            Self::Multiplication => "*",
            Self::Division => "/",
            Self::Remainder => "%",
        }
    }

    /// Returns `true` for `*`, `/` and `%`, which bind tighter than `+` and `-`.
    pub const fn is_multiplicative(self) -> bool {
        matches!(
            self,
            Self::Multiplication | Self::Division | Self::Remainder
        )
    }
}

/// Comparison operators of a comparison chain.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ComparisonOp {
    Equal,
    Unequal,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl ComparisonOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::Unequal => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
        }
    }

    /// Returns `true` for `==` and `!=`.
    ///
    /// Equality operators sit one level looser than the relational ones.
    pub const fn is_equality(self) -> bool {
        matches!(self, Self::Equal | Self::Unequal)
    }
}

/// Assignment kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignmentOp {
    /// `=`: replace the target with the right-hand side.
    Set,
    /// `|=`: evaluate the right-hand side with the target as input.
    Update,
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Remainder,
    /// `?=`: assign only when the target is `null`.
    NullCoalescence,
}

impl AssignmentOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Set => "=",
            Self::Update => "|=",
            Self::Addition => "+=",
            Self::Subtraction => "-=",
            Self::Multiplication => "*=",
            Self::Division => "/=",
            Self::Remainder => "%=",
            Self::NullCoalescence => "?=",
        }
    }

    /// The arithmetic operator a compound assignment applies, if any.
    pub const fn arithmetic(self) -> Option<ArithmeticOp> {
        match self {
            Self::Addition => Some(ArithmeticOp::Addition),
            Self::Subtraction => Some(ArithmeticOp::Subtraction),
            Self::Multiplication => Some(ArithmeticOp::Multiplication),
            Self::Division => Some(ArithmeticOp::Division),
            Self::Remainder => Some(ArithmeticOp::Remainder),
            Self::Set | Self::Update | Self::NullCoalescence => None,
        }
    }
}
