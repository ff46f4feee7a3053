use std::sync::Arc;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the constants that can appear directly in source
/// code: `nil`, booleans, numbers and strings. Array and object literals are
/// separate expressions because their elements are evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// The `nil` literal.
    Nil,
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
    /// A 64-bit signed integer literal, decimal or hexadecimal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Real(f64),
    /// A string literal with escapes already resolved.
    Text(Arc<str>),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Text(Arc::from(value))
    }
}

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Each variant models a distinct syntactic construct. Every node records the
/// 1-based byte position of the token that introduced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean or nil).
    Literal {
        /// The constant value.
        value:    LiteralValue,
        /// Position in the source code.
        position: usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name:     String,
        /// Position in the source code.
        position: usize,
    },
    /// A unary operation (`-x`, `!x`, `~x`).
    UnaryOp {
        /// The unary operator to apply.
        op:       UnaryOperator,
        /// The operand expression.
        expr:     Box<Self>,
        /// Position of the operator.
        position: usize,
    },
    /// A binary operation.
    BinaryOp {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Position of the operator.
        position: usize,
    },
    /// Call of a host function (e.g. `len(x)`).
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Position of the function name.
        position:  usize,
    },
    /// Array literal, e.g. `[1, 2, 3]`.
    ArrayLiteral {
        /// The elements of the array.
        elements: Vec<Self>,
        /// Position of the opening bracket.
        position: usize,
    },
    /// Object literal, e.g. `{"a": 1}`.
    ObjectLiteral {
        /// Key and value expressions in source order.
        members:  Vec<(Self, Self)>,
        /// Position of the opening brace.
        position: usize,
    },
    /// Static member access, e.g. `obj.name`.
    FieldAccess {
        /// The accessed value.
        target:   Box<Self>,
        /// Name of the member.
        name:     String,
        /// Position of the `.`.
        position: usize,
    },
    /// Dynamic member or element access, e.g. `arr[0]` or `obj["name"]`.
    Index {
        /// The accessed value.
        target:   Box<Self>,
        /// Key or index expression.
        index:    Box<Self>,
        /// Position of the opening bracket.
        position: usize,
    },
    /// Slice of an array or string, e.g. `arr[1:3]`.
    Slice {
        /// The sliced value.
        target:   Box<Self>,
        /// Start bound, `0` if omitted.
        from:     Option<Box<Self>>,
        /// End bound, the length if omitted.
        to:       Option<Box<Self>>,
        /// Position of the opening bracket.
        position: usize,
    },
}

impl Expr {
    /// Gets the source position from `self`.
    /// ## Example
    /// ```
    /// use dynexpr::ast::Expr;
    ///
    /// let expr = Expr::Variable { name:     "x".to_string(),
    ///                             position: 5, };
    ///
    /// assert_eq!(expr.position(), 5);
    /// ```
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Literal { position, .. }
            | Self::Variable { position, .. }
            | Self::UnaryOp { position, .. }
            | Self::BinaryOp { position, .. }
            | Self::FunctionCall { position, .. }
            | Self::ArrayLiteral { position, .. }
            | Self::ObjectLiteral { position, .. }
            | Self::FieldAccess { position, .. }
            | Self::Index { position, .. }
            | Self::Slice { position, .. } => *position,
        }
    }
}

/// Represents a binary operator.
///
/// Binary operators include logic, comparisons, membership, bit manipulation
/// and arithmetic.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Logical or (`||`)
    Or,
    /// Logical and (`&&`)
    And,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Array membership (`in`)
    In,
    /// Bitwise or (`|`)
    BitOr,
    /// Bitwise exclusive or (`^`)
    BitXor,
    /// Bitwise and (`&`)
    BitAnd,
    /// Left shift (`<<`)
    ShiftLeft,
    /// Right shift (`>>`)
    ShiftRight,
    /// Addition and concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
    /// Bitwise NOT (e.g. `~x`).
    BitNot,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, BitAnd, BitOr, BitXor, Div, Equal, Greater, GreaterEqual, In, Less,
            LessEqual, Mod, Mul, NotEqual, Or, ShiftLeft, ShiftRight, Sub,
        };
        let operator = match self {
            Or => "||",
            And => "&&",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            In => "in",
            BitOr => "|",
            BitXor => "^",
            BitAnd => "&",
            ShiftLeft => "<<",
            ShiftRight => ">>",
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Negate => "-",
            Self::Not => "!",
            Self::BitNot => "~",
        };
        write!(f, "{operator}")
    }
}
