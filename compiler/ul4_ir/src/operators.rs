//! Operator kinds with their precedence and wire tags.

/// Binary operators, including subscription.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    FloorDiv,
    TrueDiv,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Membership
    Contains,
    NotContains,
    // Logical (short-circuit)
    And,
    Or,
    // Subscription `a[b]`
    GetItem,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 17] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::FloorDiv,
        Self::TrueDiv,
        Self::Mod,
        Self::Eq,
        Self::Ne,
        Self::Lt,
        Self::Le,
        Self::Gt,
        Self::Ge,
        Self::Contains,
        Self::NotContains,
        Self::And,
        Self::Or,
        Self::GetItem,
    ];

    /// Operator symbol as written in source.
    ///
    /// `GetItem` has no infix symbol and returns `[]`.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::FloorDiv => "//",
            Self::TrueDiv => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Contains => "in",
            Self::NotContains => "not in",
            Self::And => "and",
            Self::Or => "or",
            Self::GetItem => "[]",
        }
    }

    /// Binding strength; higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Or => 0,
            Self::And => 1,
            Self::Contains | Self::NotContains => 3,
            Self::Eq | Self::Ne | Self::Lt | Self::Le | Self::Gt | Self::Ge => 4,
            Self::Add | Self::Sub => 5,
            Self::Mul | Self::FloorDiv | Self::TrueDiv | Self::Mod => 6,
            Self::GetItem => 9,
        }
    }

    /// Whether `a op (b op c)` may drop its parentheses.
    pub const fn is_associative(self) -> bool {
        matches!(self, Self::Add | Self::Mul | Self::And | Self::Or)
    }

    /// Wire tag suffix (`de.livinglogic.ul4.<tag>`).
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::FloorDiv => "floordiv",
            Self::TrueDiv => "truediv",
            Self::Mod => "mod",
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Contains => "contains",
            Self::NotContains => "notcontains",
            Self::And => "and",
            Self::Or => "or",
            Self::GetItem => "getitem",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.tag() == tag)
    }

    /// Whether the result is computed without evaluating both operands first.
    pub const fn is_short_circuit(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

/// Prefix operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `not x`
    Not,
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 2] = [UnaryOp::Neg, UnaryOp::Not];

    pub const fn precedence(self) -> u8 {
        match self {
            Self::Neg => 7,
            Self::Not => 2,
        }
    }

    /// Prefix text including any trailing space.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "not ",
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Neg => "neg",
            Self::Not => "not",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.tag() == tag)
    }
}

/// Augmented assignment operators (`x += y` and friends).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AugOp {
    Add,
    Sub,
    Mul,
    TrueDiv,
    FloorDiv,
    Mod,
}

impl AugOp {
    pub const ALL: [AugOp; 6] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::TrueDiv,
        Self::FloorDiv,
        Self::Mod,
    ];

    /// The binary operator applied before storing.
    pub const fn binary(self) -> BinaryOp {
        match self {
            Self::Add => BinaryOp::Add,
            Self::Sub => BinaryOp::Sub,
            Self::Mul => BinaryOp::Mul,
            Self::TrueDiv => BinaryOp::TrueDiv,
            Self::FloorDiv => BinaryOp::FloorDiv,
            Self::Mod => BinaryOp::Mod,
        }
    }

    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+=",
            Self::Sub => "-=",
            Self::Mul => "*=",
            Self::TrueDiv => "/=",
            Self::FloorDiv => "//=",
            Self::Mod => "%=",
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Add => "addvar",
            Self::Sub => "subvar",
            Self::Mul => "mulvar",
            Self::TrueDiv => "truedivvar",
            Self::FloorDiv => "floordivvar",
            Self::Mod => "modvar",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.tag() == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for op in BinaryOp::ALL {
            assert_eq!(BinaryOp::from_tag(op.tag()), Some(op));
        }
        for op in AugOp::ALL {
            assert_eq!(AugOp::from_tag(op.tag()), Some(op));
        }
        assert_eq!(BinaryOp::from_tag("pow"), None);
    }

    #[test]
    fn precedence_order() {
        assert!(BinaryOp::Or.precedence() < BinaryOp::And.precedence());
        assert!(BinaryOp::And.precedence() < UnaryOp::Not.precedence());
        assert!(UnaryOp::Not.precedence() < BinaryOp::Contains.precedence());
        assert!(BinaryOp::Contains.precedence() < BinaryOp::Eq.precedence());
        assert!(BinaryOp::Add.precedence() < BinaryOp::Mul.precedence());
        assert!(BinaryOp::Mul.precedence() < UnaryOp::Neg.precedence());
        assert!(UnaryOp::Neg.precedence() < BinaryOp::GetItem.precedence());
    }

    #[test]
    fn associativity() {
        assert!(BinaryOp::Add.is_associative());
        assert!(!BinaryOp::Sub.is_associative());
        assert!(!BinaryOp::Lt.is_associative());
        assert!(!BinaryOp::GetItem.is_associative());
        assert!(BinaryOp::Or.is_associative());
    }
}
