//! Operator tables.
//!
//! An [`OperatorSpec`] is an ordered set of infix operator descriptors. It is
//! supplied once when a [`crate::ParsingContext`] is built and never changes
//! afterwards. Higher precedence binds tighter.
//!
//! Tables can be written in code or read from a small text format, one
//! descriptor per line:
//!
//! ```text
//! # symbol precedence associativity
//! +  6 left
//! ^  8 right
//! == 4 none
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Symbols the grammar itself uses; they can never be operators.
pub const RESERVED_SYMBOLS: &[&str] = &["=", "->", "\\", "(", ")"];

/// Characters the lexer groups into operator tokens.
pub const OPERATOR_CHARS: &str = "-+*/^<>=!&|.:$%~?@#";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    None,
}

impl fmt::Display for Associativity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Associativity::Left => "left",
            Associativity::Right => "right",
            Associativity::None => "none",
        })
    }
}

impl FromStr for Associativity {
    type Err = OperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Associativity::Left),
            "right" => Ok(Associativity::Right),
            "none" => Ok(Associativity::None),
            other => Err(OperatorError::InvalidAssociativity(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperatorDescriptor {
    pub symbol: String,
    pub precedence: i32,
    pub associativity: Associativity,
}

impl OperatorDescriptor {
    pub fn new(symbol: impl Into<String>, precedence: i32, associativity: Associativity) -> Self {
        Self {
            symbol: symbol.into(),
            precedence,
            associativity,
        }
    }

    pub fn left(symbol: impl Into<String>, precedence: i32) -> Self {
        Self::new(symbol, precedence, Associativity::Left)
    }

    pub fn right(symbol: impl Into<String>, precedence: i32) -> Self {
        Self::new(symbol, precedence, Associativity::Right)
    }

    pub fn non_associative(symbol: impl Into<String>, precedence: i32) -> Self {
        Self::new(symbol, precedence, Associativity::None)
    }
}

impl fmt::Display for OperatorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.symbol, self.precedence, self.associativity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperatorError {
    #[error("operator '{0}' is declared more than once")]
    DuplicateSymbol(String),
    #[error("'{0}' is reserved by the grammar and cannot be an operator")]
    ReservedSymbol(String),
    #[error("'{0}' is not a valid operator symbol")]
    InvalidSymbol(String),
    #[error("unknown associativity '{0}' (expected left, right or none)")]
    InvalidAssociativity(String),
    #[error("malformed operator declaration on line {line}: {text}")]
    Malformed { line: usize, text: String },
}

/// All operators sharing one precedence, split by associativity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecedenceLevel {
    pub precedence: i32,
    pub left: Vec<OperatorDescriptor>,
    pub right: Vec<OperatorDescriptor>,
    pub none: Vec<OperatorDescriptor>,
}

impl PrecedenceLevel {
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty() && self.none.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorSpec {
    operators: Vec<OperatorDescriptor>,
}

impl OperatorSpec {
    pub fn new(operators: Vec<OperatorDescriptor>) -> Self {
        Self { operators }
    }

    /// The default table.
    pub fn standard() -> Self {
        use OperatorDescriptor as Op;

        Self::new(vec![
            Op::right("$", 0),
            Op::right("||", 2),
            Op::right("&&", 3),
            Op::non_associative("==", 4),
            Op::non_associative("/=", 4),
            Op::non_associative("<", 4),
            Op::non_associative("<=", 4),
            Op::non_associative(">", 4),
            Op::non_associative(">=", 4),
            Op::right("++", 5),
            Op::left("+", 6),
            Op::left("-", 6),
            Op::left("*", 7),
            Op::left("/", 7),
            Op::right("^", 8),
            Op::right(".", 9),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperatorDescriptor> {
        self.operators.iter()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    pub fn get(&self, symbol: &str) -> Option<&OperatorDescriptor> {
        self.operators.iter().find(|op| op.symbol == symbol)
    }

    pub fn symbols(&self) -> HashSet<String> {
        self.operators.iter().map(|op| op.symbol.clone()).collect()
    }

    /// Check that the table can drive a parser: symbols are unique, not
    /// reserved, and lexable as a single operator token.
    pub fn validate(&self) -> Result<(), OperatorError> {
        let mut seen = HashSet::new();
        for op in &self.operators {
            if RESERVED_SYMBOLS.contains(&op.symbol.as_str()) {
                return Err(OperatorError::ReservedSymbol(op.symbol.clone()));
            }
            if op.symbol.is_empty() || !op.symbol.chars().all(|c| OPERATOR_CHARS.contains(c)) {
                return Err(OperatorError::InvalidSymbol(op.symbol.clone()));
            }
            if !seen.insert(op.symbol.as_str()) {
                return Err(OperatorError::DuplicateSymbol(op.symbol.clone()));
            }
        }
        Ok(())
    }

    /// Partition into precedence levels, loosest first. Declaration order is
    /// kept within each associativity group.
    pub fn levels(&self) -> Vec<PrecedenceLevel> {
        let mut levels: BTreeMap<i32, PrecedenceLevel> = BTreeMap::new();

        for op in &self.operators {
            let level = levels
                .entry(op.precedence)
                .or_insert_with(|| PrecedenceLevel {
                    precedence: op.precedence,
                    ..PrecedenceLevel::default()
                });
            match op.associativity {
                Associativity::Left => level.left.push(op.clone()),
                Associativity::Right => level.right.push(op.clone()),
                Associativity::None => level.none.push(op.clone()),
            }
        }

        levels.into_values().collect()
    }
}

impl FromIterator<OperatorDescriptor> for OperatorSpec {
    fn from_iter<I: IntoIterator<Item = OperatorDescriptor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl FromStr for OperatorSpec {
    type Err = OperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut operators = Vec::new();

        for (index, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let malformed = || OperatorError::Malformed {
                line: index + 1,
                text: line.to_string(),
            };

            let fields: Vec<&str> = line.split_whitespace().collect();
            let [symbol, precedence, associativity] = fields.as_slice() else {
                return Err(malformed());
            };
            let precedence = precedence.parse::<i32>().map_err(|_| malformed())?;
            let associativity = associativity.parse::<Associativity>()?;

            operators.push(OperatorDescriptor::new(*symbol, precedence, associativity));
        }

        let spec = Self::new(operators);
        spec.validate()?;
        Ok(spec)
    }
}
