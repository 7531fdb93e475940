use std::fmt;

/// Errors produced when compiling a pattern-definition block.
///
/// `block` is the 0-based index of the block in the definition text and
/// `line` the 0-based line within that block (the header is line 0).
#[derive(Debug, Clone)]
pub enum PatternError {
    /// The header line has no pattern name.
    EmptyHeader { block: usize },
    /// The block has a header but no atom lines.
    NoAtoms { block: usize },
    /// An atom line carries fewer adjacency integers than its position needs.
    MissingBond {
        block: usize,
        line: usize,
        expected: usize,
        found: usize,
    },
    /// An adjacency entry is not a bond code.
    InvalidBond {
        block: usize,
        line: usize,
        token: String,
    },
    /// A `=(...)` coordinate is not a non-negative integer.
    InvalidCoordinate { block: usize, token: String },
    /// A coordinate names a pattern atom that does not exist.
    CoordinateOutOfRange {
        block: usize,
        position: usize,
        atoms: usize,
    },
    /// The atom expression does not compile to a valid matcher.
    InvalidAtomExpr {
        block: usize,
        line: usize,
        source: regex::Error,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyHeader { block } => write!(f, "block {block}: empty pattern header"),
            Self::NoAtoms { block } => write!(f, "block {block}: pattern has no atoms"),
            Self::MissingBond {
                block,
                line,
                expected,
                found,
            } => write!(
                f,
                "block {block}, line {line}: expected {expected} bond codes, found {found}"
            ),
            Self::InvalidBond { block, line, token } => {
                write!(f, "block {block}, line {line}: invalid bond code '{token}'")
            }
            Self::InvalidCoordinate { block, token } => {
                write!(f, "block {block}: invalid coordinate '{token}'")
            }
            Self::CoordinateOutOfRange {
                block,
                position,
                atoms,
            } => write!(
                f,
                "block {block}: coordinate {position} out of range for {atoms} atoms"
            ),
            Self::InvalidAtomExpr {
                block,
                line,
                source,
            } => write!(
                f,
                "block {block}, line {line}: invalid atom expression: {source}"
            ),
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidAtomExpr { source, .. } => Some(source),
            _ => None,
        }
    }
}
