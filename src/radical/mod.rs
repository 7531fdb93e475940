//! Radical (functional group) recognition.
//!
//! A [`Radical`] recognizer is compiled from pattern-definition text: blocks
//! separated by blank lines, each a header followed by one line per pattern
//! atom.
//!
//! ```text
//! name[?rule1?rule2...][:][=(i,j,...)]
//! atomExpr0
//! atomExpr1 b10
//! atomExpr2 b20 b21
//! ```
//!
//! Atom line `k` lists the bond codes required between atom `k` and each
//! earlier atom: `0` for no bond, an exact code, or anything above `4` for
//! "any bond". A leading `_` on the name makes a rename pattern that appends
//! to labels, a leading `*` forces a match pattern; otherwise a pattern with
//! a `=(...)` coordinate list renames (overwriting labels) and one without
//! is matched and counted.
//!
//! # Examples
//!
//! ```
//! use molesplit::{Molecule, Radical, Recognizer};
//!
//! let radical = Radical::load("OH\nO\nH 1\n").unwrap();
//! let mut mol = Molecule::new(
//!     ["C_", "O_", "H_"],
//!     vec![vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]],
//! )
//! .unwrap();
//! let counts = radical.match_all(&mut mol);
//! assert_eq!(counts.get("OH"), Some(&1));
//! ```

mod attribute;
mod engine;
mod error;
mod parser;
pub mod pattern;
mod relabel;

pub use attribute::{fragment_name, resolve, NEGATION};
pub use engine::{search, Sign, SENTINEL_SIGN};
pub use error::PatternError;
pub use pattern::{AtomMatcher, Pattern, PatternSet, Route, Sigil};

use log::debug;

use crate::mol::Molecule;
use crate::traits::{FragmentCounts, Recognizer, Relabel};

pub fn from_patterns(text: &str) -> Result<PatternSet, PatternError> {
    parser::parse(text)
}

/// Recognizer driven by a compiled [`PatternSet`].
#[derive(Debug, Clone)]
pub struct Radical {
    patterns: PatternSet,
}

impl Radical {
    pub fn new(patterns: PatternSet) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn match_patterns(&self) -> &[Pattern] {
        self.patterns.matching()
    }

    pub fn rename_patterns(&self) -> &[Pattern] {
        self.patterns.renaming()
    }
}

impl Recognizer for Radical {
    type Error = PatternError;

    fn load(text: &str) -> Result<Self, PatternError> {
        let patterns = from_patterns(text)?;
        debug!(
            "loaded {} match and {} rename patterns",
            patterns.matching().len(),
            patterns.renaming().len()
        );
        Ok(Self::new(patterns))
    }

    fn match_all(&self, mol: &mut Molecule) -> FragmentCounts {
        let mut counts = FragmentCounts::new();
        let mut sign = Sign::counting(1);
        for pattern in self.patterns.matching() {
            let mut anchors = Vec::new();
            search(pattern, mol, &mut sign, |_, binding| {
                anchors.push(binding[0])
            });
            for atom in anchors {
                let name = fragment_name(pattern, mol, atom);
                debug!("{}: fragment {name} at atom {atom}", pattern.name());
                *counts.entry(name).or_insert(0) += 1;
            }
        }
        counts
    }

    fn as_relabel(&self) -> Option<&dyn Relabel> {
        Some(self)
    }
}

impl Relabel for Radical {
    fn relabel(&self, mol: &mut Molecule) {
        for pattern in self.patterns.renaming() {
            relabel::apply(pattern, mol);
        }
    }
}
