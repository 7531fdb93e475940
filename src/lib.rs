pub mod mol;
pub mod radical;
pub mod traits;

pub use mol::{Molecule, MoleculeError};
pub use radical::{
    fragment_name, from_patterns, search, AtomMatcher, Pattern, PatternError, PatternSet, Radical,
    Route, Sigil, Sign,
};
pub use traits::{FragmentCounts, Recognizer, Relabel};
