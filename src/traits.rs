use std::collections::HashMap;

use crate::mol::Molecule;

/// Occurrence count per resolved fragment name.
pub type FragmentCounts = HashMap<String, usize>;

/// A pattern-driven recognizer that tallies named fragments in a molecule.
pub trait Recognizer {
    type Error: std::error::Error;

    /// Compile a recognizer from its pattern-definition text.
    fn load(text: &str) -> Result<Self, Self::Error>
    where
        Self: Sized;

    /// Count every fragment this recognizer finds in `mol`.
    ///
    /// Consumed atoms stay marked in the molecule's visitation state, so a
    /// second call without [`Molecule::reset_visitation`] may count fewer
    /// fragments.
    fn match_all(&self, mol: &mut Molecule) -> FragmentCounts;

    /// The relabeling capability, for recognizers that support it.
    fn as_relabel(&self) -> Option<&dyn Relabel> {
        None
    }
}

/// Rewrites atom labels in place before fragment counting.
pub trait Relabel {
    fn relabel(&self, mol: &mut Molecule);
}
