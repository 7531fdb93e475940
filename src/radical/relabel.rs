use log::debug;

use crate::mol::Molecule;

use super::engine::{search, Sign};
use super::pattern::{Pattern, Sigil};

/// Apply one rename pattern to every match it finds.
///
/// Append patterns add their name to the label of each special atom; the
/// others overwrite those labels with their name. Visitation is cleared
/// afterwards so the next rename pattern starts fresh.
pub(crate) fn apply(pattern: &Pattern, mol: &mut Molecule) {
    let append = pattern.sigil() == Some(Sigil::Append);
    let matches = search(pattern, mol, &mut Sign::sentinel(), |mol, binding| {
        for &position in pattern.special_positions() {
            let atom = binding[position];
            if append {
                mol.append_label(atom, pattern.name());
            } else {
                mol.set_label(atom, pattern.name());
            }
        }
    });
    debug!("{}: relabeled {matches} matches", pattern.name());
    mol.reset_visitation();
}
