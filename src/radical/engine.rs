//! Backtracking placement of a pattern's atoms onto a molecule.
//!
//! The search walks candidate anchors in ascending atom order. From each
//! anchor it extends the binding one pattern atom at a time, looking for the
//! next atom among the neighbors of atoms already bound. The first candidate
//! whose continuation completes is kept; siblings are never revisited once a
//! branch succeeds, so the result is a bounded, order-dependent set of
//! matches rather than every embedding.
//!
//! Atoms consumed by a match are tagged in the molecule's visitation state
//! with the current [`Sign`], which keeps later matches off them.

use log::trace;

use crate::mol::Molecule;

use super::pattern::Pattern;

/// Visitation tag written by relabeling passes.
pub const SENTINEL_SIGN: i32 = -1;

/// The generation tag stamped onto atoms consumed by a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sign {
    value: i32,
    advancing: bool,
}

impl Sign {
    /// A tag that increments after every recorded match.
    pub fn counting(start: i32) -> Self {
        Self {
            value: start,
            advancing: true,
        }
    }

    /// The constant relabeling tag. It is non-positive, so atoms carrying it
    /// stay available to every position except the anchor.
    pub fn sentinel() -> Self {
        Self {
            value: SENTINEL_SIGN,
            advancing: false,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    fn advance(&mut self) {
        if self.advancing {
            self.value += 1;
        }
    }
}

struct Search<'a> {
    pattern: &'a Pattern,
    mol: &'a mut Molecule,
    sign: &'a mut Sign,
    matched: Vec<usize>,
    locked: Vec<bool>,
    complete: bool,
}

impl<'a> Search<'a> {
    fn new(pattern: &'a Pattern, mol: &'a mut Molecule, sign: &'a mut Sign) -> Self {
        let atom_count = mol.atom_count();
        Self {
            pattern,
            mol,
            sign,
            matched: vec![0; pattern.len()],
            locked: vec![false; atom_count],
            complete: false,
        }
    }

    fn run(&mut self, on_match: &mut dyn FnMut(&mut Molecule, &[usize])) -> usize {
        let mut found = 0;
        for i in 0..self.mol.atom_count() {
            let eligible = self.mol.visitation(i) == 0 || self.pattern.is_special(0);
            if !eligible || !self.pattern.atom(0).matches(self.mol.label(i)) {
                continue;
            }
            trace!("{}: trying anchor {i}", self.pattern.name());

            self.matched[0] = i;
            self.complete = false;
            let backup = self.mol.visitation(i);
            self.mol.set_visitation(i, self.sign.value());
            self.locked[i] = true;

            self.extend(1);

            self.locked[i] = false;
            if self.pattern.releases_special() && self.pattern.is_special(0) {
                self.mol.set_visitation(i, backup);
            }
            if self.complete {
                on_match(&mut *self.mol, &self.matched);
                self.sign.advance();
                found += 1;
            } else {
                self.mol.set_visitation(i, backup);
            }
        }
        found
    }

    fn extend(&mut self, n: usize) {
        if n == self.matched.len() {
            self.complete = true;
            return;
        }
        let special = self.pattern.is_special(n);
        for j in 0..n {
            if self.pattern.adjacency_row(n)[j] == 0 {
                continue;
            }
            let from = self.matched[j];
            for p in 0..self.mol.atom_count() {
                let candidate = self.mol.bond(from, p) != 0
                    && (self.mol.visitation(p) <= 0 || special)
                    && !self.locked[p]
                    && self.pattern.atom(n).matches(self.mol.label(p));
                if !candidate {
                    continue;
                }
                self.matched[n] = p;
                if !self.compare(n) {
                    continue;
                }

                let backup = self.mol.visitation(p);
                self.mol.set_visitation(p, self.sign.value());
                self.locked[p] = true;

                self.extend(n + 1);

                self.locked[p] = false;
                if self.complete {
                    if self.pattern.releases_special() && special {
                        self.mol.set_visitation(p, backup);
                    }
                    return;
                }
                self.mol.set_visitation(p, backup);
            }
        }
    }

    /// Check the atom bound at `n` against every earlier binding.
    fn compare(&self, n: usize) -> bool {
        let atom = self.matched[n];
        (0..n).all(|j| {
            self.pattern
                .accepts_bond(n, j, self.mol.bond(atom, self.matched[j]))
        })
    }
}

/// Find non-overlapping placements of `pattern` in `mol`.
///
/// `on_match` receives the molecule and the binding (pattern position to
/// atom index) after each complete match; `sign` advances afterwards.
/// Returns the number of matches.
pub fn search<F>(
    pattern: &Pattern,
    mol: &mut Molecule,
    sign: &mut Sign,
    mut on_match: F,
) -> usize
where
    F: FnMut(&mut Molecule, &[usize]),
{
    if mol.atom_count() < pattern.len() {
        return 0;
    }
    Search::new(pattern, mol, sign).run(&mut on_match)
}
