//! Attribute suffixes for matched fragments.
//!
//! A rule is a tag substring looked up in the anchor atom's label. A rule
//! prefixed with [`NEGATION`] instead asks for the tag to be absent from the
//! anchor but present on at least one bonded neighbor. The first rule that
//! holds decides the suffix.

use crate::mol::Molecule;

use super::pattern::Pattern;

pub const NEGATION: char = '-';

fn rule_holds(mol: &Molecule, atom: usize, rule: &str) -> Option<String> {
    match rule.strip_prefix(NEGATION) {
        None => mol.label(atom).contains(rule).then(|| format!("_{rule}")),
        Some(tag) => {
            if mol.label(atom).contains(tag) {
                return None;
            }
            mol.neighbors(atom)
                .any(|j| mol.label(j).contains(tag))
                .then(|| format!("_{tag}"))
        }
    }
}

/// Suffix chosen by the first satisfied rule, or an empty string.
pub fn resolve<S: AsRef<str>>(rules: &[S], mol: &Molecule, atom: usize) -> String {
    rules
        .iter()
        .find_map(|rule| rule_holds(mol, atom, rule.as_ref()))
        .unwrap_or_default()
}

/// Fragment name for a match of `pattern` anchored at `atom`.
pub fn fragment_name(pattern: &Pattern, mol: &Molecule, atom: usize) -> String {
    let suffix = resolve(pattern.rules(), mol, atom);
    format!("{}{suffix}", pattern.name()).replace('*', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mol() -> Molecule {
        // 0: C__ar_Y  1: O_  2: N__X  3: C__X
        let mut mol = Molecule::default();
        mol.add_atom("C__ar_Y");
        mol.add_atom("O_");
        mol.add_atom("N__X");
        mol.add_atom("C__X");
        mol.add_bond(0, 1, 1);
        mol.add_bond(0, 2, 1);
        mol
    }

    #[test]
    fn plain_rule_checks_own_label() {
        let m = mol();
        assert_eq!(resolve(&["ar"], &m, 0), "_ar");
        assert_eq!(resolve(&["ar"], &m, 1), "");
    }

    #[test]
    fn first_satisfied_rule_wins() {
        let m = mol();
        assert_eq!(resolve(&["ring", "Y", "ar"], &m, 0), "_Y");
    }

    #[test]
    fn negated_rule_looks_at_neighbors() {
        let m = mol();
        assert_eq!(resolve(&["-X", "Y"], &m, 0), "_X");
        assert_eq!(resolve(&["-X"], &m, 1), "");
    }

    #[test]
    fn negated_rule_fails_when_atom_has_tag() {
        let m = mol();
        assert_eq!(resolve(&["-X", "ar"], &m, 3), "");
        assert_eq!(resolve(&["-X", "C"], &m, 3), "_C");
    }

    #[test]
    fn no_rules_no_suffix() {
        let m = mol();
        assert_eq!(resolve::<&str>(&[], &m, 0), "");
    }
}
