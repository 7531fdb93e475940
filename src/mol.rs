//! The labeled molecular graph that recognizers read and mutate.
//!
//! Atoms are plain string labels: a base atom code followed by any number of
//! `_`-delimited attribute tags that relabeling appends over time. Bonds live
//! in a dense symmetric matrix of bond-type codes where `0` means "no bond".
//! Each atom also carries a visitation value used by the match engine to keep
//! track of which atoms have been consumed by earlier matches.

use std::fmt;

use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

/// Errors produced when assembling a [`Molecule`] from raw parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoleculeError {
    /// The bond matrix does not have one row per atom.
    DimensionMismatch { atoms: usize, rows: usize },
    /// A bond matrix row has the wrong length.
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// `bonds[i][j]` differs from `bonds[j][i]`.
    Asymmetric { i: usize, j: usize },
}

impl fmt::Display for MoleculeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { atoms, rows } => {
                write!(f, "{atoms} atoms but bond matrix has {rows} rows")
            }
            Self::RaggedRow { row, len, expected } => {
                write!(
                    f,
                    "bond matrix row {row} has {len} entries, expected {expected}"
                )
            }
            Self::Asymmetric { i, j } => {
                write!(f, "bond matrix is not symmetric at ({i}, {j})")
            }
        }
    }
}

impl std::error::Error for MoleculeError {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Molecule {
    atoms: Vec<String>,
    bonds: Vec<Vec<u8>>,
    visitation: Vec<i32>,
}

impl Molecule {
    /// Build a molecule from atom labels and a square bond-code matrix.
    ///
    /// The matrix must be symmetric. Visitation starts at zero for every atom.
    pub fn new<S: Into<String>>(
        atoms: impl IntoIterator<Item = S>,
        bonds: Vec<Vec<u8>>,
    ) -> Result<Self, MoleculeError> {
        let atoms: Vec<String> = atoms.into_iter().map(Into::into).collect();
        let n = atoms.len();
        if bonds.len() != n {
            return Err(MoleculeError::DimensionMismatch {
                atoms: n,
                rows: bonds.len(),
            });
        }
        for (row, entries) in bonds.iter().enumerate() {
            if entries.len() != n {
                return Err(MoleculeError::RaggedRow {
                    row,
                    len: entries.len(),
                    expected: n,
                });
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if bonds[i][j] != bonds[j][i] {
                    return Err(MoleculeError::Asymmetric { i, j });
                }
            }
        }
        Ok(Self {
            atoms,
            bonds,
            visitation: vec![0; n],
        })
    }

    /// Ingest an undirected graph whose node weights are labels and whose
    /// edge weights are bond codes. Atom indices follow node indices.
    pub fn from_graph<L: AsRef<str>>(graph: &UnGraph<L, u8>) -> Self {
        let mut mol = Self::default();
        for idx in graph.node_indices() {
            mol.add_atom(graph[idx].as_ref());
        }
        for edge in graph.edge_references() {
            mol.add_bond(edge.source().index(), edge.target().index(), *edge.weight());
        }
        mol
    }

    pub fn add_atom(&mut self, label: impl Into<String>) -> usize {
        let idx = self.atoms.len();
        self.atoms.push(label.into());
        for row in &mut self.bonds {
            row.push(0);
        }
        self.bonds.push(vec![0; idx + 1]);
        self.visitation.push(0);
        idx
    }

    /// Set the bond code between `a` and `b`, keeping the matrix symmetric.
    pub fn add_bond(&mut self, a: usize, b: usize, code: u8) {
        self.bonds[a][b] = code;
        self.bonds[b][a] = code;
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn label(&self, idx: usize) -> &str {
        &self.atoms[idx]
    }

    pub fn labels(&self) -> &[String] {
        &self.atoms
    }

    pub fn set_label(&mut self, idx: usize, label: impl Into<String>) {
        self.atoms[idx] = label.into();
    }

    pub fn append_label(&mut self, idx: usize, tag: &str) {
        self.atoms[idx].push_str(tag);
    }

    pub fn bond(&self, a: usize, b: usize) -> u8 {
        self.bonds[a][b]
    }

    /// Atoms bonded to `idx`, in ascending index order.
    pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.bonds[idx]
            .iter()
            .enumerate()
            .filter(|&(_, &code)| code != 0)
            .map(|(j, _)| j)
    }

    pub fn visitation(&self, idx: usize) -> i32 {
        self.visitation[idx]
    }

    pub fn set_visitation(&mut self, idx: usize, value: i32) {
        self.visitation[idx] = value;
    }

    /// Mark every atom available again.
    pub fn reset_visitation(&mut self) {
        self.visitation.iter_mut().for_each(|v| *v = 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_symmetric_matrix() {
        let mol = Molecule::new(["C_", "O_"], vec![vec![0, 1], vec![1, 0]]).unwrap();
        assert_eq!(mol.atom_count(), 2);
        assert_eq!(mol.bond(0, 1), 1);
        assert_eq!(mol.bond(1, 0), 1);
        assert_eq!(mol.visitation(0), 0);
    }

    #[test]
    fn new_rejects_asymmetric_matrix() {
        let err = Molecule::new(["C_", "O_"], vec![vec![0, 1], vec![2, 0]]).unwrap_err();
        assert_eq!(err, MoleculeError::Asymmetric { i: 0, j: 1 });
    }

    #[test]
    fn new_rejects_wrong_row_count() {
        let err = Molecule::new(["C_", "O_"], vec![vec![0, 1]]).unwrap_err();
        assert_eq!(err, MoleculeError::DimensionMismatch { atoms: 2, rows: 1 });
    }

    #[test]
    fn new_rejects_ragged_row() {
        let err = Molecule::new(["C_", "O_"], vec![vec![0, 1], vec![1]]).unwrap_err();
        assert_eq!(
            err,
            MoleculeError::RaggedRow {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn builder_keeps_matrix_square_and_symmetric() {
        let mut mol = Molecule::default();
        let c = mol.add_atom("C_");
        let o = mol.add_atom("O_");
        let h = mol.add_atom("H_");
        mol.add_bond(c, o, 2);
        mol.add_bond(h, o, 1);
        assert_eq!(mol.bond(o, c), 2);
        assert_eq!(mol.bond(o, h), 1);
        assert_eq!(mol.bond(c, h), 0);
        assert_eq!(mol.neighbors(o).collect::<Vec<_>>(), vec![c, h]);
    }

    #[test]
    fn from_graph_uses_node_order() {
        let mut g = UnGraph::<&str, u8>::new_undirected();
        let c = g.add_node("C_");
        let n = g.add_node("N_");
        g.add_edge(n, c, 3);
        let mol = Molecule::from_graph(&g);
        assert_eq!(mol.labels(), &["C_".to_string(), "N_".to_string()]);
        assert_eq!(mol.bond(0, 1), 3);
        assert_eq!(mol.bond(1, 0), 3);
    }

    #[test]
    fn labels_and_visitation_mutate_in_place() {
        let mut mol = Molecule::new(["C_"], vec![vec![0]]).unwrap();
        mol.append_label(0, "_ar");
        assert_eq!(mol.label(0), "C__ar");
        mol.set_label(0, "CH3");
        assert_eq!(mol.label(0), "CH3");
        mol.set_visitation(0, 7);
        assert_eq!(mol.visitation(0), 7);
        mol.reset_visitation();
        assert_eq!(mol.visitation(0), 0);
    }
}
