use regex::Regex;

/// Adjacency entries above this value accept any nonzero bond.
pub const ANY_BOND_THRESHOLD: u8 = 4;

/// Leading character on a pattern name that changes how it is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sigil {
    /// `_`: rename pattern that appends its name to matched atom labels.
    Append,
    /// `*`: match pattern whose special atoms stay reusable after a match.
    MatchOnly,
}

impl Sigil {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.chars().next()? {
            '_' => Some(Self::Append),
            '*' => Some(Self::MatchOnly),
            _ => None,
        }
    }
}

/// Which pass a compiled pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Match,
    Rename,
}

/// Predicate over an atom label, compiled from an atom expression.
#[derive(Debug, Clone)]
pub struct AtomMatcher {
    regex: Regex,
}

impl AtomMatcher {
    /// Expand an atom expression into its anchored regex source.
    ///
    /// Every `_` becomes "any run of extra `_`-prefixed tags, then `_`", a
    /// trailing `$` must be preceded by `_`, and an expression that neither
    /// substitution touched gets a mandatory trailing `_`.
    pub fn expand(expr: &str) -> String {
        let mut source = format!("^{expr}");
        source = source.replace('_', "_(_.+?)*_");
        source = source.replace('$', "_$");
        if source.len() - 1 == expr.len() {
            source.push('_');
        }
        source
    }

    pub fn compile(expr: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(&Self::expand(expr))?,
        })
    }

    pub fn matches(&self, label: &str) -> bool {
        self.regex.is_match(label)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// A compiled substructure description.
///
/// Atom `0` is the anchor, the atom attached to the rest of the molecule.
/// Atoms are listed so that every atom after the anchor is bonded to at
/// least one atom before it.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub(crate) name: String,
    pub(crate) rules: Vec<String>,
    pub(crate) adjacency: Vec<Vec<u8>>,
    pub(crate) atoms: Vec<AtomMatcher>,
    pub(crate) special: Vec<usize>,
}

impl Pattern {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atom(&self, position: usize) -> &AtomMatcher {
        &self.atoms[position]
    }

    /// Required bond codes from atom `position` to each earlier atom.
    ///
    /// Empty for the anchor.
    pub fn adjacency_row(&self, position: usize) -> &[u8] {
        match position {
            0 => &[],
            n => self.adjacency[n - 1].as_slice(),
        }
    }

    pub fn special_positions(&self) -> &[usize] {
        &self.special
    }

    pub fn is_special(&self, position: usize) -> bool {
        self.special.contains(&position)
    }

    pub fn sigil(&self) -> Option<Sigil> {
        Sigil::from_name(&self.name)
    }

    /// Match-only patterns hand their special atoms back after each match.
    pub fn releases_special(&self) -> bool {
        self.sigil() == Some(Sigil::MatchOnly)
    }

    pub fn route(&self) -> Route {
        match self.sigil() {
            Some(Sigil::Append) => Route::Rename,
            Some(Sigil::MatchOnly) => Route::Match,
            None if !self.special.is_empty() => Route::Rename,
            None => Route::Match,
        }
    }

    /// Whether a bond code satisfies the requirement between `position` and
    /// the earlier atom `earlier`.
    pub fn accepts_bond(&self, position: usize, earlier: usize, actual: u8) -> bool {
        let required = self.adjacency[position - 1][earlier];
        actual == required || (required > ANY_BOND_THRESHOLD && actual != 0)
    }
}

/// Compiled patterns split by pass, in definition order.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    pub(crate) matching: Vec<Pattern>,
    pub(crate) renaming: Vec<Pattern>,
}

impl PatternSet {
    pub fn push(&mut self, pattern: Pattern) {
        match pattern.route() {
            Route::Match => self.matching.push(pattern),
            Route::Rename => self.renaming.push(pattern),
        }
    }

    pub fn matching(&self) -> &[Pattern] {
        &self.matching
    }

    pub fn renaming(&self) -> &[Pattern] {
        &self.renaming
    }
}
