use super::error::PatternError;
use super::pattern::{AtomMatcher, Pattern, PatternSet};

/// Split definition text into blocks separated by blank lines.
fn blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

struct BlockParser<'a> {
    block: usize,
    lines: &'a [&'a str],
}

impl<'a> BlockParser<'a> {
    fn new(block: usize, lines: &'a [&'a str]) -> Self {
        Self { block, lines }
    }

    /// Pull a `=(i,j,...)` list out of the header, returning the header with
    /// the list removed.
    fn take_coordinates(&self, header: &str) -> Result<(String, Vec<usize>), PatternError> {
        let Some(start) = header.find("=(") else {
            return Ok((header.to_string(), Vec::new()));
        };
        let rest = &header[start + 2..];
        let Some(len) = rest.find(')') else {
            return Err(PatternError::InvalidCoordinate {
                block: self.block,
                token: header[start..].to_string(),
            });
        };
        let coordinates = rest[..len]
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| {
                t.parse::<usize>()
                    .map_err(|_| PatternError::InvalidCoordinate {
                        block: self.block,
                        token: t.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let stripped = format!("{}{}", &header[..start], &rest[len + 1..]);
        Ok((stripped, coordinates))
    }

    fn parse_atom_line(
        &self,
        line: usize,
        position: usize,
    ) -> Result<(AtomMatcher, Vec<u8>), PatternError> {
        let mut fields = self.lines[line]
            .split([' ', '\t'])
            .filter(|f| !f.is_empty());
        let expr = fields.next().unwrap_or_default();
        let atom = AtomMatcher::compile(expr).map_err(|source| PatternError::InvalidAtomExpr {
            block: self.block,
            line,
            source,
        })?;

        let tokens: Vec<&str> = fields.take(position).collect();
        if tokens.len() < position {
            return Err(PatternError::MissingBond {
                block: self.block,
                line,
                expected: position,
                found: tokens.len(),
            });
        }
        let row = tokens
            .into_iter()
            .map(|t| {
                t.parse::<u8>().map_err(|_| PatternError::InvalidBond {
                    block: self.block,
                    line,
                    token: t.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok((atom, row))
    }

    fn parse(&self) -> Result<Pattern, PatternError> {
        let (header, special) = self.take_coordinates(self.lines[0])?;
        let mut tags = header.split(['?', ':']).filter(|t| !t.is_empty());
        let name = tags
            .next()
            .ok_or(PatternError::EmptyHeader { block: self.block })?
            .to_string();
        let rules: Vec<String> = tags.map(str::to_string).collect();

        if self.lines.len() < 2 {
            return Err(PatternError::NoAtoms { block: self.block });
        }

        let mut atoms = Vec::with_capacity(self.lines.len() - 1);
        let mut adjacency = Vec::with_capacity(self.lines.len() - 2);
        for line in 1..self.lines.len() {
            let position = line - 1;
            let (atom, row) = self.parse_atom_line(line, position)?;
            atoms.push(atom);
            if position > 0 {
                adjacency.push(row);
            }
        }

        if let Some(&position) = special.iter().find(|&&p| p >= atoms.len()) {
            return Err(PatternError::CoordinateOutOfRange {
                block: self.block,
                position,
                atoms: atoms.len(),
            });
        }

        Ok(Pattern {
            name,
            rules,
            adjacency,
            atoms,
            special,
        })
    }
}

pub(crate) fn parse(text: &str) -> Result<PatternSet, PatternError> {
    let mut set = PatternSet::default();
    for (block, lines) in blocks(text).iter().enumerate() {
        set.push(BlockParser::new(block, lines).parse()?);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radical::pattern::{Route, Sigil};

    fn one(text: &str) -> Pattern {
        let set = parse(text).unwrap();
        set.matching
            .into_iter()
            .chain(set.renaming)
            .next()
            .expect("one pattern")
    }

    #[test]
    fn parses_header_rules_and_rows() {
        let p = one("COOH?ar?-ring\nC\nO 2\nO 1 0\nH 0 0 1\n");
        assert_eq!(p.name(), "COOH");
        assert_eq!(p.rules(), &["ar".to_string(), "-ring".to_string()]);
        assert_eq!(p.len(), 4);
        assert_eq!(p.adjacency_row(0), &[] as &[u8]);
        assert_eq!(p.adjacency_row(1), &[2]);
        assert_eq!(p.adjacency_row(2), &[1, 0]);
        assert_eq!(p.adjacency_row(3), &[0, 0, 1]);
        assert!(p.special_positions().is_empty());
        assert_eq!(p.route(), Route::Match);
    }

    #[test]
    fn colon_separates_like_question_mark() {
        let p = one("NH2:ar:\nN\nH 1\n");
        assert_eq!(p.name(), "NH2");
        assert_eq!(p.rules(), &["ar".to_string()]);
    }

    #[test]
    fn coordinates_are_extracted_and_stripped() {
        let p = one("CH3=(0, 2)\nC\nH 1\nH 1 0\n");
        assert_eq!(p.name(), "CH3");
        assert_eq!(p.special_positions(), &[0, 2]);
        assert_eq!(p.route(), Route::Rename);
    }

    #[test]
    fn sigils_override_routing() {
        let set = parse("*CH=(0)\nC\nH 1\n\n_ar\nC\n\nOH\nO\nH 1\n").unwrap();
        assert_eq!(set.matching().len(), 2);
        assert_eq!(set.renaming().len(), 1);
        assert_eq!(set.matching()[0].sigil(), Some(Sigil::MatchOnly));
        assert_eq!(set.matching()[1].name(), "OH");
        assert_eq!(set.renaming()[0].sigil(), Some(Sigil::Append));
    }

    #[test]
    fn accepts_crlf_tabs_and_extra_blank_lines() {
        let set = parse("OH\r\nO\r\nH\t1\r\n\r\n\r\n\r\nNH\r\nN\r\nH 1 \r\n").unwrap();
        assert_eq!(set.matching().len(), 2);
        assert_eq!(set.matching()[0].adjacency_row(1), &[1]);
        assert_eq!(set.matching()[1].name(), "NH");
    }

    #[test]
    fn ignores_surplus_bond_codes() {
        let p = one("OH\nO 9 9\nH 1 7\n");
        assert_eq!(p.adjacency_row(1), &[1]);
    }

    #[test]
    fn empty_input_yields_empty_set() {
        let set = parse("\n\n").unwrap();
        assert!(set.matching().is_empty());
        assert!(set.renaming().is_empty());
    }

    #[test]
    fn missing_bond_is_fatal() {
        let err = parse("OH\nO\nH 1\nC 1\n").unwrap_err();
        assert!(matches!(
            err,
            PatternError::MissingBond {
                block: 0,
                line: 3,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn bad_bond_token_is_fatal() {
        let err = parse("OH\nO\nH x\n").unwrap_err();
        assert!(matches!(err, PatternError::InvalidBond { line: 2, .. }));
    }

    #[test]
    fn empty_header_is_fatal() {
        let err = parse("?:\nO\n").unwrap_err();
        assert!(matches!(err, PatternError::EmptyHeader { block: 0 }));
    }

    #[test]
    fn header_without_atoms_is_fatal() {
        let err = parse("OH\nO\nH 1\n\nlonely\n").unwrap_err();
        assert!(matches!(err, PatternError::NoAtoms { block: 1 }));
    }

    #[test]
    fn bad_coordinates_are_fatal() {
        assert!(matches!(
            parse("X=(a)\nC\n").unwrap_err(),
            PatternError::InvalidCoordinate { .. }
        ));
        assert!(matches!(
            parse("X=(0\nC\n").unwrap_err(),
            PatternError::InvalidCoordinate { .. }
        ));
        assert!(matches!(
            parse("X=(3)\nC\nH 1\n").unwrap_err(),
            PatternError::CoordinateOutOfRange {
                position: 3,
                atoms: 2,
                ..
            }
        ));
    }

    #[test]
    fn bad_atom_expression_is_fatal() {
        let err = parse("X\n(C\n").unwrap_err();
        assert!(matches!(err, PatternError::InvalidAtomExpr { line: 1, .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
