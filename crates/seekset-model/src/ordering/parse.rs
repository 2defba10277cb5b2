use crate::error::OrderingError;
use crate::ordering::{Direction, OrderBy, Orderings};
use std::collections::HashMap;

/// Maps external column aliases to fully qualified column names.
/// Use it when bare column names would be ambiguous in the target query.
/// Key is the external alias, value is the internal column name.
pub type ColumnMapping = HashMap<String, String>;

/// Builds [`Orderings`] from strings of the form `"<alias> <asc|desc>"`
/// (direction case-insensitive). Aliases are resolved through the mapping;
/// an unknown alias fails with the nearest known alias as a hint.
pub fn parse_sort<S: AsRef<str>>(
    raw: &[S],
    mapping: &ColumnMapping,
) -> Result<Orderings, OrderingError> {
    let mut orderings = Orderings::new();

    for entry in raw {
        let entry = entry.as_ref();
        let tokens: Vec<&str> = entry.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(OrderingError::MalformedOrderingString(entry.to_string()));
        }

        let column = match mapping.get(tokens[0]) {
            Some(column) => column.clone(),
            None => {
                return Err(OrderingError::UnknownColumnAlias {
                    alias: tokens[0].to_string(),
                    closest: closest_alias(tokens[0], mapping),
                });
            }
        };

        let direction: Direction = tokens[1].parse()?;
        orderings.push(OrderBy::new(column, direction));
    }

    Ok(orderings)
}

/// Alias with the minimal Levenshtein distance to the input. Ties keep the
/// first minimum encountered; iteration order over the mapping is
/// unspecified.
fn closest_alias(input: &str, mapping: &ColumnMapping) -> String {
    let mut min_dist = usize::MAX;
    let mut closest = String::new();

    for alias in mapping.keys() {
        let dist = levenshtein(alias, input);
        if dist < min_dist {
            min_dist = dist;
            closest = alias.clone();
        }
    }

    closest
}

// Classic two-row edit distance over Unicode code points. Insertions,
// deletions and substitutions all cost one; transpositions are not special.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
