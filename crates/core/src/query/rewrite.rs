//! Named-placeholder rewriting.
//!
//! Statement templates are written with `:name` placeholders. [`rewrite`]
//! turns such a template into the driver's numbered `?N` markers and returns
//! the argument list aligned with those markers.
//!
//! Lexical rules:
//!
//! - A placeholder is `:` followed by the longest run of `[A-Za-z0-9_]`
//!   starting with a letter or `_`. `:id` therefore never matches inside
//!   `:identity`.
//! - The first occurrence of a name gets the next ordinal. Later occurrences
//!   reuse that marker and add nothing to the argument list.
//! - `::` (a type cast) and a `:` not followed by an identifier are copied
//!   verbatim.
//! - Text inside `'single'` or `"double"` quotes is copied verbatim, with
//!   doubled quotes treated as escapes.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

/// Errors raised while rewriting a statement template.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RewriteError {
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
}

/// A positional statement and the arguments aligned with its markers.
///
/// `args[n - 1]` is bound to marker `?n`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewritten<V> {
    pub sql: String,
    pub args: Vec<V>,
}

/// Rewrites `template` into a positional statement using values from `params`.
///
/// Entries of `params` that the template does not reference are ignored.
///
/// # Errors
///
/// Returns [`RewriteError::UnknownParameter`] for the first placeholder that
/// has no entry in `params`.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use bookstore_core::query::rewrite;
///
/// let params = BTreeMap::from([("a", "x")]);
/// let out = rewrite("SET a = :a, b = :a", &params).unwrap();
/// assert_eq!(out.sql, "SET a = ?1, b = ?1");
/// assert_eq!(out.args, vec!["x"]);
/// ```
pub fn rewrite<V: Clone>(
    template: &str,
    params: &BTreeMap<&str, V>,
) -> Result<Rewritten<V>, RewriteError> {
    let mut sql = String::with_capacity(template.len());
    let mut args = Vec::new();
    let mut ordinals: HashMap<&str, usize> = HashMap::new();
    let mut chars = template.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        match c {
            '\'' | '"' => {
                sql.push(c);
                while let Some((_, inner)) = chars.next() {
                    sql.push(inner);
                    if inner == c {
                        match chars.peek() {
                            Some(&(_, next)) if next == c => {
                                sql.push(next);
                                chars.next();
                            }
                            _ => break,
                        }
                    }
                }
            }
            ':' => match chars.peek() {
                Some(&(_, ':')) => {
                    sql.push_str("::");
                    chars.next();
                }
                Some(&(start, next)) if is_ident_start(next) => {
                    let mut end = start;
                    while let Some(&(idx, ch)) = chars.peek() {
                        if !is_ident_continue(ch) {
                            break;
                        }
                        end = idx + ch.len_utf8();
                        chars.next();
                    }
                    let name = &template[start..end];

                    let ordinal = match ordinals.get(name) {
                        Some(ordinal) => *ordinal,
                        None => {
                            let value = params
                                .get(name)
                                .ok_or_else(|| RewriteError::UnknownParameter(name.to_string()))?;
                            args.push(value.clone());
                            ordinals.insert(name, args.len());
                            args.len()
                        }
                    };

                    sql.push('?');
                    sql.push_str(&ordinal.to_string());
                }
                _ => sql.push(':'),
            },
            _ => sql.push(c),
        }
    }

    Ok(Rewritten { sql, args })
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params<'a>(pairs: &[(&'a str, &'a str)]) -> BTreeMap<&'a str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_repeated_placeholder_shares_one_marker() {
        let out = rewrite("SET a = :a, b = :a", &params(&[("a", "x")])).unwrap();

        assert_eq!(out.sql, "SET a = ?1, b = ?1");
        assert_eq!(out.args, vec!["x".to_string()]);
    }

    #[test]
    fn test_missing_parameter_is_unknown() {
        let result = rewrite("WHERE id = :a", &params(&[("b", "x")]));

        assert_eq!(result, Err(RewriteError::UnknownParameter("a".into())));
    }

    #[test]
    fn test_prefix_name_does_not_match_longer_name() {
        let out = rewrite(
            "WHERE id = :id AND identity = :identity",
            &params(&[("id", "1"), ("identity", "2")]),
        )
        .unwrap();

        assert_eq!(out.sql, "WHERE id = ?1 AND identity = ?2");
        assert_eq!(out.args, vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_longer_name_missing_is_not_satisfied_by_prefix() {
        let result = rewrite("WHERE x = :identity", &params(&[("id", "1")]));

        assert_eq!(
            result,
            Err(RewriteError::UnknownParameter("identity".to_string()))
        );
    }

    #[test]
    fn test_ordinals_follow_first_appearance() {
        let out = rewrite(
            "UPDATE t SET b = :b, a = :a WHERE id = :id AND b = :b",
            &params(&[("a", "A"), ("b", "B"), ("id", "I")]),
        )
        .unwrap();

        assert_eq!(
            out.sql,
            "UPDATE t SET b = ?1, a = ?2 WHERE id = ?3 AND b = ?1"
        );
        assert_eq!(
            out.args,
            vec!["B".to_string(), "A".to_string(), "I".to_string()]
        );
    }

    #[test]
    fn test_unreferenced_entries_are_ignored() {
        let out = rewrite(
            "SELECT * FROM t WHERE a = :a",
            &params(&[("a", "1"), ("unused", "2")]),
        )
        .unwrap();

        assert_eq!(out.args.len(), 1);
    }

    #[test]
    fn test_template_without_placeholders_is_unchanged() {
        let out = rewrite("SELECT 1", &params(&[])).unwrap();

        assert_eq!(out.sql, "SELECT 1");
        assert!(out.args.is_empty());
    }

    #[test]
    fn test_type_cast_and_bare_colon_are_copied() {
        let out = rewrite(
            "SELECT :a::text, '10:30' AS t, x : y",
            &params(&[("a", "v")]),
        )
        .unwrap();

        assert_eq!(out.sql, "SELECT ?1::text, '10:30' AS t, x : y");
    }

    #[test]
    fn test_quoted_text_is_not_rewritten() {
        let out = rewrite(
            r#"SELECT ':a', 'it''s :a', ":a" FROM t WHERE c = :a"#,
            &params(&[("a", "v")]),
        )
        .unwrap();

        assert_eq!(
            out.sql,
            r#"SELECT ':a', 'it''s :a', ":a" FROM t WHERE c = ?1"#
        );
        assert_eq!(out.args.len(), 1);
    }

    #[test]
    fn test_placeholder_at_end_of_template() {
        let out = rewrite("LIMIT :limit", &params(&[("limit", "5")])).unwrap();

        assert_eq!(out.sql, "LIMIT ?1");
    }

    #[test]
    fn test_rewrite_is_deterministic() {
        let map = params(&[("z", "1"), ("a", "2"), ("m", "3")]);
        let template = "VALUES (:m, :z, :a)";

        let first = rewrite(template, &map).unwrap();
        let second = rewrite(template, &map).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first.args,
            vec!["3".to_string(), "1".to_string(), "2".to_string()]
        );
    }

    #[test]
    fn test_non_ascii_text_is_preserved() {
        let out = rewrite("SELECT 'café' WHERE n = :n", &params(&[("n", "1")])).unwrap();

        assert_eq!(out.sql, "SELECT 'café' WHERE n = ?1");
    }
}
