//! SQL utility functions

/// Build a `%term%` LIKE pattern with `%`, `_` and `\` escaped
///
/// Pair with `ESCAPE '\'` (SQLite) or MySQL's default backslash escape so a
/// condition like `"100%"` only matches the literal text.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
