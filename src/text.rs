//! Name formatting for catalogue identifiers.

/// Turn a concatenated-word identifier into its display form by inserting a
/// space before every internal capital letter.
///
/// "YoungWitch" becomes "Young Witch", "Witch" stays "Witch". The result is
/// trimmed so a leading capital never produces a leading space.
pub fn display_name(raw: &str) -> String {
    let mut formatted = String::with_capacity(raw.len() + 4);
    for (i, c) in raw.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            formatted.push(' ');
        }
        formatted.push(c);
    }
    formatted.trim().to_string()
}
