//! Unicode identifier classification for variable names.

use unicode_properties::{GeneralCategory, GeneralCategoryGroup, UnicodeGeneralCategory};

/// Returns true if `ch` may be the first rune of a variable name.
///
/// Letters of any script and the underscore qualify.
#[must_use]
pub fn is_ident_start(ch: char) -> bool {
    if ch.is_ascii() {
        ch.is_ascii_alphabetic() || ch == '_'
    } else {
        ch.general_category_group() == GeneralCategoryGroup::Letter
    }
}

/// Returns true if `ch` may be a second or subsequent rune of a variable name.
///
/// Adds decimal digits of any script to the start set.
#[must_use]
pub fn is_ident_continue(ch: char) -> bool {
    if ch.is_ascii() {
        ch.is_ascii_alphanumeric() || ch == '_'
    } else {
        is_ident_start(ch) || ch.general_category() == GeneralCategory::DecimalNumber
    }
}

/// Returns true if `name` is non-empty and every rune is valid in its position.
#[must_use]
pub fn is_ident(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_ident_start) && chars.all(is_ident_continue)
}
