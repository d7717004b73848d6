//! Custom Askama template filters.

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Turns a `PokéAPI` name into display text: hyphens become spaces and each
/// word is capitalized (`mr-mime` → `Mr Mime`).
///
/// Usage in templates: `{{ name|pretty }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn pretty(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(prettify(&value.to_string()))
}

/// Plain-function form of [`pretty`].
#[must_use]
pub fn prettify(name: &str) -> String {
    name.split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prettify() {
        assert_eq!(prettify("mr-mime"), "Mr Mime");
        assert_eq!(prettify("pikachu"), "Pikachu");
        assert_eq!(prettify("viridian-forest-area"), "Viridian Forest Area");
        assert_eq!(prettify(""), "");
    }
}
