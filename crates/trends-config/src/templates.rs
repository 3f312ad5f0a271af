//! Configuration templates for `trends init`.
//!
//! Templates are stored as valid TOML files and returned as commented-out
//! example configurations.

/// Default local configuration template (valid TOML).
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Global configuration template (valid TOML).
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Returns the local configuration template as a commented-out example.
pub fn local_template() -> String {
    comment_template(LOCAL_TEMPLATE)
}

/// Returns the global configuration template as a commented-out example.
pub fn global_template() -> String {
    comment_template(GLOBAL_TEMPLATE)
}

/// Converts a valid TOML template into a commented-out example config.
///
/// Lines that are already comments are preserved as-is. Non-comment, non-empty
/// lines get a "# " prefix. Empty lines are preserved.
fn comment_template(template: &str) -> String {
    let mut result = String::with_capacity(template.len() + template.lines().count() * 2);
    for line in template.lines() {
        if !line.is_empty() && !line.starts_with('#') {
            result.push_str("# ");
        }
        result.push_str(line);
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::parse::parse_config_str;

    #[test]
    fn local_template_parses_as_valid_toml() {
        let config = parse_config_str(LOCAL_TEMPLATE, Path::new("config.toml")).unwrap();
        let search = config.search.unwrap();
        assert_eq!(search.expanded_keywords().unwrap().len(), 4);
    }

    #[test]
    fn global_template_parses_as_valid_toml() {
        let config = parse_config_str(GLOBAL_TEMPLATE, Path::new("config-global.toml")).unwrap();
        assert!(config.github.is_some());
        assert!(config.twitter.is_some());
    }

    #[test]
    fn commented_template_parses_as_empty_config() {
        let config = parse_config_str(&local_template(), Path::new("config.toml")).unwrap();
        assert!(config.search.is_none());
        assert!(config.terms.is_none());
    }

    #[test]
    fn comment_template_preserves_comments_and_blank_lines() {
        let input = "# comment\n\n[section]\nkey = \"value\"\n";
        assert_eq!(
            comment_template(input),
            "# comment\n\n# [section]\n# key = \"value\"\n"
        );
    }
}
