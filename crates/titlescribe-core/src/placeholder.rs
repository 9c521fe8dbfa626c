//! `{name}` token replacement shared by the narrative and preview renderers

use regex::{NoExpand, RegexBuilder};

/// Replace every `{name}` token in `text` with `value`.
///
/// `name` is matched literally (regex metacharacters in custom keys are
/// escaped) and `value` is inserted verbatim, so `$1` in a value stays `$1`.
pub fn replace_placeholder(text: &str, name: &str, value: &str, case_insensitive: bool) -> String {
    let pattern = format!(r"\{{{}\}}", regex::escape(name));
    match RegexBuilder::new(&pattern)
        .case_insensitive(case_insensitive)
        .build()
    {
        Ok(re) => re.replace_all(text, NoExpand(value)).into_owned(),
        Err(e) => {
            log::debug!("Skipping placeholder {:?}: {}", name, e);
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_case_insensitive() {
        let out = replace_placeholder("By {executedBy} and {EXECUTEDBY}", "executedBy", "A", true);
        assert_eq!(out, "By A and A");
    }

    #[test]
    fn test_replace_case_sensitive() {
        let out = replace_placeholder("By {executedBy} and {EXECUTEDBY}", "executedBy", "A", false);
        assert_eq!(out, "By A and {EXECUTEDBY}");
    }

    #[test]
    fn test_key_is_literal() {
        let out = replace_placeholder("{a.b} {axb}", "a.b", "1", true);
        assert_eq!(out, "1 {axb}");
    }

    #[test]
    fn test_value_is_not_expanded() {
        let out = replace_placeholder("Paid {amount}", "amount", "$1 & $0", true);
        assert_eq!(out, "Paid $1 & $0");
    }
}
