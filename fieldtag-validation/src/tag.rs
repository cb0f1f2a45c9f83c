// Tag string parsing
//
// Grammar: `rule[=param](;rule[=param])*`. Parsing never fails; unknown or
// malformed rules are dealt with during evaluation.

use std::fmt;

/// One `name[=param]` segment of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSpec<'a> {
    /// Rule name, trimmed
    pub name: &'a str,

    /// Raw parameter, trimmed; empty when absent
    pub param: &'a str,
}

impl<'a> RuleSpec<'a> {
    /// Parse a single segment, splitting once on the first `=`.
    pub fn parse(segment: &'a str) -> Self {
        match segment.split_once('=') {
            Some((name, param)) => Self {
                name: name.trim(),
                param: param.trim(),
            },
            None => Self {
                name: segment.trim(),
                param: "",
            },
        }
    }
}

impl fmt::Display for RuleSpec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.param.is_empty() {
            f.write_str(self.name)
        } else {
            write!(f, "{}={}", self.name, self.param)
        }
    }
}

/// Split a tag into rule specs, preserving source order.
pub fn parse(tag: &str) -> Vec<RuleSpec<'_>> {
    tag.split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(RuleSpec::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(tag: &str) -> Vec<(&str, &str)> {
        parse(tag).into_iter().map(|s| (s.name, s.param)).collect()
    }

    #[test]
    fn test_parse_ordered_rules() {
        assert_eq!(
            pairs("nonzero;len=7;mycheck"),
            vec![("nonzero", ""), ("len", "7"), ("mycheck", "")]
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(pairs("  min = 1 ; max=  3 "), vec![("min", "1"), ("max", "3")]);
    }

    #[test]
    fn test_parse_skips_empty_segments() {
        assert!(parse("").is_empty());
        assert!(parse(" ; ;").is_empty());
        assert_eq!(pairs(";nonzero;;"), vec![("nonzero", "")]);
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        assert_eq!(pairs("regex=^a=b$"), vec![("regex", "^a=b$")]);
        assert_eq!(pairs("=5"), vec![("", "5")]);
        assert_eq!(pairs("len="), vec![("len", "")]);
    }

    #[test]
    fn test_display() {
        assert_eq!(RuleSpec::parse("max=24").to_string(), "max=24");
        assert_eq!(RuleSpec::parse("nonzero").to_string(), "nonzero");
    }
}
