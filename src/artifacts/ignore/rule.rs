use glob::{MatchOptions, Pattern};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// One line of an ignore file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub pattern: String,
    /// `!pattern`: un-ignore whatever the pattern matches
    pub negated: bool,
}

impl Rule {
    /// `None` for blank lines and comments
    pub fn parse(line: &str) -> Option<Rule> {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let rule = if let Some(pattern) = line.strip_prefix('!') {
            Rule {
                pattern: pattern.to_string(),
                negated: true,
            }
        } else if let Some(pattern) = line.strip_prefix('\\') {
            Rule {
                pattern: pattern.to_string(),
                negated: false,
            }
        } else {
            Rule {
                pattern: line.to_string(),
                negated: false,
            }
        };

        Some(rule)
    }

    pub fn matches(&self, rel_path: &str) -> bool {
        pattern_matches(&self.pattern, rel_path)
    }
}

pub fn parse_rules<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<Rule> {
    lines.into_iter().filter_map(Rule::parse).collect()
}

/// Match one ignore pattern against a repository-relative path
///
/// - `dir/` matches `dir` itself and everything below it
/// - a pattern containing `/` is globbed against the whole path
/// - anything else is globbed against the last path segment
pub fn pattern_matches(pattern: &str, rel_path: &str) -> bool {
    if let Some(directory) = pattern.strip_suffix('/') {
        return rel_path == directory || rel_path.starts_with(pattern);
    }

    let subject = if pattern.contains('/') {
        rel_path
    } else {
        rel_path.rsplit('/').next().unwrap_or(rel_path)
    };

    match Pattern::new(pattern) {
        Ok(glob) => glob.matches_with(subject, MATCH_OPTIONS),
        Err(e) => {
            tracing::debug!(pattern, error = %e, "skipping malformed ignore pattern");
            false
        }
    }
}

/// Last matching rule wins; `None` when no rule matched
pub fn decide(rules: &[Rule], rel_path: &str) -> Option<bool> {
    rules
        .iter()
        .rev()
        .find(|rule| rule.matches(rel_path))
        .map(|rule| !rule.negated)
}

/// Whether `rules` ignore `rel_path`, defaulting to not ignored
pub fn evaluate(rules: &[Rule], rel_path: &str) -> bool {
    decide(rules, rel_path).unwrap_or(false)
}
