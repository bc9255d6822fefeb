//! Fuzzy "did you mean" suggestions for unknown template names

/// Maximum Levenshtein distance to consider for suggestions
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Filters registered by the engine, plus the MiniJinja builtins people reach for
pub const AVAILABLE_FILTERS: &[&str] = &[
    "toyaml",
    "tojson",
    "quote",
    "squote",
    "indent",
    "nindent",
    "b64encode",
    "required",
    "camelcase",
    // MiniJinja builtins
    "default",
    "upper",
    "lower",
    "trim",
    "replace",
    "join",
    "first",
    "last",
    "length",
    "items",
];

/// Global functions registered by the engine and the function registry
pub const AVAILABLE_FUNCTIONS: &[&str] = &[
    "versionStream",
    "version_stream",
    "fail",
    "dict",
    "list",
    "get",
    "coalesce",
    "ternary",
    "range",
];

/// Closest entry of `candidates` to `name`, if it is close enough to be a typo
pub fn closest_match<'a>(name: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|c| (*c, strsim::levenshtein(&name.to_lowercase(), &c.to_lowercase())))
        .filter(|(_, d)| *d <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(_, d)| *d)
        .map(|(c, _)| c)
}

/// Names called as functions on `line` (`name(`) that are not registered
pub fn unknown_functions(line: &str) -> Vec<String> {
    identifiers_before(line, '(')
        .into_iter()
        .filter(|name| !AVAILABLE_FUNCTIONS.contains(&name.as_str()))
        .collect()
}

/// Names applied as filters on `line` (`| name`) that are not registered
pub fn unknown_filters(line: &str) -> Vec<String> {
    line.split('|')
        .skip(1)
        .filter_map(|rest| {
            let name: String = rest
                .trim_start()
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            (!name.is_empty()).then_some(name)
        })
        .filter(|name| !AVAILABLE_FILTERS.contains(&name.as_str()))
        .collect()
}

/// Suggestion text for an unknown function or filter on `line`
pub fn suggest_for_line(line: &str, filters: bool) -> Option<String> {
    let (unknown, candidates, what) = if filters {
        (unknown_filters(line), AVAILABLE_FILTERS, "filter")
    } else {
        (unknown_functions(line), AVAILABLE_FUNCTIONS, "function")
    };

    unknown.iter().find_map(|name| {
        closest_match(name, candidates)
            .map(|found| format!("Did you mean the {} `{}` instead of `{}`?", what, found, name))
    })
}

fn identifiers_before(line: &str, marker: char) -> Vec<String> {
    let mut found = Vec::new();
    let mut current = String::new();
    let mut previous = ' ';

    for c in line.chars() {
        if c.is_alphanumeric() || c == '_' {
            // A dotted name is a method call, not a global function
            if current.is_empty() && previous == '.' {
                current.push('.');
            }
            current.push(c);
        } else {
            if c == marker && !current.is_empty() && !current.starts_with('.') {
                found.push(current.clone());
            }
            current.clear();
        }
        previous = c;
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_match() {
        assert_eq!(closest_match("versionStrem", AVAILABLE_FUNCTIONS), Some("versionStream"));
        assert_eq!(closest_match("toYaml", AVAILABLE_FILTERS), Some("toyaml"));
        assert_eq!(closest_match("completely_different", AVAILABLE_FUNCTIONS), None);
    }

    #[test]
    fn test_unknown_functions_on_line() {
        let line = r#"tag: {{ versionStrem("docker", "nginx") }} {{ values.items() }}"#;
        assert_eq!(unknown_functions(line), vec!["versionStrem".to_string()]);
    }

    #[test]
    fn test_unknown_filters_on_line() {
        let line = "image: {{ values.image | toYml | nindent(2) }}";
        assert_eq!(unknown_filters(line), vec!["toYml".to_string()]);
    }

    #[test]
    fn test_suggest_for_line() {
        let suggestion = suggest_for_line(r#"{{ versionstream("chart", "a/b") }}"#, false).unwrap();
        assert!(suggestion.contains("`versionStream`"));

        assert_eq!(suggest_for_line("{{ values.a | quote }}", true), None);
    }
}
