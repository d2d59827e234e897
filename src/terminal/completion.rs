//! Prefix completion against a fixed command-name list.

/// Command names offered by Tab completion when none are configured.
pub const DEFAULT_COMPLETIONS: [&str; 20] = [
    "help", "clear", "history", "pwd", "ls", "dir", "cd", "cat", "echo", "python", "python3",
    "node", "npm", "pip", "git", "mkdir", "touch", "rm", "cp", "mv",
];

/// Outcome of completing a partially typed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Empty input or no candidate matched.
    NoMatch,
    /// Exactly one candidate; `suffix` is what must be appended to the input.
    Unique { suffix: String },
    /// Several candidates share the prefix, in candidate-list order.
    Ambiguous(Vec<String>),
}

/// Complete `input` against `candidates` with a case-sensitive prefix match.
pub fn complete<S: AsRef<str>>(input: &str, candidates: &[S]) -> Completion {
    if input.is_empty() {
        return Completion::NoMatch;
    }

    let matches: Vec<&str> = candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|candidate| candidate.starts_with(input))
        .collect();

    match matches.as_slice() {
        [] => Completion::NoMatch,
        [only] => Completion::Unique {
            suffix: only[input.len()..].to_string(),
        },
        many => Completion::Ambiguous(many.iter().map(|m| m.to_string()).collect()),
    }
}

/// Default candidates as owned strings, for configuration defaults.
pub fn default_completions() -> Vec<String> {
    DEFAULT_COMPLETIONS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_match_yields_only_the_suffix() {
        let candidates = ["python3", "ls", "git"];
        assert_eq!(
            complete("py", &candidates),
            Completion::Unique {
                suffix: "thon3".to_string()
            }
        );
    }

    #[test]
    fn several_matches_are_listed_in_order() {
        assert_eq!(
            complete("py", &DEFAULT_COMPLETIONS),
            Completion::Ambiguous(vec!["python".to_string(), "python3".to_string()])
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(complete("LS", &DEFAULT_COMPLETIONS), Completion::NoMatch);
    }

    #[test]
    fn empty_input_never_completes() {
        assert_eq!(complete("", &DEFAULT_COMPLETIONS), Completion::NoMatch);
    }

    #[test]
    fn exact_match_completes_with_empty_suffix() {
        assert_eq!(
            complete("pwd", &DEFAULT_COMPLETIONS),
            Completion::Unique {
                suffix: String::new()
            }
        );
    }

    #[test]
    fn input_with_arguments_matches_nothing() {
        assert_eq!(complete("git st", &DEFAULT_COMPLETIONS), Completion::NoMatch);
    }
}
