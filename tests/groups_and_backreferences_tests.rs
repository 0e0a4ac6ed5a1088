use backtrack_grep::Pattern;

fn test_pattern(pattern: &str, text: &str, expected: bool) {
    let regex = Pattern::compile(pattern)
        .unwrap_or_else(|e| panic!("Failed to compile pattern {:?}: {}", pattern, e));
    let result = regex.is_match(text);
    assert_eq!(result, expected,
        "Pattern '{}' against text '{}' - expected: {}, got: {}",
        pattern, text, expected, result);
}

fn test_captures(pattern: &str, text: &str, expected: Option<Vec<Option<&str>>>) {
    let regex = Pattern::compile(pattern)
        .unwrap_or_else(|e| panic!("Failed to compile pattern {:?}: {}", pattern, e));
    let expected = expected.map(|groups| {
        groups
            .into_iter()
            .map(|group| group.map(str::to_string))
            .collect::<Vec<_>>()
    });
    assert_eq!(regex.captures(text), expected,
        "Captures of '{}' against text '{}'", pattern, text);
}

#[cfg(test)]
mod basic_group_tests {
    use super::*;

    #[test]
    fn test_simple_group() {
        test_pattern("(abc)", "xabcx", true);
    }

    #[test]
    fn test_group_fail() {
        test_pattern("(abc)", "def", false);
    }

    #[test]
    fn test_empty_group() {
        test_pattern("()", "hello", true);
    }

    #[test]
    fn test_multiple_groups_fail() {
        test_pattern("(a)(b)", "ac", false);
    }

    #[test]
    fn test_nested_with_alternation() {
        test_pattern("(a(b|c)d)", "acd", true);
    }

    #[test]
    fn test_group_with_plus_needs_one() {
        test_pattern("(ab)+", "", false);
    }

    #[test]
    fn test_group_with_question() {
        test_pattern("^(ab)?$", "", true);
    }

    #[test]
    fn test_group_with_star() {
        test_pattern("^(ab)*$", "ababab", true);
    }
}

#[cfg(test)]
mod basic_backreference_tests {
    use super::*;

    #[test]
    fn test_backreference_repeats_text() {
        test_pattern("(cat) and \\1", "cat and cat", true);
    }

    #[test]
    fn test_backreference_rejects_other_text() {
        test_pattern("(cat) and \\1", "cat and dog", false);
    }

    #[test]
    fn test_backreference_after_alternation() {
        test_pattern("(a|b)\\1", "xbb", true);
    }

    #[test]
    fn test_backreference_after_alternation_fail() {
        test_pattern("(a|b)\\1", "ab", false);
    }

    #[test]
    fn test_reversed_backreferences() {
        test_pattern("(a)(b)\\2\\1", "abba", true);
    }

    #[test]
    fn test_same_backreference_twice() {
        test_pattern("(a)\\1\\1", "aab", false);
    }

    #[test]
    fn test_backreference_to_outer_group() {
        test_pattern("((\\w+)-)\\1\\2", "ab-ab-ab", true);
    }

    #[test]
    fn test_ninth_group() {
        test_pattern("(a)(b)(c)(d)(e)(f)(g)(h)(i)\\9", "abcdefghii", true);
    }
}

#[cfg(test)]
mod backtracking_backreference_tests {
    use super::*;

    #[test]
    fn test_palindrome_like() {
        test_pattern("^(.).*\\1$", "abcba", true);
    }

    #[test]
    fn test_palindrome_like_fail() {
        test_pattern("^(.).*\\1$", "abc", false);
    }

    #[test]
    fn test_doubled_pattern() {
        test_pattern("^(.+)\\1$", "abcabc", true);
    }

    #[test]
    fn test_doubled_pattern_fail() {
        test_pattern("^(.+)\\1$", "abcabd", false);
    }

    #[test]
    fn test_repeated_word() {
        test_pattern("(\\w+) \\1", "say hello hello", true);
    }

    #[test]
    fn test_repeated_word_fail() {
        test_pattern("(\\w+) \\1", "hello world", false);
    }

    #[test]
    fn test_html_tag_matching() {
        test_pattern("<(\\w+)>.*</\\1>", "<div>content</div>", true);
    }

    #[test]
    fn test_html_tag_matching_fail() {
        test_pattern("<(\\w+)>.*</\\1>", "<div>content</span>", false);
    }

    #[test]
    fn test_quoted_string() {
        test_pattern("([\"']).*\\1", "'hello'", true);
    }

    #[test]
    fn test_quoted_string_fail() {
        test_pattern("([\"']).*\\1", "\"hello'", false);
    }

    #[test]
    fn test_backreference_inside_repetition_is_per_iteration() {
        test_pattern("^((\\w)\\2 )+$", "aa bb cc ", true);
    }

    #[test]
    fn test_backreference_inside_repetition_is_per_iteration_fail() {
        test_pattern("^((\\w)\\2 )+$", "aa bb ca ", false);
    }
}

#[cfg(test)]
mod unset_group_tests {
    use super::*;

    #[test]
    fn test_skipped_optional_group_cannot_be_referenced() {
        test_pattern("^(a)?b\\1$", "b", false);
    }

    #[test]
    fn test_optional_group_present() {
        test_pattern("(a)?\\1", "aa", true);
    }

    #[test]
    fn test_star_group_gives_back_for_backreference() {
        test_pattern("^(a)*\\1$", "aa", true);
    }

    #[test]
    fn test_backreference_at_end_of_input() {
        test_pattern("(a)?\\1", "", false);
    }
}

#[cfg(test)]
mod capture_tests {
    use super::*;

    #[test]
    fn test_no_match_has_no_captures() {
        test_captures("(cat)", "dog", None);
    }

    #[test]
    fn test_pattern_without_groups() {
        test_captures("cat", "concatenate", Some(vec![]));
    }

    #[test]
    fn test_groups_in_parse_order() {
        test_captures(
            "((\\d+)-(\\d+))",
            "call 555-1234 now",
            Some(vec![Some("555-1234"), Some("555"), Some("1234")]),
        );
    }

    #[test]
    fn test_unused_alternative_is_none() {
        test_captures("(a)|(b)", "b", Some(vec![None, Some("b")]));
    }

    #[test]
    fn test_repeated_group_keeps_last_iteration() {
        test_captures("^(\\w)+$", "abc", Some(vec![Some("c")]));
    }

    #[test]
    fn test_greedy_group_takes_longest() {
        test_captures("(a+)(a*)", "aaa", Some(vec![Some("aaa"), Some("")]));
    }

    #[test]
    fn test_leftmost_match_wins() {
        test_captures("(o.)", "foo boo", Some(vec![Some("oo")]));
    }

    #[test]
    fn test_empty_capture() {
        test_captures("x()y", "xy", Some(vec![Some("")]));
    }
}
