use std::sync::LazyLock;

use regex::bytes::Regex;

/// `[Word]` cross-references. `\w` is ASCII-only, matching the characters a
/// page title may use plus underscore.
static BRACKET_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)\[(\w+)\]").expect("valid bracket link regex"));

/// Turn every `[Word]` in `input` into `<a href="/view/Word">Word</a>`.
///
/// Matches are replaced leftmost-first and the replacement is not rescanned.
/// Nothing else in the input is escaped; callers render the result as raw
/// HTML.
pub fn filter(input: &[u8]) -> Vec<u8> {
    BRACKET_LINK
        .replace_all(input, &b"<a href=\"/view/${1}\">${1}</a>"[..])
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn leaves_text_without_references_untouched() {
        for input in [
            &b""[..],
            b"plain text",
            b"<b>html</b> stays & so does this",
            b"[] [with space] [dash-ed] [unclosed",
            b"\xff\xfe not utf-8",
        ] {
            assert_eq!(filter(input), input);
        }
    }

    #[test]
    fn single_reference_becomes_link() {
        assert_eq!(
            filter(b"[FrontPage]"),
            b"<a href=\"/view/FrontPage\">FrontPage</a>".to_vec()
        );
        assert_eq!(
            filter(b"[snake_case_9]"),
            b"<a href=\"/view/snake_case_9\">snake_case_9</a>".to_vec()
        );
    }

    #[test]
    fn replaces_every_occurrence() {
        let out = filter(b"see [One] and [Two], then [One] again");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "see <a href=\"/view/One\">One</a> and <a href=\"/view/Two\">Two</a>, \
             then <a href=\"/view/One\">One</a> again"
        );
    }

    #[test]
    fn nested_brackets_only_link_inner_word() {
        let out = filter(b"[[Inner]]");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[<a href=\"/view/Inner\">Inner</a>]"
        );
    }

    #[test]
    fn non_ascii_words_are_not_references() {
        assert_eq!(filter("[Über]".as_bytes()), "[Über]".as_bytes());
    }

    proptest! {
        #[test]
        fn bracket_free_input_is_unchanged(
            input in proptest::collection::vec(
                any::<u8>().prop_filter("no brackets", |b| *b != b'[' && *b != b']'),
                0..512,
            )
        ) {
            prop_assert_eq!(filter(&input), input);
        }

        #[test]
        fn bracketed_word_becomes_anchor(word in "[A-Za-z0-9_]{1,64}") {
            let out = filter(format!("[{word}]").as_bytes());
            prop_assert_eq!(
                String::from_utf8(out).unwrap(),
                format!("<a href=\"/view/{word}\">{word}</a>")
            );
        }
    }
}
