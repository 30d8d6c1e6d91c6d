//! Text sanitizer — folds typographic punctuation to ASCII and drops anything
//! the standard PDF fonts cannot show.
//!
//! The built-in Helvetica faces are written with WinAnsiEncoding, so only the
//! Latin-1 range (U+0000..=U+00FF) survives. Common "smart" punctuation is
//! substituted first so that pasted chat output keeps its bullets and quotes.

/// Unicode punctuation → ASCII replacement table. Applied before the Latin-1 filter.
const SUBSTITUTIONS: &[(char, &str)] = &[
    ('\u{2022}', "*"),   // bullet
    ('\u{2013}', "-"),   // en dash
    ('\u{2014}', "--"),  // em dash
    ('\u{2018}', "'"),   // left single quote
    ('\u{2019}', "'"),   // right single quote
    ('\u{201C}', "\""),  // left double quote
    ('\u{201D}', "\""),  // right double quote
    ('\u{2026}', "..."), // ellipsis
    ('\u{00B7}', "*"),   // middle dot
    ('\u{25CF}', "*"),   // black circle
    ('\u{2219}', "*"),   // bullet operator
];

/// Normalizes `text` to the renderable character set.
///
/// Never fails: characters with no substitution and no Latin-1 code point are
/// silently discarded, so the worst case is an empty string.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match substitute(c) {
            Some(replacement) => out.push_str(replacement),
            None if is_latin1(c) => out.push(c),
            None => {}
        }
    }
    out
}

fn substitute(c: char) -> Option<&'static str> {
    SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

/// True if `c` has a single-byte Latin-1 encoding.
pub fn is_latin1(c: char) -> bool {
    (c as u32) <= 0xFF
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_replaces_smart_punctuation() {
        let input = "\u{201C}Quoted\u{201D} \u{2018}single\u{2019} a\u{2013}b c\u{2014}d wait\u{2026}";
        assert_eq!(sanitize(input), "\"Quoted\" 'single' a-b c--d wait...");
    }

    #[test]
    fn test_bullet_glyphs_become_asterisks() {
        assert_eq!(sanitize("\u{2022} one"), "* one");
        assert_eq!(sanitize("\u{00B7} two"), "* two");
        assert_eq!(sanitize("\u{25CF} three"), "* three");
        assert_eq!(sanitize("\u{2219} four"), "* four");
    }

    #[test]
    fn test_keeps_latin1_accents() {
        assert_eq!(sanitize("Caf\u{00E9} na\u{00EF}ve \u{00C5}"), "Caf\u{00E9} na\u{00EF}ve \u{00C5}");
    }

    #[test]
    fn test_drops_characters_outside_latin1() {
        assert_eq!(sanitize("ok \u{1F600} \u{4E2D}\u{6587} done"), "ok   done");
    }

    #[test]
    fn test_only_non_latin1_yields_empty() {
        assert_eq!(sanitize("\u{1F680}\u{4E2D}\u{0416}\u{03A9}"), "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_newlines_preserved() {
        assert_eq!(sanitize("a\nb\r\nc"), "a\nb\r\nc");
    }

    proptest! {
        #[test]
        fn prop_sanitize_is_idempotent(s in any::<String>()) {
            let once = sanitize(&s);
            prop_assert_eq!(sanitize(&once), once);
        }

        #[test]
        fn prop_output_is_latin1(s in any::<String>()) {
            prop_assert!(sanitize(&s).chars().all(is_latin1));
        }

        #[test]
        fn prop_non_latin1_only_input_is_dropped(
            s in proptest::collection::vec(proptest::char::range('\u{2600}', '\u{27BF}'), 0..32)
        ) {
            let input: String = s.into_iter().collect();
            prop_assert_eq!(sanitize(&input), "");
        }
    }
}
