//! Single-pass scan of brief content into prose runs and citation marker
//! tokens. The scan never fails: anything that is not a well-formed
//! `[[CITATION:N]]` token stays in the surrounding prose untouched.

pub const MARKER_PREFIX: &str = "[[CITATION:";
pub const MARKER_SUFFIX: &str = "]]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanItem<'a> {
    Prose { text: &'a str },
    Marker { ordinal: usize, start: usize, end: usize },
}

/// Scans `content` left to right, emitting prose runs and marker tokens in
/// document order. Concatenating every prose run with the literal token text
/// (`&content[start..end]`) at the marker positions reproduces `content`
/// byte for byte. Empty gaps between adjacent tokens emit nothing.
pub fn scan(content: &str) -> Vec<ScanItem<'_>> {
    let mut items = Vec::new();
    let mut emitted = 0;
    let mut search = 0;

    while let Some(found) = content[search..].find(MARKER_PREFIX) {
        let start = search + found;
        match parse_marker(&content[start..]) {
            Some((ordinal, len)) => {
                if start > emitted {
                    items.push(ScanItem::Prose {
                        text: &content[emitted..start],
                    });
                }
                items.push(ScanItem::Marker {
                    ordinal,
                    start,
                    end: start + len,
                });
                emitted = start + len;
                search = emitted;
            }
            // Malformed candidate: leave it inside the pending prose run and
            // keep looking past the opening bracket.
            None => search = start + 1,
        }
    }

    if emitted < content.len() {
        items.push(ScanItem::Prose {
            text: &content[emitted..],
        });
    }

    items
}

/// Parses a marker token at the head of `rest`, returning its ordinal and
/// total byte length. The payload is a greedy run of ASCII digits with no
/// sign; an empty payload or a missing suffix is not a token. An all-digits
/// payload always is one, even past `usize` range: the ordinal saturates so
/// resolution drops the marker like any other out-of-range reference.
fn parse_marker(rest: &str) -> Option<(usize, usize)> {
    let payload = rest.strip_prefix(MARKER_PREFIX)?;
    let digit_len = payload
        .bytes()
        .take_while(|byte| byte.is_ascii_digit())
        .count();
    if digit_len == 0 {
        return None;
    }
    if !payload[digit_len..].starts_with(MARKER_SUFFIX) {
        return None;
    }
    let ordinal = payload[..digit_len].parse::<usize>().unwrap_or(usize::MAX);
    Some((
        ordinal,
        MARKER_PREFIX.len() + digit_len + MARKER_SUFFIX.len(),
    ))
}

#[cfg(test)]
mod tests {
    use super::{ScanItem, scan};

    fn reconstruct(content: &str, items: &[ScanItem<'_>]) -> String {
        let mut rebuilt = String::new();
        for item in items {
            match item {
                ScanItem::Prose { text } => rebuilt.push_str(text),
                ScanItem::Marker { start, end, .. } => rebuilt.push_str(&content[*start..*end]),
            }
        }
        rebuilt
    }

    #[test]
    fn scan_splits_prose_around_markers() {
        let content = "See [[CITATION:1]] for details.";
        let items = scan(content);

        assert_eq!(
            items,
            vec![
                ScanItem::Prose { text: "See " },
                ScanItem::Marker {
                    ordinal: 1,
                    start: 4,
                    end: 18
                },
                ScanItem::Prose {
                    text: " for details."
                },
            ]
        );
    }

    #[test]
    fn scan_emits_nothing_for_empty_gaps_between_markers() {
        let items = scan("[[CITATION:1]][[CITATION:2]]");

        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], ScanItem::Marker { ordinal: 1, .. }));
        assert!(matches!(items[1], ScanItem::Marker { ordinal: 2, .. }));
    }

    #[test]
    fn scan_treats_non_numeric_payload_as_prose() {
        let content = "[[CITATION:x]]";
        let items = scan(content);

        assert_eq!(items, vec![ScanItem::Prose { text: content }]);
    }

    #[test]
    fn scan_treats_unterminated_token_as_prose() {
        let content = "tail [[CITATION:12";
        let items = scan(content);

        assert_eq!(items, vec![ScanItem::Prose { text: content }]);
    }

    #[test]
    fn scan_rejects_signed_payload() {
        let content = "[[CITATION:+3]]";
        let items = scan(content);

        assert_eq!(items, vec![ScanItem::Prose { text: content }]);
    }

    #[test]
    fn scan_finds_token_nested_after_malformed_prefix() {
        let content = "[[CITATION:[[CITATION:1]]";
        let items = scan(content);

        assert_eq!(
            items,
            vec![
                ScanItem::Prose {
                    text: "[[CITATION:"
                },
                ScanItem::Marker {
                    ordinal: 1,
                    start: 11,
                    end: 25
                },
            ]
        );
    }

    #[test]
    fn scan_accepts_ordinal_zero_as_a_token() {
        let items = scan("[[CITATION:0]]");
        assert!(matches!(items[0], ScanItem::Marker { ordinal: 0, .. }));
    }

    #[test]
    fn scan_saturates_overflowing_ordinal_into_a_token() {
        let content = "[[CITATION:99999999999999999999999999]]";
        let items = scan(content);

        assert_eq!(
            items,
            vec![ScanItem::Marker {
                ordinal: usize::MAX,
                start: 0,
                end: content.len()
            }]
        );
    }

    #[test]
    fn scan_is_lossless_over_mixed_content() {
        let content = "a [[CITATION:1]] b [[CITATION:foo]] c [[CITATION:2]][[CITATION:3]] d [[CIT";
        let items = scan(content);

        assert_eq!(reconstruct(content, &items), content);
        let ordinals: Vec<usize> = items
            .iter()
            .filter_map(|item| match item {
                ScanItem::Marker { ordinal, .. } => Some(*ordinal),
                ScanItem::Prose { .. } => None,
            })
            .collect();
        assert_eq!(ordinals, vec![1, 2, 3]);
    }

    #[test]
    fn scan_positions_strictly_increase() {
        let content = "x[[CITATION:2]]y[[CITATION:9]]z";
        let items = scan(content);

        let starts: Vec<usize> = items
            .iter()
            .map(|item| match item {
                ScanItem::Prose { text } => {
                    content.find(text).expect("prose slice comes from content")
                }
                ScanItem::Marker { start, .. } => *start,
            })
            .collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);
    }
}
