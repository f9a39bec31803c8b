//! Aligned text rendering of configuration mappings.
use std::fmt::Write;

use strata_model::ConfigMap;

/// Spaces added after the longest key of a block.
pub const KEY_PADDING: usize = 10;

/// Render `entries` as one line per key: the key left-aligned in a column of
/// `longest key + KEY_PADDING` characters, then the value.
///
/// Keys come out in ascending order. An empty mapping renders as `""`.
///
/// Each entry yields exactly one line only when neither key nor value contains
/// a line break and keys carry no trailing whitespace; otherwise the output
/// cannot be split back into the original pairs.
pub fn render(entries: &ConfigMap) -> String {
    let Some(longest) = entries.iter().map(|(k, _)| k.chars().count()).max() else {
        return String::new();
    };
    let width = longest + KEY_PADDING;

    let mut out = String::new();
    for (key, value) in entries.iter() {
        let _ = writeln!(out, "{key:<width$}{value}");
    }
    out
}

/// Section header line, e.g. `=== Configuration ===`.
pub fn banner(title: &str) -> String {
    format!("=========================== {title} ============================\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn map(pairs: &[(&str, &str)]) -> ConfigMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn empty_mapping_renders_nothing() {
        assert_eq!(render(&ConfigMap::new()), "");
    }

    #[test]
    fn single_entry_is_padded_to_key_plus_ten() {
        let out = render(&map(&[("a.b", "1")]));
        assert_eq!(out, format!("a.b{}1\n", " ".repeat(10)));
        assert_eq!(out.find('1'), Some(13));
    }

    #[test]
    fn one_sorted_line_per_entry() {
        let out = render(&map(&[("zeta", "3"), ("alpha", "1"), ("mid.key", "2")]));
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("alpha"));
        assert!(lines[1].starts_with("mid.key"));
        assert!(lines[2].starts_with("zeta"));
    }

    #[test]
    fn lines_split_back_into_key_and_value() {
        let input = map(&[
            ("strata.worker.flusher.threads", "16"),
            ("k", "value with spaces"),
            ("x.y", ""),
        ]);
        let width = "strata.worker.flusher.threads".len() + KEY_PADDING;

        for (line, (key, value)) in render(&input).lines().zip(input.iter()) {
            let (head, tail) = line.split_at(width);
            assert_eq!(head.trim_end(), key);
            assert_eq!(tail, value);
        }
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        let out = render(&map(&[("ключ", "v"), ("ab", "w")]));
        let first = out.lines().next().unwrap();
        assert_eq!(first.chars().count(), 4 + KEY_PADDING + 1);
    }

    #[test]
    fn output_is_deterministic() {
        let input = map(&[("b", "2"), ("a", "1")]);
        assert_eq!(render(&input), render(&input.clone()));
    }

    proptest! {
        #[test]
        fn every_entry_renders_as_one_aligned_line(
            entries in prop::collection::btree_map("[a-z][a-z0-9._-]{0,24}", "[^\r\n]{0,32}", 1..16)
        ) {
            let input = ConfigMap(entries);
            let width = input.iter().map(|(k, _)| k.chars().count()).max().unwrap() + KEY_PADDING;
            let out = render(&input);

            prop_assert!(out.ends_with('\n'));
            let lines: Vec<_> = out.lines().collect();
            prop_assert_eq!(lines.len(), input.len());

            let mut previous: Option<&str> = None;
            for (line, (key, value)) in lines.iter().zip(input.iter()) {
                let (head, tail) = line.split_at(width);
                let rendered_key = head.trim_end();
                prop_assert_eq!(rendered_key, key);
                prop_assert_eq!(tail, value);
                if let Some(prev) = previous {
                    prop_assert!(prev < rendered_key);
                }
                previous = Some(rendered_key);
            }
        }
    }

    #[test]
    fn banner_wraps_title() {
        let b = banner("Level: SYSTEM");
        assert!(b.contains(" Level: SYSTEM "));
        assert!(b.ends_with("=\n"));
    }
}
