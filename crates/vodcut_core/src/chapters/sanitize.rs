//! Filename sanitization via full-width substitution.
//!
//! Characters reserved in file names are replaced with their full-width
//! forms (U+FF00 block), which keeps titles readable and collision-free
//! where deletion or a placeholder would not.

/// Characters that cannot appear in a file name component.
const RESERVED: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Offset from an ASCII character to its full-width form.
const FULLWIDTH_OFFSET: u32 = 0xFEE0;

/// Map a title to a filesystem-safe name.
///
/// Idempotent: full-width replacements are themselves valid characters, so
/// sanitizing twice changes nothing. Valid characters pass through untouched.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if RESERVED.contains(&c) {
                char::from_u32(c as u32 + FULLWIDTH_OFFSET).unwrap_or('_')
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_characters_become_fullwidth() {
        assert_eq!(sanitize_title("a/b"), "a／b");
        assert_eq!(sanitize_title("12:30 start?"), "12：30 start？");
        assert_eq!(sanitize_title("<\"quoted\">|\\*"), "＜＂quoted＂＞｜＼＊");
    }

    #[test]
    fn valid_characters_are_untouched() {
        let title = "Boss fight 2 (final) - まとめ.part1";
        assert_eq!(sanitize_title(title), title);
    }

    #[test]
    fn sanitization_is_idempotent() {
        let samples = [
            "plain",
            "a/b:c*d?e\"f<g>h|i\\j",
            "already ／ full：width",
            "",
        ];
        for sample in samples {
            let once = sanitize_title(sample);
            assert_eq!(sanitize_title(&once), once);
        }
    }
}
