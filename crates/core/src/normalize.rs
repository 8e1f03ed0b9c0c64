//! Accent detection and stripping for free-text search input.
//!
//! The remote search endpoints match keywords byte-for-byte, so an accented
//! query like `"Société Générale"` silently returns nothing where the plain
//! spelling would hit. These helpers find and fold such characters.

/// Accented Latin letters and their closest plain ASCII replacement.
/// Case is preserved: uppercase accented letters map to uppercase letters.
#[rustfmt::skip]
const ACCENT_TABLE: &[(char, char)] = &[
    ('à', 'a'), ('á', 'a'), ('â', 'a'), ('ã', 'a'), ('ä', 'a'), ('å', 'a'),
    ('è', 'e'), ('é', 'e'), ('ê', 'e'), ('ë', 'e'),
    ('ì', 'i'), ('í', 'i'), ('î', 'i'), ('ï', 'i'),
    ('ò', 'o'), ('ó', 'o'), ('ô', 'o'), ('õ', 'o'), ('ö', 'o'),
    ('ù', 'u'), ('ú', 'u'), ('û', 'u'), ('ü', 'u'),
    ('ý', 'y'), ('ÿ', 'y'),
    ('ñ', 'n'), ('ç', 'c'),
    ('À', 'A'), ('Á', 'A'), ('Â', 'A'), ('Ã', 'A'), ('Ä', 'A'), ('Å', 'A'),
    ('È', 'E'), ('É', 'E'), ('Ê', 'E'), ('Ë', 'E'),
    ('Ì', 'I'), ('Í', 'I'), ('Î', 'I'), ('Ï', 'I'),
    ('Ò', 'O'), ('Ó', 'O'), ('Ô', 'O'), ('Õ', 'O'), ('Ö', 'O'),
    ('Ù', 'U'), ('Ú', 'U'), ('Û', 'U'), ('Ü', 'U'),
    ('Ý', 'Y'), ('Ÿ', 'Y'),
    ('Ñ', 'N'), ('Ç', 'C'),
];

fn plain(c: char) -> Option<char> {
    ACCENT_TABLE
        .iter()
        .find(|(accented, _)| *accented == c)
        .map(|(_, replacement)| *replacement)
}

/// Result of scanning a piece of text for accented characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccentCheck {
    pub has_accents: bool,
    pub normalized: String,
}

/// Returns true if `text` contains any character from the accent table.
pub fn has_accents(text: &str) -> bool {
    text.chars().any(|c| plain(c).is_some())
}

/// Replaces every accented character in `text` with its plain equivalent.
pub fn strip_accents(text: &str) -> String {
    text.chars().map(|c| plain(c).unwrap_or(c)).collect()
}

/// Scan and normalize in one call.
pub fn detect_accents(text: &str) -> AccentCheck {
    AccentCheck {
        has_accents: has_accents(text),
        normalized: strip_accents(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_lowercase_and_uppercase_accents() {
        assert!(has_accents("café"));
        assert!(has_accents("ÉCOLE"));
        assert!(has_accents("Muñoz"));
        assert!(!has_accents("plain ascii text"));
        assert!(!has_accents(""));
    }

    #[test]
    fn test_strip_preserves_case() {
        assert_eq!(strip_accents("Société Générale"), "Societe Generale");
        assert_eq!(strip_accents("ÀÉÎÕÜ"), "AEIOU");
        assert_eq!(strip_accents("Ÿvette çà"), "Yvette ca");
    }

    #[test]
    fn test_detect_accents_reports_normalized_form() {
        let check = detect_accents("Crédit Agricole");
        assert!(check.has_accents);
        assert_eq!(check.normalized, "Credit Agricole");

        let check = detect_accents("Acme");
        assert!(!check.has_accents);
        assert_eq!(check.normalized, "Acme");
    }

    #[test]
    fn test_every_table_entry_is_removed_and_idempotent() {
        let all: String = ACCENT_TABLE.iter().map(|(accented, _)| *accented).collect();
        let once = strip_accents(&all);
        assert!(!has_accents(&once));
        assert!(once.is_ascii());
        assert_eq!(strip_accents(&once), once);
    }

    #[test]
    fn test_non_latin_text_is_untouched() {
        assert_eq!(strip_accents("東京 Zürich"), "東京 Zurich");
    }
}
