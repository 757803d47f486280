//! Header-based dialect recognition.

use crate::dialect::Dialect;
use crate::dialects::Registry;

/// How many leading lines count as the statement header.
pub const HEADER_LINES: usize = 40;

/// The first [`HEADER_LINES`] lines of a page.
pub fn header_of(text: &str) -> String {
    text.lines().take(HEADER_LINES).collect::<Vec<_>>().join("\n")
}

/// First dialect, in registry priority order, with a signature phrase in
/// the header. `None` means unknown.
pub fn recognize<'r>(registry: &'r Registry, header: &str) -> Option<&'r Dialect> {
    registry.iter().find(|d| d.matches_signature(header))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_by_signature() {
        let registry = Registry::builtin().unwrap();
        let id = |header: &str| recognize(&registry, header).map(|d| d.id());

        assert_eq!(id("PUBLIC BANK BERHAD\nStatement of Account"), Some("public_bank"));
        assert_eq!(id("Malayan Banking Berhad"), Some("maybank"));
        assert_eq!(id("rhb bank berhad"), Some("rhb"));
        assert_eq!(id("BANK ISLAM MALAYSIA"), Some("bank_islam"));
        assert_eq!(id("Some Credit Union"), None);
    }

    #[test]
    fn test_priority_breaks_ties() {
        let registry = Registry::builtin().unwrap();
        // a CIMB statement listing a transfer to Maybank
        let header = "CIMB BANK BERHAD\n03/04/2025 IBG TO MAYBANK 150.00 4,850.00";
        assert_eq!(recognize(&registry, header).map(|d| d.id()), Some("cimb"));
    }

    #[test]
    fn test_header_is_bounded() {
        let mut text = "filler\n".repeat(HEADER_LINES);
        text.push_str("PUBLIC BANK");
        assert_eq!(header_of(&text).lines().count(), HEADER_LINES);
        let registry = Registry::builtin().unwrap();
        assert!(recognize(&registry, &header_of(&text)).is_none());
    }
}
