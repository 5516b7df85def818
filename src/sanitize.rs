/// Strip every character that is not alphanumeric or whitespace from user
/// input before it is used as a catalog query or a model prompt. Internal
/// spacing is preserved. Pure and idempotent.
pub fn sanitize_input(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_symbols() {
        assert_eq!(sanitize_input("Inception!"), "Inception");
        assert_eq!(sanitize_input("What's the plot?"), "Whats the plot");
        assert_eq!(sanitize_input("$100 @midnight #nope"), "100 midnight nope");
    }

    #[test]
    fn preserves_internal_spacing() {
        assert_eq!(sanitize_input("The  Dark   Knight"), "The  Dark   Knight");
        assert_eq!(sanitize_input("a\tb\nc"), "a\tb\nc");
    }

    #[test]
    fn idempotent() {
        let inputs = ["Blade Runner 2049!", "###", "", "  plain words  "];
        for input in inputs {
            let once = sanitize_input(input);
            assert_eq!(sanitize_input(&once), once);
        }
    }

    #[test]
    fn output_is_alphanumeric_or_whitespace_only() {
        let sanitized = sanitize_input("Amélie: (2001) — £9.99?!");
        assert!(sanitized
            .chars()
            .all(|c| c.is_alphanumeric() || c.is_whitespace()));
        // Accented letters are alphanumeric and survive
        assert!(sanitized.contains("Amélie"));
    }

    #[test]
    fn empty_and_symbol_only_inputs() {
        assert_eq!(sanitize_input(""), "");
        assert_eq!(sanitize_input("?!@#$%"), "");
    }
}
