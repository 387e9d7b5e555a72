//! Term normalization

/// Lookup form of a term. Only case is folded: stray whitespace is kept so
/// it surfaces as an unresolved term and as drift instead of vanishing.
pub fn normalize(term: &str) -> String {
	term.to_lowercase()
}

/// Whether a raw catalog value carries leading or trailing whitespace
pub fn has_stray_whitespace(raw: &str) -> bool {
	raw.trim() != raw
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn folds_case_only() {
		assert_eq!(normalize("Cabernet"), "cabernet");
		assert_eq!(normalize(" Rioja"), " rioja");
	}

	#[test]
	fn detects_whitespace() {
		assert!(has_stray_whitespace("mosel "));
		assert!(!has_stray_whitespace("mosel"));
	}
}
