//! Shared helpers for target implementations.

use convert_case::{Case, Casing};
use std::path::{Path, PathBuf};

/// The root location for bundled target sources.
pub fn sources_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("sources")
}

/// Join name parts into a single kebab-case identifier.
///
/// Style token names are derived this way from component and property
/// names, so the convention must stay fixed.
pub fn join_to_kebab_case(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.to_case(Case::Kebab))
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_to_kebab_case() {
        assert_eq!(join_to_kebab_case(&["MyPalette", "primaryColor"]), "my-palette-primary-color");
        assert_eq!(join_to_kebab_case(&["Color", "hex"]), "color-hex");
    }
}
