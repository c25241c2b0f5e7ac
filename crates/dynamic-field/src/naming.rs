//! Storage names for media fields.
//!
//! Upload widgets keep their temporary files under a name derived from
//! the widget, the field and the component index, so two components of
//! the same widget never share an upload slot.

use sha2::{Digest, Sha256};

/// Maximum length of a storage name, prefix included.
pub const STORAGE_NAME_LEN: usize = 32;

/// Prefix for fields inside repeated components.
pub const COMPONENT_PREFIX: char = 'f';

/// Prefix for the shared extra fields.
pub const EXTRA_PREFIX: char = 'm';

/// Derives a storage name from the widget id and the given parts.
///
/// `:` in the widget id becomes `_`, everything is joined with `_`,
/// hashed with SHA-256 and hex encoded; the prefix plus the leading
/// digest characters make up exactly [`STORAGE_NAME_LEN`] characters.
pub fn derive_field_name(prefix: char, widget_id: &str, parts: &[&str]) -> String {
    let mut source = widget_id.replace(':', "_");
    for part in parts {
        source.push('_');
        source.push_str(part);
    }
    let digest = Sha256::digest(source.as_bytes());
    let mut name = format!("{prefix}{digest:x}");
    name.truncate(STORAGE_NAME_LEN);
    name
}

/// Storage name of a component field at `index`.
pub fn storage_name(widget_id: &str, field_id: &str, index: usize) -> String {
    let index = index.to_string();
    derive_field_name(COMPONENT_PREFIX, widget_id, &[field_id, index.as_str()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_prefix() {
        let name = storage_name("vactory:slider", "image", 0);
        assert_eq!(name.len(), STORAGE_NAME_LEN);
        assert!(name.starts_with('f'));
        assert!(name[1..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_name_is_leading_digest_hex() {
        // sha256("w_a") = 9012166380bed7e0f00e53af41124157ab66c5fe...
        let name = derive_field_name(EXTRA_PREFIX, "w", &["a"]);
        assert_eq!(name, "m9012166380bed7e0f00e53af4112415");
    }

    #[test]
    fn test_colon_is_normalized() {
        assert_eq!(
            derive_field_name('m', "vactory:slider", &["image"]),
            derive_field_name('m', "vactory_slider", &["image"])
        );
    }

    #[test]
    fn test_prefix_changes_name() {
        assert_ne!(
            derive_field_name('f', "w", &["image"]),
            derive_field_name('m', "w", &["image"])
        );
    }
}
