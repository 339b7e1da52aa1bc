// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path layout for the document store.

use std::path::{Path, PathBuf};

/// Default root directory for persistent data.
pub const DATA_ROOT: &str = "/data";

/// Path utilities for the document store layout:
///
/// ```text
/// {root}/
///   users/{user_id}.json
///   users/by_external/{encoded_external_id}.json
///   accounts/{account_id}.json
/// ```
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all persistent data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== User Paths ==========

    /// Directory containing all user records.
    pub fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    /// Path to a user record.
    pub fn user(&self, user_id: &str) -> PathBuf {
        self.users_dir().join(format!("{user_id}.json"))
    }

    /// Directory containing the external-identity uniqueness index.
    pub fn external_index_dir(&self) -> PathBuf {
        self.users_dir().join("by_external")
    }

    /// Path to the index entry for one external identity.
    pub fn external_index(&self, external_id: &str) -> PathBuf {
        self.external_index_dir()
            .join(format!("{}.json", encode_external_id(external_id)))
    }

    // ========== Bank Account Paths ==========

    /// Directory containing all bank account records.
    pub fn accounts_dir(&self) -> PathBuf {
        self.root.join("accounts")
    }

    /// Path to a bank account record.
    pub fn account(&self, account_id: &str) -> PathBuf {
        self.accounts_dir().join(format!("{account_id}.json"))
    }
}

/// Whether an id is safe to embed directly in a filename.
///
/// Path captures arrive percent-decoded, so an id like `../users/x` would
/// otherwise resolve outside the directory it is joined onto. Ids that fail
/// this check can never name a stored record.
pub fn is_safe_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Encode an external identity into a filesystem-safe name.
///
/// Injective: alphanumerics, `-` and `_` pass through, every other byte
/// becomes `%XX`. Two distinct external ids can never collide on disk.
pub fn encode_external_id(external_id: &str) -> String {
    let mut encoded = String::with_capacity(external_id.len());
    for byte in external_id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_use_data_root() {
        let paths = StoragePaths::default();
        assert_eq!(paths.root(), Path::new("/data"));
    }

    #[test]
    fn user_paths_are_correct() {
        let paths = StoragePaths::new("/tmp/test-data");
        assert_eq!(
            paths.user("u1"),
            PathBuf::from("/tmp/test-data/users/u1.json")
        );
        assert_eq!(
            paths.external_index_dir(),
            PathBuf::from("/tmp/test-data/users/by_external")
        );
        assert_eq!(
            paths.external_index("user_abc"),
            PathBuf::from("/tmp/test-data/users/by_external/user_abc.json")
        );
    }

    #[test]
    fn account_paths_are_correct() {
        let paths = StoragePaths::default();
        assert_eq!(paths.accounts_dir(), PathBuf::from("/data/accounts"));
        assert_eq!(
            paths.account("acc-1"),
            PathBuf::from("/data/accounts/acc-1.json")
        );
    }

    #[test]
    fn safe_ids_are_plain_filenames_only() {
        assert!(is_safe_id("9f2c1e4a-0b7d-4a31-8f6e-2d5c9b1a7e30"));
        assert!(is_safe_id("user_2abC-9"));

        assert!(!is_safe_id(""));
        assert!(!is_safe_id(".."));
        assert!(!is_safe_id("../users/u1"));
        assert!(!is_safe_id("a/b"));
        assert!(!is_safe_id("a\\b"));
        assert!(!is_safe_id("a.json"));
    }

    #[test]
    fn external_id_encoding_is_filesystem_safe() {
        assert_eq!(encode_external_id("user_2abC-9"), "user_2abC-9");
        assert_eq!(encode_external_id("a/b"), "a%2Fb");
        assert_eq!(encode_external_id("a.b@c"), "a%2Eb%40c");
    }

    #[test]
    fn external_id_encoding_is_injective_for_tricky_pairs() {
        assert_ne!(encode_external_id("a/b"), encode_external_id("a%2Fb"));
        assert_ne!(encode_external_id("a.b"), encode_external_id("a_b"));
    }
}
