//! Hashing System - SHA-256 for Generated Packages
//!
//! Same request, same bytes, same digest. Build pipelines compare digests
//! to skip republishing unchanged packages.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::generator::OutputFile;

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Canonical JSON: sorted keys, no whitespace.
///
/// Going through `Value` sorts object keys because serde_json's default
/// `Map` is a `BTreeMap` (the `preserve_order` feature must stay off).
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(&serde_json::to_value(value)?)
}

/// Digest of an ordered file set; file order is part of the digest
pub fn compute_package_digest(files: &[OutputFile]) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(&files)?;
    Ok(sha256_hex(canonical.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn file(path: &str, source: &str) -> OutputFile {
        OutputFile { filepath: path.to_string(), source: source.to_string() }
    }

    #[test]
    fn test_canonical_json_sorted() {
        let obj = json!({"z": 1, "a": 2, "m": {"y": 1, "b": 2}});
        let canonical = canonical_json(&obj).unwrap();
        assert_eq!(canonical, r#"{"a":2,"m":{"b":2,"y":1},"z":1}"#);
    }

    #[test]
    fn test_canonical_json_sorts_struct_fields() {
        let canonical = canonical_json(&file("a.tsx", "x")).unwrap();
        assert_eq!(canonical, r#"{"filepath":"a.tsx","source":"x"}"#);
    }

    #[test]
    fn test_sha256_known_value() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_package_digest_order_sensitive() {
        let a = [file("a.tsx", "1"), file("b.tsx", "2")];
        let b = [file("b.tsx", "2"), file("a.tsx", "1")];
        assert_eq!(compute_package_digest(&a).unwrap(), compute_package_digest(&a).unwrap());
        assert_ne!(compute_package_digest(&a).unwrap(), compute_package_digest(&b).unwrap());
    }
}
