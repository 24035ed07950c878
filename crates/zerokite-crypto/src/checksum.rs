use sha2::{Digest, Sha256};

/// Hashes `parts` concatenated in order, with no delimiter, and returns the
/// lowercase hex SHA-256 digest.
#[must_use]
pub fn sign<S: AsRef<str>>(parts: &[S]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_ref().as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Checksum sent with the request token when exchanging it for a session.
#[must_use]
pub fn session_checksum(api_key: &str, request_token: &str, api_secret: &str) -> String {
    sign(&[api_key, request_token, api_secret])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_matches_sha256_of_concatenation() {
        assert_eq!(
            sign(&["a", "b", "c"]),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn sign_of_nothing_is_empty_digest() {
        let empty: [&str; 0] = [];
        assert_eq!(
            sign(&empty),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn session_checksum_orders_key_token_secret() {
        assert_eq!(
            session_checksum("key", "token", "secret"),
            sign(&["key", "token", "secret"])
        );
        assert_ne!(
            session_checksum("key", "token", "secret"),
            sign(&["secret", "token", "key"])
        );
    }

    #[test]
    fn digest_is_lowercase_hex() {
        let digest = session_checksum("api_key", "request_token", "api_secret");
        assert_eq!(digest.len(), 64);
        assert!(digest
            .chars()
            .all(|ch| ch.is_ascii_digit() || ('a'..='f').contains(&ch)));
    }
}
