use proptest::prelude::*;
use zerokite_crypto::{session_checksum, sign};

proptest! {
    #[test]
    fn checksum_is_deterministic(key in ".{0,32}", token in ".{0,32}", secret in ".{0,32}") {
        prop_assert_eq!(
            session_checksum(&key, &token, &secret),
            session_checksum(&key, &token, &secret)
        );
    }

    #[test]
    fn changing_one_part_changes_digest(
        key in "[a-z0-9]{1,16}",
        token in "[a-z0-9]{1,16}",
        secret in "[a-z0-9]{1,16}",
        suffix in "[a-z0-9]{1,4}",
    ) {
        let base = session_checksum(&key, &token, &secret);
        let changed_token = format!("{token}{suffix}");
        prop_assert_ne!(&base, &session_checksum(&key, &changed_token, &secret));
        let changed_secret = format!("{secret}{suffix}");
        prop_assert_ne!(&base, &session_checksum(&key, &token, &changed_secret));
    }

    #[test]
    fn parts_are_joined_without_delimiter(left in "[a-z]{0,8}", right in "[a-z]{0,8}") {
        let joined = format!("{left}{right}");
        prop_assert_eq!(sign(&[left.as_str(), right.as_str()]), sign(&[joined.as_str()]));
    }
}
