//! WeChat webhook signature verification.
//!
//! The platform signs every request with a SHA-1 digest over the shared
//! token and two request-supplied values (timestamp and nonce), sorted
//! lexicographically and concatenated without a separator.
//! Reference: https://developers.weixin.qq.com/doc/offiaccount/Basic_Information/Access_Overview.html

use sha1::{Digest, Sha1};
use tracing::warn;

/// Compute the expected signature for a request.
///
/// The three inputs are sorted ascending, concatenated, hashed with SHA-1
/// and rendered as lowercase hex. Empty inputs are hashed like any other
/// value; absent query parameters collapse to empty strings upstream.
pub fn make_signature(token: &str, timestamp: &str, nonce: &str) -> String {
    let mut parts = [token, timestamp, nonce];
    parts.sort_unstable();

    let mut hasher = Sha1::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Verify a webhook request signature.
///
/// Recomputes the expected signature and compares it to the supplied one.
/// Returns `true` iff they are equal.
pub fn validate_signature(token: &str, timestamp: &str, nonce: &str, signature: &str) -> bool {
    let expected = make_signature(token, timestamp, nonce);

    // Constant-time comparison to prevent timing attacks
    let valid = constant_time_compare(&expected, signature);

    if !valid {
        warn!(
            expected_length = expected.len(),
            actual_length = signature.len(),
            "signature_mismatch"
        );
    }

    valid
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_signature_reference_vector() {
        // sha1("1234567890abcdewechat4go"), fixed independently via sha1sum
        assert_eq!(
            make_signature("wechat4go", "1234567890", "abcde"),
            "eeed52b837445a0c260febc4d215240644a69423"
        );
    }

    #[test]
    fn test_make_signature_order_independent() {
        // Sorting happens before hashing, so swapping timestamp and nonce
        // yields the same digest.
        let a = make_signature("tok", "111", "zzz");
        let b = make_signature("tok", "zzz", "111");
        assert_eq!(a, b);
    }

    #[test]
    fn test_make_signature_empty_inputs() {
        // sha1("wechat4go"): both nonces absent
        assert_eq!(
            make_signature("wechat4go", "", ""),
            "6caff1b45d84344ae45a1c12c1bccc08390e0195"
        );
        // All-empty inputs hash the empty string rather than short-circuiting
        assert_eq!(
            make_signature("", "", ""),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn test_validate_signature_valid() {
        let sig = make_signature("wechat4go", "1234567890", "abcde");
        assert!(validate_signature("wechat4go", "1234567890", "abcde", &sig));
    }

    #[test]
    fn test_validate_signature_single_char_corruption() {
        let mut sig = make_signature("wechat4go", "1234567890", "abcde");
        let last = if sig.ends_with('0') { '1' } else { '0' };
        sig.pop();
        sig.push(last);
        assert!(!validate_signature("wechat4go", "1234567890", "abcde", &sig));
    }

    #[test]
    fn test_validate_signature_wrong_token() {
        let sig = make_signature("other-token", "1234567890", "abcde");
        assert!(!validate_signature("wechat4go", "1234567890", "abcde", &sig));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc", "abc"));
        assert!(!constant_time_compare("abc", "abd"));
        assert!(!constant_time_compare("abc", "abcd"));
    }
}
