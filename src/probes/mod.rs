//! # Security Probes
//!
//! Hostile inputs for the security scenarios. The suite only checks that the
//! API stays well-behaved (defined status codes, values stored verbatim, no
//! authentication bypass); it does not try to exploit anything.

/// Script-injection strings used as pet names.
pub const XSS_PAYLOADS: [&str; 4] = [
    "<script>alert('xss')</script>",
    "<img src=x onerror=alert(1)>",
    "\"><svg onload=alert(1)>",
    "javascript:alert(document.cookie)",
];

/// SQL fragments used as usernames and passwords.
pub const SQL_INJECTION_PAYLOADS: [&str; 4] = [
    "' OR '1'='1",
    "admin'--",
    "'; DROP TABLE users; --",
    "1' UNION SELECT null, username, password FROM users --",
];

/// Length of the name used by the oversized-payload probe (1 MiB).
pub const OVERSIZED_NAME_LEN: usize = 1024 * 1024;

/// A name far beyond anything the API documents.
pub fn oversized_name() -> String {
    "A".repeat(OVERSIZED_NAME_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payloads_carry_their_markers() {
        assert!(XSS_PAYLOADS.iter().all(|p| p.contains('<') || p.contains("javascript:")));
        assert!(SQL_INJECTION_PAYLOADS.iter().all(|p| p.contains('\'')));
    }

    #[test]
    fn oversized_name_is_one_mebibyte() {
        let name = oversized_name();
        assert_eq!(name.len(), OVERSIZED_NAME_LEN);
        assert!(name.bytes().all(|b| b == b'A'));
    }
}
