//! Generation of temporary steward passwords and opaque session tokens.

use rand::Rng;
use uuid::Uuid;

/// Length of generated temporary passwords.
pub const TEMP_PASSWORD_LEN: usize = 12;

/// Alphabet for temporary passwords: mixed-case alphanumerics plus symbols.
const PASSWORD_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

/// Generate a random 12-character temporary password for a newly
/// provisioned steward. The plaintext is emailed once and only the Argon2id
/// hash is persisted.
pub fn generate_temp_password() -> String {
    let mut rng = rand::rng();
    (0..TEMP_PASSWORD_LEN)
        .map(|_| PASSWORD_CHARSET[rng.random_range(0..PASSWORD_CHARSET.len())] as char)
        .collect()
}

/// Generate an opaque admin session token. The plaintext goes into the
/// session cookie; only its hash is stored server-side.
pub fn generate_session_token() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_password_length_and_alphabet() {
        let pw = generate_temp_password();
        assert_eq!(pw.len(), TEMP_PASSWORD_LEN);
        assert!(pw.bytes().all(|b| PASSWORD_CHARSET.contains(&b)));
    }

    #[test]
    fn temp_passwords_differ() {
        assert_ne!(generate_temp_password(), generate_temp_password());
    }

    #[test]
    fn session_tokens_are_unique() {
        assert_ne!(generate_session_token(), generate_session_token());
    }
}
