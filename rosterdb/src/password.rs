//! Credential hashing for staff accounts.
//!
//! Stored credentials are Argon2 PHC strings. The store never looks inside them; only
//! [`CredentialHasher`] implementations do.

use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use rosterdb_core::error::{DocumentStoreError, DocumentStoreResult};

/// Turns plaintext passwords into stored credentials and checks them.
pub trait CredentialHasher {
    /// Hashes `plaintext` into an opaque stored credential.
    fn hash(&self, plaintext: &str) -> DocumentStoreResult<String>;

    /// Returns `true` if `plaintext` matches the stored credential.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Credential`] if `stored` is not a credential this
    /// hasher understands.
    fn verify(&self, plaintext: &str, stored: &str) -> DocumentStoreResult<bool>;
}

/// Argon2id with the crate's default parameters and a random salt per hash.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> DocumentStoreResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Ok(
            Argon2::default()
                .hash_password(plaintext.as_bytes(), &salt)
                .map_err(credential_error)?
                .to_string()
        )
    }

    fn verify(&self, plaintext: &str, stored: &str) -> DocumentStoreResult<bool> {
        let parsed = PasswordHash::new(stored).map_err(credential_error)?;

        match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(credential_error(err)),
        }
    }
}

fn credential_error(err: password_hash::Error) -> DocumentStoreError {
    DocumentStoreError::Credential(err.to_string())
}

/// Hashes a password with [`Argon2Hasher`].
pub fn hash_password(plaintext: &str) -> DocumentStoreResult<String> {
    Argon2Hasher.hash(plaintext)
}

/// Verifies a password against a credential produced by [`hash_password`].
pub fn verify_password(plaintext: &str, stored: &str) -> DocumentStoreResult<bool> {
    Argon2Hasher.verify(plaintext, stored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let stored = hash_password("chess456").unwrap();

        assert!(stored.starts_with("$argon2"));
        assert!(verify_password("chess456", &stored).unwrap());
        assert!(!verify_password("chess457", &stored).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        assert_ne!(hash_password("art123").unwrap(), hash_password("art123").unwrap());
    }

    #[test]
    fn malformed_credential_is_an_error() {
        assert!(matches!(
            verify_password("art123", "not-a-phc-string"),
            Err(DocumentStoreError::Credential(_))
        ));
    }
}
