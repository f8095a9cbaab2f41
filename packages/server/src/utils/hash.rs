use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

type HashResult<T> = Result<T, argon2::password_hash::Error>;

/// Hash a profile password with Argon2id under a fresh random salt. The salt
/// and parameters travel inside the PHC-format output string.
pub fn hash_password(password: &str) -> HashResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check a login attempt against a stored PHC hash. Returns `Err` only when
/// the stored hash itself cannot be parsed; a wrong password is `Ok(false)`.
pub fn verify_password(password: &str, stored_hash: &str) -> HashResult<bool> {
    let parsed = PasswordHash::new(stored_hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
