use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
}

pub fn verify_password(password: &str, hashed: &str) -> Result<(), argon2::password_hash::Error> {
    let argon2 = Argon2::default();
    let parsed = PasswordHash::new(hashed)?;

    argon2.verify_password(password.as_bytes(), &parsed)
}

/// The single shared admin password, held only as an argon2 PHC string.
#[derive(Clone)]
pub struct AdminCredential {
    phc: String,
}

impl AdminCredential {
    /// Hashes a plain `ADMIN_PASSWORD` once at startup.
    pub fn from_plain(password: &str) -> Result<Self, argon2::password_hash::Error> {
        Ok(Self {
            phc: hash_password(password)?,
        })
    }

    /// Takes a ready-made `ADMIN_PASSWORD_HASH`, rejecting malformed ones early.
    pub fn from_hash(phc: &str) -> Result<Self, argon2::password_hash::Error> {
        PasswordHash::new(phc)?;
        Ok(Self {
            phc: phc.to_string(),
        })
    }

    pub fn verify(&self, candidate: &str) -> bool {
        verify_password(candidate, &self.phc).is_ok()
    }
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminCredential(..)")
    }
}
