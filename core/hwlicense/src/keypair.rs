//! Licensor keypair generation and persistence.
//!
//! A [`KeyPair`] is created once, saved as a config record, and only ever
//! loaded afterwards. The public key is always recomputed from the private
//! key, so the two cannot drift apart.

use crate::error::{LicenseError, LicenseResult};
use crate::ids::NamespaceId;
use crate::scheme::{Ed25519, SignatureScheme};
use crate::store::{decode_hex, read_record, write_record};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use zeroize::Zeroizing;

/// On-disk form of a keypair (`licensor.json`).
#[derive(Serialize, Deserialize)]
struct ConfigRecord {
    private_key: Zeroizing<String>,
    public_key: String,
    namespace_id: String,
}

/// A signing keypair bound to a namespace. Held by the licensor only.
pub struct KeyPair<S: SignatureScheme = Ed25519> {
    secret: Zeroizing<Vec<u8>>,
    public: Vec<u8>,
    namespace: NamespaceId,
    _scheme: PhantomData<S>,
}

impl<S: SignatureScheme> KeyPair<S> {
    /// Generates a fresh keypair and a fresh random namespace.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Crypto`] if the OS random source is unavailable.
    pub fn generate() -> LicenseResult<Self> {
        let secret = S::generate_secret()?;
        let namespace = NamespaceId::random()?;
        let keypair = Self::from_secret(secret, namespace)?;
        tracing::debug!(namespace = %keypair.namespace, "generated licensor keypair");
        Ok(keypair)
    }

    /// Builds a keypair from existing secret key material.
    ///
    /// # Errors
    ///
    /// Returns a `private_key` format error if the material is not valid for `S`.
    pub fn from_secret(
        secret: impl Into<Zeroizing<Vec<u8>>>,
        namespace: NamespaceId,
    ) -> LicenseResult<Self> {
        let secret = secret.into();
        let public = S::public_key(&secret)?;
        Ok(Self {
            secret,
            public,
            namespace,
            _scheme: PhantomData,
        })
    }

    /// Loads a keypair from the config record at `path`.
    ///
    /// The stored public key must equal the one recomputed from the stored
    /// private key.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file is unreadable, and a format error if
    /// the record or any of its fields is malformed or inconsistent.
    pub fn load(path: impl AsRef<Path>) -> LicenseResult<Self> {
        let path = path.as_ref();
        let record: ConfigRecord = read_record(path)?;

        let secret = Zeroizing::new(decode_hex("private_key", &record.private_key)?);
        let stored_public = decode_hex("public_key", &record.public_key)?;
        let namespace = NamespaceId::parse(&record.namespace_id)?;

        let keypair = Self::from_secret(secret, namespace)?;
        if keypair.public != stored_public {
            return Err(LicenseError::format(
                "public_key",
                "does not match the public half of private_key",
            ));
        }

        tracing::debug!(path = %path.display(), namespace = %namespace, "loaded licensor keypair");
        Ok(keypair)
    }

    /// Writes this keypair as a config record at `path`, replacing any
    /// existing file. Refusing to overwrite is the caller's decision.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory or file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> LicenseResult<()> {
        let record = ConfigRecord {
            private_key: Zeroizing::new(hex::encode(self.secret.as_slice())),
            public_key: self.public_key_hex(),
            namespace_id: self.namespace.to_string(),
        };
        write_record(path.as_ref(), &record)
    }

    /// Returns the public key bytes.
    #[must_use]
    pub fn public_key(&self) -> &[u8] {
        &self.public
    }

    /// Returns the public key as lowercase hex.
    #[must_use]
    pub fn public_key_hex(&self) -> String {
        hex::encode(&self.public)
    }

    /// Returns the namespace this keypair issues under.
    #[must_use]
    pub fn namespace(&self) -> NamespaceId {
        self.namespace
    }

    /// Signs `message` with the private key.
    pub(crate) fn sign(&self, message: &[u8]) -> LicenseResult<Vec<u8>> {
        S::sign(&self.secret, message)
    }
}

impl<S: SignatureScheme> Clone for KeyPair<S> {
    fn clone(&self) -> Self {
        Self {
            secret: self.secret.clone(),
            public: self.public.clone(),
            namespace: self.namespace,
            _scheme: PhantomData,
        }
    }
}

impl<S: SignatureScheme> PartialEq for KeyPair<S> {
    fn eq(&self, other: &Self) -> bool {
        self.secret.as_slice() == other.secret.as_slice()
            && self.public == other.public
            && self.namespace == other.namespace
    }
}

impl<S: SignatureScheme> Eq for KeyPair<S> {}

impl<S: SignatureScheme> fmt::Debug for KeyPair<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("secret", &"[REDACTED]")
            .field("public", &self.public_key_hex())
            .field("namespace", &self.namespace)
            .finish()
    }
}

/// Generates a standalone random namespace, independent of any keypair.
///
/// # Errors
///
/// Returns [`LicenseError::Crypto`] if the OS random source is unavailable.
pub fn generate_namespace() -> LicenseResult<NamespaceId> {
    NamespaceId::random()
}
