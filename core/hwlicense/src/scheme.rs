//! Signature primitives behind a swappable capability set.
//!
//! Issuance and verification only ever talk to [`SignatureScheme`]; the
//! concrete algorithm is chosen by the type parameter on
//! [`KeyPair`](crate::KeyPair). Keys and signatures cross this boundary as
//! plain byte strings so records can persist them without knowing the
//! algorithm.

use crate::error::{LicenseError, LicenseResult};
use ed25519_dalek::{
    KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH,
    Signature as DalekSignature, Signer as _, SigningKey as DalekSigningKey, Verifier as _,
    VerifyingKey as DalekVerifyingKey,
};
use rand::RngCore;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

/// An asymmetric signature algorithm: generate, derive public, sign, verify.
pub trait SignatureScheme {
    /// Length of an encoded public key in bytes.
    const PUBLIC_KEY_LEN: usize;

    /// Length of a signature in bytes.
    const SIGNATURE_LEN: usize;

    /// Generates fresh secret key material in its persisted form.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Crypto`] if the random source is unavailable.
    fn generate_secret() -> LicenseResult<Zeroizing<Vec<u8>>>;

    /// Computes the public key belonging to `secret`.
    ///
    /// # Errors
    ///
    /// Returns a `private_key` format error if `secret` is not valid key material.
    fn public_key(secret: &[u8]) -> LicenseResult<Vec<u8>>;

    /// Signs `message` with `secret`.
    ///
    /// # Errors
    ///
    /// Returns a `private_key` format error if `secret` is not valid key material.
    fn sign(secret: &[u8], message: &[u8]) -> LicenseResult<Vec<u8>>;

    /// Checks `signature` over `message` under `public`.
    ///
    /// Returns `Ok(false)` when the signature simply does not verify.
    ///
    /// # Errors
    ///
    /// Returns a format error if the key or signature cannot be decoded at all.
    fn verify(public: &[u8], message: &[u8], signature: &[u8]) -> LicenseResult<bool>;
}

/// Ed25519 (RFC 8032): 32-byte seeds, deterministic 64-byte signatures.
///
/// Secrets are persisted as the 64-byte `seed || public` form; a bare
/// 32-byte seed is accepted as input too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ed25519;

impl Ed25519 {
    fn signing_key(secret: &[u8]) -> LicenseResult<DalekSigningKey> {
        match secret.len() {
            SECRET_KEY_LENGTH => {
                let seed: &[u8; SECRET_KEY_LENGTH] = secret
                    .try_into()
                    .map_err(|_| LicenseError::format("private_key", "invalid seed"))?;
                Ok(DalekSigningKey::from_bytes(seed))
            }
            KEYPAIR_LENGTH => {
                let bytes: &[u8; KEYPAIR_LENGTH] = secret
                    .try_into()
                    .map_err(|_| LicenseError::format("private_key", "invalid keypair bytes"))?;
                DalekSigningKey::from_keypair_bytes(bytes).map_err(|_| {
                    LicenseError::format("private_key", "embedded public half does not match seed")
                })
            }
            n => Err(LicenseError::format(
                "private_key",
                format!("expected {SECRET_KEY_LENGTH} or {KEYPAIR_LENGTH} bytes, got {n}"),
            )),
        }
    }
}

impl SignatureScheme for Ed25519 {
    const PUBLIC_KEY_LEN: usize = PUBLIC_KEY_LENGTH;
    const SIGNATURE_LEN: usize = SIGNATURE_LENGTH;

    fn generate_secret() -> LicenseResult<Zeroizing<Vec<u8>>> {
        let mut seed = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
        OsRng
            .try_fill_bytes(&mut seed[..])
            .map_err(|e| LicenseError::Crypto(format!("signing key: {e}")))?;
        let signing = DalekSigningKey::from_bytes(&seed);
        let bytes = Zeroizing::new(signing.to_keypair_bytes());
        Ok(Zeroizing::new(bytes.to_vec()))
    }

    fn public_key(secret: &[u8]) -> LicenseResult<Vec<u8>> {
        Ok(Self::signing_key(secret)?.verifying_key().to_bytes().to_vec())
    }

    fn sign(secret: &[u8], message: &[u8]) -> LicenseResult<Vec<u8>> {
        let signing = Self::signing_key(secret)?;
        Ok(signing.sign(message).to_bytes().to_vec())
    }

    fn verify(public: &[u8], message: &[u8], signature: &[u8]) -> LicenseResult<bool> {
        let public: &[u8; PUBLIC_KEY_LENGTH] = public.try_into().map_err(|_| {
            LicenseError::format(
                "public_key",
                format!("expected {PUBLIC_KEY_LENGTH} bytes, got {}", public.len()),
            )
        })?;
        let verifying = DalekVerifyingKey::from_bytes(public)
            .map_err(|_| LicenseError::format("public_key", "not a valid Ed25519 public key"))?;
        let signature = DalekSignature::from_slice(signature).map_err(|_| {
            LicenseError::format(
                "license_key",
                format!("expected {SIGNATURE_LENGTH}-byte signature, got {}", signature.len()),
            )
        })?;
        Ok(verifying.verify(message, &signature).is_ok())
    }
}
