use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Bip32Error {
    /// Raw key bytes have the wrong length or are out of range for the curve.
    #[error("invalid key data")]
    InvalidKeyData,
    /// The seed produced an invalid master private key for this curve.
    #[error("seed yields an invalid master key")]
    InvalidMasterKey,
    /// The child at this index is undefined; callers should move on to the next index.
    #[error("child key is not defined for this index")]
    InvalidChildKey,
    #[error("derivation is not supported for this curve or key")]
    UnsupportedDerivation,
    #[error("hardened child requested from a public-only key")]
    PublicDerivationUnavailable,
    #[error("malformed derivation path")]
    MalformedPath,
    #[error("invalid serialized extended key")]
    InvalidSerializedKey,
    #[error("key holds no private key")]
    NoPrivateKey,
}
