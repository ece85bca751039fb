//! Curve-agnostic key material.
//!
//! Every supported curve implements [`CurveKeys`] over fixed-size byte
//! encodings: 32-byte private keys and 33-byte compressed public keys. The
//! validated wrappers [`PrivateKey`] and [`PublicKey`] carry their curve
//! identity so that material from different curves never mixes.

use crate::Bip32Error;
use crate::curve::{CurveKind, PRIVATE_KEY_LEN, PUBLIC_KEY_LEN};
use crypto_utils::hash::hash160;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// 32 bytes of entropy used as the HMAC key for child derivation.
pub type ChainCode = [u8; 32];

/// Point and scalar operations a curve exposes to the derivation engine.
///
/// Failures are reported as [`Bip32Error::InvalidKeyData`] unless an
/// operation makes no sense for the curve, which yields
/// [`Bip32Error::UnsupportedDerivation`].
pub trait CurveKeys: Send + Sync {
    fn kind(&self) -> CurveKind;

    /// Validates raw private key bytes and returns their canonical form.
    fn parse_private(&self, bytes: &[u8]) -> Result<[u8; 32], Bip32Error>;

    /// Validates a public key in any accepted encoding and returns it compressed.
    fn parse_public(&self, bytes: &[u8]) -> Result<[u8; 33], Bip32Error>;

    fn public_from_private(&self, private: &[u8; 32]) -> Result<[u8; 33], Bip32Error>;

    /// Turns the left half of an HMAC output into a private key.
    fn private_from_seed_half(&self, il: &[u8; 32]) -> Result<[u8; 32], Bip32Error>;

    fn add_points(&self, a: &[u8; 33], b: &[u8; 33]) -> Result<[u8; 33], Bip32Error>;

    fn mul_generator(&self, scalar: &[u8; 32]) -> Result<[u8; 33], Bip32Error>;

    /// `(a + b) mod n`, rejecting `b >= n` and a zero sum.
    fn add_scalars(&self, a: &[u8; 32], b: &[u8; 32]) -> Result<[u8; 32], Bip32Error>;

    fn uncompressed(&self, compressed: &[u8; 33]) -> Result<Vec<u8>, Bip32Error>;

    fn is_valid_private(&self, bytes: &[u8]) -> bool {
        self.parse_private(bytes).is_ok()
    }

    fn is_valid_public(&self, bytes: &[u8]) -> bool {
        self.parse_public(bytes).is_ok()
    }
}

/// 4-byte key identifier prefix, `HASH160(compressed public key)[0..4]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub [u8; 4]);

impl Fingerprint {
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    pub fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    pub fn is_master(&self) -> bool {
        self.0 == [0u8; 4]
    }
}

impl From<[u8; 4]> for Fingerprint {
    fn from(bytes: [u8; 4]) -> Self {
        Fingerprint(bytes)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    #[zeroize(skip)]
    curve: CurveKind,
    bytes: [u8; PRIVATE_KEY_LEN],
}

impl PrivateKey {
    pub fn from_bytes(bytes: &[u8], curve: CurveKind) -> Result<Self, Bip32Error> {
        let bytes = curve.keys().parse_private(bytes)?;
        Ok(PrivateKey { curve, bytes })
    }

    pub fn curve(&self) -> CurveKind {
        self.curve
    }

    pub fn raw(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.bytes
    }

    pub fn public_key(&self) -> Result<PublicKey, Bip32Error> {
        let compressed = self.curve.keys().public_from_private(&self.bytes)?;
        Ok(PublicKey {
            curve: self.curve,
            compressed,
        })
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("curve", &self.curve)
            .finish_non_exhaustive()
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    curve: CurveKind,
    compressed: [u8; PUBLIC_KEY_LEN],
}

impl PublicKey {
    /// Parses a compressed (or, where the curve has one, uncompressed) public key.
    pub fn from_bytes(bytes: &[u8], curve: CurveKind) -> Result<Self, Bip32Error> {
        let compressed = curve.keys().parse_public(bytes)?;
        Ok(PublicKey { curve, compressed })
    }

    pub fn curve(&self) -> CurveKind {
        self.curve
    }

    pub fn raw_compressed(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.compressed
    }

    pub fn raw_uncompressed(&self) -> Result<Vec<u8>, Bip32Error> {
        self.curve.keys().uncompressed(&self.compressed)
    }

    /// HASH160 of the compressed encoding, the input of most address formats.
    pub fn key_identifier(&self) -> [u8; 20] {
        hash160(&self.compressed)
    }

    pub fn fingerprint(&self) -> Fingerprint {
        let id = self.key_identifier();
        Fingerprint([id[0], id[1], id[2], id[3]])
    }

    /// `self + other` as curve points.
    pub fn combine(&self, other: &PublicKey) -> Result<PublicKey, Bip32Error> {
        if self.curve != other.curve {
            return Err(Bip32Error::InvalidKeyData);
        }
        let compressed = self
            .curve
            .keys()
            .add_points(&self.compressed, &other.compressed)?;
        Ok(PublicKey {
            curve: self.curve,
            compressed,
        })
    }

    pub(crate) fn from_trusted(compressed: [u8; PUBLIC_KEY_LEN], curve: CurveKind) -> Self {
        PublicKey { curve, compressed }
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("curve", &self.curve)
            .field("compressed", &hex::encode(self.compressed))
            .finish()
    }
}

/// Keys held by a node: a full pair, or only the public half.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyMaterial {
    Full {
        private: PrivateKey,
        public: PublicKey,
    },
    PublicOnly(PublicKey),
}

impl KeyMaterial {
    pub fn from_private(private: PrivateKey) -> Result<Self, Bip32Error> {
        let public = private.public_key()?;
        Ok(KeyMaterial::Full { private, public })
    }

    pub fn public(&self) -> &PublicKey {
        match self {
            KeyMaterial::Full { public, .. } => public,
            KeyMaterial::PublicOnly(public) => public,
        }
    }

    pub fn private(&self) -> Result<&PrivateKey, Bip32Error> {
        match self {
            KeyMaterial::Full { private, .. } => Ok(private),
            KeyMaterial::PublicOnly(_) => Err(Bip32Error::NoPrivateKey),
        }
    }

    pub fn is_public_only(&self) -> bool {
        matches!(self, KeyMaterial::PublicOnly(_))
    }

    pub fn to_public_only(&self) -> KeyMaterial {
        KeyMaterial::PublicOnly(*self.public())
    }
}
