//! Curve identities and the static capability table consulted by master-key
//! generation and child derivation.

use crate::ckd::DerivationScheme;
use crate::edwards_keys::{Ed25519Blake2bKeys, Ed25519Keys, Ed25519MoneroKeys};
use crate::index::HARDENED_OFFSET;
use crate::keys::CurveKeys;
use crate::weierstrass_keys::{Nist256p1Keys, Secp256k1Keys};
use crypto_utils::hmac::HmacHash;
use std::fmt;

/// Length of every private key handled by the engine.
pub const PRIVATE_KEY_LEN: usize = 32;
/// Length of every compressed public key handled by the engine.
pub const PUBLIC_KEY_LEN: usize = 33;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CurveKind {
    Secp256k1,
    Nist256p1,
    Ed25519,
    Ed25519Blake2b,
    Ed25519Monero,
}

/// Per-curve derivation capabilities.
#[derive(Debug)]
pub struct CurveParams {
    pub name: &'static str,
    /// Whether non-hardened (and therefore public-only) derivation is allowed.
    pub supports_public_derivation: bool,
    pub hardened_index_threshold: u32,
    pub private_key_len: usize,
    pub public_key_len: usize,
    /// HMAC key used to turn a seed into the master key.
    pub master_hmac_key: &'static [u8],
    /// Digest behind every HMAC evaluation on this curve.
    pub hmac_hash: HmacHash,
    pub scheme: DerivationScheme,
}

static SECP256K1: CurveParams = CurveParams {
    name: "secp256k1",
    supports_public_derivation: true,
    hardened_index_threshold: HARDENED_OFFSET,
    private_key_len: PRIVATE_KEY_LEN,
    public_key_len: PUBLIC_KEY_LEN,
    master_hmac_key: b"Bitcoin seed",
    hmac_hash: HmacHash::Sha512,
    scheme: DerivationScheme::Bip32,
};

static NIST256P1: CurveParams = CurveParams {
    name: "nist256p1",
    supports_public_derivation: true,
    hardened_index_threshold: HARDENED_OFFSET,
    private_key_len: PRIVATE_KEY_LEN,
    public_key_len: PUBLIC_KEY_LEN,
    master_hmac_key: b"Nist256p1 seed",
    hmac_hash: HmacHash::Sha512,
    scheme: DerivationScheme::Bip32,
};

static ED25519: CurveParams = CurveParams {
    name: "ed25519",
    supports_public_derivation: false,
    hardened_index_threshold: HARDENED_OFFSET,
    private_key_len: PRIVATE_KEY_LEN,
    public_key_len: PUBLIC_KEY_LEN,
    master_hmac_key: b"ed25519 seed",
    hmac_hash: HmacHash::Sha512,
    scheme: DerivationScheme::HardenedOnly,
};

static ED25519_BLAKE2B: CurveParams = CurveParams {
    name: "ed25519-blake2b",
    supports_public_derivation: false,
    hardened_index_threshold: HARDENED_OFFSET,
    private_key_len: PRIVATE_KEY_LEN,
    public_key_len: PUBLIC_KEY_LEN,
    master_hmac_key: b"ed25519 seed",
    hmac_hash: HmacHash::Blake2b512,
    scheme: DerivationScheme::HardenedOnly,
};

static ED25519_MONERO: CurveParams = CurveParams {
    name: "ed25519-monero",
    supports_public_derivation: false,
    hardened_index_threshold: HARDENED_OFFSET,
    private_key_len: PRIVATE_KEY_LEN,
    public_key_len: PUBLIC_KEY_LEN,
    master_hmac_key: b"ed25519 seed",
    hmac_hash: HmacHash::Sha512,
    scheme: DerivationScheme::HardenedOnly,
};

impl CurveKind {
    pub const ALL: [CurveKind; 5] = [
        CurveKind::Secp256k1,
        CurveKind::Nist256p1,
        CurveKind::Ed25519,
        CurveKind::Ed25519Blake2b,
        CurveKind::Ed25519Monero,
    ];

    pub fn params(self) -> &'static CurveParams {
        match self {
            CurveKind::Secp256k1 => &SECP256K1,
            CurveKind::Nist256p1 => &NIST256P1,
            CurveKind::Ed25519 => &ED25519,
            CurveKind::Ed25519Blake2b => &ED25519_BLAKE2B,
            CurveKind::Ed25519Monero => &ED25519_MONERO,
        }
    }

    /// Key arithmetic and encoding for this curve.
    pub fn keys(self) -> &'static dyn CurveKeys {
        match self {
            CurveKind::Secp256k1 => &Secp256k1Keys,
            CurveKind::Nist256p1 => &Nist256p1Keys,
            CurveKind::Ed25519 => &Ed25519Keys,
            CurveKind::Ed25519Blake2b => &Ed25519Blake2bKeys,
            CurveKind::Ed25519Monero => &Ed25519MoneroKeys,
        }
    }

    pub fn supports_public_derivation(self) -> bool {
        self.params().supports_public_derivation
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.params().name)
    }
}
