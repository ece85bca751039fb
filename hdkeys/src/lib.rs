//! Hierarchical deterministic key derivation over several curves: BIP-32 on
//! secp256k1, SLIP-0010 on nist256p1 and ed25519, and the ed25519 Blake2b and
//! Monero variants.
//!
//! ```no_run
//! use hdkeys::{Bip32, CurveKind};
//!
//! # fn main() -> Result<(), hdkeys::Bip32Error> {
//! let seed = [0u8; 64];
//! let account = Bip32::from_seed(&seed, CurveKind::Secp256k1)?.derive_path("m/44'/0'/0'")?;
//! println!("{}", account.extended_public_key());
//! # Ok(())
//! # }
//! ```

pub mod bip32;
pub mod cache;
pub mod ckd;
pub mod curve;
pub mod derivation;
pub mod edwards_keys;
pub mod error;
pub mod extended_key;
pub mod index;
pub mod keys;
pub mod master;
pub mod weierstrass_keys;

pub use bip32::Bip32;
pub use cache::DerivationCache;
pub use ckd::derive_child;
pub use curve::{CurveKind, CurveParams};
pub use derivation::DerivationPath;
pub use error::Bip32Error;
pub use extended_key::{ExtendedKey, KeyNetVersions};
pub use index::{ChildIndex, HARDENED_OFFSET};
pub use keys::{ChainCode, CurveKeys, Fingerprint, KeyMaterial, PrivateKey, PublicKey};
pub use master::derive_master_key;
