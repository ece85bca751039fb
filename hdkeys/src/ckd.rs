//! Child key derivation.
//!
//! Two strategies cover every supported curve:
//! * [`Bip32Derivation`]: `k_i = (IL + k_par) mod n`, normal and hardened
//!   children, public-only derivation `K_i = K_par + IL·G` (secp256k1, nist256p1).
//! * [`HardenedOnlyDerivation`]: `k_i = IL`, hardened children only (the
//!   ed25519 family).
//!
//! The HMAC digest is taken from the curve's capability table independently of
//! the strategy.

use crate::Bip32Error;
use crate::curve::CurveKind;
use crate::extended_key::ExtendedKey;
use crate::index::ChildIndex;
use crate::keys::{ChainCode, KeyMaterial, PrivateKey, PublicKey};
use crate::master::split_halves;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DerivationScheme {
    Bip32,
    HardenedOnly,
}

impl DerivationScheme {
    pub fn strategy(self) -> &'static dyn ChildDerivation {
        match self {
            DerivationScheme::Bip32 => &Bip32Derivation,
            DerivationScheme::HardenedOnly => &HardenedOnlyDerivation,
        }
    }
}

/// One derivation step on raw key material.
pub trait ChildDerivation: Send + Sync {
    /// CKDpriv: child private key and chain code.
    fn derive_private(
        &self,
        private: &PrivateKey,
        public: &PublicKey,
        chain_code: &ChainCode,
        index: ChildIndex,
    ) -> Result<(PrivateKey, ChainCode), Bip32Error>;

    /// CKDpub: child public key and chain code, for non-hardened indices.
    fn derive_public(
        &self,
        public: &PublicKey,
        chain_code: &ChainCode,
        index: ChildIndex,
    ) -> Result<(PublicKey, ChainCode), Bip32Error>;
}

pub struct Bip32Derivation;

impl ChildDerivation for Bip32Derivation {
    fn derive_private(
        &self,
        private: &PrivateKey,
        public: &PublicKey,
        chain_code: &ChainCode,
        index: ChildIndex,
    ) -> Result<(PrivateKey, ChainCode), Bip32Error> {
        let curve = private.curve();
        let hash = curve.params().hmac_hash;
        // Hardened: 0x00 || ser256(k_par) || ser32(i), otherwise serP(K_par) || ser32(i)
        let i = if index.is_hardened() {
            hash.mac(chain_code, &[&[0x00], private.raw(), &index.to_be_bytes()])
        } else {
            hash.mac(chain_code, &[public.raw_compressed(), &index.to_be_bytes()])
        };
        let (il, ir) = split_halves(&i);

        let child = curve
            .keys()
            .add_scalars(private.raw(), &il)
            .and_then(|bytes| PrivateKey::from_bytes(&bytes, curve))
            .map_err(|_| invalid_child(curve, index))?;
        Ok((child, ir))
    }

    fn derive_public(
        &self,
        public: &PublicKey,
        chain_code: &ChainCode,
        index: ChildIndex,
    ) -> Result<(PublicKey, ChainCode), Bip32Error> {
        if index.is_hardened() {
            return Err(Bip32Error::PublicDerivationUnavailable);
        }
        let curve = public.curve();
        let keys = curve.keys();
        let i = curve
            .params()
            .hmac_hash
            .mac(chain_code, &[public.raw_compressed(), &index.to_be_bytes()]);
        let (il, ir) = split_halves(&i);

        // K_i = K_par + IL·G
        let child = keys
            .mul_generator(&il)
            .and_then(|tweak| keys.add_points(public.raw_compressed(), &tweak))
            .map_err(|_| invalid_child(curve, index))?;
        Ok((PublicKey::from_trusted(child, curve), ir))
    }
}

pub struct HardenedOnlyDerivation;

impl ChildDerivation for HardenedOnlyDerivation {
    fn derive_private(
        &self,
        private: &PrivateKey,
        _public: &PublicKey,
        chain_code: &ChainCode,
        index: ChildIndex,
    ) -> Result<(PrivateKey, ChainCode), Bip32Error> {
        if !index.is_hardened() {
            return Err(Bip32Error::UnsupportedDerivation);
        }
        let curve = private.curve();
        let i = curve
            .params()
            .hmac_hash
            .mac(chain_code, &[&[0x00], private.raw(), &index.to_be_bytes()]);
        let (il, ir) = split_halves(&i);

        let child = curve
            .keys()
            .private_from_seed_half(&il)
            .and_then(|bytes| PrivateKey::from_bytes(&bytes, curve))
            .map_err(|_| invalid_child(curve, index))?;
        Ok((child, ir))
    }

    fn derive_public(
        &self,
        _public: &PublicKey,
        _chain_code: &ChainCode,
        index: ChildIndex,
    ) -> Result<(PublicKey, ChainCode), Bip32Error> {
        if index.is_hardened() {
            Err(Bip32Error::PublicDerivationUnavailable)
        } else {
            Err(Bip32Error::UnsupportedDerivation)
        }
    }
}

fn invalid_child(curve: CurveKind, index: ChildIndex) -> Bip32Error {
    log::warn!("{curve} child {index} is undefined, skip to the next index");
    Bip32Error::InvalidChildKey
}

/// Derives the child of `parent` at `index`, dispatching on the parent's curve.
pub fn derive_child(parent: &ExtendedKey, index: ChildIndex) -> Result<ExtendedKey, Bip32Error> {
    let curve = parent.curve();
    let params = curve.params();
    if !index.is_hardened() && !params.supports_public_derivation {
        log::debug!("{curve} forbids non-hardened child {index}");
        return Err(Bip32Error::UnsupportedDerivation);
    }
    let depth = parent
        .depth()
        .checked_add(1)
        .ok_or(Bip32Error::InvalidChildKey)?;

    let strategy = params.scheme.strategy();
    let (keys, chain_code) = match parent.keys() {
        KeyMaterial::Full { private, public } => {
            let (child, chain_code) =
                strategy.derive_private(private, public, parent.chain_code(), index)?;
            let keys =
                KeyMaterial::from_private(child).map_err(|_| invalid_child(curve, index))?;
            (keys, chain_code)
        }
        KeyMaterial::PublicOnly(public) => {
            if index.is_hardened() {
                return Err(Bip32Error::PublicDerivationUnavailable);
            }
            let (child, chain_code) = strategy.derive_public(public, parent.chain_code(), index)?;
            (KeyMaterial::PublicOnly(child), chain_code)
        }
    };

    log::trace!("derived {curve} child {index} at depth {depth}");
    ExtendedKey::new(
        parent.versions(),
        depth,
        parent.fingerprint(),
        index,
        chain_code,
        keys,
    )
}
