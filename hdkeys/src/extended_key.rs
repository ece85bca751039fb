use crate::curve::CurveKind;
use crate::error::Bip32Error;
use crate::index::ChildIndex;
use crate::keys::{ChainCode, Fingerprint, KeyMaterial, PrivateKey, PublicKey};
use crypto_utils::base58::{base58_check_decode, base58_check_encode};
use std::fmt;

/// Length of a serialized extended key, checksum excluded.
pub const EXTENDED_KEY_LEN: usize = 78;

// Serialized layout: version (4) | depth (1) | parent_fp (4) | child_index (4) | chain_code (32) | key_data (33)
const DEPTH_AT: usize = 4;
const PARENT_FP_AT: usize = 5;
const CHILD_INDEX_AT: usize = 9;
const CHAIN_CODE_AT: usize = 13;
const KEY_DATA_AT: usize = 45;

/// Version tags for the public and private serializations of one network.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyNetVersions {
    pub public: [u8; 4],
    pub private: [u8; 4],
}

impl KeyNetVersions {
    /// `xpub` / `xprv`
    pub const MAINNET: KeyNetVersions = KeyNetVersions {
        public: [0x04, 0x88, 0xB2, 0x1E],
        private: [0x04, 0x88, 0xAD, 0xE4],
    };
    /// `tpub` / `tprv`
    pub const TESTNET: KeyNetVersions = KeyNetVersions {
        public: [0x04, 0x35, 0x87, 0xCF],
        private: [0x04, 0x35, 0x83, 0x94],
    };
    /// Versions recognized when the caller does not supply a list.
    pub const DEFAULT_RECOGNIZED: &'static [KeyNetVersions] =
        &[KeyNetVersions::MAINNET, KeyNetVersions::TESTNET];

    pub const fn new(public: [u8; 4], private: [u8; 4]) -> Self {
        KeyNetVersions { public, private }
    }
}

impl Default for KeyNetVersions {
    fn default() -> Self {
        KeyNetVersions::MAINNET
    }
}

/// A node of the derivation tree. Immutable: derivation always yields a new key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedKey {
    curve: CurveKind,
    versions: KeyNetVersions,
    depth: u8,
    parent_fingerprint: Fingerprint,
    child_index: ChildIndex,
    chain_code: ChainCode,
    keys: KeyMaterial,
}

impl ExtendedKey {
    /// Builds a node, enforcing that a root carries no lineage.
    pub fn new(
        versions: KeyNetVersions,
        depth: u8,
        parent_fingerprint: Fingerprint,
        child_index: ChildIndex,
        chain_code: ChainCode,
        keys: KeyMaterial,
    ) -> Result<Self, Bip32Error> {
        if depth == 0 && (!parent_fingerprint.is_master() || child_index.value() != 0) {
            return Err(Bip32Error::InvalidKeyData);
        }
        Ok(ExtendedKey {
            curve: keys.public().curve(),
            versions,
            depth,
            parent_fingerprint,
            child_index,
            chain_code,
            keys,
        })
    }

    /// Depth-0 node from raw key material.
    pub fn new_root(
        versions: KeyNetVersions,
        chain_code: ChainCode,
        keys: KeyMaterial,
    ) -> Self {
        ExtendedKey {
            curve: keys.public().curve(),
            versions,
            depth: 0,
            parent_fingerprint: Fingerprint::default(),
            child_index: ChildIndex::default(),
            chain_code,
            keys,
        }
    }

    pub fn curve(&self) -> CurveKind {
        self.curve
    }

    pub fn versions(&self) -> KeyNetVersions {
        self.versions
    }

    /// The version tag this key serializes with.
    pub fn version(&self) -> [u8; 4] {
        if self.keys.is_public_only() {
            self.versions.public
        } else {
            self.versions.private
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> Fingerprint {
        self.parent_fingerprint
    }

    pub fn child_index(&self) -> ChildIndex {
        self.child_index
    }

    pub fn chain_code(&self) -> &ChainCode {
        &self.chain_code
    }

    pub fn keys(&self) -> &KeyMaterial {
        &self.keys
    }

    pub fn private_key(&self) -> Result<&PrivateKey, Bip32Error> {
        self.keys.private()
    }

    pub fn public_key(&self) -> &PublicKey {
        self.keys.public()
    }

    pub fn is_public_only(&self) -> bool {
        self.keys.is_public_only()
    }

    /// Fingerprint of this node, used as `parent_fingerprint` by its children.
    pub fn fingerprint(&self) -> Fingerprint {
        self.keys.public().fingerprint()
    }

    /// The same node with its private key dropped.
    pub fn public_only(&self) -> ExtendedKey {
        ExtendedKey {
            keys: self.keys.to_public_only(),
            ..self.clone()
        }
    }

    pub fn to_bytes(&self) -> [u8; EXTENDED_KEY_LEN] {
        let mut out = [0u8; EXTENDED_KEY_LEN];
        out[..DEPTH_AT].copy_from_slice(&self.version());
        out[DEPTH_AT] = self.depth;
        out[PARENT_FP_AT..CHILD_INDEX_AT].copy_from_slice(self.parent_fingerprint.as_bytes());
        out[CHILD_INDEX_AT..CHAIN_CODE_AT].copy_from_slice(&self.child_index.to_be_bytes());
        out[CHAIN_CODE_AT..KEY_DATA_AT].copy_from_slice(&self.chain_code);
        match &self.keys {
            // leading zero, then the 32-byte private key
            KeyMaterial::Full { private, .. } => {
                out[KEY_DATA_AT] = 0x00;
                out[KEY_DATA_AT + 1..].copy_from_slice(private.raw());
            }
            KeyMaterial::PublicOnly(public) => {
                out[KEY_DATA_AT..].copy_from_slice(public.raw_compressed());
            }
        }
        out
    }

    /// Base58Check text form (`xprv...` / `xpub...` on mainnet).
    pub fn to_base58(&self) -> String {
        base58_check_encode(&self.to_bytes())
    }

    pub fn from_bytes(data: &[u8], curve: CurveKind) -> Result<Self, Bip32Error> {
        Self::from_bytes_with_versions(data, curve, KeyNetVersions::DEFAULT_RECOGNIZED)
    }

    /// Decodes the 78-byte layout, accepting only the listed version tags.
    pub fn from_bytes_with_versions(
        data: &[u8],
        curve: CurveKind,
        recognized: &[KeyNetVersions],
    ) -> Result<Self, Bip32Error> {
        if data.len() != EXTENDED_KEY_LEN {
            return Err(Bip32Error::InvalidSerializedKey);
        }
        let version = &data[..DEPTH_AT];
        let (versions, is_private) = recognized
            .iter()
            .find_map(|v| {
                if v.private == version {
                    Some((*v, true))
                } else if v.public == version {
                    Some((*v, false))
                } else {
                    None
                }
            })
            .ok_or(Bip32Error::InvalidSerializedKey)?;

        let depth = data[DEPTH_AT];
        let mut parent_fp = [0u8; 4];
        parent_fp.copy_from_slice(&data[PARENT_FP_AT..CHILD_INDEX_AT]);
        let mut index = [0u8; 4];
        index.copy_from_slice(&data[CHILD_INDEX_AT..CHAIN_CODE_AT]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&data[CHAIN_CODE_AT..KEY_DATA_AT]);

        let key_data = &data[KEY_DATA_AT..];
        let keys = if is_private {
            if key_data[0] != 0x00 {
                return Err(Bip32Error::InvalidSerializedKey);
            }
            let private = PrivateKey::from_bytes(&key_data[1..], curve)
                .map_err(|_| Bip32Error::InvalidSerializedKey)?;
            KeyMaterial::from_private(private).map_err(|_| Bip32Error::InvalidSerializedKey)?
        } else {
            let public = PublicKey::from_bytes(key_data, curve)
                .map_err(|_| Bip32Error::InvalidSerializedKey)?;
            KeyMaterial::PublicOnly(public)
        };

        ExtendedKey::new(
            versions,
            depth,
            Fingerprint(parent_fp),
            ChildIndex::new(u32::from_be_bytes(index)),
            chain_code,
            keys,
        )
        .map_err(|_| Bip32Error::InvalidSerializedKey)
    }

    pub fn from_base58(s: &str, curve: CurveKind) -> Result<Self, Bip32Error> {
        Self::from_base58_with_versions(s, curve, KeyNetVersions::DEFAULT_RECOGNIZED)
    }

    pub fn from_base58_with_versions(
        s: &str,
        curve: CurveKind,
        recognized: &[KeyNetVersions],
    ) -> Result<Self, Bip32Error> {
        let data = base58_check_decode(s.trim()).map_err(|err| {
            log::debug!("rejecting extended key text: {err}");
            Bip32Error::InvalidSerializedKey
        })?;
        Self::from_bytes_with_versions(&data, curve, recognized)
    }
}

impl fmt::Display for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}
