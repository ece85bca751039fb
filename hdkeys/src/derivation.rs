use crate::{
    Bip32Error,
    ckd::derive_child,
    extended_key::ExtendedKey,
    index::{ChildIndex, HARDENED_OFFSET},
};
use std::fmt;
use std::str::FromStr;

/// A BIP-32 derivation path (e.g., "m/44'/0'/0'/0/1").
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<ChildIndex>);

impl FromStr for DerivationPath {
    type Err = Bip32Error;

    /// Parses a path string like "m/44'/0'/0'/0/0", "m/44h/0h" or "44/0/0/0".
    fn from_str(s: &str) -> Result<Self, Bip32Error> {
        let s = s.trim();
        let components = match s {
            "" | "m" => return Ok(DerivationPath::default()),
            _ => s.strip_prefix("m/").unwrap_or(s),
        };

        components
            .split('/')
            .map(parse_component)
            .collect::<Result<Vec<_>, _>>()
            .map(DerivationPath)
    }
}

fn parse_component(part: &str) -> Result<ChildIndex, Bip32Error> {
    let (digits, hardened) = match part.strip_suffix('\'').or_else(|| part.strip_suffix('h')) {
        Some(digits) => (digits, true),
        None => (part, false),
    };
    // u32::from_str tolerates a leading '+'
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        log::debug!("rejecting path component {part:?}");
        return Err(Bip32Error::MalformedPath);
    }
    let n: u32 = digits.parse().map_err(|_| Bip32Error::MalformedPath)?;
    if hardened {
        ChildIndex::hardened(n)
    } else {
        ChildIndex::normal(n)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

impl From<Vec<ChildIndex>> for DerivationPath {
    fn from(indices: Vec<ChildIndex>) -> Self {
        DerivationPath(indices)
    }
}

impl DerivationPath {
    pub fn push(&mut self, index: impl Into<ChildIndex>) {
        self.0.push(index.into());
    }

    /// Appends `other`, so that deriving along the result equals deriving
    /// along `self` and then along `other`.
    pub fn extend(&mut self, other: &DerivationPath) {
        self.0.extend_from_slice(&other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChildIndex> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[ChildIndex] {
        &self.0
    }

    /// True when every component can be derived from a public-only key.
    pub fn is_public_derivable(&self) -> bool {
        self.0.iter().all(|i| i.value() < HARDENED_OFFSET)
    }

    /// Walks `root` down this path. The first failing step aborts the walk.
    pub fn derive(&self, root: &ExtendedKey) -> Result<ExtendedKey, Bip32Error> {
        self.0
            .iter()
            .try_fold(root.clone(), |key, &index| derive_child(&key, index))
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildIndex;
    type IntoIter = std::slice::Iter<'a, ChildIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
