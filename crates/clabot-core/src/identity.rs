//! Account handles and signer sets.
//!
//! GitHub logins compare case-insensitively, so an [`Identifier`] only ever holds
//! the trimmed, lowercased form. Everything that stores or compares logins goes
//! through it.

use std::collections::HashSet;
use std::fmt;

/// A normalized platform account handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// `None` when nothing is left after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let id = Self::new(raw);
        (!id.0.is_empty()).then_some(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// The set of people known to have signed the CLA, built fresh for each run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignerSet {
    signers: HashSet<Identifier>,
}

impl SignerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the identifier was not already present.
    pub fn insert(&mut self, id: Identifier) -> bool {
        self.signers.insert(id)
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.signers.contains(id)
    }

    /// Union `other` into `self`.
    pub fn merge(&mut self, other: SignerSet) {
        self.signers.extend(other.signers);
    }

    pub fn len(&self) -> usize {
        self.signers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Identifier> {
        self.signers.iter()
    }
}

impl FromIterator<Identifier> for SignerSet {
    fn from_iter<I: IntoIterator<Item = Identifier>>(iter: I) -> Self {
        Self {
            signers: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for SignerSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(Identifier::new).collect()
    }
}
