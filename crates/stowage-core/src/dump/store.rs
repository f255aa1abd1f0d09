use crate::{
    dump::{
        DumpError, EncodedEntry, EncodedKey, EncodedKeyPart, SLAB_KEY_LENGTH,
        STORAGE_PATH_SEPARATOR,
    },
    interchange::encode,
    storage::MemoryStorage,
    types::Address,
    value::PathDomain,
};
use std::{collections::BTreeMap, io::Write};

///
/// RegisterKey
///
/// Raw `(owner, controller, key)` register key.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RegisterKey {
    pub owner: Vec<u8>,
    pub controller: Vec<u8>,
    pub key: Vec<u8>,
}

impl RegisterKey {
    #[must_use]
    pub const fn new(owner: Vec<u8>, controller: Vec<u8>, key: Vec<u8>) -> Self {
        Self {
            owner,
            controller,
            key,
        }
    }

    /// Key of the register holding one storage path value.
    #[must_use]
    pub fn storage_path(address: Address, domain: PathDomain, identifier: &str) -> Self {
        let mut key = Vec::with_capacity(domain.label().len() + 1 + identifier.len());
        key.extend_from_slice(domain.label().as_bytes());
        key.push(STORAGE_PATH_SEPARATOR);
        key.extend_from_slice(identifier.as_bytes());

        Self::new(address.as_bytes().to_vec(), Vec::new(), key)
    }

    #[must_use]
    pub fn is_slab(&self) -> bool {
        self.key.len() == SLAB_KEY_LENGTH && self.key[0] == b'$'
    }

    /// Split a storage path key into its raw domain and identifier.
    #[must_use]
    pub fn path_parts(&self) -> Option<(&[u8], &[u8])> {
        let at = self.key.iter().position(|b| *b == STORAGE_PATH_SEPARATOR)?;

        Some((&self.key[..at], &self.key[at + 1..]))
    }
}

///
/// DumpStore
///
/// Caller-owned register table filled by `DumpReader`. Later registers
/// with the same key replace earlier ones.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DumpStore {
    registers: BTreeMap<RegisterKey, Vec<u8>>,
}

impl DumpStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registers: BTreeMap::new(),
        }
    }

    /// Encode every entry of `storage` as a storage path register.
    pub fn from_storage(storage: &MemoryStorage) -> Result<Self, DumpError> {
        let mut store = Self::new();

        for (address, domain, identifier, value) in storage.entries() {
            store.insert(
                RegisterKey::storage_path(address, domain, identifier),
                encode(value)?,
            );
        }

        Ok(store)
    }

    pub fn insert(&mut self, key: RegisterKey, data: Vec<u8>) -> Option<Vec<u8>> {
        self.registers.insert(key, data)
    }

    #[must_use]
    pub fn get(&self, key: &RegisterKey) -> Option<&[u8]> {
        self.registers.get(key).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RegisterKey, &[u8])> {
        self.registers.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Write every register as one dump line, in key order.
    pub fn write_entries<W: Write>(&self, mut writer: W) -> Result<usize, DumpError> {
        for (key, data) in &self.registers {
            let entry = EncodedEntry {
                key: EncodedKey {
                    key_parts: [&key.owner, &key.controller, &key.key]
                        .into_iter()
                        .map(|part| EncodedKeyPart {
                            value: hex::encode(part),
                        })
                        .collect(),
                },
                value: hex::encode(data),
            };

            serde_json::to_writer(&mut writer, &entry)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        Ok(self.registers.len())
    }
}
