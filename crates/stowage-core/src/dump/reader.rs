use crate::{
    dump::{DumpError, DumpStore, EncodedEntry, KEY_PART_COUNT, RegisterKey},
    types::Address,
};
use std::{collections::BTreeSet, io::BufRead};

///
/// ReadReport
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ReadReport {
    pub lines: usize,
    pub kept: usize,
    pub filtered: usize,
    pub empty: usize,
}

///
/// DumpReader
///
/// Parses dump lines into a `DumpStore`. With an address filter, only
/// registers owned by a listed address are kept.
///

#[derive(Clone, Debug, Default)]
pub struct DumpReader {
    addresses: BTreeSet<Address>,
}

impl DumpReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_addresses(mut self, addresses: impl IntoIterator<Item = Address>) -> Self {
        self.addresses.extend(addresses);
        self
    }

    /// Read every line of `reader` into `store`. Blank lines are ignored;
    /// any malformed line aborts the read.
    pub fn read<R: BufRead>(
        &self,
        reader: R,
        store: &mut DumpStore,
    ) -> Result<ReadReport, DumpError> {
        let mut report = ReadReport::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            report.lines += 1;

            let number = index + 1;
            let (key, data) = parse_line(number, &line)?;

            if !self.keeps(&key) {
                report.filtered += 1;
                continue;
            }

            // empty registers carry no slab
            if data.is_empty() {
                report.empty += 1;
                continue;
            }

            store.insert(key, data);
            report.kept += 1;
        }

        tracing::info!(
            lines = report.lines,
            kept = report.kept,
            filtered = report.filtered,
            empty = report.empty,
            "read register dump"
        );

        Ok(report)
    }

    fn keeps(&self, key: &RegisterKey) -> bool {
        self.addresses.is_empty()
            || Address::try_from_slice(&key.owner).is_ok_and(|owner| self.addresses.contains(&owner))
    }
}

fn parse_line(line: usize, text: &str) -> Result<(RegisterKey, Vec<u8>), DumpError> {
    let entry: EncodedEntry =
        serde_json::from_str(text).map_err(|err| DumpError::MalformedEntry {
            line,
            message: err.to_string(),
        })?;

    let parts = &entry.key.key_parts;
    if parts.len() < KEY_PART_COUNT {
        return Err(DumpError::KeyParts {
            line,
            count: parts.len(),
        });
    }

    let decode = |field: String, digits: &str| {
        hex::decode(digits).map_err(|source| DumpError::InvalidHex {
            line,
            field,
            source,
        })
    };

    let key = RegisterKey::new(
        decode("key part 0".into(), &parts[0].value)?,
        decode("key part 1".into(), &parts[1].value)?,
        decode("key part 2".into(), &parts[2].value)?,
    );
    let data = decode("value".into(), &entry.value)?;

    Ok((key, data))
}
