//! Symbol-set persistence: a JSON object of `{"SYM": {"buyPrice": n}}`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use serde::{Deserialize, Serialize};
use ticker_core::error::StoreError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Entry {
    #[serde(default)]
    pub buy_price: Option<f64>,
}

/// Read every persisted symbol. An empty file holds no symbols.
pub(crate) fn load(file: &mut File) -> Result<BTreeMap<String, f64>, StoreError> {
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let entries: BTreeMap<String, Entry> =
        serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt(e.to_string()))?;
    Ok(entries
        .into_iter()
        .map(|(symbol, entry)| (symbol, entry.buy_price.unwrap_or(0.0)))
        .collect())
}

/// Replace the file contents with `symbols`, one compact JSON object plus
/// a trailing newline.
pub(crate) fn save<'a, I>(file: &mut File, symbols: I) -> Result<(), StoreError>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let entries: BTreeMap<&str, Entry> = symbols
        .into_iter()
        .map(|(symbol, buy_price)| (symbol, Entry { buy_price: Some(buy_price) }))
        .collect();

    let mut buf = serde_json::to_vec(&entries).map_err(std::io::Error::from)?;
    buf.push(b'\n');

    file.seek(SeekFrom::Start(0))?;
    file.set_len(0)?;
    file.write_all(&buf)?;
    file.flush()?;
    Ok(())
}
