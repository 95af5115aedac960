use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use chrono::Utc;
use financia_core::{CoreError, TransactionStorage};
use financia_domain::Transaction;
use tracing::warn;

const SLOT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";
const CORRUPT_SUFFIX: &str = "corrupt";
const QUARANTINE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Filesystem-backed named slot holding the full transaction array as JSON.
#[derive(Debug, Clone)]
pub struct JsonSlotStorage {
    root: PathBuf,
    slot: String,
}

impl JsonSlotStorage {
    pub fn new(root: PathBuf, slot: &str) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            slot: canonical_name(slot),
        })
    }

    pub fn slot_path(&self) -> PathBuf {
        self.root
            .join(format!("{}.{}", self.slot, SLOT_EXTENSION))
    }

    /// Copies an unparsable slot aside so the next write does not destroy it.
    fn quarantine(&self, path: &Path) -> Option<PathBuf> {
        let timestamp = Utc::now().format(QUARANTINE_TIMESTAMP_FORMAT).to_string();
        let target = self.root.join(format!(
            "{}_{}.{}.{}",
            self.slot, timestamp, SLOT_EXTENSION, CORRUPT_SUFFIX
        ));
        match fs::copy(path, &target) {
            Ok(_) => Some(target),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not quarantine corrupt slot");
                None
            }
        }
    }
}

impl TransactionStorage for JsonSlotStorage {
    fn load_transactions(&self) -> Result<Option<Vec<Transaction>>, CoreError> {
        let path = self.slot_path();
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str(&data) {
            Ok(transactions) => Ok(Some(transactions)),
            Err(err) => {
                let moved = self.quarantine(&path);
                Err(CoreError::Serde(match moved {
                    Some(copy) => format!("{err} (original kept at {})", copy.display()),
                    None => err.to_string(),
                }))
            }
        }
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<(), CoreError> {
        save_transactions_to_path(transactions, &self.slot_path())
    }

    fn location(&self) -> String {
        self.slot_path().display().to_string()
    }
}

/// Writes `transactions` to `path` by staging to a temporary file and renaming it
/// into place.
pub fn save_transactions_to_path(transactions: &[Transaction], path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    write_atomic(&tmp, &serialize_transactions(transactions)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a transaction array from the provided filesystem path.
pub fn load_transactions_from_path(path: &Path) -> Result<Vec<Transaction>, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "transactions".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn serialize_transactions(transactions: &[Transaction]) -> Result<String, CoreError> {
    serde_json::to_string_pretty(transactions).map_err(|err| CoreError::Serde(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_name_replaces_unsafe_characters() {
        assert_eq!(canonical_name("financia_transactions"), "financia_transactions");
        assert_eq!(canonical_name("My Slot/../x"), "my_slot____x");
        assert_eq!(canonical_name("  "), "transactions");
    }

    #[test]
    fn tmp_path_appends_suffix_to_existing_extension() {
        let tmp = tmp_path(Path::new("/data/slot.json"));
        assert_eq!(tmp, PathBuf::from("/data/slot.json.tmp"));
    }
}
