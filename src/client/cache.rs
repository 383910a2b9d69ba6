use crate::client::payload::Form;
use crate::{Result, ScribensError};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk store of raw service responses, keyed by the endpoint and every
/// field of the request form.
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, endpoint: &str, form: &Form) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(endpoint.as_bytes());
        for (name, value) in form {
            // NUL separators keep field boundaries unambiguous
            hasher.update([0u8]);
            hasher.update(name.as_bytes());
            hasher.update([0u8]);
            hasher.update(value.as_bytes());
        }
        let digest = hasher.finalize();
        let key: String = digest.iter().map(|byte| format!("{:02x}", byte)).collect();
        self.dir.join(format!("{}.json", key))
    }

    /// Raw response previously stored for this request, if any
    pub fn get(&self, endpoint: &str, form: &Form) -> Result<Option<String>> {
        let path = self.entry_path(endpoint, form);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    pub fn put(&self, endpoint: &str, form: &Form, body: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.entry_path(endpoint, form), body)?;
        Ok(())
    }

    pub fn remove(&self, endpoint: &str, form: &Form) -> Result<()> {
        let path = self.entry_path(endpoint, form);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Write `body` to `path`, pretty-printed, for later inspection or replay
pub fn save_response(path: &Path, body: &str) -> Result<()> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let pretty = serde_json::to_string_pretty(&value)
        .map_err(|e| ScribensError::ResponseParseFailed(e.to_string()))?;
    fs::write(path, pretty)?;
    Ok(())
}
