use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::protocol::coding::SourceStore;

// The block stream carries neither the starting seed nor a content hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionManifest {
    pub file_name: String,
    pub file_size: u32,
    pub block_size: u32,
    pub block_count: u32,
    pub start_seed: u32,
    pub blake3: String,
}

impl SessionManifest {
    pub fn describe(file_name: String, source: &SourceStore, start_seed: u32) -> Self {
        let content = &source.padded()[..source.file_size() as usize];
        Self {
            file_name,
            file_size: source.file_size(),
            block_size: source.data_size(),
            block_count: source.block_count(),
            start_seed,
            blake3: hex::encode(blake3::hash(content).as_bytes()),
        }
    }

    pub fn matches(&self, content: &[u8]) -> bool {
        content.len() == self.file_size as usize
            && hex::encode(blake3::hash(content).as_bytes()) == self.blake3
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let text = toml::to_string_pretty(self)?;
        fs::write(&path, text)
            .with_context(|| format!("writing manifest {}", path.as_ref().display()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading manifest {}", path.as_ref().display()))?;
        Ok(toml::from_str(&text)?)
    }
}
