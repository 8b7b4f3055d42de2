//! Host protocol: the JSON request a host sends and the response it reads back.

use crate::config::ConfigOverrides;
use crate::error::GenResult;
use crate::query::Query;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Plugin options; override the config file.
    #[serde(default)]
    pub options: ConfigOverrides,
    /// Queries in the order their accessors should appear.
    pub queries: Vec<Query>,
}

impl GenerateRequest {
    pub fn from_json(input: &str) -> GenResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_reader(reader: impl Read) -> GenResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// A generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub name: String,
    pub contents: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub files: Vec<File>,
}

impl GenerateResponse {
    pub fn to_json(&self) -> GenResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write every file into `dir`, creating it if needed. Returns the paths written.
    pub fn write_to_dir(&self, dir: &Path) -> GenResult<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let path = dir.join(&file.name);
            fs::write(&path, &file.contents)?;
            written.push(path);
        }
        Ok(written)
    }
}
