use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;

use crate::types::ForkbenchResult;

/// Per-user configuration file holding the host identity, relative to the home directory.
pub const RC_FILE_NAME: &str = ".forkbenchrc";

const UUID_KEY: &str = "userUuid";

/// Returns the UUID of the executing host.
///
/// Multiple runs by the same user on the same machine yield the same value. The identity is read
/// from the per-user rc file and created lazily on first use; other keys in the file are left
/// untouched.
pub(crate) fn executed_by_uuid() -> ForkbenchResult<String> {
    let home = dirs::home_dir().context("Could not determine the user's home directory")?;
    read_or_create_uuid(&home.join(RC_FILE_NAME))
}

pub(crate) fn read_or_create_uuid(path: &Path) -> ForkbenchResult<String> {
    let mut properties = match std::fs::read_to_string(path) {
        Ok(contents) => parse_properties(&contents),
        Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read host identity from {}", path.display()))
        }
    };

    if let Some(uuid) = properties.get(UUID_KEY) {
        log::debug!("Using existing host identity: {}", uuid);
        return Ok(uuid.clone());
    }

    let uuid = uuid::Uuid::new_v4().to_string();
    log::info!("Generated new host identity: {}", uuid);
    properties.insert(UUID_KEY.to_string(), uuid.clone());
    write_properties(path, &properties)
        .with_context(|| format!("Failed to store host identity in {}", path.display()))?;

    Ok(uuid)
}

fn parse_properties(contents: &str) -> BTreeMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            line.split_once('=')
                .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

fn write_properties(path: &Path, properties: &BTreeMap<String, String>) -> std::io::Result<()> {
    let mut contents = String::new();
    for (key, value) in properties {
        contents.push_str(key);
        contents.push('=');
        contents.push_str(value);
        contents.push('\n');
    }
    std::fs::write(path, contents)
}
