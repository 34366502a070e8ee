use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use wordwise_config::Config;

/// A named configuration saved as JSON
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Load a profile file. Missing fields fall back to defaults.
pub fn load_profile(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading profile from {}", path.display());
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let profile: Profile = serde_json::from_reader(reader)?;
    tracing::debug!("Loaded profile {}", profile.name);
    Ok(profile.value)
}
