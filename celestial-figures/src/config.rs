//! Optional TOML configuration.
//!
//! Every section and key may be omitted; missing values take the defaults
//! below.
//!
//! ```toml
//! missing_star = "abort"   # or "skip"
//!
//! [normalize]
//! span = 5.0
//! decimals = 2
//!
//! [tikz]
//! group = "constellation"
//! point = "starAt"
//! line = "connectStars"
//! radius = "0.1cm"
//!
//! [sources]
//! fab_url = "https://raw.githubusercontent.com/Stellarium/..."
//! catalog_url = "https://cdsarc.cds.unistra.fr/ftp/cats/I/239/hip_main.dat"
//! timeout_secs = 120
//! ```

use crate::catalog::hipparcos::HIP_MAIN_URL;
use crate::emit::TikzStyle;
use crate::error::{Error, Result};
use crate::normalize::{MissingStarPolicy, NormalizeOptions};
use crate::registry::fab::FAB_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiguresConfig {
    pub missing_star: MissingStarPolicy,
    pub normalize: NormalizeOptions,
    pub tikz: TikzStyle,
    pub sources: SourceSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub fab_url: String,
    pub catalog_url: String,
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            fab_url: FAB_URL.to_string(),
            catalog_url: HIP_MAIN_URL.to_string(),
            timeout_secs: 120,
        }
    }
}

impl SourceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl FiguresConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: FiguresConfig = toml::from_str(text)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml(&text)
    }

    fn validate(&self) -> Result<()> {
        if !(self.normalize.span.is_finite() && self.normalize.span > 0.0) {
            return Err(Error::Config(format!(
                "normalize.span must be a positive number, got {}",
                self.normalize.span
            )));
        }
        if self.normalize.decimals > 15 {
            return Err(Error::Config(format!(
                "normalize.decimals must be at most 15, got {}",
                self.normalize.decimals
            )));
        }
        Ok(())
    }
}
