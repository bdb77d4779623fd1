use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::units::UnitSystem;

/// User configuration.
///
/// Every key is optional. Example YAML:
/// ```yaml
/// units: imperial
/// data_dir: ~/athletics
/// autosave_delay: 2s
/// scoring_table: /etc/multi-smackdown/table-2025.yaml
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Units for distances and heights (default: metric)
    #[serde(default)]
    pub units: UnitSystem,

    /// Where performances, achievements and drafts are kept
    /// (default: the config directory)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Quiet period before a draft is autosaved, e.g. "500ms", "2s"
    #[serde(default)]
    pub autosave_delay: Option<String>,

    /// YAML file replacing the built-in scoring table
    #[serde(default)]
    pub scoring_table: Option<PathBuf>,
}
