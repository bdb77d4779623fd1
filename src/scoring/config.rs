use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::table::ScoringTable;

/// Load a scoring table from a YAML file, replacing the built-in one.
///
/// Example YAML:
/// ```yaml
/// decathlon:
///   100m: { A: 25.4347, B: 18, C: 1.81, unit: seconds }
///   Long Jump: { A: 0.14354, B: 220, C: 1.4, unit: cm }
/// heptathlon:
///   800m: { A: 0.11193, B: 254, C: 1.88, unit: seconds }
/// ```
pub fn load_scoring_table(path: &Path) -> Result<ScoringTable> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scoring table at {}", path.display()))?;

    let table: ScoringTable = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse scoring table: invalid YAML in {}", path.display()))?;

    Ok(table)
}
