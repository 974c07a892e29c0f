//! Filter and rank a list of versions

use log::info;

use super::{CliError, convert::json_to_versions};
use crate::{
    config::RankingConfig,
    output::{self, OutputFormat},
};

/// Options for the sort command
#[derive(Debug, Clone, Default)]
pub struct SortOptions {
    /// Rules, already merged from file and command line
    pub config: RankingConfig,
    /// JSON array of versions
    pub input: Option<String>,
    pub format: OutputFormat,
    pub pretty: bool,
}

/// Drop versions the predicate rejects, then order the rest best first
pub fn execute_sort(options: &SortOptions) -> Result<String, CliError> {
    let (predicate, ranking) = options.config.build()?;

    let input = options.input.as_ref().ok_or(CliError::NoInput)?;
    let json: serde_json::Value = serde_json::from_str(input)?;
    let versions = json_to_versions(json)?;
    let total = versions.len();

    let mut kept: Vec<_> = versions.into_iter().filter(|v| predicate.test(v)).collect();
    ranking.sort_best_first(&mut kept);

    info!(
        "Ranked {} of {} version(s) using {} rule(s)",
        kept.len(),
        total,
        ranking.len()
    );

    Ok(output::render(&kept, options.format, options.pretty))
}
