//! Rules command: sizes and contents of the active rule table.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use readease_core::config::Config;
use readease_core::{RuleTableSizes, RuleTableSource};

use super::resolve_rules;

/// Arguments for the `rules` subcommand.
#[derive(Args, Debug, Default)]
pub struct RulesArgs {
    /// Rule-table file (TOML, YAML or JSON) to inspect instead of the built-in table.
    #[arg(long, value_name = "FILE")]
    pub rules: Option<Utf8PathBuf>,
}

/// JSON form: where the table came from, its sizes, and the table itself.
///
/// The `table` object can be saved and passed back with `--rules`.
#[derive(Serialize)]
struct RulesReport {
    source: String,
    sizes: RuleTableSizes,
    table: RuleTableSource,
}

/// Show the active rule table.
#[instrument(name = "cmd_rules", skip_all)]
pub fn cmd_rules(args: RulesArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(rules = ?args.rules, "executing rules command");

    let path = args.rules.as_deref().or(config.rule_table.as_deref());
    let rules = resolve_rules(path, None)?;
    let report = RulesReport {
        source: path.map_or_else(|| "built-in".to_string(), ToString::to_string),
        sizes: rules.sizes(),
        table: rules.to_source(),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}: {}", "Rule table".dimmed(), report.source.cyan());
    let sizes = [
        ("prefix_and_suffix_patterns", report.sizes.prefix_and_suffix_patterns),
        ("problem_words", report.sizes.problem_words),
        ("add_syllable_patterns", report.sizes.add_syllable_patterns),
        ("subtract_syllable_patterns", report.sizes.subtract_syllable_patterns),
    ];
    for (name, size) in sizes {
        println!("{name}: {size}");
    }

    Ok(())
}
