//! Syllables command: per-pass breakdown of the syllable estimate.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use readease_core::config::Config;
use readease_core::{SyllableTrace, trace_syllables};

use super::resolve_rules;

/// Arguments for the `syllables` subcommand.
#[derive(Args, Debug)]
pub struct SyllablesArgs {
    /// Words to estimate.
    #[arg(required = true)]
    pub words: Vec<String>,

    /// Rule-table file (TOML, YAML or JSON) to use instead of the built-in table.
    #[arg(long, value_name = "FILE")]
    pub rules: Option<Utf8PathBuf>,
}

/// Print the syllable estimate of each word, pass by pass.
#[instrument(name = "cmd_syllables", skip_all, fields(words = args.words.len()))]
pub fn cmd_syllables(
    args: SyllablesArgs,
    global_json: bool,
    config: &Config,
) -> anyhow::Result<()> {
    debug!(words = ?args.words, "executing syllables command");

    let rules = resolve_rules(args.rules.as_deref(), config.rule_table.as_deref())?;
    let traces: Vec<SyllableTrace> = args
        .words
        .iter()
        .map(|word| trace_syllables(word, &rules))
        .collect();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&traces)?);
        return Ok(());
    }

    for trace in &traces {
        println!("{} {}", trace.word.bold(), trace.syllables.green());
        for step in &trace.steps {
            println!(
                "  {:<16} {:>+3}  {}",
                step.pass.as_str().dimmed(),
                step.outcome.delta,
                step.outcome.residual
            );
        }
    }

    Ok(())
}
