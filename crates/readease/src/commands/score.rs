//! Score command: Flesch Reading Ease of a file, inline text or stdin.

use anyhow::bail;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use readease_core::config::Config;
use readease_core::{ReadingEase, Scorer, markdown};

use super::{check_input_len, read_input_file, read_input_stream, resolve_rules};

/// Arguments for the `score` subcommand.
#[derive(Args, Debug, Default)]
pub struct ScoreArgs {
    /// File to score (`-` or omitted reads standard input).
    #[arg(conflicts_with = "text")]
    pub file: Option<Utf8PathBuf>,

    /// Score this text instead of reading a file.
    #[arg(long, short = 't')]
    pub text: Option<String>,

    /// Strip markdown before scoring (automatic for `.md` files).
    #[arg(long)]
    pub strip_md: bool,

    /// Rule-table file (TOML, YAML or JSON) to use instead of the built-in table.
    #[arg(long, value_name = "FILE")]
    pub rules: Option<Utf8PathBuf>,

    /// Print sentence, word and syllable counts alongside the score.
    #[arg(long, short = 'd')]
    pub details: bool,
}

/// JSON body printed when a text cannot be scored.
#[derive(Serialize)]
struct FailureReport<'a> {
    message: &'a str,
}

/// Where the text comes from.
enum Input<'a> {
    File(&'a Utf8Path),
    Text(&'a str),
    Stdin,
}

impl<'a> Input<'a> {
    fn from_args(args: &'a ScoreArgs) -> Self {
        match (&args.file, &args.text) {
            (_, Some(text)) => Self::Text(text),
            (Some(file), None) if file.as_str() != "-" => Self::File(file),
            _ => Self::Stdin,
        }
    }

    fn read(&self, max_input_bytes: Option<usize>) -> anyhow::Result<String> {
        match self {
            Self::File(path) => read_input_file(path, max_input_bytes),
            Self::Text(text) => {
                check_input_len(text, max_input_bytes)?;
                Ok((*text).to_string())
            }
            Self::Stdin => read_input_stream(std::io::stdin().lock(), max_input_bytes),
        }
    }

    fn is_markdown(&self) -> bool {
        matches!(self, Self::File(path) if path.extension() == Some("md"))
    }
}

/// Score a text with Flesch Reading Ease.
///
/// A text that cannot be scored reports its failure message and exits
/// non-zero.
#[instrument(name = "cmd_score", skip_all, fields(file = ?args.file))]
pub fn cmd_score(args: ScoreArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(
        file = ?args.file,
        inline = args.text.is_some(),
        strip_md = args.strip_md,
        "executing score command"
    );

    let input = Input::from_args(&args);
    let content = input.read(config.input_limit())?;
    let rules = resolve_rules(args.rules.as_deref(), config.rule_table.as_deref())?;

    let text = if args.strip_md || config.strip_markdown || input.is_markdown() {
        markdown::strip_to_prose(&content)
    } else {
        content
    };

    match Scorer::new(&rules).score(&text) {
        Ok(report) => {
            if global_json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if args.details {
                print_details(&report);
            } else {
                println!("{}", report.score);
            }
            Ok(())
        }
        Err(err) => {
            let message = err.to_string();
            if global_json {
                let failure = FailureReport { message: &message };
                println!("{}", serde_json::to_string_pretty(&failure)?);
            }
            bail!(message)
        }
    }
}

fn print_details(report: &ReadingEase) {
    println!("{}: {}", "Score".bold(), report.score.green());
    println!("{}: {:.2}", "Raw score".dimmed(), report.raw_score);
    println!("{}: {}", "Sentences".dimmed(), report.sentences);
    println!("{}: {}", "Words".dimmed(), report.words);
    println!("{}: {}", "Syllables".dimmed(), report.syllables);
    println!("{}: {:.2}", "Words per sentence".dimmed(), report.asl);
    println!("{}: {:.2}", "Syllables per word".dimmed(), report.asw);
}
