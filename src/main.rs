use anyhow::Context;
use clap::{ArgGroup, Parser};
use colored::Colorize;
use i18n_forge::cli;
use i18n_forge::config::{Config, DEFAULT_LOCALES_DIR, DEFAULT_XLSX};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "i18n-forge")]
#[command(about = "Convert between a translation spreadsheet and per-language locale files.")]
#[command(long_about = "i18n-forge - Translator spreadsheet ↔ locale files

MODES (exactly one):
  --to-js      locale.xlsx → locales/<lang>.json + locales/<lang>.js
  --to-excel   locales/*.json → locale.xlsx (sheet 'i18n')

SPREADSHEET LAYOUT:
  First worksheet, first row is the header.
  'key' column holds dotted keys (greeting.hello), every other column is a language.

  key             | en    | zh
  greeting.hello  | Hello | 你好
  greeting.bye    |       | 再见

EXPORT ORDER:
  Rows with any empty translation come first, so translators see gaps at the top.

EXAMPLES:
  i18n-forge --to-js
  i18n-forge --to-excel --locales src/locales --xlsx translations.xlsx
  i18n-forge --to-excel --js-modules      # also read data-only .js modules")]
#[command(version)]
#[command(group(ArgGroup::new("mode").required(true).args(["to_js", "to_excel"])))]
struct Cli {
    /// Spreadsheet → locale files
    #[arg(long = "to-js")]
    to_js: bool,

    /// Locale files → spreadsheet
    #[arg(long = "to-excel")]
    to_excel: bool,

    /// Spreadsheet path
    #[arg(long, env = "I18N_FORGE_XLSX", default_value = DEFAULT_XLSX)]
    xlsx: PathBuf,

    /// Locale directory
    #[arg(long, env = "I18N_FORGE_LOCALES", default_value = DEFAULT_LOCALES_DIR)]
    locales: PathBuf,

    /// Also read `.js` locale modules (data-only `const x = {...}; module.exports = x;`)
    #[arg(long)]
    js_modules: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "i18n_forge=debug"
    } else {
        "i18n_forge=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Cli) -> anyhow::Result<()> {
    let config = Config::new(&args.xlsx, &args.locales).with_js_modules(args.js_modules);

    if args.to_js {
        cli::to_locales(&config, args.verbose).context("Excel → locales failed")
    } else {
        cli::to_excel(&config, args.verbose).context("locales → Excel failed")
    }
}

fn main() -> ExitCode {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // --help / --version are not errors
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".bold().red(), e);
            ExitCode::from(1)
        }
    }
}
