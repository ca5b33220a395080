use crate::config::Config;
use crate::core::{locales_to_xlsx, xlsx_to_locales};
use crate::error::LocaleResult;
use crate::excel::SHEET_NAME;
use colored::Colorize;

/// Execute `--to-js`: spreadsheet → locale files
pub fn to_locales(config: &Config, verbose: bool) -> LocaleResult<()> {
    println!("{}", "🌐 i18n-forge - Excel → Locales".bold().green());
    println!("   Input:  {}", config.xlsx_path.display());
    println!("   Output: {}\n", config.locales_dir.display());

    if verbose {
        println!("{}", "📖 Reading first worksheet...".cyan());
    }

    let summary = xlsx_to_locales(config, |written| {
        println!(
            "{} {}, {}",
            "✅ Generated".green(),
            file_name(&written.json_path).bright_blue(),
            file_name(&written.js_path).bright_blue()
        );
        if verbose {
            println!("      {} keys", written.leaf_count);
        }
    })?;

    if summary.written.is_empty() {
        println!(
            "{}",
            "⚠️  No keyed rows found - no locale files written".yellow()
        );
    } else if verbose {
        println!(
            "\n   {} rows → {} languages",
            summary.rows,
            summary.written.len()
        );
    }

    Ok(())
}

/// Execute `--to-excel`: locale files → spreadsheet
pub fn to_excel(config: &Config, verbose: bool) -> LocaleResult<()> {
    println!("{}", "🌐 i18n-forge - Locales → Excel".bold().green());
    println!("   Input:  {}", config.locales_dir.display());
    println!("   Output: {}\n", config.xlsx_path.display());

    if verbose {
        let mode = if config.js_modules {
            ".json + .js"
        } else {
            ".json"
        };
        println!("{} ({})", "📖 Scanning locale files...".cyan(), mode);
    }

    let summary = locales_to_xlsx(config)?;

    for failure in &summary.failures {
        eprintln!(
            "{} {}: {}",
            "❌ Failed to read".red(),
            failure.path.display(),
            failure.error
        );
    }

    if verbose {
        println!("   Languages: {}", summary.languages.join(", ").bright_blue());
        for (lang, path) in &summary.sources {
            println!("      {} ← {}", lang, path.display());
        }
        println!(
            "   Rows: {} ({} untranslated first)",
            summary.rows, summary.untranslated_rows
        );
    }

    println!(
        "{} {} (sheet '{}')",
        "✅ Export complete:".bold().green(),
        summary.output.display(),
        SHEET_NAME
    );

    Ok(())
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
