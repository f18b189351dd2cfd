use anyhow::Result;
use chrono::Local;
use coopmapper::report::{build_report, REPORT_FILE_NAME};
use coopmapper::table::{read_csv_table, write_csv_table};
use std::{env, path::PathBuf, process::exit};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "Usage: coopmapper <EXPORT_CSV> [OUTPUT_CSV]

  1. Export the previous 2 weeks worth of Juul data
     (audits_basic_data_export.csv).
  2. Run coopmapper on the export file; it writes the Co-op report
     (default: \"Juul Co-op Raw Data.csv\").
  3. Standard bits - check data vs previous week, remove data already
     reported, add new data.
  4. Done.";

/// Positional arguments: the export path, then an optional output path.
/// `None` is a usage error, including any trailing arguments.
fn parse_args(mut args: impl Iterator<Item = String>) -> Option<(PathBuf, PathBuf)> {
    let export = PathBuf::from(args.next()?);
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(REPORT_FILE_NAME));
    if args.next().is_some() {
        return None;
    }
    Some((export, output))
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) parse args ───────────────────────────────────────────────
    let (export_path, output_path) = match parse_args(env::args().skip(1)) {
        Some(paths) => paths,
        None => {
            eprintln!("{}", USAGE);
            exit(1);
        }
    };

    // ─── 3) read, transform, write ───────────────────────────────────
    let export = read_csv_table(&export_path)?;
    info!(rows = export.rows.len(), "loaded {}", export_path.display());

    let today = Local::now().date_naive();
    let report = build_report(&export, today);
    info!(rows = report.rows.len(), "built report");

    write_csv_table(&report, &output_path)?;
    println!(
        "✅ File processed successfully: wrote {} ({} rows)",
        output_path.display(),
        report.rows.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(list: &[&str]) -> Option<(PathBuf, PathBuf)> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn export_path_is_required() {
        assert_eq!(parsed(&[]), None);
    }

    #[test]
    fn output_defaults_to_the_report_filename() {
        let (export, output) = parsed(&["export.csv"]).unwrap();
        assert_eq!(export, PathBuf::from("export.csv"));
        assert_eq!(output, PathBuf::from(REPORT_FILE_NAME));
    }

    #[test]
    fn explicit_output_path_is_honored() {
        let (_, output) = parsed(&["export.csv", "custom.csv"]).unwrap();
        assert_eq!(output, PathBuf::from("custom.csv"));
    }

    #[test]
    fn trailing_arguments_are_a_usage_error() {
        assert_eq!(parsed(&["export.csv", "custom.csv", "stray"]), None);
    }
}
