use std::time::Instant;

use anyhow::{bail, Result};
use clap::Parser;
use log::info;

use linkmap_analyzer::{
    analyze, available_linkmap_files, build_report, AnalyzeOutcome, CancelToken, Category,
    SizeQuery,
};

/// Summarize code/data sizes from an Apple linker map file.
///
/// Enable `Write Link Map File` in Xcode build settings, build with the
/// release configuration, then point this tool at the generated
/// `<App>-LinkMap-*.txt` (or let it pick the newest one in DerivedData).
#[derive(Parser)]
#[command(name = "linkmap-analyzer", version)]
struct Cli {
    /// Link map file to analyze; defaults to the newest discovered one
    path: Option<String>,

    /// Grouping axis for the size report
    #[arg(long, value_enum, default_value_t = Category::Object)]
    group_by: Category,

    /// Keep only rows whose name contains this substring (case-sensitive)
    #[arg(long, default_value = "")]
    filter: String,

    /// Show only the N largest rows (0 = all)
    #[arg(long, default_value_t = 0)]
    top: usize,

    /// Emit the report as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// List discovered link map files and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;
    let cli = Cli::parse();

    if cli.list {
        for path in available_linkmap_files() {
            println!("{path}");
        }
        return Ok(());
    }

    let path = match cli.path {
        Some(p) => linkmap_analyzer::utils::normalize_path(&p),
        None => match available_linkmap_files().into_iter().next() {
            Some(p) => p,
            None => bail!("no link map file given and none found under DerivedData"),
        },
    };

    let begin = Instant::now();
    let token = CancelToken::new();
    let linkmap = match analyze(&path, &token)? {
        AnalyzeOutcome::Complete(map) => map,
        AnalyzeOutcome::Cancelled => return Ok(()),
    };
    info!(
        "analyzed {} object files from {path} in {:.2?}",
        linkmap.object_files.len(),
        begin.elapsed()
    );

    let query = SizeQuery {
        filter: cli.filter,
        category: cli.group_by,
    };
    let mut report = build_report(&linkmap, &query);
    if cli.top > 0 {
        report.rows.truncate(cli.top);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for row in &report.rows {
        match &row.lib {
            Some(lib) => println!("{:>12}  {}  [{lib}]", row.size_str(), row.name),
            None => println!("{:>12}  {}", row.size_str(), row.name),
        }
    }
    println!("{}", report.summary());
    Ok(())
}
