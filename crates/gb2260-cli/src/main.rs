//! gb2260-cli — Command-line interface for gb2260-core
//!
//! Resolves GB/T 2260 division codes and searches all revisions from the
//! terminal.
//!
//! Usage examples
//! --------------
//!
//! - Show dataset stats
//!   $ gb2260 stats
//!
//! - Resolve a code and print its hierarchy
//!   $ gb2260 get 110105
//!   $ gb2260 --json get 110105
//!
//! - Search by prefix and name
//!   $ gb2260 search 11 --name 朝阳
//!
//! - Use custom revision files, caching the merged table
//!   $ gb2260 -i GB2260-2002.txt -i GB2260-201512.txt --cache stats
//!
//! Data source
//! -----------
//!
//! Without `--input` the small sample bundled with `gb2260-core` is used;
//! pass full revision files for complete data. Set `RUST_LOG=debug` to see
//! what the loader does.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use gb2260_core::{Dataset, Division, DivisionView, Resolver};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let dataset = load_dataset(&args)?;
    let resolver = Resolver::new(dataset);

    match args.command {
        Commands::Stats => {
            let stats = resolver.dataset().stats();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Dataset statistics:");
                println!("  Records: {}", stats.total);
                println!("  Provinces: {}", stats.provinces);
                println!("  Prefectures: {}", stats.prefectures);
                println!("  Counties: {}", stats.counties);
                if args.input.is_empty() {
                    let revisions: Vec<_> = Dataset::bundled_revisions().collect();
                    println!("  Bundled sample: {}", revisions.join(", "));
                }
            }
        }

        Commands::Get { code } => {
            let d = resolver.get(code.as_str())?;
            if args.json {
                let view = DivisionView::from_division(&d)?;
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_division(&d)?;
            }
        }

        Commands::Search { prefix, name } => {
            let hits = resolver.search(prefix.as_str(), name.as_deref());
            if args.json {
                let views = hits
                    .iter()
                    .map(DivisionView::from_division)
                    .collect::<gb2260_core::Result<Vec<_>>>()?;
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else if hits.is_empty() {
                println!("No divisions found matching: {prefix}");
            } else {
                for d in hits {
                    println!("{d}");
                }
            }
        }

        #[cfg(feature = "builder")]
        Commands::Build { out } => {
            let dataset = resolver.dataset();
            dataset
                .save_as(&out)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("{} records written to {}", dataset.len(), out.display());
        }
    }

    Ok(())
}

fn load_dataset(args: &CliArgs) -> anyhow::Result<Dataset> {
    if args.input.is_empty() {
        return Ok(Dataset::bundled());
    }
    tracing::debug!(inputs = args.input.len(), "loading revision files");

    #[cfg(feature = "builder")]
    {
        if args.cache {
            return Dataset::load_cached(args.input.as_slice())
                .context("loading revisions via cache");
        }
    }

    Dataset::from_sources(args.input.as_slice()).context("loading revisions")
}

fn print_division(d: &Division) -> anyhow::Result<()> {
    println!("{d}");
    println!("Level: {}", d.level());
    let province = d.province()?;
    println!("Province: {} {}", province.code(), province.name());
    if let Some(prefecture) = d.prefecture()? {
        println!("Prefecture: {} {}", prefecture.code(), prefecture.name());
    }
    if let Some(county) = d.county() {
        println!("County: {} {}", county.code(), county.name());
    }
    Ok(())
}
