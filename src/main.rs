use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};

use micro_hum::config::{DEFAULT_THRESHOLD_CENTS, DEFAULT_TOP_K};
use micro_hum::contour::ThresholdEncoder;
use micro_hum::{
    CatalogBuilder, CatalogConfig, GroupingConfig, HumError, MatchResult, MpmNoteExtractor,
    QueryPipeline, Ranker, RankerConfig, TrackerConfig,
};

#[derive(Parser)]
#[command(
    name = "micro-hum",
    about = "Finds the melodies in a directory of MIDI files that best match a hummed recording"
)]
struct Args {
    /// Directory of reference melodies
    database_dir: PathBuf,

    /// WAV recording of the hummed query
    query_wav: PathBuf,

    /// Number of matches to show
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// Interval in cents above which consecutive notes count as different
    #[arg(long, default_value_t = DEFAULT_THRESHOLD_CENTS)]
    threshold_cents: f64,

    /// File extension of reference melodies
    #[arg(long, default_value = "mid")]
    extension: String,

    /// Write the notes extracted from the query to this MIDI file
    #[arg(long)]
    debug_midi: Option<PathBuf>,

    /// Drop the query's leading '*' before scoring
    #[arg(long)]
    ignore_sentinel: bool,

    /// Print matches as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    info!("Analyzing database...");
    let builder = CatalogBuilder::new(CatalogConfig {
        extension: args.extension.clone(),
    })?;
    let (catalog, report) = builder
        .build(&args.database_dir)
        .with_context(|| format!("failed to build catalog from {}", args.database_dir.display()))?;
    if !report.is_empty() {
        warn!("skipped {} reference file(s)", report.failures.len());
    }
    if catalog.is_empty() {
        warn!("{}", HumError::EmptyCatalog);
    }

    info!("Analyzing your humming...");
    let grouping = GroupingConfig {
        threshold_cents: args.threshold_cents,
        ..GroupingConfig::default()
    };
    let extractor = MpmNoteExtractor::new(TrackerConfig::default(), grouping)?;
    let encoder = ThresholdEncoder::new(args.threshold_cents)?;
    let mut pipeline = QueryPipeline::new(extractor, encoder);
    if let Some(path) = &args.debug_midi {
        pipeline = pipeline.with_debug_midi(path);
    }
    let query = pipeline
        .process_file(&args.query_wav)
        .with_context(|| format!("failed to analyze {}", args.query_wav.display()))?;

    let ranker = Ranker::new(
        catalog,
        RankerConfig {
            top_k: Some(args.top_k),
            ignore_sentinel: args.ignore_sentinel,
        },
    );
    let matches = ranker.rank(&query);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &matches)?;
        writeln!(out)?;
    } else {
        write_matches(&mut out, &matches)?;
    }
    Ok(())
}

fn write_matches(out: &mut impl Write, matches: &[MatchResult]) -> io::Result<()> {
    writeln!(out, "\n--- TOP MATCHES ---")?;
    for m in matches.iter() {
        writeln!(out, "Song: {} | Match Score (Lower is better): {}", m.id, m.distance)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str, distance: usize) -> MatchResult {
        MatchResult {
            id: id.to_string(),
            distance,
        }
    }

    #[test]
    fn test_write_matches() {
        let mut out = Vec::new();
        write_matches(&mut out, &[result("rising.mid", 1), result("falling.mid", 2)]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\n--- TOP MATCHES ---\n\
             Song: rising.mid | Match Score (Lower is better): 1\n\
             Song: falling.mid | Match Score (Lower is better): 2\n"
        );
    }

    #[test]
    fn test_write_no_matches() {
        let mut out = Vec::new();
        write_matches(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\n--- TOP MATCHES ---\n");
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(["micro-hum", "db", "hum.wav", "--top-k", "3", "--json"]).unwrap();
        assert_eq!(args.database_dir, PathBuf::from("db"));
        assert_eq!(args.query_wav, PathBuf::from("hum.wav"));
        assert_eq!(args.top_k, 3);
        assert_eq!(args.threshold_cents, DEFAULT_THRESHOLD_CENTS);
        assert_eq!(args.extension, "mid");
        assert!(args.json);
        assert!(!args.ignore_sentinel);
        assert!(Args::try_parse_from(["micro-hum", "db"]).is_err());
    }
}
