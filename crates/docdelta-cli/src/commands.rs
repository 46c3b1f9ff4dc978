use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use colored::Colorize;
use docdelta_compare::{Comparator, CompareConfig, Comparison, PairComparison};
use docdelta_diff::{DiffOptions, TextDiffer};
use docdelta_types::{AlignedPair, Block, BlockContent, DiffSegment, DocumentVersion, SegmentKind};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Compare(args) => cmd_compare(args, cli.format),
        Command::Diff(args) => cmd_diff(args, cli.format),
        Command::Similarity(args) => cmd_similarity(args, cli.format),
        Command::Config(args) => cmd_config(args),
    }
}

fn cmd_compare(args: CompareArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(limit) = args.max_blocks {
        config.max_blocks_per_side = limit;
    }
    let comparator = Comparator::new(&config)?;

    let old = read_version(&args.old)?;
    let new = read_version(&args.new)?;
    debug!(old_blocks = old.len(), new_blocks = new.len(), "loaded versions");

    let comparison = comparator.compare_versions(&old, &new)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
        OutputFormat::Text => print_comparison(&comparison, args.all),
    }
    Ok(())
}

fn cmd_diff(args: DiffArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (old, new) = read_texts(&args.old, &args.new, args.files)?;
    let options = match args.timeout_ms {
        Some(ms) => DiffOptions::with_timeout(Duration::from_millis(ms)),
        None => DiffOptions::default(),
    };
    let diff = TextDiffer::new(options).compute(&old, &new);

    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "segments": diff.segments(),
                "similarity": diff.similarity(),
                "stats": diff.stats(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            if diff.is_unchanged() {
                println!("No changes.");
            } else {
                println!("{}", render_segments(diff.segments()));
            }
            let stats = diff.stats();
            println!(
                "{} {} {}  similarity {}",
                format!("+{}", stats.added).green(),
                format!("-{}", stats.removed).red(),
                format!("={}", stats.unchanged).dimmed(),
                format!("{:.1}%", diff.similarity()).bold(),
            );
        }
    }
    Ok(())
}

fn cmd_similarity(args: SimilarityArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (old, new) = read_texts(&args.old, &args.new, args.files)?;
    let similarity = TextDiffer::default().similarity(&old, &new);
    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "similarity": similarity })),
        OutputFormat::Text => println!("{similarity:.1}"),
    }
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<CompareConfig> {
    match path {
        Some(path) => CompareConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(CompareConfig::default()),
    }
}

fn read_version(path: &Path) -> anyhow::Result<DocumentVersion> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    DocumentVersion::from_json(&json).with_context(|| format!("parsing {}", path.display()))
}

fn read_texts(old: &str, new: &str, files: bool) -> anyhow::Result<(String, String)> {
    if !files {
        return Ok((old.to_owned(), new.to_owned()));
    }
    let read = |p: &str| std::fs::read_to_string(p).with_context(|| format!("reading {p}"));
    Ok((read(old)?, read(new)?))
}

fn print_comparison(comparison: &Comparison<'_>, all: bool) {
    let pairs: Vec<&PairComparison<'_>> = if all {
        comparison.pairs.iter().collect()
    } else {
        comparison.changes().collect()
    };

    if pairs.is_empty() {
        println!("{} Versions are identical.", "✓".green().bold());
    }
    for pair in pairs {
        print_pair(pair);
    }

    let summary = &comparison.summary;
    println!();
    println!(
        "{} matched, {} modified, {} added, {} removed",
        summary.matched.to_string().bold(),
        summary.modified.to_string().yellow(),
        summary.added.to_string().green(),
        summary.removed.to_string().red(),
    );
    let stats = &comparison.stats;
    println!(
        "Characters: {} {} {}",
        format!("+{}", stats.added).green(),
        format!("-{}", stats.removed).red(),
        format!("={}", stats.unchanged).dimmed(),
    );
}

fn print_pair(pair: &PairComparison<'_>) {
    match &pair.pair {
        AlignedPair::Matched { old, new, .. } => {
            println!("  {} {} -> {}", "=".dimmed(), old.id, new.id);
        }
        AlignedPair::Modified {
            old,
            new,
            similarity,
        } => {
            println!(
                "  {} {} -> {}  ({:.1}%)",
                "~".yellow().bold(),
                old.id,
                new.id,
                similarity * 100.0
            );
            match &pair.diff {
                Some(diff) => println!("    {}", render_segments(&diff.segments)),
                None => println!("    {}", describe_block(new)),
            }
        }
        AlignedPair::Added { new } => {
            println!("  {} {}  {}", "+".green().bold(), new.id, describe_block(new).green());
        }
        AlignedPair::Removed { old } => {
            println!("  {} {}  {}", "-".red().bold(), old.id, describe_block(old).red());
        }
    }
}

fn render_segments(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .map(|s| match s.kind {
            SegmentKind::Unchanged => s.text.normal().to_string(),
            SegmentKind::Added => s.text.green().underline().to_string(),
            SegmentKind::Removed => s.text.red().strikethrough().to_string(),
        })
        .collect()
}

fn describe_block(block: &Block) -> String {
    match &block.content {
        BlockContent::Text { text, .. } => text.clone(),
        BlockContent::Image {
            image_id,
            file_name,
        } => {
            let label = file_name
                .as_deref()
                .or(image_id.as_deref())
                .unwrap_or("unnamed");
            format!("[image {label}]")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    #[test]
    fn parses_compare_flags() {
        let cli = Cli::try_parse_from([
            "docdelta", "compare", "v1.json", "v2.json", "--max-blocks", "10", "--all",
            "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Compare(args) => {
                assert_eq!(args.max_blocks, Some(10));
                assert!(args.all);
                assert_eq!(args.old, Path::new("v1.json"));
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn describes_images_by_name_then_id() {
        let named = Block::image("a", 0, Some("img-1"), Some("seal.png"));
        let by_id = Block::image("b", 1, Some("img-2"), None);
        let bare = Block::image("c", 2, None, None);
        assert_eq!(describe_block(&named), "[image seal.png]");
        assert_eq!(describe_block(&by_id), "[image img-2]");
        assert_eq!(describe_block(&bare), "[image unnamed]");
    }

    #[test]
    fn rendered_segments_keep_text() {
        colored::control::set_override(false);
        let segments = vec![
            DiffSegment::unchanged("The "),
            DiffSegment::removed("cat"),
            DiffSegment::added("dog"),
            DiffSegment::unchanged(" sat"),
        ];
        assert_eq!(render_segments(&segments), "The catdog sat");
    }

    #[test]
    fn reads_text_arguments_or_files() {
        let (a, b) = read_texts("one", "two", false).unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("one", "two"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "from disk").unwrap();
        let path = file.path().to_str().unwrap();
        let (a, _) = read_texts(path, path, true).unwrap();
        assert_eq!(a, "from disk");
    }

    #[test]
    fn oversized_input_keeps_compare_error() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.json");
        let new = dir.path().join("new.json");
        std::fs::write(
            &old,
            r#"[{"id":"a","orderIndex":0,"blockType":"text","content":"x"},
                {"id":"b","orderIndex":1,"blockType":"text","content":"y"}]"#,
        )
        .unwrap();
        std::fs::write(&new, "[]").unwrap();

        let args = CompareArgs {
            old,
            new,
            config: None,
            max_blocks: Some(1),
            all: false,
        };
        let err = cmd_compare(args, OutputFormat::Json).unwrap_err();
        let compare_err = err.downcast_ref::<docdelta_compare::CompareError>().unwrap();
        assert!(compare_err.is_resource_limit());
    }
}
