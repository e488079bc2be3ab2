//! `soltree` command line tool: summaries, statistics and position views
//! of solution files.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use soltree::board::{BoardGeometry, BoardState};
use soltree::decoder::SolutionReaderBuilder;
use soltree::evolution::parse_evolution_file;
use soltree::model::{LabelTable, ProofNumber, SolutionTree};
use soltree::traversal::{
    BranchingStats, ChildCountHistogram, NodeAccumulator, ReasonHistogram, accumulate,
    accumulate_stream,
};
use soltree::{parse_move_path, resolve, resolve_longest_prefix};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "soltree", version, about = "Inspect solved game-tree files")]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print header, schema and size of a solution file
    Info(SourceArgs),
    /// Print the average branching factor per depth
    Branching(SourceArgs),
    /// Print how often each termination reason occurs
    Reasons {
        #[command(flatten)]
        source: SourceArgs,
        /// Label file with one reason name per line
        #[arg(long, short = 'l')]
        labels: Option<PathBuf>,
    },
    /// Print how many nodes have each number of children
    Children(SourceArgs),
    /// Show the position reached by a move path, e.g. `0/4/`
    Show {
        /// Solution file
        file: PathBuf,
        /// Moves separated by `/`; empty for the initial position
        #[arg(default_value = "")]
        path: String,
        /// Label file with one result name per line
        #[arg(long)]
        result_labels: Option<PathBuf>,
        /// Label file with one reason name per line
        #[arg(long)]
        reason_labels: Option<PathBuf>,
    },
    /// Summarize a proof-number evolution log
    Evolution {
        /// Evolution log with `<proof> <disproof> <depth>` lines
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Solution file
    file: PathBuf,

    /// Stream the nodes instead of building the tree in memory
    #[arg(long, short = 's')]
    stream: bool,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Command::Info(source) => cmd_info(&source),
        Command::Branching(source) => {
            print!("{}", fold(&source, BranchingStats::new())?);
            Ok(())
        }
        Command::Reasons { source, labels } => cmd_reasons(&source, labels.as_deref()),
        Command::Children(source) => {
            print!("{}", fold(&source, ChildCountHistogram::new())?);
            Ok(())
        }
        Command::Show {
            file,
            path,
            result_labels,
            reason_labels,
        } => cmd_show(
            &file,
            &path,
            result_labels.as_deref(),
            reason_labels.as_deref(),
        ),
        Command::Evolution { file } => cmd_evolution(&file),
    }
}

// ============================================================================
// Commands
// ============================================================================
/// Runs `acc` over all nodes, streaming or on the decoded tree.
fn fold<A: NodeAccumulator>(source: &SourceArgs, acc: A) -> Result<A> {
    let builder = SolutionReaderBuilder::for_file(&source.file);
    let context = || format!("failed to read {}", source.file.display());
    if source.stream {
        let stream = builder.with_buffered_source().stream().with_context(context)?;
        accumulate_stream(stream, acc).with_context(context)
    } else {
        let tree = builder.build_tree().with_context(context)?;
        Ok(accumulate(&tree, acc))
    }
}

fn decode(file: &Path) -> Result<SolutionTree> {
    SolutionReaderBuilder::for_file(file)
        .build_tree()
        .with_context(|| format!("failed to read {}", file.display()))
}

fn load_labels(path: Option<&Path>, default: LabelTable) -> Result<LabelTable> {
    match path {
        Some(path) => LabelTable::from_file(path)
            .with_context(|| format!("failed to read labels from {}", path.display())),
        None => Ok(default),
    }
}

fn cmd_info(source: &SourceArgs) -> Result<()> {
    let context = || format!("failed to read {}", source.file.display());
    let stats = if source.stream {
        let stream = SolutionReaderBuilder::for_file(&source.file)
            .with_buffered_source()
            .stream()
            .with_context(context)?;
        let header = stream.header();
        println!("board:  {}^{}", header.extent, header.dimension);
        accumulate_stream(stream, BranchingStats::new()).with_context(context)?
    } else {
        let tree = decode(&source.file)?;
        println!("board:  {}^{}", tree.extent(), tree.dimension());
        println!("schema: {:?}", tree.schema());
        println!(
            "root:   {} ({} positions counted by the solver)",
            tree.root().result(),
            tree.root().count()
        );
        accumulate(&tree, BranchingStats::new())
    };
    println!("nodes:  {}", stats.total_nodes());
    println!("depth:  {}", stats.levels().len().saturating_sub(1));
    Ok(())
}

fn cmd_reasons(source: &SourceArgs, labels: Option<&Path>) -> Result<()> {
    let labels = load_labels(labels, LabelTable::default())?;
    let histogram = fold(source, ReasonHistogram::new())?;
    if histogram.is_empty() {
        warn!("no reason codes found; basic-schema files carry none");
    }
    for (reason, count) in histogram.iter() {
        println!("{} {}", labels.label_or_code(reason), count);
    }
    Ok(())
}

fn cmd_show(
    file: &Path,
    path: &str,
    result_labels: Option<&Path>,
    reason_labels: Option<&Path>,
) -> Result<()> {
    let results = load_labels(result_labels, LabelTable::results())?;
    let reasons = load_labels(reason_labels, LabelTable::default())?;
    let tree = decode(file)?;
    let moves = parse_move_path(path)?;

    let position = match resolve(&tree, &moves) {
        Ok(position) => position,
        Err(err) => {
            let (position, consumed) = resolve_longest_prefix(&tree, &moves);
            warn!(%err, consumed, "showing deepest valid prefix instead");
            position
        }
    };
    info!(index = position.index, "resolved move path");

    let node = position.node;
    let path_text: Vec<String> = position.board.moves().iter().map(usize::to_string).collect();
    println!("path:    /{}", path_text.join("/"));
    println!("result:  {}", results.result_label(node.result()));
    println!("count:   {}", node.count());
    if let Some(search) = node.search() {
        println!(
            "proof:   {} / {}{}",
            render_proof(search.proof),
            render_proof(search.disproof),
            if search.is_final { " (final)" } else { "" }
        );
        println!("reason:  {}", reasons.label_or_code(search.reason));
    }
    println!("to move: {}", position.board.to_move());
    println!();
    print!("{}", render_board(&tree.geometry(), &position.board));

    if !node.is_leaf() {
        println!();
        for (mv, child) in tree.children_of(position.index) {
            println!(
                "  {:>4}: {} ({} positions)",
                mv,
                results.result_label(child.result()),
                child.count()
            );
        }
    }
    Ok(())
}

fn cmd_evolution(file: &Path) -> Result<()> {
    let samples = parse_evolution_file(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let Some(last) = samples.last() else {
        println!("no samples");
        return Ok(());
    };
    let max_depth = samples.iter().map(|s| s.depth).max().unwrap_or(0);
    println!("samples:        {}", samples.len());
    println!("max depth:      {max_depth}");
    println!(
        "final numbers:  {} / {}",
        render_proof(last.proof),
        render_proof(last.disproof)
    );
    Ok(())
}

// ============================================================================
// Rendering
// ============================================================================
fn render_proof(value: ProofNumber) -> String {
    if value.is_infinite() {
        "∞".to_string()
    } else {
        value.to_string()
    }
}

/// Renders the board as text grid; the layers of a 3D board side by side.
fn render_board(geometry: &BoardGeometry, board: &BoardState) -> String {
    let n = geometry.extent();
    let layers = if geometry.dimension() == 3 { n } else { 1 };
    let mut out = String::new();
    for j in 0..n {
        let rows: Vec<String> = (0..layers)
            .map(|k| {
                (0..n)
                    .map(|i| {
                        let coords = if geometry.dimension() == 3 {
                            vec![i, j, k]
                        } else {
                            vec![i, j]
                        };
                        let occupant = geometry
                            .cell_index(&coords)
                            .and_then(|cell| board.occupant(cell));
                        match occupant {
                            Some(player) => player.to_string(),
                            None => ".".to_string(),
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        out.push_str(&rows.join("   "));
        out.push('\n');
    }
    out
}
