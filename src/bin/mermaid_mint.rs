use anyhow::{Context as AnyhowContext, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use mermaid_mint::compiler::core::{BuildOptions, GraphBuilder};
use mermaid_mint::compiler::loader::load_document_from_file;
use mermaid_mint::convert::convert_file;
use mermaid_mint::render::{Direction, RenderOptions, Traversal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, info};

#[derive(Parser)]
#[command(author, version, about = "Convert process definitions to Mermaid flowcharts", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a process file into a Mermaid diagram
    Convert {
        /// Path to the process YAML/JSON file
        input: PathBuf,

        /// Output path (defaults to the input path with a .mmd extension)
        output: Option<PathBuf>,

        /// Fail on duplicate step ids instead of keeping the last definition
        #[arg(long)]
        strict: bool,

        /// Which steps to emit and in what order
        #[arg(long, value_enum, default_value_t = TraversalArg::Registry)]
        traversal: TraversalArg,

        /// Flowchart direction
        #[arg(long, value_enum, default_value_t = DirectionArg::Td)]
        direction: DirectionArg,

        /// Label decision branches with yes/no
        #[arg(long)]
        branch_labels: bool,

        /// With reachable traversal, also declare resources targeted by operations
        #[arg(long)]
        declare_resources: bool,
    },
    /// Print the linked process graph as JSON
    Inspect {
        /// Path to the process YAML/JSON file
        input: PathBuf,

        /// Fail on duplicate step ids instead of keeping the last definition
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TraversalArg {
    Registry,
    Reachable,
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Td,
    Tb,
    Bt,
    Lr,
    Rl,
}

impl From<TraversalArg> for Traversal {
    fn from(arg: TraversalArg) -> Self {
        match arg {
            TraversalArg::Registry => Traversal::Registry,
            TraversalArg::Reachable => Traversal::Reachable,
        }
    }
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Td => Direction::TD,
            DirectionArg::Tb => Direction::TB,
            DirectionArg::Bt => Direction::BT,
            DirectionArg::Lr => Direction::LR,
            DirectionArg::Rl => Direction::RL,
        }
    }
}

fn build_options(strict: bool) -> BuildOptions {
    if strict {
        BuildOptions::strict()
    } else {
        BuildOptions::default()
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            input,
            output,
            strict,
            traversal,
            direction,
            branch_labels,
            declare_resources,
        } => {
            let render_options = RenderOptions {
                traversal: traversal.into(),
                direction: direction.into(),
                branch_labels,
                declare_resources,
            };
            info!("Converting process from: {}", input.display());
            let outcome = convert_file(
                &input,
                output.as_deref(),
                &build_options(strict),
                &render_options,
            )?;
            println!(
                "Converted {} to {}",
                input.display(),
                outcome.output_path.display()
            );
        }
        Commands::Inspect { input, strict } => {
            let document = load_document_from_file(&input)?;
            let process = GraphBuilder::with_options(build_options(strict))
                .build(&document)
                .with_context(|| format!("Failed to build process from {}", input.display()))?;
            println!("{}", serde_json::to_string_pretty(&process)?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
