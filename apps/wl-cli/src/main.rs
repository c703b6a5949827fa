use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use wl_app::{AppResult, FileKind, document_service, script_service};
use wl_db::{Document, ReverseOptions};

#[derive(Parser)]
#[command(name = "wl")]
#[command(about = "wirelang CLI - circuit scripts and schematic documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a script and write its schematic as a document
    Compile {
        /// Path to the .wl script
        script: PathBuf,
        /// Output document (.json, .yaml or .yml)
        #[arg(short, long)]
        output: PathBuf,
        /// Export to compile
        #[arg(long, default_value = "default")]
        export: String,
    },
    /// Regenerate script source from a document
    Reverse {
        /// Path to the document
        document: PathBuf,
        /// Output script (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Module named in the `use` statement
        #[arg(long, default_value = "wirelang")]
        module: String,
        /// Name to export the schematic under
        #[arg(long, default_value = "default")]
        export_name: String,
        /// Let ids and labels be regenerated instead of restoring them
        #[arg(long)]
        no_preserve_ids: bool,
    },
    /// Check a script or document for errors and warnings
    Validate {
        /// Path to a .wl script or a document
        path: PathBuf,
        /// Export to check when the path is a script
        #[arg(long, default_value = "default")]
        export: String,
    },
    /// Summarize a script or document
    Inspect {
        /// Path to a .wl script or a document
        path: PathBuf,
        /// Export to inspect when the path is a script
        #[arg(long, default_value = "default")]
        export: String,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            script,
            output,
            export,
        } => cmd_compile(&script, &output, &export),
        Commands::Reverse {
            document,
            output,
            module,
            export_name,
            no_preserve_ids,
        } => {
            let options = ReverseOptions {
                module_import: module,
                export_name,
                preserve_ids: !no_preserve_ids,
            };
            cmd_reverse(&document, output.as_deref(), &options)
        }
        Commands::Validate { path, export } => cmd_validate(&path, &export),
        Commands::Inspect { path, export } => cmd_inspect(&path, &export),
    }
}

fn cmd_compile(script: &Path, output: &Path, export: &str) -> AppResult<()> {
    let doc = script_service::compile_script(script, export)?;
    document_service::save_document(output, &doc)?;
    info!(output = %output.display(), "document written");
    println!(
        "✓ Compiled {} ({} components, {} nodes) -> {}",
        doc.name,
        doc.components.len(),
        doc.nodes.len(),
        output.display()
    );
    Ok(())
}

fn cmd_reverse(document: &Path, output: Option<&Path>, options: &ReverseOptions) -> AppResult<()> {
    let doc = document_service::load_document(document)?;
    match output {
        Some(path) => {
            document_service::write_script(path, &doc, options)?;
            println!("✓ Wrote {}", path.display());
        }
        None => print!("{}", document_service::reverse(&doc, options)?),
    }
    Ok(())
}

fn cmd_validate(path: &Path, export: &str) -> AppResult<()> {
    println!("Validating: {}", path.display());
    let report = document_service::validate_path(path, export)?;
    for error in &report.errors {
        println!("  error: {error}");
    }
    for warning in &report.warnings {
        println!("  warning: {warning}");
    }
    if report.valid {
        println!("✓ Circuit is valid ({} warnings)", report.warnings.len());
    } else {
        println!("✗ Circuit has {} errors", report.errors.len());
        std::process::exit(1);
    }
    Ok(())
}

fn load_any(path: &Path, export: &str) -> AppResult<Document> {
    match FileKind::from_path(path)? {
        FileKind::Script => script_service::compile_script(path, export),
        _ => document_service::load_document(path),
    }
}

fn cmd_inspect(path: &Path, export: &str) -> AppResult<()> {
    let doc = load_any(path, export)?;
    let summary = document_service::summarize(&doc)?;

    println!("Circuit: {}", summary.name);
    println!("  Components: {}", summary.component_count);
    for (kind, count) in &summary.kinds {
        println!("    {kind}: {count}");
    }
    println!(
        "  Nodes: {} ({} ground)",
        summary.node_count, summary.ground_node_count
    );
    println!("  Unconnected pins: {}", summary.unconnected_pin_count);
    println!(
        "  Validation: {} errors, {} warnings",
        summary.report.errors.len(),
        summary.report.warnings.len()
    );
    Ok(())
}
