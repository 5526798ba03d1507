//! `dars`: command-line front end for app manifests.
//!
//! ```bash
//! dars export app.yaml -o build
//! dars validate app.yaml other.json
//! dars info app.yaml --json
//! ```

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use dars_export::components::ComponentSummary;
use dars_export::{manifest, try_export, App, AppStats, DarsError};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about = "Export Dars app manifests to static HTML/CSS/JS", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a manifest and write index.html, styles.css and script.js
    Export {
        /// App manifest (.yaml, .yml or .json)
        manifest: PathBuf,

        /// Output directory, created if missing
        #[arg(short, long, default_value = "dist")]
        output: PathBuf,
    },
    /// Check one or more manifests without writing anything
    Validate {
        #[arg(required = true)]
        manifests: Vec<PathBuf>,
    },
    /// Print tree statistics and the component tree
    Info {
        manifest: PathBuf,

        /// Print the component tree as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct Info<'a> {
    title: &'a str,
    stats: AppStats,
    tree: Option<ComponentSummary<'a>>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let code = match cli.command {
        Command::Export { manifest, output } => run_export(&manifest, &output),
        Command::Validate { manifests } => run_validate(&manifests),
        Command::Info { manifest, json } => run_info(&manifest, json),
    };
    process::exit(code);
}

fn load(path: &Path) -> Option<App> {
    match manifest::load(path) {
        Ok(app) => Some(app),
        Err(e) => {
            eprintln!("✗ {}: {}", path.display(), e);
            None
        }
    }
}

fn run_export(path: &Path, output: &Path) -> i32 {
    let Some(app) = load(path) else {
        return 1;
    };
    match try_export(&app, output) {
        Ok(report) => {
            println!("✓ Exported '{}' to {}", app.title, report.output_dir.display());
            for file in &report.files {
                println!("    {}", file.display());
            }
            println!(
                "  {} components, depth {}, {} scripts, {} global styles",
                report.stats.total_components,
                report.stats.max_depth,
                report.stats.scripts_count,
                report.stats.global_styles_count
            );
            0
        }
        Err(DarsError::Validation(errors)) => {
            eprintln!("✗ {} has errors:", path.display());
            for error in errors {
                eprintln!("    {}", error);
            }
            1
        }
        Err(e) => {
            eprintln!("✗ Export failed: {}", e);
            1
        }
    }
}

fn run_validate(paths: &[PathBuf]) -> i32 {
    let mut exit_code = 0;
    for path in paths {
        let Some(app) = load(path) else {
            exit_code = 1;
            continue;
        };
        let errors = app.validate();
        if errors.is_empty() {
            println!("✓ {} is valid", path.display());
        } else {
            eprintln!("✗ {} has errors:", path.display());
            for error in errors {
                eprintln!("    {}", error);
            }
            exit_code = 1;
        }
    }
    exit_code
}

fn run_info(path: &Path, json: bool) -> i32 {
    let Some(app) = load(path) else {
        return 1;
    };
    let stats = app.stats();

    if json {
        let info = Info {
            title: &app.title,
            stats,
            tree: app.component_tree(),
        };
        match serde_json::to_string_pretty(&info) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("✗ Could not serialize tree: {}", e);
                return 1;
            }
        }
        return 0;
    }

    println!("{}", app.title);
    println!("  components:    {}", stats.total_components);
    println!("  max depth:     {}", stats.max_depth);
    println!("  scripts:       {}", stats.scripts_count);
    println!("  global styles: {}", stats.global_styles_count);
    if let Some(root) = &app.root {
        println!();
        for (path, node) in root.walk() {
            let indent = "  ".repeat(path.depth() + 1);
            match node.id.as_deref() {
                Some(id) => println!("{}{} #{}", indent, node.kind.type_name(), id),
                None => println!("{}{}", indent, node.kind.type_name()),
            }
        }
    }
    0
}
