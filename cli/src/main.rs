//! outline-tasks CLI - compile PDF outlines into Things 3 projects

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};

use outline_tasks::render::{self, PreviewLine};
use outline_tasks::{
    compile_outline, flatten, read_outline_file, CompileOptions, CompileWorker, ExportOptions,
    Role,
};

#[derive(Parser)]
#[command(name = "outline-tasks")]
#[command(version)]
#[command(about = "Compile PDF outlines into Things 3 projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show outline statistics and the valid depth range
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the outline with the role of every entry
    Preview {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        depth: DepthArgs,
    },

    /// Export the outline as Things JSON or import URLs
    Export {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        depth: DepthArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Project title (defaults to the document title or current time)
        #[arg(long)]
        title: Option<String>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Print things:/// URLs instead of JSON
        #[arg(long)]
        url: bool,

        /// Split the project every N top-level items
        #[arg(long, value_name = "N")]
        batch_size: Option<usize>,

        /// Things URL scheme authorization token
        #[arg(long, env = "THINGS_AUTH_TOKEN")]
        auth_token: Option<String>,

        /// Show the project in Things after import
        #[arg(long)]
        reveal: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct DepthArgs {
    /// To-do depth or depth range (e.g., "2", "1-2")
    #[arg(long, value_name = "RANGE")]
    todo: Option<String>,

    /// Levels above the to-do depth that become headings
    #[arg(long, value_name = "N")]
    heading_span: Option<usize>,

    /// Levels below the to-do depth that become checklist items
    #[arg(long, value_name = "N")]
    checklist_span: Option<usize>,

    /// Entry indices to keep (e.g., "12-13,44-60")
    #[arg(long, value_name = "RANGES")]
    include: Option<String>,
}

impl DepthArgs {
    fn to_options(&self) -> Result<CompileOptions, Box<dyn std::error::Error>> {
        let mut options = CompileOptions::new();
        if let Some(spec) = &self.todo {
            options = options.with_todo_spec(spec);
            if options.todo.is_none() {
                return Err(format!("Invalid todo depth: {:?}", spec).into());
            }
        }
        if let Some(span) = self.heading_span {
            options = options.with_heading_span(span);
        }
        if let Some(span) = self.checklist_span {
            options = options.with_checklist_span(span);
        }
        if let Some(include) = &self.include {
            options = options.with_inclusion(include.clone());
        }
        Ok(options)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Info { input, json } => cmd_info(&input, json),
        Commands::Preview { input, depth } => cmd_preview(&input, &depth),
        Commands::Export {
            input,
            depth,
            output,
            title,
            compact,
            url,
            batch_size,
            auth_token,
            reveal,
        } => {
            let mut export = ExportOptions::new().with_reveal(reveal);
            if compact {
                export = export.compact();
            }
            if let Some(size) = batch_size {
                export = export.with_batch_size(size);
            }
            if let Some(token) = auth_token {
                export = export.with_auth_token(token);
            }
            cmd_export(&input, &depth, title, output.as_deref(), url, &export)
        }
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let outline = read_outline_file(input)?;
    let stats = flatten(&outline.root).stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Outline Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(ref title) = outline.title {
        println!("{}: {}", "Title".bold(), title);
    }
    println!("{}: {}", "Entries".bold(), stats.entries);

    match stats.max_depth {
        Some(max_depth) => println!("{}: 0-{}", "Valid depths".bold(), max_depth),
        None => println!("{}: {}", "Valid depths".bold(), "none".dimmed()),
    }

    if !stats.per_depth.is_empty() {
        println!();
        println!("{}", "Entries per Depth".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for (depth, count) in &stats.per_depth {
            println!("  {} {}", format!("{:>3}", depth).bold(), count);
        }
    }

    Ok(())
}

fn styled(line: &PreviewLine) -> ColoredString {
    let text = format!("{}{}", line.marker(), line.label);
    let text = match line.role {
        Role::Heading => text.yellow().bold(),
        Role::Todo => text.cyan(),
        Role::Checklist => text.magenta(),
        Role::Unclassified => text.normal(),
    };
    if line.included {
        text
    } else {
        text.dimmed()
    }
}

fn cmd_preview(input: &Path, depth: &DepthArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = depth.to_options()?;
    let outline = read_outline_file(input)?;

    let worker = CompileWorker::new();
    let pb = spinner("Classifying outline...");
    worker.submit(Arc::new(outline.root), options);
    let result = worker.wait(Duration::from_secs(300));
    pb.finish_and_clear();

    let compilation = result.ok_or("Outline classification did not finish")?.outcome?;

    for line in compilation.preview() {
        println!(
            "{}{} {}",
            format!("{:>5} ", line.index).dimmed(),
            line.indent(),
            styled(&line)
        );
    }

    let stats = &compilation.report.stats;
    if compilation.project().is_some() {
        println!();
        println!(
            "{} {} headings, {} to-dos, {} checklist items",
            "Summary:".green().bold(),
            stats.headings,
            stats.todos,
            stats.checklist_items
        );
        print_diagnostics(&compilation.report.diagnostics);
    }

    Ok(())
}

fn print_diagnostics(diagnostics: &[outline_tasks::Inconsistency]) {
    if diagnostics.is_empty() {
        return;
    }
    println!(
        "{} {} entries could not be placed",
        "Warning:".yellow().bold(),
        diagnostics.len()
    );
    for diagnostic in diagnostics {
        println!("  {} {}", "-".dimmed(), diagnostic);
    }
}

fn cmd_export(
    input: &Path,
    depth: &DepthArgs,
    title: Option<String>,
    output: Option<&Path>,
    url: bool,
    export: &ExportOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = depth.to_options()?;
    if options.todo.is_none() {
        return Err("A to-do depth is required for export (use --todo)".into());
    }
    if let Some(title) = title {
        options = options.with_title(title);
    }

    let pb = spinner("Compiling outline...");
    let outline = read_outline_file(input)?;
    let compilation = compile_outline(&outline, &options)?;
    pb.finish_and_clear();

    let project = compilation
        .project()
        .ok_or("The outline produced no project")?;

    let payloads = render::to_payloads(project, export)?;
    let mut chunks = Vec::with_capacity(payloads.len());
    for payload in &payloads {
        if url {
            chunks.push(render::things_url(payload, export)?);
        } else {
            chunks.push(String::from_utf8(payload.clone())?);
        }
    }
    let text = chunks.join("\n");

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    let stats = &compilation.report.stats;
    eprintln!(
        "{} {} items in {} payload(s), {} diagnostics",
        "Done!".green().bold(),
        project.total_items(),
        payloads.len(),
        compilation.report.diagnostics.len()
    );
    if stats.dropped > 0 {
        log::warn!("{} entries were dropped", stats.dropped);
    }

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "outline-tasks".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Compile PDF outlines into Things 3 projects");
    println!();
    println!("License: MIT");
}
