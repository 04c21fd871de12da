use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pagesmith_agents::{PipelineOutput, build_pipeline};
use pagesmith_artifact::{FsStore, REPORT_FILE, Store, remove_stale_pages, validate_outputs};
use pagesmith_blocks::BlockManager;
use pagesmith_config::{AppConfig, RawProduct};
use pagesmith_templates::TemplateManager;

/// Pagesmith - Generates FAQ, product and comparison pages from a product record
#[derive(Parser)]
#[command(name = "pagesmith")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to a JSON config file
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run the content pipeline and write pages
  Run {
    /// Product record to render (JSON object of label -> value)
    #[arg(long)]
    product: Option<PathBuf>,

    /// Directory pages are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print the full status snapshot as JSON
    #[arg(long)]
    report: bool,
  },

  /// Check a previous run's output directory
  Validate {
    /// Directory to check
    #[arg(long)]
    output_dir: Option<PathBuf>,
  },

  /// List available content blocks
  Blocks,

  /// List available page templates
  Templates,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pagesmith=info,warn")),
    )
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let config = AppConfig::load(cli.config.as_deref()).context("failed to load config")?;

  match cli.command {
    Some(Commands::Run {
      product,
      output_dir,
      report,
    }) => {
      run_pipeline(config, product, output_dir, report)?;
    }
    Some(Commands::Validate { output_dir }) => {
      validate(output_dir.unwrap_or(config.output_dir))?;
    }
    Some(Commands::Blocks) => {
      for block in BlockManager::new().available() {
        println!("{:<12} {:<18} {}", block.key, block.name, block.description);
      }
    }
    Some(Commands::Templates) => {
      for template in TemplateManager::new().info() {
        println!(
          "{:<16} {} (requires: {})",
          template.name,
          template.description,
          template.required_fields.join(", ")
        );
      }
    }
    None => {
      println!("pagesmith - use --help to see available commands");
    }
  }

  Ok(())
}

fn run_pipeline(
  mut config: AppConfig,
  product: Option<PathBuf>,
  output_dir: Option<PathBuf>,
  print_report: bool,
) -> Result<()> {
  if let Some(path) = product {
    config.product = RawProduct::from_file(&path).context("failed to load product")?;
  }
  if let Some(dir) = output_dir {
    config.output_dir = dir;
  }

  let mut orchestrator = build_pipeline().context("failed to build pipeline")?;
  let outcome = orchestrator.execute(config.product.to_value());
  let status = orchestrator.status_report();
  let output = PipelineOutput::from_orchestrator(&orchestrator);

  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { write_output(&config.output_dir, &output).await })?;

  if print_report {
    println!("{}", serde_json::to_string_pretty(&status)?);
  }

  match outcome {
    Ok(result) => {
      eprintln!("Execution completed: {}", result.execution_id);
      eprintln!(
        "Nodes completed: {}/{}",
        output.report.successful_nodes, output.report.total_nodes
      );
      for page in output.pages.keys() {
        eprintln!("  {}", config.output_dir.join(format!("{page}.json")).display());
      }
      Ok(())
    }
    Err(e) => {
      error!(error = %e, "workflow_failed");
      if !print_report {
        eprintln!("{}", serde_json::to_string_pretty(&status)?);
      }
      Err(e).context("workflow execution failed")
    }
  }
}

async fn write_output(output_dir: &Path, output: &PipelineOutput) -> Result<()> {
  let store = FsStore::new(output_dir);

  let mut written = Vec::with_capacity(output.pages.len());
  for (page, document) in &output.pages {
    let key = format!("{page}.json");
    store
      .put(&key, document)
      .await
      .with_context(|| format!("failed to write {key}"))?;
    written.push(key);
  }

  let removed = remove_stale_pages(&store, &written)
    .await
    .context("failed to remove stale pages")?;
  if !removed.is_empty() {
    info!(removed = ?removed, "stale_pages_removed");
  }

  let report = serde_json::to_value(&output.report)?;
  store
    .put(REPORT_FILE, &report)
    .await
    .with_context(|| format!("failed to write {REPORT_FILE}"))?;

  info!(
    output_dir = %output_dir.display(),
    pages = output.pages.len(),
    "output_written"
  );
  Ok(())
}

fn validate(output_dir: PathBuf) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  let store = FsStore::new(&output_dir);
  let report = rt
    .block_on(async { validate_outputs(&store).await })
    .with_context(|| format!("failed to read {}", output_dir.display()))?;

  for check in &report.files {
    let mark = if check.exists { "ok" } else { "missing" };
    println!("{:<24} {}", check.file, mark);
  }
  if let Some(n) = report.faq_questions {
    println!("faq questions: {n}");
  }

  if !report.is_valid() {
    for problem in &report.problems {
      eprintln!("  - {problem}");
    }
    bail!("{} problem(s) in {}", report.problems.len(), output_dir.display());
  }

  println!("outputs valid");
  Ok(())
}
