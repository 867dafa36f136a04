use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use filetree::config::{MergedSettings, load_merged_settings};
use filetree::ingest::{Loader, LoaderOptions};
use filetree::node::{Key, Node, render, render_values};
use filetree::paths::PathResolver;

#[derive(Parser)]
#[command(name = "filetree")]
#[command(
	author,
	version,
	about = "Load config files, plain files and directories into one navigable tree"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Project root used for path resolution (overrides .filetree.toml)
	#[arg(long, global = true, value_name = "DIR")]
	project_root: Option<PathBuf>,

	/// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Load a file and print its tree
	Show {
		/// File or directory to load
		path: String,

		/// Print leaf values instead of the bare shape
		#[arg(long)]
		values: bool,
	},
	/// Load a file and print the node found at a key path
	Get {
		/// File or directory to load
		path: String,

		/// Keys to follow; all-digit keys index lists
		#[arg(required = true)]
		keys: Vec<String>,
	},
	/// Resolve a path string the way document values are resolved
	Resolve {
		/// Path string to resolve
		probe: String,

		/// Base directory tried before the project root
		#[arg(long, value_name = "DIR")]
		base: Option<PathBuf>,
	},
	/// Settings management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display merged effective settings with their source files
	Show,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_logging(cli.verbose)?;

	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let settings = load_merged_settings(&cwd).context("Failed to load settings")?;

	let options = loader_options(&settings, cli.project_root, &cwd);

	match cli.command {
		Commands::Show { path, values } => handle_show(Loader::from_options(options), &path, values),
		Commands::Get { path, keys } => handle_get(Loader::from_options(options), &path, &keys),
		Commands::Resolve { probe, base } => handle_resolve(&options, &probe, base.as_deref()),
		Commands::Config { action } => match action {
			ConfigAction::Show => handle_config_show(&settings, &options),
		},
	}
}

fn init_logging(verbose: u8) -> Result<()> {
	let default_level = match verbose {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	let subscriber = FmtSubscriber::builder()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;
	Ok(())
}

/// Settings from `.filetree.toml`, with the working directory as the
/// default project root and `--project-root` on top.
fn loader_options(
	settings: &MergedSettings,
	project_root: Option<PathBuf>,
	cwd: &Path,
) -> LoaderOptions {
	let mut options = settings.loader_options(cwd.to_path_buf());
	if let Some(root) = project_root {
		options.resolver = PathResolver::new(root);
	}
	options
}

fn load_tree(mut loader: Loader, path: &str) -> Result<Node> {
	loader
		.load(path)
		.with_context(|| format!("Failed to load {}", path))
}

fn handle_show(loader: Loader, path: &str, values: bool) -> Result<ExitCode> {
	let root = load_tree(loader, path)?;
	let rendered = if values {
		render_values(&root, 0)
	} else {
		render(&root, 0)
	};
	print!("{}", rendered);
	Ok(ExitCode::SUCCESS)
}

fn handle_get(loader: Loader, path: &str, keys: &[String]) -> Result<ExitCode> {
	let root = load_tree(loader, path)?;
	let keys: Vec<Key> = keys.iter().map(|k| Key::parse(k)).collect();
	let node = root
		.get_path(&keys)
		.with_context(|| format!("Failed to index {} with {:?}", path, keys))?;

	match node {
		Node::Leaf(scalar) => println!("{}", scalar),
		_ => print!("{}", render_values(node, 0)),
	}
	Ok(ExitCode::SUCCESS)
}

fn handle_resolve(options: &LoaderOptions, probe: &str, base: Option<&Path>) -> Result<ExitCode> {
	let base = base.unwrap_or(Path::new(""));
	match options
		.resolver
		.resolve(probe, base)
		.with_context(|| format!("Failed to resolve {}", probe))?
	{
		Some(resolved) => {
			println!("{}", resolved.display());
			Ok(ExitCode::SUCCESS)
		}
		None => {
			eprintln!("no match for {}", probe);
			Ok(ExitCode::FAILURE)
		}
	}
}

fn handle_config_show(settings: &MergedSettings, options: &LoaderOptions) -> Result<ExitCode> {
	if settings.sources.is_empty() {
		println!("No settings files found.");
	} else {
		println!("Settings files (in cascade order):");
		for source in &settings.sources {
			println!("  {}", source.display());
		}
	}
	println!();

	println!("project-root: {}", options.resolver.project_root().display());
	println!("cache-includes: {}", options.cache_includes);
	println!("formats:");
	for (extension, format) in options.formats.iter() {
		println!("  {} = {}", extension, format);
	}

	Ok(ExitCode::SUCCESS)
}
