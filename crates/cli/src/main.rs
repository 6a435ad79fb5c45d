mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use slangbuild_lib::{BuildConfig, ConfigLayer, OrchestrateError};

use cmd::{cmd_artifacts, cmd_build, cmd_configure, cmd_info, cmd_install};

/// slangbuild - Build the Slang shader compiler through CMake
#[derive(Parser)]
#[command(name = "slangbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(flatten)]
  config: ConfigArgs,

  #[command(subcommand)]
  command: Commands,
}

/// Configuration flags. These override `SLANGBUILD_*` variables and the config file.
#[derive(Args)]
struct ConfigArgs {
  /// Config file (default: ./slangbuild.toml if present)
  #[arg(long, global = true, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Target platform: linux, macos or windows (default: host)
  #[arg(long, global = true)]
  platform: Option<String>,

  /// macOS architectures: "universal" or a single architecture such as arm64
  #[arg(long, global = true)]
  arch: Option<String>,

  /// CMake configure preset (default: vs2022 on Windows, default elsewhere)
  #[arg(long, global = true)]
  preset: Option<String>,

  /// CMake build preset (default: releaseWithDebugInfo)
  #[arg(long, global = true)]
  build_type: Option<String>,

  /// Slang source checkout (default: slang)
  #[arg(long, global = true, value_name = "DIR")]
  slang_dir: Option<PathBuf>,

  /// Directory receiving the built libraries (default: bin)
  #[arg(long, global = true, value_name = "DIR")]
  output_dir: Option<PathBuf>,

  /// CMake executable (default: cmake)
  #[arg(long, global = true, value_name = "PATH")]
  cmake: Option<PathBuf>,
}

impl ConfigArgs {
  fn layer(&self) -> ConfigLayer {
    ConfigLayer {
      platform: self.platform.clone(),
      arch: self.arch.clone(),
      preset: self.preset.clone(),
      build_type: self.build_type.clone(),
      slang_dir: self.slang_dir.clone(),
      output_dir: self.output_dir.clone(),
      cmake: self.cmake.clone(),
    }
  }

  /// Merge file, environment and flags, in increasing precedence.
  fn resolve(&self) -> Result<BuildConfig> {
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let file = ConfigLayer::discover(self.config.as_deref(), &cwd)?;
    let layer = file.merge(ConfigLayer::from_env()).merge(self.layer());
    Ok(BuildConfig::resolve(layer)?)
  }
}

#[derive(Subcommand)]
enum Commands {
  /// Configure if needed, build, and install Slang's libraries
  Build {
    /// Build even if the artifacts are newer than the sources
    #[arg(short, long)]
    force: bool,

    /// Print what would run without running it
    #[arg(long)]
    dry_run: bool,

    /// Also install the public headers
    #[arg(long)]
    with_headers: bool,
  },

  /// Configure the CMake build tree if it has not been configured yet
  Configure,

  /// List the declared artifacts of the build
  Artifacts {
    /// Print the full manifest as JSON
    #[arg(long)]
    json: bool,

    /// Also list the declared source inputs
    #[arg(long)]
    sources: bool,

    /// Write the JSON manifest to a file
    #[arg(long, value_name = "FILE")]
    write: Option<PathBuf>,
  },

  /// Copy already built artifacts into the output directory
  Install {
    /// Also install the public headers
    #[arg(long)]
    with_headers: bool,
  },

  /// Show the detected platform and resolved configuration
  Info,
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  if let Err(err) = run(cli) {
    output::print_error(&format!("{:#}", err));
    std::process::exit(exit_code(&err));
  }
}

fn init_logging(verbose: bool) {
  let default = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn run(cli: Cli) -> Result<()> {
  let config = cli.config.resolve()?;

  match cli.command {
    Commands::Build {
      force,
      dry_run,
      with_headers,
    } => cmd_build(&config, force, dry_run, with_headers),
    Commands::Configure => cmd_configure(&config),
    Commands::Artifacts { json, sources, write } => cmd_artifacts(&config, json, sources, write.as_deref()),
    Commands::Install { with_headers } => cmd_install(&config, with_headers),
    Commands::Info => cmd_info(&config),
  }
}

/// CMake's own exit code when it failed, `1` for everything else.
fn exit_code(err: &anyhow::Error) -> i32 {
  err
    .chain()
    .find_map(|cause| cause.downcast_ref::<OrchestrateError>())
    .map_or(1, OrchestrateError::exit_code)
}
