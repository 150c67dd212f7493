//! HTTP server command
//!
//! Resolves the locator config (defaults, `--config` file, `SRCLOC_ROOT`,
//! flags) and runs the server until shutdown.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use srcloc_core::{DiskTree, Locator, LocatorConfig};
use srcloc_server::{run_server, AppState, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "SRCLOC_BIND", default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Source root to search (overrides config file and SRCLOC_ROOT)
    #[arg(long, short = 'r')]
    pub root: Option<PathBuf>,

    /// TOML config file with root, exclude_dirs, extensions, max_files, max_depth
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Directory name to skip; repeat to list several (replaces the defaults)
    #[arg(long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Source extension without the dot; repeat to list several (replaces the defaults)
    #[arg(long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Give up after reading this many candidate files
    #[arg(long)]
    pub max_files: Option<usize>,

    /// Give up when the walk would go deeper than this
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

/// Merge config sources, lowest precedence first
pub fn resolve_config(args: &ServeArgs) -> Result<LocatorConfig> {
    let mut config = match &args.config {
        Some(path) => LocatorConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => LocatorConfig::default(),
    }
    .apply_env();

    if let Some(root) = &args.root {
        config.root = root.clone();
    }
    if !args.exclude.is_empty() {
        config.exclude_dirs = args.exclude.clone();
    }
    if !args.extensions.is_empty() {
        config.extensions = args
            .extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .collect();
    }
    if args.max_files.is_some() {
        config.budget.max_files = args.max_files;
    }
    if args.max_depth.is_some() {
        config.budget.max_depth = args.max_depth;
    }

    config.validate()?;
    Ok(config)
}

/// Make the root absolute and check it is a directory
async fn canonical_root(root: &Path, cwd: &Path) -> Result<PathBuf> {
    let root = tokio::fs::canonicalize(cwd.join(root))
        .await
        .with_context(|| format!("Source root {} does not exist", root.display()))?;

    let metadata = tokio::fs::metadata(&root)
        .await
        .with_context(|| format!("Cannot read source root {}", root.display()))?;
    if !metadata.is_dir() {
        bail!("Source root {} is not a directory", root.display());
    }

    Ok(root)
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = resolve_config(&args)?;

    let cwd = std::env::current_dir().context("Cannot determine working directory")?;
    let cwd = tokio::fs::canonicalize(&cwd)
        .await
        .context("Cannot resolve working directory")?;
    config.root = canonical_root(&config.root, &cwd).await?;

    tracing::info!(
        root = %config.root.display(),
        exclude = ?config.exclude_dirs,
        extensions = ?config.extensions,
        "Starting srcloc server on {}",
        args.bind
    );

    let locator = Locator::new(Arc::new(DiskTree), config, cwd);
    let server_config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Blocks until shutdown
    run_server(AppState::new(locator), server_config)
        .await
        .context("Server error")?;

    Ok(())
}
