//! CLI Tooling
//!
//! Command-line interface for reading and editing an infinite database.

use crate::config::{ConfigLoader, InfiniteConfig};
use crate::conn::Connection;
use crate::error::ApiError;
use crate::fs::{FsProvider, OsFs};
use crate::logging::LoggingConfig;
use crate::tree::{CancelToken, Node};
use crate::types::Depth;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Infinite CLI - the database that can store the internet
#[derive(Parser)]
#[command(name = "infinite")]
#[command(about = "The database that can store the internet")]
pub struct Cli {
    /// Command to run (prints the root value when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Working directory that relative database paths resolve against
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The requested command, or `value` on the configured root.
    pub fn resolved_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Value {
            path: None,
            set: None,
        })
    }

    /// Fold the logging flags over the configured logging settings.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the value of a node
    #[command(visible_alias = "v")]
    Value {
        /// Node directory (defaults to the configured root)
        path: Option<PathBuf>,
        /// Set the value to the given string after printing it
        #[arg(short, long)]
        set: Option<String>,
    },
    /// Print the keys of a node's children
    #[command(visible_alias = "c")]
    Children {
        /// Node directory (defaults to the configured root)
        path: Option<PathBuf>,
        /// Create a new child with the given key after listing
        #[arg(short, long)]
        new: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the key tree below a node
    #[command(visible_alias = "t")]
    Tree {
        /// Node directory (defaults to the configured root)
        path: Option<PathBuf>,
        /// Levels to read (defaults to storage.depth, else everything)
        #[arg(long)]
        depth: Option<usize>,
    },
}

/// Resolved configuration plus the filesystem the commands run against.
pub struct CliContext {
    workspace_root: PathBuf,
    config: InfiniteConfig,
    provider: Arc<dyn FsProvider>,
}

impl CliContext {
    /// Create a CLI context over the host filesystem.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self::with_provider(workspace_root, config, Arc::new(OsFs::new())))
    }

    /// Create a CLI context over an arbitrary provider.
    pub fn with_provider(
        workspace_root: PathBuf,
        config: InfiniteConfig,
        provider: Arc<dyn FsProvider>,
    ) -> Self {
        Self {
            workspace_root,
            config,
            provider,
        }
    }

    pub fn config(&self) -> &InfiniteConfig {
        &self.config
    }

    fn connection(&self, path: Option<&PathBuf>) -> Connection {
        let path = match path {
            Some(path) => self.workspace_root.join(path),
            None => self.config.storage.resolve_root(&self.workspace_root),
        };
        Connection::new(path, Arc::clone(&self.provider))
    }

    /// Save a modified tree with the configured filename budget.
    fn save(&self, node: &Node) -> Result<(), ApiError> {
        let codec = self.config.storage.codec()?;
        node.save_with(&codec, &CancelToken::new())?;
        info!(path = %node.path().display(), "Saved node");
        Ok(())
    }

    /// Run one command and return what it prints.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Value { path, set } => self.execute_value(path.as_ref(), set.as_deref()),
            Commands::Children { path, new, format } => {
                self.execute_children(path.as_ref(), new.as_deref(), format)
            }
            Commands::Tree { path, depth } => {
                let depth = depth
                    .map(Depth::Limited)
                    .unwrap_or_else(|| self.config.storage.depth());
                self.execute_tree(path.as_ref(), depth)
            }
        }
    }

    fn execute_value(&self, path: Option<&PathBuf>, set: Option<&str>) -> Result<String, ApiError> {
        let conn = self.connection(path);
        match set {
            None => {
                let node = Node::load_depth(conn, Depth::Limited(1))?;
                Ok(String::from_utf8_lossy(node.value()?).into_owned())
            }
            Some(new_value) => {
                // Save rewrites the whole subtree, so all of it must be loaded.
                let mut node = Node::load(conn)?;
                let old = String::from_utf8_lossy(node.value()?).into_owned();
                node.set_value(new_value)?;
                self.save(&node)?;
                Ok(old)
            }
        }
    }

    fn execute_children(
        &self,
        path: Option<&PathBuf>,
        new: Option<&str>,
        format: &str,
    ) -> Result<String, ApiError> {
        if format != "text" && format != "json" {
            return Err(ApiError::ConfigError(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                format
            )));
        }

        let conn = self.connection(path);
        let depth = if new.is_some() {
            Depth::Unbounded
        } else {
            Depth::Limited(1)
        };
        let mut node = Node::load_depth(conn, depth)?;

        let keys: Vec<String> = node.keys()?.into_iter().map(str::to_string).collect();
        let output = if format == "json" {
            serde_json::to_string_pretty(&keys)
                .map_err(|e| ApiError::ConfigError(format!("Failed to render keys: {}", e)))?
        } else {
            keys.join("\n")
        };

        if let Some(key) = new {
            node.new_child(key)?;
            self.save(&node)?;
        }
        Ok(output)
    }

    fn execute_tree(&self, path: Option<&PathBuf>, depth: Depth) -> Result<String, ApiError> {
        let node = Node::load_depth(self.connection(path), depth)?;
        let mut out = String::new();
        out.push_str(&format!("{}\n", node.path().display()));
        render_tree(&node, 1, &mut out)?;
        Ok(out.trim_end().to_string())
    }
}

fn render_tree(node: &Node, level: usize, out: &mut String) -> Result<(), ApiError> {
    if !node.is_loaded() {
        return Ok(());
    }
    for (key, child) in node.children()? {
        let marker = if child.is_loaded() { "" } else { " ..." };
        out.push_str(&format!("{}{}{}\n", "  ".repeat(level), key, marker));
        render_tree(child, level + 1, out)?;
    }
    Ok(())
}
