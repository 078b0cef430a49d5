//! Command line and site configuration.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::assets::DEFAULT_THEME;
use crate::draft::CATEGORIES;
use crate::query::{ALL_CATEGORIES, DEFAULT_PAGE_SIZE};

/// Command line configuration for devlog.
#[derive(Debug, Clone, Parser)]
#[command(name = "devlog", version, about, long_about = None)]
pub struct Config {
    /// JSON file holding posts, comments, accounts and the session
    #[arg(long, global = true, default_value = "devlog.json")]
    pub store: PathBuf,

    /// Optional TOML site configuration
    #[arg(long, global = true)]
    pub site_config: Option<PathBuf>,

    /// Print debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generate the static site
    Build {
        /// Output directory
        #[arg(short, long, default_value = "dist")]
        output: PathBuf,

        /// Do not open the generated site in a browser
        #[arg(long)]
        no_open: bool,

        /// Syntax highlighting theme for code in posts
        #[arg(long, default_value = DEFAULT_THEME)]
        theme: String,
    },
    /// Render a markdown file in the editor with its live preview
    Preview {
        /// Markdown source
        file: PathBuf,

        /// Write the editor page here instead of printing the preview markup
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print one listing page
    List {
        #[arg(short, long, default_value = ALL_CATEGORIES)]
        category: String,

        /// Case insensitive title search
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Print a post with its comments
    Show { id: String },
    /// Publish a markdown file as the signed in user
    Publish {
        /// Markdown body
        content: PathBuf,

        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "Frontend")]
        category: String,

        /// Comma separated
        #[arg(long, default_value = "")]
        tags: String,

        /// Minutes
        #[arg(long, default_value_t = 5)]
        read_time: u32,
    },
    /// Sign in and keep the session in the store
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Register a new account
    Signup {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// End the current session
    Logout,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if an input markdown file or the site config does not exist.
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.site_config
            && !path.exists()
        {
            bail!("Site config does not exist: {}", path.display());
        }

        match &self.command {
            Command::Preview { file, .. } | Command::Publish { content: file, .. }
                if !file.exists() =>
            {
                bail!("Markdown file does not exist: {}", file.display());
            }
            _ => Ok(()),
        }
    }

    /// Loads the site configuration, or the defaults when none was given.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn site(&self) -> Result<SiteConfig, ConfigError> {
        match &self.site_config {
            Some(path) => SiteConfig::load(path),
            None => Ok(SiteConfig::default()),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site wide settings read from TOML.
///
/// ```toml
/// title = "Team Devlog"
/// categories = ["Backend", "Database"]
/// posts_per_page = 9
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub title: String,
    /// Listing tabs after the "All posts" tab, and the editor's choices.
    pub categories: Vec<String>,
    pub posts_per_page: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Devlog".to_string(),
            categories: CATEGORIES.iter().map(|c| c.to_string()).collect(),
            posts_per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SiteConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.posts_per_page == 0 {
            return Err(ConfigError::Validation(
                "posts_per_page must be at least 1".into(),
            ));
        }
        if self.categories.is_empty() {
            return Err(ConfigError::Validation(
                "categories must not be empty".into(),
            ));
        }
        for (i, category) in self.categories.iter().enumerate() {
            if category.trim().is_empty() {
                return Err(ConfigError::Validation("category names must not be blank".into()));
            }
            if category == ALL_CATEGORIES {
                return Err(ConfigError::Validation(format!(
                    "\"{ALL_CATEGORIES}\" is reserved for the unfiltered listing"
                )));
            }
            if self.categories[..i].contains(category) {
                return Err(ConfigError::Validation(format!(
                    "duplicate category \"{category}\""
                )));
            }
        }
        Ok(())
    }

    /// Listing tabs in display order, starting with the unfiltered one.
    pub fn tabs(&self) -> impl Iterator<Item = &str> {
        std::iter::once(ALL_CATEGORIES).chain(self.categories.iter().map(String::as_str))
    }
}
