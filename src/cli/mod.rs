//
//  planning-tool
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod auth;
mod comment;
mod completion;
mod config;
mod cycle;
mod display;
mod get;
mod list;

pub use auth::AuthCommand;
pub use comment::CommentCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use cycle::CycleCommand;
pub use display::Summary;
pub use get::{GetCommand, ParseMode};
pub use list::ListCommand;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::{Config, Overrides};
use crate::output::OutputFormat;
use crate::service::ZephyrClient;

/// Root command
#[derive(Parser, Debug)]
#[command(
    name = "zapi",
    version,
    about = "Work with Zephyr Scale test cycles and Jira from the command line",
    long_about = "zapi reads and writes the test cycles, test cases and test executions \
                  stored in Zephyr Scale, and posts log comments to Jira.\n\n\
                  Credentials are read from ZEPHYR_API_TOKEN, JIRA_API_TOKEN and JIRA_USERNAME.",
    propagate_version = true,
    after_help = "Use 'zapi <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Zephyr Scale API token
    #[arg(long, global = true, env = "ZEPHYR_API_TOKEN", hide_env_values = true)]
    pub zephyr_token: Option<String>,

    /// Jira API token
    #[arg(long, global = true, env = "JIRA_API_TOKEN", hide_env_values = true)]
    pub jira_token: Option<String>,

    /// Jira account username (usually an email address)
    #[arg(long, global = true, env = "JIRA_USERNAME")]
    pub jira_username: Option<String>,

    /// Zephyr Scale API base URL
    #[arg(long, global = true, env = "ZEPHYR_BASE_URL")]
    pub zephyr_url: Option<String>,

    /// Jira REST API base URL
    #[arg(long, global = true, env = "JIRA_BASE_URL")]
    pub jira_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Records requested per page from list endpoints
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,
}

impl GlobalOptions {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            zephyr_token: self.zephyr_token.clone(),
            jira_token: self.jira_token.clone(),
            jira_username: self.jira_username.clone(),
            zephyr_base_url: self.zephyr_url.clone(),
            jira_base_url: self.jira_url.clone(),
            timeout_secs: self.timeout,
            page_size: self.page_size,
        }
    }

    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }

    /// Builds a client from flags, environment and the configuration file.
    pub fn client(&self) -> Result<ZephyrClient> {
        let config = Config::load()?;
        let overrides = self.overrides();
        let credentials = config.resolve_credentials(&overrides)?;
        Ok(ZephyrClient::with_options(
            credentials,
            config.client_options(&overrides),
        )?)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a single record
    Get(GetCommand),

    /// List records
    #[command(visible_alias = "ls")]
    List(ListCommand),

    /// Create and modify test cycles
    Cycle(CycleCommand),

    /// Post a comment on a Jira issue
    Comment(CommentCommand),

    /// Check credentials
    Auth(AuthCommand),

    /// Manage the configuration file
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Show version information
    Version,
}
