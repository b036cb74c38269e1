//
//  planning-tool
//  cli/get.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Single-record commands
//!
//! `get test-cycle`, `get test-case` and `get test-execution` support three
//! parse modes:
//!
//! * `raw` - the vendor JSON, verbatim, indented with `--indent` spaces
//! * `full` - the mapped record, with status and folder names resolved
//! * `simple` - key, name and status only

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

use crate::api::ApiError;
use crate::model::{KeyKind, RecordKey};
use crate::output::{OutputWriter, DEFAULT_INDENT};
use crate::service::ZephyrClient;

use super::{GlobalOptions, Summary};

#[derive(Args, Debug)]
pub struct GetCommand {
    #[command(subcommand)]
    pub command: GetSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GetSubcommand {
    /// Fetch a test cycle (e.g. BLOCK-R21)
    TestCycle(RecordArgs),

    /// Fetch a test case (e.g. BLOCK-T21)
    TestCase(RecordArgs),

    /// Fetch a test execution (e.g. BLOCK-E1024)
    TestExecution(RecordArgs),

    /// List the steps of a test case or test execution
    Steps(StepsArgs),

    /// Fetch a status by id
    Status(StatusArgs),

    /// Fetch a Jira user by account id
    User(UserArgs),
}

/// How much of a record to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ParseMode {
    Raw,
    Full,
    Simple,
}

#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Record key or numeric id
    pub key: String,

    /// What to print
    #[arg(long, short = 'p', value_enum, default_value_t = ParseMode::Raw)]
    pub parse: ParseMode,

    /// JSON indentation width; 0 prints compact JSON
    #[arg(long, short = 'i', default_value_t = DEFAULT_INDENT)]
    pub indent: usize,
}

#[derive(Args, Debug)]
pub struct StepsArgs {
    /// Test case (…-T…) or test execution (…-E…) key
    pub key: String,

    /// JSON indentation width
    #[arg(long, short = 'i', default_value_t = DEFAULT_INDENT)]
    pub indent: usize,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Numeric status id
    pub id: u64,

    /// JSON indentation width
    #[arg(long, short = 'i', default_value_t = DEFAULT_INDENT)]
    pub indent: usize,
}

#[derive(Args, Debug)]
pub struct UserArgs {
    /// Jira account id
    pub account_id: String,

    /// JSON indentation width
    #[arg(long, short = 'i', default_value_t = DEFAULT_INDENT)]
    pub indent: usize,
}

impl GetCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;

        match &self.command {
            GetSubcommand::TestCycle(args) => self.test_cycle(&client, args, global).await,
            GetSubcommand::TestCase(args) => self.test_case(&client, args, global).await,
            GetSubcommand::TestExecution(args) => self.test_execution(&client, args, global).await,
            GetSubcommand::Steps(args) => self.steps(&client, args, global).await,
            GetSubcommand::Status(args) => {
                let status = client.get_status(args.id).await?;
                writer(global, args.indent).write(&status)
            }
            GetSubcommand::User(args) => {
                let user = client.get_user(&args.account_id).await?;
                writer(global, args.indent).write(&user)
            }
        }
    }

    async fn test_cycle(
        &self,
        client: &ZephyrClient,
        args: &RecordArgs,
        global: &GlobalOptions,
    ) -> Result<()> {
        let out = writer(global, args.indent);
        match args.parse {
            ParseMode::Raw => out.write_raw(&client.get_test_cycle_raw(&args.key).await?),
            ParseMode::Full => out.write(&client.get_test_cycle(&args.key).await?),
            ParseMode::Simple => {
                out.write(&Summary::from(&client.get_test_cycle(&args.key).await?))
            }
        }
    }

    async fn test_case(
        &self,
        client: &ZephyrClient,
        args: &RecordArgs,
        global: &GlobalOptions,
    ) -> Result<()> {
        let out = writer(global, args.indent);
        match args.parse {
            ParseMode::Raw => out.write_raw(&client.get_test_case_raw(&args.key).await?),
            ParseMode::Full => out.write(&client.get_test_case(&args.key).await?),
            ParseMode::Simple => out.write(&Summary::from(&client.get_test_case(&args.key).await?)),
        }
    }

    async fn test_execution(
        &self,
        client: &ZephyrClient,
        args: &RecordArgs,
        global: &GlobalOptions,
    ) -> Result<()> {
        let out = writer(global, args.indent);
        match args.parse {
            ParseMode::Raw => out.write_raw(&client.get_test_execution_raw(&args.key).await?),
            ParseMode::Full => out.write(&client.get_test_execution(&args.key).await?),
            ParseMode::Simple => {
                out.write(&Summary::from(&client.get_test_execution(&args.key).await?))
            }
        }
    }

    async fn steps(
        &self,
        client: &ZephyrClient,
        args: &StepsArgs,
        global: &GlobalOptions,
    ) -> Result<()> {
        let key = RecordKey::parse(&args.key)?;
        let steps = match key.kind() {
            Some(KeyKind::TestCase) => client.get_test_case_steps(&args.key)?.collect_all().await?,
            Some(KeyKind::TestExecution) => {
                client.get_test_execution_steps(&args.key)?.collect_all().await?
            }
            _ => {
                return Err(ApiError::invalid(format!(
                    "'{}' is not a test case or test execution key",
                    args.key
                ))
                .into())
            }
        };
        writer(global, args.indent).write_list(&steps)
    }
}

fn writer(global: &GlobalOptions, indent: usize) -> OutputWriter {
    OutputWriter::new(global.format()).with_indent(indent)
}
