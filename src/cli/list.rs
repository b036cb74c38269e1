//
//  planning-tool
//  cli/list.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Listing commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::model::{StatusType, TestExecution};
use crate::output::{OutputWriter, DEFAULT_INDENT};
use crate::service::latest_per_test_case;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ListCommand {
    #[command(subcommand)]
    pub command: ListSubcommand,

    /// JSON indentation width
    #[arg(long, short = 'i', global = true, default_value_t = DEFAULT_INDENT)]
    pub indent: usize,
}

#[derive(Subcommand, Debug)]
pub enum ListSubcommand {
    /// Test cases executed in a test cycle
    TestCases(TestCasesArgs),

    /// Executions of a test cycle or test case
    TestExecutions(TestExecutionsArgs),

    /// Test cycles, optionally of one project
    TestCycles(TestCyclesArgs),

    /// Workflow statuses
    Statuses(StatusesArgs),
}

#[derive(Args, Debug)]
pub struct TestCasesArgs {
    /// Test cycle key (e.g. BLOCK-R21)
    pub cycle_key: String,
}

#[derive(Args, Debug)]
pub struct TestExecutionsArgs {
    /// Test cycle (…-R…) or test case (…-T…) key
    pub key: String,

    /// Maximum number of executions to print
    #[arg(long = "max", short = 'm', default_value_t = 20)]
    pub max: usize,

    /// Only the most recent execution of each test case
    #[arg(long)]
    pub only_last: bool,
}

#[derive(Args, Debug)]
pub struct TestCyclesArgs {
    /// Jira project key (e.g. BLOCK)
    #[arg(long)]
    pub project: Option<String>,

    /// Maximum number of test cycles to print
    #[arg(long = "max", short = 'm')]
    pub max: Option<usize>,
}

#[derive(Args, Debug)]
pub struct StatusesArgs {
    /// Only statuses of this type (TEST_CASE, TEST_PLAN, TEST_CYCLE, TEST_EXECUTION)
    #[arg(long = "type", short = 't')]
    pub status_type: Option<StatusType>,
}

impl ListCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let out = OutputWriter::new(global.format()).with_indent(self.indent);

        match &self.command {
            ListSubcommand::TestCases(args) => {
                let cases = client
                    .list_test_cases_in_cycle(&args.cycle_key)?
                    .collect_all()
                    .await?;
                out.write_list(&cases)
            }
            ListSubcommand::TestExecutions(args) => {
                let mut records = client.list_test_executions(&args.key)?;
                let executions: Vec<TestExecution> = if args.only_last {
                    let mut latest = latest_per_test_case(records.collect_all().await?);
                    latest.truncate(args.max);
                    latest
                } else {
                    let mut executions = Vec::new();
                    while executions.len() < args.max {
                        match records.try_next().await? {
                            Some(execution) => executions.push(execution),
                            None => break,
                        }
                    }
                    executions
                };
                out.write_list(&executions)
            }
            ListSubcommand::TestCycles(args) => {
                let mut records = client.list_test_cycles(args.project.as_deref())?;
                let mut cycles = Vec::new();
                while args.max.map_or(true, |max| cycles.len() < max) {
                    match records.try_next().await? {
                        Some(cycle) => cycles.push(cycle),
                        None => break,
                    }
                }
                out.write_list(&cycles)
            }
            ListSubcommand::Statuses(args) => {
                let statuses = client.list_statuses(args.status_type).collect_all().await?;
                out.write_list(&statuses)
            }
        }
    }
}
