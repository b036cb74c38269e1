//
//  planning-tool
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Output formatting for the `zapi` CLI:
//!
//! - **Table format**: Human-readable output for interactive terminal use
//! - **JSON format**: Machine-readable JSON for scripting and automation
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: The available output formats
//! - [`OutputWriter`]: Main entry point for writing formatted output
//! - [`TableOutput`]: Trait for types that can be rendered for a terminal
//!
//! ## Example
//!
//! ```rust,ignore
//! use planning_tool::output::{OutputWriter, OutputFormat};
//!
//! let writer = OutputWriter::new(OutputFormat::Json).with_indent(2);
//! writer.write(&cycle)?;
//! writer.write_success("Custom field updated");
//! ```

mod json;
mod table;

pub use json::*;
pub use table::*;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
    indent: usize,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
            indent: DEFAULT_INDENT,
        }
    }

    /// Spaces per level of JSON nesting.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", to_json_string(value, self.indent)?),
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes a list. Tables get one row per value under a shared header.
    pub fn write_list<T: Serialize + TableRow>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", to_json_string(&values, self.indent)?),
            OutputFormat::Table => {
                if values.is_empty() {
                    self.write_info("No results");
                } else {
                    TableBuilder::new()
                        .color(self.color)
                        .headers(T::headers().iter().copied())
                        .rows(values.iter().map(|v| v.row(self.color)))
                        .print();
                }
            }
        }
        Ok(())
    }

    /// Writes any JSON value regardless of format; used for raw vendor payloads.
    pub fn write_raw(&self, value: &serde_json::Value) -> anyhow::Result<()> {
        println!("{}", to_json_string(value, self.indent)?);
        Ok(())
    }

    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }

    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Types that render themselves as a detail view in the terminal.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

/// Types that render as one row of a list table.
pub trait TableRow {
    fn headers() -> &'static [&'static str];

    fn row(&self, color: bool) -> Vec<String>;
}

pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}
