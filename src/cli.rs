//! Command-line flags.

use clap::{ArgAction, Parser, ValueEnum};

use crate::client::AwsConfig;
use crate::sweep::{SweepMode, SweepOptions};
use crate::table_operations::{Pagination, WaitPolicy};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// List, filter and delete DynamoDB tables.
///
/// Without --delete the matching tables are printed. With --delete they are
/// deleted one by one and the tool waits until DynamoDB stops listing them.
#[derive(Debug, Parser)]
#[command(name = "dynoprune", author, version)]
pub struct Cli {
    /// AWS region
    #[arg(short = 'r', long)]
    pub region: String,

    /// Filter tables by substring (case-insensitive, repeatable)
    #[arg(short = 'f', long = "filter", value_name = "SUBSTRING")]
    pub filters: Vec<String>,

    /// Delete the matching tables
    #[arg(short = 'd', long)]
    pub delete: bool,

    /// Report what would be deleted without deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity: -v = Debug, -vv = Trace
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// AWS profile used for credentials
    #[arg(long)]
    pub profile: Option<String>,

    /// Custom DynamoDB endpoint (DynamoDB Local, LocalStack)
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Only read the first page of ListTables results
    #[arg(long)]
    pub single_page: bool,
}

impl Cli {
    pub fn aws_config(&self) -> AwsConfig {
        AwsConfig {
            region: Some(self.region.clone()),
            profile: self.profile.clone(),
            endpoint_url: self.endpoint_url.clone(),
        }
    }

    pub fn sweep_options(&self) -> SweepOptions {
        SweepOptions {
            mode: SweepMode::from_flags(self.delete, self.dry_run),
            filters: self.filters.clone(),
            pagination: if self.single_page {
                Pagination::SinglePage
            } else {
                Pagination::Exhaustive
            },
            wait: WaitPolicy::default(),
        }
    }
}
