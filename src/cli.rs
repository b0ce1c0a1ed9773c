//! Command-line definitions.

use clap::{Parser, Subcommand};
use workload_args::{CommonWorkloadArgs, InitArgs, RunArgs};
use workload_mysql::MySqlConnectionArgs;

#[derive(Parser, Debug)]
#[command(name = "mysql-workload")]
#[command(about = "A concurrent write workload generator for MySQL")]
#[command(long_about = None)]
pub struct Cli {
    /// MySQL connection options
    #[command(flatten)]
    pub connection: MySqlConnectionArgs,

    #[command(flatten)]
    pub common: CommonWorkloadArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the tables and populate them with initial test data
    Init {
        #[command(flatten)]
        args: InitArgs,
    },

    /// Run the workload generator until interrupted
    Run {
        #[command(flatten)]
        args: RunArgs,
    },
}
