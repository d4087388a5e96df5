use clap::{Parser, Subcommand};

/// Bref - deploy PHP applications on AWS Lambda
#[derive(Parser, Debug)]
#[command(name = "bref")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Package the project and deploy it
    Deploy,

    /// Package the project and invoke a function locally
    Invoke {
        /// Name of the function to invoke
        #[arg(value_name = "FUNCTION")]
        function: String,

        /// JSON payload passed to the function
        #[arg(short, long, value_name = "JSON")]
        data: Option<String>,

        /// Return the raw output of the function instead of the formatted one
        #[arg(long, default_value = "false")]
        raw: bool,
    },
}
