//! Command-line argument parsing for gradient runs

use clap::Parser;

/// Analytic RHF nuclear gradient from a converged SCF job file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML job file
    #[arg(short, long, default_value = "gradient.yaml")]
    pub config_file: String,

    /// Override output file: (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override the gradient file (default psi.file11.dat)
    #[arg(long)]
    pub gradient_file: Option<String>,

    /// Override the label written on the first line of the gradient record
    #[arg(long)]
    pub label: Option<String>,
}
