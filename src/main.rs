//! Gradient command-line interface
//!
//! Reads a YAML job file, evaluates the RHF gradient and appends it to the
//! gradient file.

use color_eyre::eyre::Result;
use scf_deriv::app::DerivApplication;

fn main() -> Result<()> {
    color_eyre::install()?;
    DerivApplication::from_cli()?.run()
}
