mod input;
mod report;

pub use input::{matrix_from_rows, GradientJob};

use self::report::{report_calculation_info, report_gradient_summary};
use crate::config::{Args, Config};
use crate::gradient_impl::{compute_gradient, ScfGradient};
use crate::io::{setup_output, GradientWriter};
use crate::symmetry_impl::{ao_to_so_block, so_block_to_ao};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::fs;
use tracing::{debug, info, warn};

/// Above this the SO -> AO -> SO round trip of the orbitals is reported.
const ROUND_TRIP_TOLERANCE: f64 = 1e-8;

pub struct DerivApplication {
    args: Args,
    config: Config,
}

impl DerivApplication {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let mut config = load_config(&args.config_file)?;
        config.apply_overrides(&args);
        Ok(Self { args, config })
    }

    pub fn run(self) -> Result<()> {
        setup_output(self.args.output.as_ref());
        info!("Reading configuration from: {}", self.args.config_file);

        let job = GradientJob::from_config(&self.config)?;
        let gradient = run_job(&job)?;

        let path = self.config.gradient_file();
        GradientWriter::new(job.molecule(), &gradient.total, job.reference.energy())?
            .with_label(self.config.label())
            .write(&path)
            .wrap_err_with(|| format!("Unable to write gradient file: {}", path))?;

        Ok(())
    }
}

/// Evaluate the gradient for a prepared job, logging the inputs and the
/// result along the way.
pub fn run_job(job: &GradientJob) -> Result<ScfGradient> {
    report_calculation_info(&job.basis, &job.reference);
    check_orbital_round_trip(job)?;

    let gradient = compute_gradient(&job.context()).wrap_err("Gradient evaluation failed")?;
    report_gradient_summary(&gradient);
    Ok(gradient)
}

/// Transform the orbitals to the AO basis and back; a large deviation means
/// the two SO tables of the job file do not belong together.
fn check_orbital_round_trip(job: &GradientJob) -> Result<()> {
    let ca = job.reference.ca();
    let cao = so_block_to_ao(ca, &job.transform)?;
    let back = ao_to_so_block(&cao, &job.transform, job.reference.nmopi())?;

    let deviation = (0..ca.nirrep())
        .map(|h| (ca.block(h) - back.block(h)).amax())
        .fold(0.0, f64::max);
    debug!("SO -> AO -> SO orbital round trip deviation: {:.3e}", deviation);
    if deviation > ROUND_TRIP_TOLERANCE {
        warn!(
            "SO -> AO -> SO round trip changes the orbitals by {:.3e}; check the SO transform",
            deviation
        );
    }
    Ok(())
}

pub fn load_config(path: &str) -> Result<Config> {
    let config_content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", path))?;

    let config = serde_yml::from_str::<Config>(&config_content)
        .wrap_err("Failed to parse configuration file")?
        .with_defaults();

    Ok(config)
}
