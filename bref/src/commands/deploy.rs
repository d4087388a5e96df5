//! `bref deploy`: package the project and hand it to the serverless CLI.

use anyhow::Result;
use bref_core::progress::Progress;

use crate::builder::{Builder, BUILD_STEPS};
use crate::{notify, runner};

/// One step more than the build: the upload.
const DEPLOY_STEPS: usize = BUILD_STEPS + 1;

pub fn deploy() -> Result<()> {
    let project_root = std::env::current_dir()?;
    let builder = Builder::new(&project_root);
    let mut progress = Progress::new(DEPLOY_STEPS);

    builder.build(&mut progress)?;

    runner::run("serverless deploy", &builder.output_dir())?;
    progress.advance("Uploading the lambdas");

    notify::send("Deployment success", "The application has been deployed");
    Ok(())
}
