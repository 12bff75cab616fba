use crate::error::CliError;
use std::path::Path;
use tailpod_config::{HostEnvironment, load_complete};

pub fn generate_artifacts(path: &Path, out: &Path) -> Result<(), CliError> {
    let env = HostEnvironment::current()?;
    let config = load_complete(path, &env)?;

    for file in tailpod_generate::generate(&config, out)? {
        println!("{}", file.display());
    }
    Ok(())
}
