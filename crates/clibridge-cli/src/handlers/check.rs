//! Check command handler.
//!
//! Runs the backend's version probe once and reports the result.

use clibridge_core::GenerationBackend;
use clibridge_runtime::CliBackend;

use crate::commands::BackendArgs;
use crate::error::CliError;

/// Execute the check command.
pub async fn execute(args: BackendArgs) -> Result<(), CliError> {
    let config = args.to_config();
    let program = config.program_name();
    let backend = CliBackend::new(config);

    let version = backend.probe(args.probe_timeout()).await?;
    if version.is_empty() {
        println!("✓ Backend available: {program}");
    } else {
        println!("✓ Backend available: {version}");
    }
    Ok(())
}
