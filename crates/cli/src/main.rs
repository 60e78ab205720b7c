//! s3cp - copy files between the local filesystem and S3
//!
//! Copies any number of files concurrently, resolving and caching the region
//! of every bucket involved.

use clap::Parser;
use s3cp::commands::{self, Cli};
use s3cp::exit_code::ExitCode;
use s3cp::logging;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and are not failures
            let _ = e.print();
            let code = if e.use_stderr() {
                ExitCode::GeneralError
            } else {
                ExitCode::Success
            };
            std::process::exit(code.as_i32());
        }
    };

    logging::init(cli.verbose);

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
