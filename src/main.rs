//! xBRZ - command-line tool for upscaling pixel art images

use std::process::ExitCode;

use xbrz::cli;

fn main() -> ExitCode {
    cli::run()
}
