use clap::Parser;

use dirscrub::sanitize::{self, SanitizeSpec};

mod output;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Takes no arguments: the target term is fixed at build time and the
/// current working directory is the one sanitized.
#[derive(Parser)]
#[command(name = "dirscrub")]
#[command(version = VERSION)]
#[command(about = "Strip a fixed term from every file's content and name in the current directory")]
struct Cli {}

fn main() -> std::process::ExitCode {
    let _cli = Cli::parse();

    let result =
        SanitizeSpec::from_defaults().and_then(|spec| sanitize::sanitize_working_dir(&spec));

    let report = match result {
        Ok(report) => report,
        Err(err) => {
            output::print_error(&err);
            return std::process::ExitCode::from(exit_code_to_u8(output::exit_code_for_error(
                err.code,
            )));
        }
    };

    if let Err(err) = output::print_completion(&report) {
        output::print_error(&err);
        return std::process::ExitCode::from(exit_code_to_u8(output::exit_code_for_error(
            err.code,
        )));
    }

    std::process::ExitCode::SUCCESS
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
