//! Entry point for the `devlink` command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::init();
    if let Err(err) = devlink_cli::run() {
        report(&err);
        std::process::exit(1);
    }
}

#[expect(clippy::print_stderr, reason = "the CLI reports failures on stderr")]
fn report(err: &devlink_cli::CliError) {
    eprintln!("devlink: {err}");
}
