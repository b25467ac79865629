use std::io::IsTerminal;

use wfind::cli;

fn main() {
    let cli = cli::parse_or_exit();
    let colorize = std::io::stdout().is_terminal();

    let options = match cli::build_options(cli, colorize) {
        Ok(options) => options,
        Err(err) => wfind::print_error_and_exit!("{err:#}"),
    };

    let exit_code = wfind::run(options);
    std::process::exit(exit_code.into());
}
