use colored::Colorize;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let command_line_interface = json_dto::cli::CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        eprintln!("{}", format!("error: {error:#}").red());
        std::process::exit(1);
    }
}
