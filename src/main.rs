use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use passage_typist::{
    app::config::load_config,
    cli::Cli,
    generator::{self, ParagraphSource},
    logging::init_logging,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.log_level.as_deref());
    info!(version = env!("CARGO_PKG_VERSION"), "passage-typist starting");

    let mut config = load_config();
    cli.apply(&mut config);

    if cli.print_passage {
        let source = ParagraphSource::from_config(&config);
        let passage = generator::generate_for_config(&source, &config);
        if passage.is_empty() {
            eprintln!("no paragraphs available from {source:?}");
            return ExitCode::FAILURE;
        }
        println!("{passage}");
        return ExitCode::SUCCESS;
    }

    match passage_typist::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("passage-typist: {err}");
            ExitCode::FAILURE
        }
    }
}
