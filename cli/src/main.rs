mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, scan};
use knock_common::config::Config;
use terminal::{print, spinner};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let commands: CommandLine = CommandLine::parse_args();
    let cfg: Config = commands.to_config();

    spinner::init_logging(cfg.verbose);
    print::initialize();
    print::banner(cfg.no_banner);

    print::header("starting scanner");
    scan::scan(&commands.url, commands.types, &cfg).await
}
