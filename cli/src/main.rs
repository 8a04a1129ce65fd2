mod commands;
mod terminal;

use std::io;

use commands::{CommandLine, select, sweep};
use pingsweep_common::config::Config;
use pingsweep_common::network::interface;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);
    let cfg = Config::new();

    let mut stdout = io::stdout();
    print::clear_screen(&mut stdout)?;

    let menu = match interface::local_ipv4_prefixes() {
        Ok(menu) => menu,
        Err(e) => {
            print::error(&mut stdout, &e)?;
            Vec::new()
        }
    };

    let request = match select::choose_request(&menu, &mut io::stdin().lock(), &mut stdout) {
        Ok(request) => request,
        Err(e) => {
            print::error(&mut stdout, &e)?;
            return Ok(());
        }
    };

    print::clear_screen(&mut stdout)?;
    sweep::sweep(request, &cfg).await
}
