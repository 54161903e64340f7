use anyhow::Result;

use crate::args::{ChainsCommand, Cli, Command};

mod chains;
mod doctor;
mod inspect;
mod plan;

pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Chains { host, command } => match command {
            ChainsCommand::List => chains::list(&host).await,
            ChainsCommand::Get { id_or_slug } => chains::get(&host, &id_or_slug).await,
        },
        Command::Plan { dir, loaded } => plan::run(&dir, loaded).await,
        Command::Inspect { candy_machine, mint } => {
            inspect::run(&candy_machine, mint.as_deref()).await
        }
        Command::Doctor => doctor::run().await,
    }
}
