use anyhow::Result;

use crate::args::{Cli, Command};

mod board;
mod burn;
mod doctor;
mod identity;
mod pda;
mod ranks;
mod rewards;

pub async fn dispatch(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Ranks => ranks::list(),
        Command::Rank { total } => ranks::project(total),
        Command::Pda { owner } => pda::run(&cli, owner),
        Command::Profile { owner, raw } => identity::profile(&cli, owner, *raw).await,
        Command::Check { owner, min_rank } => identity::check(&cli, owner, *min_rank).await,
        Command::Balance { owner } => identity::balance(&cli, owner).await,
        Command::Leaderboard { limit } => board::leaderboard(&cli, *limit).await,
        Command::Hall => board::hall(&cli).await,
        Command::Create(args) => burn::run(&cli, args, burn::Action::Create).await,
        Command::Upgrade(args) => burn::run(&cli, args, burn::Action::Upgrade).await,
        Command::Rewards { watch, interval, limit } => rewards::run(&cli, *watch, *interval, *limit).await,
        Command::Doctor => doctor::run(&cli).await,
    }
}
