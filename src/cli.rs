use crate::commands;
use crate::config::Config;
use crate::types::LifecycleOperation;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pocket-nodes",
    version,
    about = "Stake, unstake and unjail pocket nodes"
)]
pub struct Cli {
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Node data directory; the keystore lives in <datadir>/keystore
    #[arg(long, global = true)]
    pub datadir: Option<PathBuf>,

    /// Base URL of the node's client RPC
    #[arg(long, global = true)]
    pub remote_cli_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub async fn run(self, config: Config) -> Result<()> {
        let config =
            config.with_overrides(self.datadir.as_deref(), self.remote_cli_url.as_deref());

        match self.command {
            Command::Nodes(cmd) => cmd.run(config).await,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Node management: staking, unstaking and unjailing
    Nodes(NodesCommand),
}

#[derive(Parser, Debug)]
pub struct NodesCommand {
    #[command(subcommand)]
    pub command: NodesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum NodesSubcommand {
    /// Stake a node in the network, making it available for service
    #[command(
        override_usage = "pocket-nodes nodes stake <fromAddr> <amount> <RelayChainIDs> <serviceURI> <networkID> <fee> [<legacyCodec=(true | false)>]"
    )]
    Stake(LifecycleArgs),

    /// Unstake a node, changing its status to Unstaking
    #[command(
        override_usage = "pocket-nodes nodes unstake <fromAddr> <networkID> <fee> [<legacyCodec=(true | false)>]"
    )]
    Unstake(LifecycleArgs),

    /// Unjail a node, allowing it to participate in service and consensus again
    #[command(
        override_usage = "pocket-nodes nodes unjail <fromAddr> <networkID> <fee> [<legacyCodec=(true | false)>]"
    )]
    Unjail(LifecycleArgs),
}

impl NodesCommand {
    pub async fn run(self, config: Config) -> Result<()> {
        match self.command {
            NodesSubcommand::Stake(args) => {
                commands::nodes::run(LifecycleOperation::Stake, args, config).await
            }
            NodesSubcommand::Unstake(args) => {
                commands::nodes::run(LifecycleOperation::Unstake, args, config).await
            }
            NodesSubcommand::Unjail(args) => {
                commands::nodes::run(LifecycleOperation::Unjail, args, config).await
            }
        }
    }
}

#[derive(Args, Debug)]
pub struct LifecycleArgs {
    /// Positional arguments, checked and parsed by the command itself
    #[arg(value_name = "ARGS", allow_negative_numbers = true)]
    pub args: Vec<String>,

    /// Passphrase used by the cmd, non empty usage bypass interactive prompt
    #[arg(long)]
    pub pwd: Option<String>,
}
