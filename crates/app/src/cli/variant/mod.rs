use clap::{Args, Subcommand};

mod list;
mod set;

#[derive(Debug, Args)]
pub(crate) struct VariantCommand {
    #[command(subcommand)]
    command: VariantSubcommand,
}

#[derive(Debug, Subcommand)]
enum VariantSubcommand {
    /// Create a size or overwrite its stock
    Set(set::SetVariantArgs),

    /// Show stock per size
    List(list::ListVariantsArgs),
}

pub(crate) async fn run(command: VariantCommand) -> Result<(), String> {
    match command.command {
        VariantSubcommand::Set(args) => set::run(args).await,
        VariantSubcommand::List(args) => list::run(args).await,
    }
}
