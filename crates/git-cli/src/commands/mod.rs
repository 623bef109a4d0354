pub mod add;
pub mod checkout;
pub mod commit;
pub mod fetch;
pub mod init;
pub mod merge;
pub mod notes;
pub mod push;
pub mod reset;
pub mod status;
pub mod tag;

// Not exposed as standalone subcommands: `checkout` delegates to these for
// its branch-switching and path-restoring behavior.
mod restore;
mod switch;

use anyhow::Result;
use clap::Subcommand;

use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Add file contents to the index
    Add(add::AddArgs),
    /// Record changes to the repository
    Commit(commit::CommitArgs),
    /// Join two or more development histories together
    Merge(merge::MergeArgs),
    /// Show the working tree status
    Status(status::StatusArgs),
    /// Switch branches or restore working tree files
    Checkout(checkout::CheckoutArgs),
    /// Reset current HEAD to the specified state
    Reset(reset::ResetArgs),
    /// Create, list, delete or verify a tag object
    Tag(tag::TagArgs),
    /// Add or inspect object notes
    Notes(notes::NotesArgs),
    /// Download objects and refs from another repository
    Fetch(fetch::FetchArgs),
    /// Update remote refs along with associated objects
    Push(push::PushArgs),
    /// Create an empty Git repository or reinitialize an existing one
    Init(init::InitArgs),
}

impl Commands {
    /// Get the command name as used in config keys (e.g., "commit", "merge").
    pub fn command_name(&self) -> &str {
        match self {
            Commands::Add(_) => "add",
            Commands::Commit(_) => "commit",
            Commands::Merge(_) => "merge",
            Commands::Status(_) => "status",
            Commands::Checkout(_) => "checkout",
            Commands::Reset(_) => "reset",
            Commands::Tag(_) => "tag",
            Commands::Notes(_) => "notes",
            Commands::Fetch(_) => "fetch",
            Commands::Push(_) => "push",
            Commands::Init(_) => "init",
        }
    }
}

pub fn open_repo(cli: &Cli) -> Result<git_repository::Repository> {
    let repo = if let Some(ref git_dir) = cli.git_dir {
        git_repository::Repository::open(git_dir)?
    } else {
        git_repository::Repository::discover(".")?
    };
    Ok(repo)
}

pub fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Add(args) => add::run(args, &cli),
        Commands::Commit(args) => commit::run(args, &cli),
        Commands::Merge(args) => merge::run(args, &cli),
        Commands::Status(args) => status::run(args, &cli),
        Commands::Checkout(args) => checkout::run(args, &cli),
        Commands::Reset(args) => reset::run(args, &cli),
        Commands::Tag(args) => tag::run(args, &cli),
        Commands::Notes(args) => notes::run(args, &cli),
        Commands::Fetch(args) => fetch::run(args, &cli),
        Commands::Push(args) => push::run(args, &cli),
        Commands::Init(args) => init::run(args, &cli),
    }
}
