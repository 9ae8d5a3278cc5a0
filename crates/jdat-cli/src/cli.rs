use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use jdat_core::{BlockKind, VERSION};

/// JDAT - plain-text documents of named blocks, each encryptable on its own
#[derive(Parser)]
#[command(name = "jdat")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the .jdat document
    #[arg(short, long, global = true, env = "JDAT_FILE")]
    pub file: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols and table borders only
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Block kind accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Key/value lines (t:1)
    Data,
    /// Opaque text (t:2)
    Raw,
}

impl From<KindArg> for BlockKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Data => BlockKind::Structured,
            KindArg::Raw => BlockKind::Raw,
        }
    }
}

/// Arguments for the `new` command
#[derive(Args)]
pub struct NewArgs {
    /// Path of the document to create (".jdat" is appended if missing)
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Block link or name
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Decrypt an encrypted block for display (the file is not modified)
    #[arg(long)]
    pub decrypt: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `find` command
#[derive(Args)]
pub struct FindArgs {
    /// Case-insensitive text matched against names and links
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `get` command
#[derive(Args)]
pub struct GetArgs {
    /// Block link or name
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Key to read
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Value printed when the key is absent
    #[arg(long)]
    pub default: Option<String>,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Block name
    #[arg(long)]
    pub name: String,

    /// Block link (unique identifier)
    #[arg(long)]
    pub link: String,

    /// Block kind
    #[arg(long, value_enum, default_value_t = KindArg::Data)]
    pub kind: KindArg,

    /// Initial content
    #[arg(long)]
    pub content: Option<String>,

    /// Set a key on a data block (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
}

/// Arguments for the `set` command
#[derive(Args)]
pub struct SetArgs {
    /// Block link or name
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Key to insert or replace
    #[arg(value_name = "KEY")]
    pub key: String,

    /// New value
    #[arg(value_name = "VALUE")]
    pub value: String,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Block link or name
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Replacement content
    #[arg(long)]
    pub content: String,
}

/// Arguments for the `remove` command
#[derive(Args)]
pub struct RemoveArgs {
    /// Block link
    #[arg(value_name = "LINK")]
    pub link: String,
}

/// Arguments for the `comment` command
#[derive(Args)]
pub struct CommentArgs {
    /// Comment text
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for the `encrypt` and `decrypt` commands
#[derive(Args)]
pub struct CryptArgs {
    /// Block link or name
    #[arg(value_name = "TARGET")]
    pub target: String,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new empty document
    New(NewArgs),

    /// List blocks
    List(ListArgs),

    /// Show a block by link or name
    Show(ShowArgs),

    /// Find blocks by name or link
    Find(FindArgs),

    /// Read one key from a data block
    Get(GetArgs),

    /// Add a block
    Add(AddArgs),

    /// Set a key on a data block
    Set(SetArgs),

    /// Replace the content of a block
    Edit(EditArgs),

    /// Remove a block by link
    Remove(RemoveArgs),

    /// Append a comment
    Comment(CommentArgs),

    /// Encrypt a block with a password
    Encrypt(CryptArgs),

    /// Decrypt a block in place
    Decrypt(CryptArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_parses_repeated_set() {
        let cli = Cli::parse_from([
            "jdat", "add", "--name", "user", "--link", "u1", "--set", "name=Alice", "--set",
            "age=30",
        ]);
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.kind, KindArg::Data);
                assert_eq!(args.set, vec!["name=Alice", "age=30"]);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_kind_arg_maps_to_block_kind() {
        assert_eq!(BlockKind::from(KindArg::Data), BlockKind::Structured);
        assert_eq!(BlockKind::from(KindArg::Raw), BlockKind::Raw);
    }
}
