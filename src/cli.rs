//! CLI interface for pubdesk.
//!
//! Each subcommand is non-interactive except `delete`, which asks for
//! confirmation unless `--yes` is given. Catalog commands require a session
//! (`pubdesk login`).

mod format;
mod publication;
mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::config::Config;
use crate::model::{Route, SortKey};
use crate::storage::Storage;
use crate::workflow::Navigator;

/// pubdesk: manage the publication catalog.
#[derive(Debug, Parser)]
#[command(name = "pubdesk", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// More diagnostic output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow:
  1. pubdesk login --email admin@example.com
  2. pubdesk add --title "Papua in Figures 2025" --date 2025-02-28 --cover cover.png
  3. pubdesk list --search figures --sort oldest
  4. pubdesk edit 3 --description "Annual compendium"
  5. pubdesk delete 3"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in. The password may also come from `PUBDESK_PASSWORD`.
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out.
    Logout,

    /// Show who is signed in.
    Whoami,

    /// List publications, filtered and sorted.
    List {
        /// Case-insensitive text to find in titles and descriptions.
        #[arg(long, short)]
        search: Option<String>,

        /// Sort order (defaults to `default-sort` from config).
        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Show these publications' descriptions in full.
        #[arg(long)]
        expand: Vec<i64>,

        /// Print the rows as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Show one publication in full.
    Show { id: i64 },

    /// Add a publication.
    Add {
        #[arg(long)]
        title: String,

        /// Release date, `YYYY-MM-DD`.
        #[arg(long)]
        date: String,

        #[arg(long)]
        description: Option<String>,

        /// Cover image file (JPEG, PNG, or GIF).
        #[arg(long)]
        cover: PathBuf,
    },

    /// Edit a publication. Fields not given keep their current value.
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        /// Release date, `YYYY-MM-DD`.
        #[arg(long)]
        date: Option<String>,

        /// New description; pass an empty string to remove it.
        #[arg(long)]
        description: Option<String>,

        /// Replacement cover image file.
        #[arg(long)]
        cover: Option<PathBuf>,
    },

    /// Delete a publication after confirmation.
    Delete {
        id: i64,

        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

/// CLI-facing sort order, mapped to the domain `SortKey`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    /// Latest release first.
    Newest,
    /// Earliest release first.
    Oldest,
    /// Alphabetical by title.
    Title,
}

impl SortArg {
    fn to_domain(self) -> SortKey {
        match self {
            Self::Newest => SortKey::Newest,
            Self::Oldest => SortKey::Oldest,
            Self::Title => SortKey::Title,
        }
    }
}

/// What every command runs against.
pub struct Context<'a> {
    pub config: &'a Config,
    pub storage: &'a Storage,
    pub covers_dir: PathBuf,
}

/// Run a parsed command, returning an error message on failure.
pub fn run(cli: Cli, ctx: &Context<'_>) -> Result<(), String> {
    match cli.command {
        Command::Login { email, password } => {
            session::cmd_login(ctx, &email, password.as_deref())
        }
        Command::Logout => session::cmd_logout(ctx),
        Command::Whoami => session::cmd_whoami(ctx),
        Command::List {
            search,
            sort,
            expand,
            json,
        } => {
            session::require(ctx)?;
            let sort = sort.map_or(ctx.config.default_sort, SortArg::to_domain);
            publication::cmd_list(ctx, search.unwrap_or_default(), sort, &expand, json)
        }
        Command::Show { id } => {
            session::require(ctx)?;
            publication::cmd_show(ctx, id)
        }
        Command::Add {
            title,
            date,
            description,
            cover,
        } => {
            session::require(ctx)?;
            publication::cmd_add(ctx, title, date, description, &cover)
        }
        Command::Edit {
            id,
            title,
            date,
            description,
            cover,
        } => {
            session::require(ctx)?;
            let changes = publication::EditArgs {
                title,
                date,
                description,
                cover,
            };
            publication::cmd_edit(ctx, id, changes)
        }
        Command::Delete { id, yes } => {
            session::require(ctx)?;
            publication::cmd_delete(ctx, id, yes)
        }
    }
}

/// Records where a workflow asked to go; the terminal has no pages to switch.
#[derive(Debug, Default)]
struct TerminalNavigator {
    last: Option<Route>,
}

impl Navigator for TerminalNavigator {
    fn navigate_to(&mut self, route: Route) {
        debug!(%route, "navigate");
        self.last = Some(route);
    }
}
