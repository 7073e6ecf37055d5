mod transport;
mod view;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use todo_core::{Confirm, Controller, Filter, ListDisplay, Outcome, SkipReason, TodoClient, TodoId};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::transport::UreqTransport;
use crate::view::{ConsoleRenderer, StdinConfirm};

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal client for the todo list service", long_about = None)]
struct Cli {
    /// Base URL of the todo service.
    #[arg(long, env = "TODO_API_URL", default_value = "http://127.0.0.1:8080", global = true)]
    base_url: String,

    /// Which items to show after the command runs.
    #[arg(long, default_value_t = Filter::All, global = true)]
    filter: Filter,

    /// Delete without asking for confirmation.
    #[arg(short, long, global = true)]
    yes: bool,

    /// Print the rendered list as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all todos.
    List,
    /// Ask the server for matching todos. An empty query lists everything.
    Search { query: String },
    /// Create a todo.
    Add { title: String, description: String },
    /// Change the title and/or description of a todo.
    Edit {
        id: TodoId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a todo.
    Delete { id: TodoId },
    /// Flip a todo between active and completed.
    Toggle { id: TodoId },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TODO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let renderer = ConsoleRenderer::new(cli.json, std::io::stdout().is_terminal());
    let mut controller = Controller::new(TodoClient::new(&cli.base_url), UreqTransport::new());
    controller.set_filter(cli.filter);

    let display = if cli.yes {
        run(&mut controller, cli.command, &mut |_: TodoId| true)?
    } else {
        run(&mut controller, cli.command, &mut StdinConfirm)?
    };

    if let Some(display) = display {
        renderer.print(&display)?;
    }
    Ok(())
}

/// Execute one command. `None` means nothing changed and there is nothing
/// new to show.
fn run(
    controller: &mut Controller<UreqTransport>,
    command: Command,
    confirm: &mut impl Confirm,
) -> Result<Option<ListDisplay>> {
    debug!(?command, "running command");
    let outcome = match command {
        Command::List => Outcome::Applied(controller.load().context("failed to load todos")?),
        Command::Search { query } => {
            Outcome::Applied(controller.search(&query).context("search failed")?)
        }
        Command::Add { title, description } => {
            controller.add(&title, &description).context("failed to create todo")?
        }
        Command::Edit {
            id,
            title,
            description,
        } => {
            controller.load().context("failed to load todos")?;
            if let Outcome::Skipped(reason) = controller.open_edit_by_id(id) {
                return Err(skipped(reason));
            }
            if let Some(draft) = controller.edit_draft_mut() {
                if let Some(title) = title {
                    draft.title = title;
                }
                if let Some(description) = description {
                    draft.description = description;
                }
            }
            controller.save_edit().with_context(|| format!("failed to update todo {id}"))?
        }
        Command::Delete { id } => controller
            .delete(id, confirm)
            .with_context(|| format!("failed to delete todo {id}"))?,
        Command::Toggle { id } => controller
            .toggle(id)
            .with_context(|| format!("failed to toggle todo {id}"))?,
    };

    match outcome {
        Outcome::Applied(display) => Ok(Some(display)),
        Outcome::Skipped(reason) => Err(skipped(reason)),
        Outcome::Cancelled => {
            eprintln!("cancelled");
            Ok(None)
        }
    }
}

fn skipped(reason: SkipReason) -> anyhow::Error {
    match reason {
        SkipReason::Invalid(err) => anyhow::anyhow!("not submitted: {err}"),
        SkipReason::UnknownTodo(id) => anyhow::anyhow!("todo {id} not found"),
        SkipReason::NoEditSession => anyhow::anyhow!("no edit in progress"),
    }
}
