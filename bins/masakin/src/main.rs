//! Masakin CLI - browse and share recipes from the terminal
//!
//! Drives the same view models as the web client against a live backend.
//! The session is kept in the user's config directory between runs.

use clap::{Parser, Subcommand, ValueEnum};
use masakin_telemetry::{LogFormat, TelemetryConfig, Timer};
use owo_colors::OwoColorize;
use std::process::ExitCode;

mod commands;
mod context;
mod output;

use commands::{auth, interact, profile, recipes};
use context::Context;

/// Command-line client for the Masakin recipe community
#[derive(Parser)]
#[command(name = "masakin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// API base URL (overrides MASAKIN_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Latest recipes
    Home {
        /// Only titles containing this text
        #[arg(short, long)]
        search: Option<String>,

        #[arg(short, long, default_value = "All")]
        category: String,
    },

    /// Search recipes
    Discover {
        #[arg(short, long)]
        search: Option<String>,

        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show one recipe
    Show {
        id: String,
    },

    /// Toggle the bookmark on a recipe
    Save {
        id: String,
    },

    /// Toggle the like on a recipe
    React {
        id: String,
    },

    /// Toggle following a recipe's author
    Follow {
        /// Recipe whose author to follow
        id: String,
    },

    /// Publish a new recipe
    Create {
        #[command(flatten)]
        fields: recipes::RecipeFields,
    },

    /// Change an existing recipe; omitted fields keep their value
    Edit {
        id: String,

        #[command(flatten)]
        fields: recipes::RecipeFields,
    },

    /// Delete a recipe
    Delete {
        id: String,
    },

    /// Your profile and recipes
    Profile,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Login { .. } => "login",
            Commands::Register { .. } => "register",
            Commands::Logout => "logout",
            Commands::Whoami => "whoami",
            Commands::Home { .. } => "home",
            Commands::Discover { .. } => "discover",
            Commands::Show { .. } => "show",
            Commands::Save { .. } => "save",
            Commands::React { .. } => "react",
            Commands::Follow { .. } => "follow",
            Commands::Create { .. } => "create",
            Commands::Edit { .. } => "edit",
            Commands::Delete { .. } => "delete",
            Commands::Profile => "profile",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = if cli.verbose {
        TelemetryConfig::verbose()
    } else {
        TelemetryConfig::default()
    };
    let log_format = match cli.format {
        Format::Text => LogFormat::Compact,
        Format::Json => LogFormat::Json,
    };
    if let Err(e) = masakin_telemetry::init_with_config(telemetry.with_format(log_format)) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    let result = match Context::new(cli.base_url.clone(), cli.format) {
        Ok(ctx) => {
            let timer = Timer::start(cli.command.name());
            let result = run(&ctx, cli.command).await;
            timer.stop();
            ctx.flush();
            result
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(ctx: &Context, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Login { email, password } => auth::login(ctx, email, password).await,
        Commands::Register {
            name,
            email,
            password,
        } => auth::register(ctx, name, email, password).await,
        Commands::Logout => auth::logout(ctx),
        Commands::Whoami => auth::whoami(ctx),
        Commands::Home { search, category } => {
            recipes::home(ctx, search.as_deref(), &category).await
        }
        Commands::Discover { search, category } => recipes::discover(ctx, search, category).await,
        Commands::Show { id } => recipes::show(ctx, &id).await,
        Commands::Save { id } => interact::run(ctx, &id, interact::Kind::Save).await,
        Commands::React { id } => interact::run(ctx, &id, interact::Kind::React).await,
        Commands::Follow { id } => interact::run(ctx, &id, interact::Kind::Follow).await,
        Commands::Create { fields } => recipes::create(ctx, fields).await,
        Commands::Edit { id, fields } => recipes::edit(ctx, &id, fields).await,
        Commands::Delete { id } => recipes::delete(ctx, &id).await,
        Commands::Profile => profile::run(ctx).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create_with_lists() {
        let cli = Cli::try_parse_from([
            "masakin",
            "create",
            "--title",
            "Soto",
            "--ingredient",
            "chicken",
            "--ingredient",
            "turmeric",
            "--step",
            "Simmer",
        ])
        .unwrap();
        match cli.command {
            Commands::Create { fields } => {
                assert_eq!(fields.ingredient, vec!["chicken", "turmeric"]);
                assert_eq!(fields.title.as_deref(), Some("Soto"));
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["masakin", "show", "r1", "--format", "json", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.format == Format::Json);
        assert_eq!(cli.command.name(), "show");
    }
}
