use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use emergence_engine::services::render_error;
use emergence_engine::{EngineConfig, EngineContext, EngineError, Result};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "emergence")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "3-pass systematic thinking tracker", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (default: ~/.emergence/config.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding journey state files
    #[arg(long, global = true, env = "EMERGENCE_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Root of the methodology document tree
    #[arg(long, global = true, env = "EMERGENCE_METHODOLOGY_ROOT")]
    methodology_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a journey for a domain (replaces any existing one unless --strict)
    Start {
        /// Domain to apply 3-pass thinking to
        domain: String,

        /// Project path identifying the journey (default: current directory)
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Print the full instructions for the first phase
        #[arg(short, long)]
        expanded: bool,

        /// Fail if a journey is already active for this project
        #[arg(long)]
        strict: bool,
    },

    /// Advance to the next phase and print its prompt
    Next {
        #[arg(short, long)]
        project: Option<PathBuf>,
    },

    /// Print the current position, e.g. L0P2W[0](3)
    Position {
        #[arg(short, long)]
        project: Option<PathBuf>,
    },

    /// Show journey progress
    Status {
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Detailed instructions for the current phase
    Instructions {
        #[arg(short, long)]
        project: Option<PathBuf>,
    },

    /// Reset the journey to L0P1W[0](0), keeping its domain
    Reset {
        #[arg(short, long)]
        project: Option<PathBuf>,
    },

    /// Complete the journey and remove its state
    Complete {
        #[arg(short, long)]
        project: Option<PathBuf>,
    },

    /// Abandon the journey and remove its state
    Abandon {
        #[arg(short, long)]
        project: Option<PathBuf>,
    },

    /// Print the prompt for any pass and phase
    Prompt {
        /// Pass number (1-3)
        pass_num: u32,

        /// Phase number (0-6)
        phase: u32,

        /// Domain to interpolate
        domain: String,
    },

    /// Print where the current phase's output file belongs
    #[command(name = "phase-file")]
    PhaseFile {
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Component name for a local run (default: global run)
        #[arg(short, long)]
        component: Option<String>,
    },

    /// Browse the methodology tree
    Explore {
        /// Entry number to open; 0 goes up
        selection: Option<usize>,

        /// Page of the listing
        #[arg(long)]
        page: Option<usize>,

        /// Start in this directory (relative to the methodology root)
        #[arg(long)]
        path: Option<String>,

        /// Navigate with an interactive menu
        #[arg(short, long)]
        interactive: bool,
    },

    /// Create the 3_pass_thinking/ directory skeleton
    Inject {
        /// Target project directory (default: current directory)
        #[arg(short, long)]
        target: Option<PathBuf>,

        /// 'global', 'local', or a component name
        #[arg(short, long, default_value = "global")]
        run_type: String,
    },

    /// Print the methodology's master prompt
    #[command(name = "master-prompt")]
    MasterPrompt,

    /// Show the effective configuration
    Config {
        /// Save it to --config or ~/.emergence/config.toml
        #[arg(short, long)]
        write: bool,
    },

    /// Run the MCP server over stdio
    Server,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = &cli.command {
        generate(*shell, &mut Cli::command(), "emergence", &mut io::stdout());
        return;
    }

    let config = match EngineConfig::load(cli.config.as_deref()) {
        Ok(config) => config.with_overrides(cli.state_dir.clone(), cli.methodology_root.clone()),
        Err(e) => {
            eprintln!("{}", format!("Error: {:#}", e).red());
            std::process::exit(1);
        }
    };

    emergence_engine::logging::init(&config.log_filter);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");

    if let Err(e) = runtime.block_on(run_async(cli, config)) {
        let message = match e.downcast_ref::<EngineError>() {
            Some(engine_err) if engine_err.is_recoverable() => render_error(engine_err),
            _ => format!("Error: {:#}", e),
        };
        eprintln!("{}", message.red());
        std::process::exit(1);
    }
}

async fn run_async(args: Cli, config: EngineConfig) -> Result<()> {
    use emergence_engine::cli;

    if let Commands::Config { write } = args.command {
        return cli::config::run(&config, args.config.as_deref(), write);
    }

    let mut ctx = EngineContext::new(config)?;

    match args.command {
        Commands::Start {
            domain,
            project,
            expanded,
            strict,
        } => {
            cli::journey::start(&ctx, &domain, project.as_deref(), expanded, strict)?;
        }

        Commands::Next { project } => {
            cli::journey::next(&ctx, project.as_deref())?;
        }

        Commands::Position { project } => {
            cli::journey::position(&ctx, project.as_deref())?;
        }

        Commands::Status { project, json } => {
            cli::journey::status(&ctx, project.as_deref(), json)?;
        }

        Commands::Instructions { project } => {
            cli::journey::instructions(&ctx, project.as_deref())?;
        }

        Commands::Reset { project } => {
            cli::journey::reset(&ctx, project.as_deref())?;
        }

        Commands::Complete { project } => {
            cli::journey::complete(&ctx, project.as_deref())?;
        }

        Commands::Abandon { project } => {
            cli::journey::abandon(&ctx, project.as_deref())?;
        }

        Commands::Prompt {
            pass_num,
            phase,
            domain,
        } => {
            cli::journey::prompt(pass_num, phase, &domain)?;
        }

        Commands::PhaseFile { project, component } => {
            cli::journey::phase_file(&ctx, project.as_deref(), component.as_deref())?;
        }

        Commands::Explore {
            selection,
            page,
            path,
            interactive,
        } => {
            cli::explore::run(&mut ctx, selection, page, path.as_deref(), interactive)?;
        }

        Commands::Inject { target, run_type } => {
            cli::structure::inject(target.as_deref(), &run_type)?;
        }

        Commands::MasterPrompt => {
            cli::explore::master_prompt(&ctx)?;
        }

        Commands::Server => {
            cli::server::run(ctx).await?;
        }

        // Handled before the context is built
        Commands::Config { .. } | Commands::Completions { .. } => {}
    }

    Ok(())
}
