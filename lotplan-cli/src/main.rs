//! Lot Plan CLI: size a trade and print the plan.
//!
//! Commands:
//! - `plan`: evaluate a plan from a TOML config file and/or flags
//! - `pairs`: list supported pairs with their pip values
//! - `init`: write a commented sample config

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lotplan_core::config::{
    ManagementSection, RecoverySection, RiskModeKind, RiskSection, SimulatorSection,
    SplitSection, SAMPLE_CONFIG,
};
use lotplan_core::{ConfigError, GoalType, PlanConfig, PlanError, TradePlanEngine};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Exit status when the plan cannot be computed from otherwise valid inputs.
const EXIT_UNDEFINED: u8 = 2;

#[derive(Parser)]
#[command(
    name = "lotplan",
    about = "Lot Plan CLI, forex lot size and take-profit planner"
)]
struct Cli {
    /// Log engine steps to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a trade plan from a TOML config file and/or flags.
    Plan(PlanArgs),
    /// List supported pairs and their pip values.
    Pairs,
    /// Write a commented sample config.
    Init {
        /// Output path. Prints to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum GoalArg {
    Daily,
    Weekly,
    Monthly,
}

impl From<GoalArg> for GoalType {
    fn from(goal: GoalArg) -> Self {
        match goal {
            GoalArg::Daily => GoalType::Daily,
            GoalArg::Weekly => GoalType::Weekly,
            GoalArg::Monthly => GoalType::Monthly,
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

#[derive(clap::Args)]
struct PlanArgs {
    /// Path to a TOML config file. Flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Period the target refers to.
    #[arg(long, value_enum)]
    goal: Option<GoalArg>,

    /// Target profit in account currency.
    #[arg(long)]
    target: Option<f64>,

    /// Account size in account currency.
    #[arg(long)]
    account: Option<f64>,

    /// Risk as a percent of the account (0.1 to 10).
    #[arg(long, conflicts_with = "risk_amount")]
    risk_percent: Option<f64>,

    /// Fixed amount to risk (at least 1).
    #[arg(long)]
    risk_amount: Option<f64>,

    /// Risk-to-reward ratio (1.0 to 5.0 in steps of 0.5).
    #[arg(long)]
    rr: Option<f64>,

    /// Stop loss distance in pips.
    #[arg(long)]
    stop_loss: Option<f64>,

    /// Pair symbol, e.g. EURUSD. See `lotplan pairs`.
    #[arg(long)]
    pair: Option<String>,

    /// Percent of the position closed at TP1.
    #[arg(long)]
    tp1_pct: Option<u8>,

    /// Percent closed at TP2; TP3 closes the rest.
    #[arg(long)]
    tp2_pct: Option<u8>,

    /// Drawdown to plan a recovery for.
    #[arg(long)]
    drawdown: Option<f64>,

    /// Simulator risk amount. Defaults to the plan's risk.
    #[arg(long)]
    sim_risk: Option<f64>,

    /// Simulator R:R. Defaults to the plan's R:R.
    #[arg(long)]
    sim_rr: Option<f64>,

    /// Show a trailing stop suggestion.
    #[arg(long, default_value_t = false)]
    trailing: bool,

    /// Start trailing after this many pips. Defaults to the TP1 distance.
    #[arg(long)]
    trailing_start: Option<f64>,

    /// Trailing distance in pips. Defaults to the stop loss distance.
    #[arg(long)]
    trailing_distance: Option<f64>,

    /// Suggest moving the stop to breakeven after TP1.
    #[arg(long, default_value_t = false)]
    breakeven: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,
}

impl PlanArgs {
    /// Flags as a config layer; unset flags leave the file's values alone.
    fn overrides(&self) -> PlanConfig {
        let mode = match (self.risk_percent, self.risk_amount) {
            (Some(_), _) => Some(RiskModeKind::Percent),
            (None, Some(_)) => Some(RiskModeKind::Fixed),
            (None, None) => None,
        };
        PlanConfig {
            goal_type: self.goal.map(GoalType::from),
            target_profit: self.target,
            account_size: self.account,
            pair: self.pair.clone(),
            stop_loss_pips: self.stop_loss,
            risk_to_reward: self.rr,
            risk: RiskSection {
                mode,
                percent: self.risk_percent,
                amount: self.risk_amount,
            },
            split: SplitSection {
                tp1_pct: self.tp1_pct,
                tp2_pct: self.tp2_pct,
            },
            simulator: SimulatorSection {
                risk_amount: self.sim_risk,
                risk_to_reward: self.sim_rr,
            },
            recovery: RecoverySection {
                drawdown_amount: self.drawdown,
            },
            management: ManagementSection {
                trailing_stop: self.trailing.then_some(true),
                trailing_start_pips: self.trailing_start,
                trailing_distance_pips: self.trailing_distance,
                breakeven_after_tp1: self.breakeven.then_some(true),
            },
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Plan(args) => run_plan(&args),
        Commands::Pairs => {
            print!("{}", render::render_pairs());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { output, force } => run_init(output, force),
    }
}

fn init_tracing(verbose: bool) {
    let default_directives = if verbose {
        "lotplan=debug,lotplan_core=debug"
    } else {
        "lotplan=warn,lotplan_core=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_plan(args: &PlanArgs) -> Result<ExitCode> {
    let base = match &args.config {
        Some(path) => {
            debug!(path = %path.display(), "loading plan config");
            PlanConfig::from_file(path)?
        }
        None => PlanConfig::default(),
    };

    let inputs = match base.merge(args.overrides()).into_inputs() {
        Ok(inputs) => inputs,
        Err(ConfigError::Plan(err)) => return Ok(report_plan_error(&err)),
        Err(err) => return Err(err).context("invalid plan configuration"),
    };

    let result = match TradePlanEngine::new().evaluate(&inputs) {
        Ok(result) => result,
        Err(err) => return Ok(report_plan_error(&err)),
    };
    info!(pair = %result.pair, lot_size = result.lot_size, "plan computed");

    match args.format {
        OutputFormat::Markdown => print!("{}", render::render_markdown(&result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(ExitCode::SUCCESS)
}

/// Inputs that cannot produce a plan are shown inline, not as a crash.
fn report_plan_error(err: &PlanError) -> ExitCode {
    println!("warning: {err}");
    if err.is_division_undefined() {
        println!("Adjust the inputs above zero to see a plan.");
    }
    ExitCode::from(EXIT_UNDEFINED)
}

fn run_init(output: Option<PathBuf>, force: bool) -> Result<ExitCode> {
    match output {
        Some(path) => {
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            std::fs::write(&path, SAMPLE_CONFIG)
                .with_context(|| format!("write {}", path.display()))?;
            println!("Config written to: {}", path.display());
        }
        None => print!("{SAMPLE_CONFIG}"),
    }
    Ok(ExitCode::SUCCESS)
}
