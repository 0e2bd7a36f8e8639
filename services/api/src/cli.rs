use crate::demo::{
    run_calculate, run_demo, run_eligibility, CalculateArgs, DemoArgs, EligibilityArgs,
};
use crate::server;
use akassa::config::AppConfig;
use akassa::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "akassa",
    about = "Calculate unemployment benefits and check eligibility from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Calculate the monthly benefit for one period
    Calculate(CalculateArgs),
    /// Evaluate eligibility from an income history and checklist
    Eligibility(EligibilityArgs),
    /// Walk through sample benefit scenarios and an eligibility report
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Calculate(args) => run_calculate(args, &AppConfig::load()?.rules),
        Command::Eligibility(args) => run_eligibility(args, &AppConfig::load()?.rules),
        Command::Demo(args) => run_demo(args, &AppConfig::load()?.rules),
    }
}
