use card_route::models::PlanStatus;
use card_route::reporting::ConsoleReporter;
use card_route::utils::config::PlannerConfig;
use card_route::utils::loader::load_map;
use card_route::utils::visualize::visualize_route;
use card_route::{GreedyPlanner, PlanOptions, RouteSolver};
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Exit code for configuration, load and plot failures
const EXIT_FATAL: i32 = 3;

#[derive(Debug)]
struct CliOptions {
    config: PathBuf,
    cards: PathBuf,
    libraries: PathBuf,
    start: Option<String>,
    plot: Option<PathBuf>,
    quiet: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            config: PathBuf::from("config.json"),
            cards: PathBuf::from("cards.csv"),
            libraries: PathBuf::from("libraries.csv"),
            start: None,
            plot: None,
            quiet: false,
        }
    }
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        let value = args.get(idx + 1);
        match (args[idx].as_str(), value) {
            ("--quiet" | "-q", _) => options.quiet = true,
            ("--config" | "-c", Some(value)) => {
                options.config = PathBuf::from(value);
                idx += 1;
            }
            ("--cards", Some(value)) => {
                options.cards = PathBuf::from(value);
                idx += 1;
            }
            ("--libraries", Some(value)) => {
                options.libraries = PathBuf::from(value);
                idx += 1;
            }
            ("--start" | "-s", Some(value)) => {
                options.start = Some(value.clone());
                idx += 1;
            }
            ("--plot", Some(value)) => {
                options.plot = Some(PathBuf::from(value));
                idx += 1;
            }
            (other, _) => eprintln!("ignoring unrecognized argument {:?}", other),
        }
        idx += 1;
    }
    options
}

fn run(options: &CliOptions) -> Result<PlanStatus, Box<dyn Error>> {
    let trace = !options.quiet;

    if trace {
        println!("loading configuration...");
    }
    let mut config = PlannerConfig::from_path(&options.config)?;
    if let Some(start) = &options.start {
        config.start_library = start.clone();
    }

    let map = load_map(&options.cards, &options.libraries, &config)?;
    if trace {
        println!("loaded {} cards", map.cards.len());
        println!("loaded {} libraries", map.libraries.len());
    }

    let plan_options = PlanOptions::from_config(&config);
    let planner = GreedyPlanner::new(&map.cards, &map.libraries, plan_options);
    let mut reporter = ConsoleReporter::stdout(&map.cards, &map.libraries, trace);
    let outcome = planner.plan(&config.start_library, &mut reporter)?;
    reporter.finish()?;

    if let Some(plot_path) = &options.plot {
        if let Some(start) = map.libraries.get(&config.start_library) {
            visualize_route(plot_path, &outcome, &map.libraries, start)?;
            if trace {
                println!("route plot saved to {}", plot_path.display());
            }
        }
    }

    Ok(outcome.status)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);

    match run(&options) {
        Ok(status) => std::process::exit(status.exit_code()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_FATAL);
        }
    }
}
