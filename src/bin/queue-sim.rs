use queue_sim::config::{self, Command, FormatArg};
use queue_sim::engine;
use queue_sim::error::Result;
use queue_sim::newsvendor;
use queue_sim::output::{self, Formatter, HumanFormatter, JsonFormatter, SummaryFormatter};

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = config::parse_args()?;

    let rendered = match cli.command {
        Command::Queue(args) => {
            let (config, format) = config::build_queue_config(args)?;
            let result = engine::run_simulation(&config)?;
            formatter_for(format).write_queue(&result)?
        }
        Command::Newsvendor(args) => {
            let (config, format) = config::build_newsvendor_config(args)?;
            let result = newsvendor::run_newsvendor(&config)?;
            formatter_for(format).write_newsvendor(&result)?
        }
        Command::Bands => output::render_bands(),
        Command::ShowConfig(args) => {
            let config = config::resolve_queue_config(args)?;
            output::render_queue_config(&config)
        }
        Command::ShowNewsvendor(args) => {
            let config = config::resolve_newsvendor_config(args)?;
            newsvendor::validate_config(&config)?;
            output::render_newsvendor_config(&config)
        }
    };
    print!("{}", rendered);

    Ok(())
}

fn formatter_for(format: FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Summary => Box::new(SummaryFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}
