use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "delivery-e2e")]
#[command(about = "E2E suite for the delivery-booking form")]
#[command(version)]
struct Cli {
    /// Suite file to run
    suite: PathBuf,

    /// Run in headless mode (overrides suite)
    #[arg(long)]
    headless: bool,

    /// Only run scenarios whose name contains this string
    #[arg(short, long)]
    scenario: Option<String>,

    /// Verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Validate the suite without running
    #[arg(long)]
    check: bool,

    /// Quiet mode (only errors)
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> delivery_e2e::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let mut suite = delivery_e2e::Suite::load(&cli.suite)?;

    if let Some(ref needle) = cli.scenario {
        suite = suite.select(needle);
        if suite.scenarios.is_empty() {
            eprintln!("No scenario matches '{}'", needle);
            std::process::exit(2);
        }
    }

    if cli.check {
        println!("Suite valid: {}", suite.name);
        println!("  Target: {}", suite.target.url);
        println!("  Timeout: {}ms", suite.timeout_ms);
        println!("  Scenarios: {}", suite.scenarios.len());
        for scenario in &suite.scenarios {
            println!("    - {} (expect: {})", scenario.name, scenario.expect);
        }
        return Ok(());
    }

    // Override headless if specified
    if cli.headless {
        suite.browser.headless = true;
    }

    println!("Running: {}", suite.name);

    let runner = delivery_e2e::Runner::new(&suite.browser).await?;
    let result = runner.run(&suite).await?;
    runner.close().await?;

    println!();
    for r in &result.results {
        if r.passed {
            println!("✓ {} ({}ms)", r.name, r.duration_ms);
        } else {
            println!("✗ {} ({}ms)", r.name, r.duration_ms);
            if let Some(ref error) = r.error {
                println!("    {}", error);
            }
        }
    }
    println!();
    println!(
        "{} passed, {} failed",
        result.passed_count(),
        result.failed_count()
    );

    if !result.passed() {
        std::process::exit(1);
    }

    Ok(())
}
