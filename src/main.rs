use clap::Parser;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use uce_calc::config::cli::{BatchArgs, Command, ContactArgs, EstimateArgs};
use uce_calc::config::load_site_config;
use uce_calc::core::{batch, ConfigProvider};
use uce_calc::utils::{logger, validation, validation::Validate};
use uce_calc::{
    CalcError, Calculator, CliConfig, ConsoleSink, ContactForm, ContactRequest, FloatingLinks,
    FormInput, OutputFormat, PriceEstimator, SiteConfig,
};

#[tokio::main]
async fn main() {
    let args = CliConfig::parse();

    let config = match load_site_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code().max(1));
        }
    };

    // 初始化日誌
    if config.logging.json {
        logger::init_json_logger(config.logging.level.as_deref());
    } else {
        logger::init_cli_logger(args.verbose);
    }
    tracing::debug!("CLI args: {:?}", args);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    if let Err(e) = run(&args.command, &config, format).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Sugestie: {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(command: &Command, config: &SiteConfig, format: OutputFormat) -> uce_calc::Result<()> {
    match command {
        Command::Estimate(estimate_args) => run_estimate(estimate_args, config, format),
        Command::Watch => run_watch(config, format).await,
        Command::Batch(batch_args) => run_batch(batch_args, config),
        Command::Contact(contact_args) => run_contact(contact_args, config, format),
        Command::Links => run_links(config, format),
    }
}

fn build_estimator(config: &SiteConfig) -> uce_calc::Result<PriceEstimator> {
    Ok(PriceEstimator::new(config.catalog()?).with_thousands_separator(config.thousands_separator()))
}

fn run_estimate(args: &EstimateArgs, config: &SiteConfig, format: OutputFormat) -> uce_calc::Result<()> {
    let input = FormInput {
        tip: args.tip.clone(),
        sup: args.sup.clone(),
        instr: args.instr.then(|| "on".to_string()),
    };

    let calculator = Calculator::new(
        build_estimator(config)?,
        ConsoleSink::stdout(format),
        Duration::from_millis(config.debounce_ms()),
    );
    calculator.recompute_now(&input)?;
    Ok(())
}

async fn run_watch(config: &SiteConfig, format: OutputFormat) -> uce_calc::Result<()> {
    let calculator = Calculator::new(
        build_estimator(config)?,
        ConsoleSink::stdout(format),
        Duration::from_millis(config.debounce_ms()),
    );

    tracing::info!(
        "👀 Reading form input from stdin (debounce {} ms)",
        config.debounce_ms()
    );
    calculator.recompute_now(&FormInput::default())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        calculator.on_input(FormInput::from_urlencoded(&line));
    }

    calculator.settle().await;
    tracing::info!("✅ Input closed");
    Ok(())
}

fn run_batch(args: &BatchArgs, config: &SiteConfig) -> uce_calc::Result<()> {
    validation::validate_file_extensions("batch.input", std::slice::from_ref(&args.input), &["csv"])?;

    let estimator = build_estimator(config)?;
    let input = std::fs::File::open(&args.input)?;

    let count = match &args.output {
        Some(path) => {
            validation::validate_path("batch.output", path)?;
            let output = std::fs::File::create(path)?;
            let count = batch::run_batch(&estimator, input, output)?;
            tracing::info!("📁 Output saved to: {}", path);
            count
        }
        None => batch::run_batch(&estimator, input, std::io::stdout())?,
    };

    tracing::debug!("{} rows processed", count);
    Ok(())
}

fn run_contact(args: &ContactArgs, config: &SiteConfig, format: OutputFormat) -> uce_calc::Result<()> {
    let request = ContactRequest {
        nume: args.nume.clone(),
        email: args.email.clone(),
        telefon: args.telefon.clone(),
        subiect: args.subiect.clone(),
        mesaj: args.mesaj.clone(),
    };

    let outcome = ContactForm::new(config.email()).submit(&request);

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if let Some(mailto) = &outcome.mailto {
        println!("{}", mailto);
        eprintln!("{}", outcome.status.message);
    }

    match outcome.mailto {
        Some(_) => Ok(()),
        None => Err(CalcError::FormValidationError {
            message: outcome.status.message,
        }),
    }
}

fn run_links(config: &SiteConfig, format: OutputFormat) -> uce_calc::Result<()> {
    let links = FloatingLinks::new(config.phone(), config.whatsapp_message()).all();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&links)?),
        OutputFormat::Text => {
            println!("📞 {}", links.tel);
            println!("💬 {}", links.whatsapp);
        }
    }
    Ok(())
}
