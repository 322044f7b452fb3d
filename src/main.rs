//! CareerForge: AI-powered resume and job description matching

use career_forge::cli::{self, Cli, Commands, ConfigAction, SessionArgs, TailorMode};
use career_forge::config::{Config, OutputFormat};
use career_forge::dashboard::{repl, view, Answer, AnalyzeRequest, Dashboard};
use career_forge::error::{CareerForgeError, Result};
use career_forge::input::file_detector::{JOB_EXTENSIONS, RESUME_EXTENSIONS};
use career_forge::llm::{CareerAgent, LlmClient, LlmSettings};
use career_forge::output::{self, emit, suggest_filename, AnalysisReport, ReportGenerator, ReportOutput};
use career_forge::search::CompanySearch;
use career_forge::session::Session;
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if !config.output.color_output {
        colored::control::set_override(false);
    }

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

/// Validate the inputs and build a dashboard; no network call happens here
fn prepare(config: &Config, args: &SessionArgs) -> Result<(Dashboard<LlmClient>, AnalyzeRequest)> {
    cli::validate_file_extension(&args.resume, RESUME_EXTENSIONS)
        .map_err(|e| CareerForgeError::InvalidInput(format!("Resume file: {}", e)))?;
    if let Some(job) = &args.job {
        cli::validate_file_extension(job, JOB_EXTENSIONS)
            .map_err(|e| CareerForgeError::InvalidInput(format!("Job description file: {}", e)))?;
    } else if args.job_text.as_deref().map_or(true, |t| t.trim().is_empty()) {
        return Err(CareerForgeError::MissingInput(
            "no job description; pass --job FILE or --job-text TEXT".to_string(),
        ));
    }

    let api_key = config.resolve_api_key(args.api_key.as_deref())?;
    let settings = LlmSettings::from_config(config, api_key, args.model.as_deref(), args.temperature)?;
    if config.get_model_by_name(&settings.model).is_none() {
        warn!("Model '{}' is not in the configured model list", settings.model);
    }
    info!("Using model {} at {}", settings.model, settings.api_base);

    let agent = CareerAgent::new(LlmClient::new(settings)?)?;
    let search = CompanySearch::new(&config.search, Duration::from_secs(config.llm.timeout_secs))?;

    Ok((Dashboard::new(agent, search, config.clone()), AnalyzeRequest::from(args)))
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    let use_colors = config.output.color_output;

    match command {
        Commands::Analyze { session: args, output, save, detailed } => {
            let format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(CareerForgeError::InvalidInput)?,
                None => config.output.format,
            };
            let (mut dashboard, request) = prepare(&config, &args)?;
            let mut session = Session::new();

            println!("🚀 Matching {} as {}", args.resume.display(), args.persona);
            dashboard.analyze(&mut session, &request).await?;
            if detailed || config.output.detailed {
                dashboard.heatmap(&mut session, true).await?;
            }

            let report = dashboard.report(&session)?;
            let rendered = ReportGenerator::from_config(&config.output, detailed).generate_report(&report, format)?;

            let save = save.or_else(|| {
                (format == OutputFormat::Pdf)
                    .then(|| PathBuf::from(suggest_filename(format, &args.resume.to_string_lossy(), true)))
            });
            emit(&rendered, save.as_deref())?;
        }

        Commands::Heatmap { session: args, local, output: format, save } => {
            let (mut dashboard, request) = prepare(&config, &args)?;
            let mut session = Session::new();
            dashboard.load_documents(&mut session, &request).await?;

            let keywords = dashboard.heatmap(&mut session, local).await?;
            println!("🔥 {} matched keywords: {}", keywords.len(), keywords.join(", "));
            let rendered = output::heatmap::render(format, &keywords, &session.resume_text, use_colors)?;
            emit(&ReportOutput::Text(rendered), save.as_deref())?;
        }

        Commands::Graph { session: args, output: format, save } => {
            let (mut dashboard, request) = prepare(&config, &args)?;
            let mut session = Session::new();
            dashboard.load_documents(&mut session, &request).await?;

            let graph = dashboard.skill_graph(&mut session).await?;
            let rendered = output::graph::render(format, &graph, use_colors)?;
            emit(&ReportOutput::Text(rendered), save.as_deref())?;
        }

        Commands::CoverLetter { session: args, save } => {
            let (mut dashboard, request) = prepare(&config, &args)?;
            let mut session = Session::new();
            dashboard.load_documents(&mut session, &request).await?;

            let letter = dashboard.cover_letter(&session).await?;
            emit(&ReportOutput::Text(letter), save.as_deref())?;
        }

        Commands::Interview { session: args, answer, audio } => {
            let (mut dashboard, request) = prepare(&config, &args)?;
            let mut session = Session::new();
            dashboard.load_documents(&mut session, &request).await?;

            let question = dashboard.interview_question(&mut session).await?;
            print!("{}", view::section("Interview Question", use_colors));
            println!("{}", question);

            let answer = match (answer, audio) {
                (Some(text), _) => Some(Answer::Text(text)),
                (None, Some(path)) => Some(Answer::Audio(path)),
                (None, None) => None,
            };
            if let Some(answer) = answer {
                let graded = dashboard.grade_answer(&session, answer).await?;
                print!("{}", view::graded_answer(&graded, use_colors));
            }
        }

        Commands::ColdEmail { session: args, recipient } => {
            let (mut dashboard, request) = prepare(&config, &args)?;
            let mut session = Session::new();
            dashboard.load_documents(&mut session, &request).await?;
            dashboard.research(&mut session).await?;

            let email = dashboard.cold_email(&session, recipient).await?;
            print!("{}", view::section(&format!("Email to {}", recipient), use_colors));
            println!("{}", email);
        }

        Commands::Tailor { session: args, mode, save } => {
            let (mut dashboard, request) = prepare(&config, &args)?;
            let mut session = Session::new();
            dashboard.load_documents(&mut session, &request).await?;

            let text = match mode {
                TailorMode::Summary => dashboard.rewrite_summary(&session).await?,
                TailorMode::Full => dashboard.tailor_resume(&mut session).await?,
            };
            emit(&ReportOutput::Text(text), save.as_deref())?;
        }

        Commands::Roadmap { session: args } => {
            let (mut dashboard, request) = prepare(&config, &args)?;
            let mut session = Session::new();
            dashboard.load_documents(&mut session, &request).await?;

            dashboard.skill_graph(&mut session).await?;
            let roadmap = dashboard.roadmap(&session).await?;
            print!("{}", view::roadmap(&roadmap, use_colors));
        }

        Commands::Dashboard { session: args } => {
            let (mut dashboard, request) = prepare(&config, &args)?;
            let mut session = Session::new();
            repl::run(&mut dashboard, &mut session, request).await?;

            if session.is_analyzed() {
                let report = AnalysisReport::from_session(&session, dashboard.agent().model_name())?;
                info!("Session ended: {} scans, last score {}%", report.history.len(), report.score);
            }
        }

        Commands::Models => {
            println!("🤖 Available LLM models\n");
            for model in &config.llm.available_models {
                let marker = if model.name == config.llm.default_model { " (default)" } else { "" };
                println!("• {}{}", model.name, marker);
                println!("  Context window: {} tokens", model.context_window);
                println!("  {}", model.description);
            }
            println!("\nAPI: {} (key from ${})", config.llm.api_base, config.llm.api_key_env);
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Configuration ({})\n", config_path.display());
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| CareerForgeError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(&config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Set { key, value }) => {
                let mut config = config;
                config.set_value(&key, &value)?;
                config.save_to(&config_path)?;
                println!("✅ {} = {}", key, value);
            }
        },
    }

    Ok(())
}
