//! Interactive dashboard: reads commands from stdin and runs them against one session

use super::{view, Answer, AnalyzeRequest, Dashboard};
use crate::cli::{parse_output_format, ArtifactFormat};
use crate::config::OutputFormat;
use crate::error::Result;
use crate::llm::{ChatModel, Persona, Recipient};
use crate::output::{self, emit, ReportGenerator, ReportOutput};
use crate::session::Session;
use clap::ValueEnum;
use log::warn;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  analyze                        score and review the resume (re-run after persona/company changes)
  heatmap [local] [html|json] [FILE]   highlight matched keywords
  graph [html|json] [FILE]       present/missing skill graph
  cover [FILE]                   draft a cover letter
  interview                      get an interview question
  answer TEXT                    grade a typed answer
  audio FILE                     grade a recorded answer
  email [hiring-manager|technical-recruiter|alumni-peer]
  summary                        rewrite the resume summary
  tailor [FILE]                  tailor the whole resume (markdown)
  roadmap                        learning plan for missing skills
  report [console|json|markdown|html|pdf] [FILE]
  persona hr-recruiter|senior-engineer|cto
  company [NAME]                 set or clear the target company
  history                        scans in this session
  reload                         re-read resume and job files on next analyze
  help, quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Analyze,
    Heatmap { local: bool, format: ArtifactFormat, save: Option<PathBuf> },
    Graph { format: ArtifactFormat, save: Option<PathBuf> },
    CoverLetter { save: Option<PathBuf> },
    Interview,
    Answer(String),
    Audio(PathBuf),
    ColdEmail(Recipient),
    Summary,
    Tailor { save: Option<PathBuf> },
    Roadmap,
    Report { format: OutputFormat, save: Option<PathBuf> },
    Persona(Persona),
    Company(Option<String>),
    History,
    Reload,
    Help,
    Quit,
}

fn artifact_args<'a>(args: impl Iterator<Item = &'a str>) -> (bool, ArtifactFormat, Option<PathBuf>) {
    let mut local = false;
    let mut format = ArtifactFormat::Console;
    let mut save = None;
    for arg in args {
        if arg.eq_ignore_ascii_case("local") {
            local = true;
        } else if let Ok(parsed) = ArtifactFormat::from_str(arg, true) {
            format = parsed;
        } else {
            save = Some(PathBuf::from(arg));
        }
    }
    (local, format, save)
}

impl Command {
    /// `Ok(None)` for a blank line
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let line = line.trim();
        let Some(word) = line.split_whitespace().next() else {
            return Ok(None);
        };
        let rest = line[word.len()..].trim();
        let mut args = rest.split_whitespace();

        let command = match word.to_lowercase().as_str() {
            "analyze" | "a" => Command::Analyze,
            "heatmap" => {
                let (local, format, save) = artifact_args(args);
                Command::Heatmap { local, format, save }
            }
            "graph" => {
                let (_, format, save) = artifact_args(args);
                Command::Graph { format, save }
            }
            "cover" | "cover-letter" => Command::CoverLetter { save: args.next().map(PathBuf::from) },
            "interview" | "question" => Command::Interview,
            "answer" if !rest.is_empty() => Command::Answer(rest.to_string()),
            "answer" => return Err("usage: answer TEXT".to_string()),
            "audio" => match args.next() {
                Some(path) => Command::Audio(PathBuf::from(path)),
                None => return Err("usage: audio FILE".to_string()),
            },
            "email" => match args.next() {
                None => Command::ColdEmail(Recipient::HiringManager),
                Some(who) => Command::ColdEmail(Recipient::from_str(who, true)?),
            },
            "summary" => Command::Summary,
            "tailor" => Command::Tailor { save: args.next().map(PathBuf::from) },
            "roadmap" => Command::Roadmap,
            "report" => {
                let mut format = OutputFormat::Console;
                let mut save = None;
                for arg in args {
                    match parse_output_format(arg) {
                        Ok(parsed) => format = parsed,
                        Err(_) => save = Some(PathBuf::from(arg)),
                    }
                }
                Command::Report { format, save }
            }
            "persona" => match args.next() {
                Some(name) => Command::Persona(Persona::from_str(name, true)?),
                None => return Err("usage: persona hr-recruiter|senior-engineer|cto".to_string()),
            },
            "company" => Command::Company((!rest.is_empty()).then(|| rest.to_string())),
            "history" => Command::History,
            "reload" => Command::Reload,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(format!("unknown command '{}'; type help", other)),
        };
        Ok(Some(command))
    }
}

/// Run the interactive loop until `quit` or end of input.
/// Action errors are printed and the loop keeps going.
pub async fn run<M: ChatModel>(
    dashboard: &mut Dashboard<M>,
    session: &mut Session,
    mut request: AnalyzeRequest,
) -> Result<()> {
    println!("🔥 CareerForge dashboard ({})", dashboard.agent().model_name());
    println!("{}", HELP);

    if let Err(e) = execute(dashboard, session, &mut request, Command::Analyze).await {
        report_error(&e);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\ncareer-forge> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("⚠️  {}", message);
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }

        if let Err(e) = execute(dashboard, session, &mut request, command).await {
            report_error(&e);
        }
    }

    println!("👋 Bye");
    Ok(())
}

fn report_error(error: &crate::error::CareerForgeError) {
    warn!("Dashboard action failed: {}", error);
    println!("❌ {}", error);
}

async fn execute<M: ChatModel>(
    dashboard: &mut Dashboard<M>,
    session: &mut Session,
    request: &mut AnalyzeRequest,
    command: Command,
) -> Result<()> {
    let use_colors = dashboard.config().output.color_output;

    match command {
        Command::Analyze => {
            let score = dashboard.analyze(session, request).await?;
            println!("{}", view::score_line(score, use_colors));
            if !session.company_context.is_empty() {
                print!("{}", view::section("Company Context", use_colors));
                println!("{}", session.company_context);
            }
            print!("{}", view::section(&format!("{} Review", session.persona.label()), use_colors));
            println!("{}", session.analysis);
        }
        Command::Heatmap { local, format, save } => {
            let keywords = dashboard.heatmap(session, local).await?;
            let rendered = output::heatmap::render(format, &keywords, &session.resume_text, use_colors)?;
            emit(&ReportOutput::Text(rendered), save.as_deref())?;
        }
        Command::Graph { format, save } => {
            let graph = dashboard.skill_graph(session).await?;
            let rendered = output::graph::render(format, &graph, use_colors)?;
            emit(&ReportOutput::Text(rendered), save.as_deref())?;
        }
        Command::CoverLetter { save } => {
            let letter = dashboard.cover_letter(session).await?;
            emit(&ReportOutput::Text(letter), save.as_deref())?;
        }
        Command::Interview => {
            let question = dashboard.interview_question(session).await?;
            print!("{}", view::section("Interview Question", use_colors));
            println!("{}", question);
            println!("\nReply with: answer TEXT  or  audio FILE");
        }
        Command::Answer(text) => {
            let graded = dashboard.grade_answer(session, Answer::Text(text)).await?;
            print!("{}", view::graded_answer(&graded, use_colors));
        }
        Command::Audio(path) => {
            let graded = dashboard.grade_answer(session, Answer::Audio(path)).await?;
            print!("{}", view::graded_answer(&graded, use_colors));
        }
        Command::ColdEmail(recipient) => {
            let email = dashboard.cold_email(session, recipient).await?;
            print!("{}", view::section(&format!("Email to {}", recipient), use_colors));
            println!("{}", email);
        }
        Command::Summary => {
            let summary = dashboard.rewrite_summary(session).await?;
            print!("{}", view::section("Tailored Summary", use_colors));
            println!("{}", summary);
        }
        Command::Tailor { save } => {
            let tailored = dashboard.tailor_resume(session).await?;
            emit(&ReportOutput::Text(tailored), save.as_deref())?;
        }
        Command::Roadmap => {
            let roadmap = dashboard.roadmap(session).await?;
            print!("{}", view::roadmap(&roadmap, use_colors));
        }
        Command::Report { format, save } => {
            let report = dashboard.report(session)?;
            let generator = ReportGenerator::from_config(&dashboard.config().output, true);
            emit(&generator.generate_report(&report, format)?, save.as_deref())?;
        }
        Command::Persona(persona) => {
            request.persona = persona;
            println!("Persona set to {}; run analyze to apply", persona);
        }
        Command::Company(company) => {
            match &company {
                Some(name) => println!("Company set to {}; run analyze to apply", name),
                None => println!("Company cleared; run analyze to apply"),
            }
            request.company = company;
        }
        Command::History => print!("{}", view::history(&session.history)),
        Command::Reload => {
            dashboard.reload_documents();
            println!("Documents will be re-read on the next analyze");
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
    Ok(())
}
