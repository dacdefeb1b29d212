use std::fs;
use std::path::{Path, PathBuf};
use std::process::exit;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;

use timetable_backend::academic_calendar::{get_period, Period};
use timetable_backend::app_settings::ParserSettings;
use timetable_backend::logger::{self, Logger};
use timetable_backend::models::Schedule;
use timetable_backend::types::{Degree, Institute, ScheduleType};
use timetable_backend::{parse_document, ParserContext, ScheduleCollection};

#[derive(Parser, Debug)]
#[command(author, version, about = "University timetable parser", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// JSON file with parser settings. Defaults come from the environment.
    #[arg(long, global = true, value_name = "FILE_PATH", env = "PARSER_SETTINGS")]
    settings: Option<PathBuf>,

    /// silent, error, warn, info or debug. Overrides LOG_LEVEL.
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct DocumentArgs {
    /// Timetable workbooks (.xlsx or .xls)
    #[arg(value_name = "FILE_PATH", required = true)]
    files: Vec<PathBuf>,

    /// Institute short name, e.g. ИИТ
    #[arg(long, env = "INSTITUTE")]
    institute: Institute,

    /// bachelor, master, phd or college
    #[arg(long, default_value = "bachelor")]
    degree: Degree,

    /// Academic period as YEAR_START-YEAR_END-SEMESTER, e.g. 2022-2023-1.
    /// Defaults to the period of today's date.
    #[arg(long)]
    period: Option<Period>,

    #[arg(long, value_enum, default_value_t = DocumentKind::Semester)]
    kind: DocumentKind,

    /// Skip groups and worksheets with malformed data instead of failing
    #[arg(long, default_value_t = false)]
    force: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse timetables and print the flattened table as JSON
    #[command(arg_required_else_help = true)]
    Parse {
        #[command(flatten)]
        document: DocumentArgs,

        /// Write the JSON to this file instead of stdout
        #[arg(long, value_name = "FILE_PATH")]
        output: Option<PathBuf>,
    },

    /// List the groups found in the timetables
    #[command(arg_required_else_help = true)]
    Groups {
        #[command(flatten)]
        document: DocumentArgs,
    },

    /// List the distinct rooms used in the timetables
    #[command(arg_required_else_help = true)]
    Rooms {
        #[command(flatten)]
        document: DocumentArgs,
    },

    /// List the lessons and exams of a teacher
    #[command(arg_required_else_help = true)]
    FindTeacher {
        /// Surname or full name, matched case-insensitively
        #[arg(value_name = "NAME")]
        name: String,

        #[command(flatten)]
        document: DocumentArgs,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum DocumentKind {
    Semester,
    TestSession,
    ExamSession,
}

impl From<DocumentKind> for ScheduleType {
    fn from(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Semester => ScheduleType::Semester,
            DocumentKind::TestSession => ScheduleType::TestSession,
            DocumentKind::ExamSession => ScheduleType::ExamSession,
        }
    }
}

fn load_settings(path: Option<&Path>) -> Result<ParserSettings> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings file {:?}", path))?;
            ParserSettings::from_json(&json).with_context(|| format!("Invalid settings file {:?}", path))
        }
        None => Ok(ParserSettings::from_env()),
    }
}

/// Parses every file and merges the results into one collection.
fn parse_documents(
    document: &DocumentArgs,
    settings: &ParserSettings,
    generate_dataframe: bool,
) -> Result<ScheduleCollection> {
    let period = document
        .period
        .unwrap_or_else(|| get_period(chrono::Local::now().date_naive()));
    let context = ParserContext::new(period, document.institute, document.degree);
    let schedule_type = ScheduleType::from(document.kind);

    let mut collection: Option<ScheduleCollection> = None;
    for path in &document.files {
        let started = Instant::now();
        let parsed = parse_document(
            path,
            context.clone(),
            schedule_type,
            settings.clone(),
            document.force,
            generate_dataframe,
        )
        .with_context(|| format!("Failed to parse {:?}", path))?;

        logger::info(&format!(
            "Parsed {} schedules from {:?} in {}",
            parsed.len(),
            path,
            logger::format_duration(started.elapsed())
        ));

        collection = Some(match collection.take() {
            Some(mut all) => {
                all.merge(parsed)?;
                all
            }
            None => parsed,
        });
    }

    collection.context("No files given")
}

fn print_frame(document: &DocumentArgs, settings: &ParserSettings, output: Option<&Path>) -> Result<()> {
    let collection = parse_documents(document, settings, true)?;
    let json = collection.get_dataframe()?.to_json()?;

    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
            logger::info(&format!("Wrote {:?}", path));
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn print_groups(document: &DocumentArgs, settings: &ParserSettings) -> Result<()> {
    let collection = parse_documents(document, settings, false)?;
    for group in collection.get_groups() {
        println!("{}", group);
    }
    Ok(())
}

fn print_rooms(document: &DocumentArgs, settings: &ParserSettings) -> Result<()> {
    let collection = parse_documents(document, settings, false)?;
    for room in collection.get_rooms() {
        let campus = room.campus.map(|c| c.short_name()).unwrap_or("-");
        let room_type = room.room_type.map(|t| t.as_str()).unwrap_or("-");
        println!("{}\t{}\t{}", room.name, campus, room_type);
    }
    Ok(())
}

fn teaches(teachers: &[String], name: &str) -> bool {
    let name = name.to_lowercase();
    teachers.iter().any(|t| t.to_lowercase().contains(&name))
}

fn find_teacher(name: &str, document: &DocumentArgs, settings: &ParserSettings) -> Result<()> {
    let collection = parse_documents(document, settings, false)?;
    let mut count = 0;

    for schedule in collection.get_schedule() {
        match schedule {
            Schedule::Lessons(s) => {
                for lesson in s.lessons.iter().filter_map(|e| e.as_lesson()) {
                    if !teaches(&lesson.teachers, name) {
                        continue;
                    }
                    count += 1;
                    let weeks: Vec<String> = lesson.weeks.iter().map(u32::to_string).collect();
                    println!(
                        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                        s.group,
                        lesson.weekday,
                        lesson.num,
                        lesson.time_start.format("%H:%M"),
                        lesson.name,
                        weeks.join(","),
                        lesson.room.as_ref().map(|r| r.name.as_str()).unwrap_or("-"),
                    );
                }
            }
            Schedule::Exams(s) => {
                for exam in s.exams.iter().filter_map(|e| e.as_exam()) {
                    if !teaches(&exam.teachers, name) {
                        continue;
                    }
                    count += 1;
                    println!(
                        "{}\t{} {}\t{}\t{}\t{}",
                        s.group,
                        exam.day,
                        exam.month,
                        exam.time_start.format("%H:%M"),
                        exam.exam_type.as_str(),
                        exam.name,
                    );
                }
            }
        }
    }

    if count == 0 {
        logger::warn(&format!("No lessons found for teacher '{}'", name));
    }
    Ok(())
}

fn main() {
    // A .env file may define LOG_LEVEL, INSTITUTE and the parser settings.
    dotenv().ok();

    if let Err(e) = Logger::init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    if let Some(level) = &cli.log_level {
        if !logger::set_log_level_str(level) {
            eprintln!("Error: unknown log level '{}'", level);
            exit(1);
        }
    }
    logger::debug(&format!("Log level: {}", logger::get_log_level().as_str()));

    let settings = match load_settings(cli.settings.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit(1);
        }
    };

    let command_result = match &cli.command {
        Commands::Parse { document, output } => print_frame(document, &settings, output.as_deref()),
        Commands::Groups { document } => print_groups(document, &settings),
        Commands::Rooms { document } => print_rooms(document, &settings),
        Commands::FindTeacher { name, document } => find_teacher(name, document, &settings),
    };

    if let Err(e) = command_result {
        eprintln!("Error executing command: {:#}", e);
        exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_match_ignores_case() {
        let teachers = vec!["Иванов И.И.".to_string(), "Петров П.П.".to_string()];
        assert!(teaches(&teachers, "иванов"));
        assert!(teaches(&teachers, "Петров П.П."));
        assert!(!teaches(&teachers, "Сидоров"));
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from([
            "timetable",
            "parse",
            "--institute",
            "ИИТ",
            "--period",
            "2022-2023-2",
            "--kind",
            "exam-session",
            "--force",
            "--log-level",
            "debug",
            "exams.xlsx",
        ])
        .unwrap();

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        let Commands::Parse { document, output } = cli.command else {
            panic!("expected the parse command");
        };
        assert_eq!(document.institute, Institute::Iit);
        assert_eq!(document.degree, Degree::Bachelor);
        assert_eq!(document.period, Some(Period::new(2022, 2023, 2)));
        assert_eq!(ScheduleType::from(document.kind), ScheduleType::ExamSession);
        assert!(document.force);
        assert_eq!(document.files, vec![PathBuf::from("exams.xlsx")]);
        assert_eq!(output, None);
    }
}
