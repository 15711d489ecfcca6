//! The `hopbench play` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use hopbench_core::error::SessionError;
use hopbench_core::model::{
    OptionLetter, Participant, ResultRecord, MAX_DIFFICULTY, MIN_DIFFICULTY,
};
use hopbench_core::pool::QuestionPool;
use hopbench_core::report::SessionReport;
use hopbench_core::session::{Advance, QuizSession};
use hopbench_core::submit::dispatch;
use hopbench_report::html::write_html_report;
use hopbench_store::create_store;

pub struct PlayArgs {
    pub questions: Option<PathBuf>,
    pub name: Option<String>,
    pub position: Option<String>,
    pub difficulty: Option<u8>,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
    pub format: String,
    pub config: Option<PathBuf>,
}

pub async fn execute(args: PlayArgs) -> Result<()> {
    let formats = parse_formats(&args.format)?;
    let (config, questions_path) =
        super::resolve_questions(args.questions, args.config.as_deref())?;
    let pool = QuestionPool::load_or_empty(&questions_path);
    let store = create_store(&config.store)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();

    let participant = Participant::new(
        prompt_until(&mut input, &mut out, "Name", args.name, non_blank)?,
        prompt_until(&mut input, &mut out, "Position", args.position, non_blank)?,
    );
    let difficulty = prompt_until(
        &mut input,
        &mut out,
        &format!("Difficulty ({MIN_DIFFICULTY}-{MAX_DIFFICULTY})"),
        args.difficulty.map(|d| d.to_string()),
        parse_difficulty,
    )?;

    let mut session = QuizSession::new();
    if let Err(e) = session.start(participant, difficulty, &pool, &mut rng) {
        return Err(match e {
            SessionError::NoQuestionsAvailable { difficulty } => anyhow::anyhow!(
                "Insufficient questions available for this difficulty tier ({difficulty}) in {}",
                questions_path.display()
            ),
            other => other.into(),
        });
    }

    let record = run_quiz(&mut session, &mut input, &mut out)?;
    let store_name = store.name().to_string();
    let pending = dispatch(store, record);

    let report = session
        .report(&config.model_label)
        .context("session finished without a report")?;
    print_results(&report, &mut out)?;

    if !formats.is_empty() {
        let output = args.output.unwrap_or_else(|| config.output_dir.clone());
        save_reports(&report, &output, &formats)?;
    }

    match pending.await {
        Ok(true) => {}
        Ok(false) => tracing::warn!("result could not be saved to the {store_name} store"),
        Err(e) => tracing::warn!("result submission did not complete: {e}"),
    }

    Ok(())
}

fn parse_formats(format: &str) -> Result<Vec<&'static str>> {
    let mut formats = Vec::new();
    for fmt in format.split(',').map(str::trim) {
        match fmt {
            "all" => return Ok(vec!["json", "html"]),
            "none" => return Ok(Vec::new()),
            "json" => formats.push("json"),
            "html" => formats.push("html"),
            other => anyhow::bail!("unknown format: '{other}' (expected json, html, all or none)"),
        }
    }
    Ok(formats)
}

fn non_blank(line: &str) -> Option<String> {
    let trimmed = line.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_difficulty(line: &str) -> Option<u8> {
    line.trim()
        .parse::<u8>()
        .ok()
        .filter(|d| (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(d))
}

/// Use `preset` if given, otherwise ask until `parse` accepts a line.
fn prompt_until<T, R, W>(
    input: &mut R,
    out: &mut W,
    label: &str,
    preset: Option<String>,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T>
where
    R: BufRead,
    W: Write,
{
    if let Some(value) = preset {
        return parse(value.as_str())
            .with_context(|| format!("invalid {}: '{value}'", label.to_lowercase()));
    }
    loop {
        write!(out, "{label}: ")?;
        out.flush()?;
        let line = read_line(input)?;
        match parse(line.as_str()) {
            Some(value) => return Ok(value),
            None => writeln!(out, "Please enter a valid {}.", label.to_lowercase())?,
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read input")?;
    anyhow::ensure!(read > 0, "input ended before the quiz finished");
    Ok(line)
}

/// Drive a started session to results from line-based input.
///
/// A letter selects an answer for the current question; an empty line moves
/// on. Returns the result record once the last question is passed.
pub(crate) fn run_quiz<R, W>(
    session: &mut QuizSession,
    input: &mut R,
    out: &mut W,
) -> Result<ResultRecord>
where
    R: BufRead,
    W: Write,
{
    let mut shown = None;
    loop {
        if let Some(question) = session.current_question() {
            if shown != Some(session.cursor()) {
                let (position, total) = session.progress();
                writeln!(out, "\nQuestion {position}/{total}")?;
                writeln!(out, "{}", question.question_text)?;
                for (letter, option) in question.lettered_options() {
                    writeln!(out, "  {letter}. {option}")?;
                }
                shown = Some(session.cursor());
            }
        }

        let hint = if session.is_last_question() {
            "empty line to finish"
        } else {
            "empty line for next"
        };
        match session.selected() {
            Some(letter) => write!(out, "Answer [{letter}] ({hint}): ")?,
            None => write!(out, "Answer (A-D): ")?,
        }
        out.flush()?;

        let line = read_line(input)?;
        let line = line.trim();
        if line.is_empty() {
            match session.advance() {
                Ok(Advance::Next) => {}
                Ok(Advance::Finished(record)) => return Ok(record),
                Err(e) if e.is_recoverable() => writeln!(out, "{e}.")?,
                Err(e) => return Err(e.into()),
            }
            continue;
        }

        match line.parse::<OptionLetter>() {
            Ok(letter) => session.select(letter)?,
            Err(_) => writeln!(out, "Enter one of A, B, C or D.")?,
        }
    }
}

fn print_results<W: Write>(report: &SessionReport, out: &mut W) -> Result<()> {
    use comfy_table::{Cell, Table};

    let total = report.traces.len();
    writeln!(out, "\nComparison against {}", report.model_label)?;

    let mut table = Table::new();
    table.set_header(vec![
        "Participant",
        "Position",
        "Difficulty",
        "You",
        "Model",
        "Difference",
        "Verdict",
    ]);
    table.add_row(vec![
        Cell::new(&report.participant.name),
        Cell::new(&report.participant.position),
        Cell::new(report.difficulty),
        Cell::new(format!("{}/{total}", report.scores.user)),
        Cell::new(format!("{}/{total}", report.scores.model)),
        Cell::new(format!("{:+.1}%", report.percent_difference)),
        Cell::new(report.scores.verdict()),
    ]);
    writeln!(out, "{table}")?;

    for (i, trace) in report.traces.iter().enumerate() {
        let user = trace
            .user_answer
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string());
        let model = if trace.model_correct {
            "CORRECT"
        } else {
            "INCORRECT"
        };
        writeln!(out, "\nQ{}  You: {user}  Model: {model}", i + 1)?;
        writeln!(out, "{}", trace.question_text)?;
        for (j, option) in trace.options.iter().enumerate() {
            let Some(letter) = OptionLetter::from_index(j) else {
                break;
            };
            let correct = if letter == trace.correct_answer { "*" } else { " " };
            let chosen = if trace.user_answer == Some(letter) { ">" } else { " " };
            writeln!(out, " {chosen}{correct} {letter}. {option}")?;
        }
        if !trace.model_explanation.is_empty() {
            writeln!(out, "  Model reasoning:")?;
            for line in trace.model_explanation.lines() {
                writeln!(out, "    {line}")?;
            }
        }
    }
    Ok(())
}

fn save_reports(report: &SessionReport, output: &std::path::Path, formats: &[&str]) -> Result<()> {
    std::fs::create_dir_all(output)
        .with_context(|| format!("failed to create output dir: {}", output.display()))?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

    for fmt in formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("session-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Session saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("session-{timestamp}.html"));
                write_html_report(report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            _ => {}
        }
    }
    Ok(())
}
