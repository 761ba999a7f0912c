use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use taskboard_cli::cli::{Cli, Command, ConfigOverrideTarget, parse_config_override};
use taskboard_core::config::{self, Config, ConfigOverrides, Palette};
use taskboard_core::error::AppError;
use taskboard_core::model::{Task, TaskFilter, TaskStatus};
use taskboard_core::stats::StatsResult;

fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Active => "active",
        TaskStatus::Completed => "completed",
    }
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "title")]
    title: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "created")]
    created_at: String,
}

fn print_tasks_plain(tasks: &[Task], filter: TaskFilter, palette: &Palette) {
    println!("{}", palette.accentize(filter.label()));

    if tasks.is_empty() {
        println!("{}", palette.mutedize(filter.empty_label()));
        return;
    }

    let rows: Vec<TaskRow> = tasks
        .iter()
        .map(|task| TaskRow {
            id: task.id.clone(),
            title: task.title.clone(),
            status: if task.is_completed() {
                palette.accentize(status_label(task.status))
            } else {
                status_label(task.status).to_string()
            },
            created_at: task.created_at.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{table}");
}

fn print_tasks_json(tasks: &[Task]) {
    let payload: Vec<serde_json::Value> = tasks
        .iter()
        .map(|task| {
            serde_json::json!({
                "id": task.id,
                "title": task.title,
                "description": task.description,
                "status": task.status,
                "created_at": task.created_at,
                "completed_at": task.completed_at,
            })
        })
        .collect();
    println!("{}", serde_json::Value::Array(payload));
}

fn print_task_json(task: &Task) {
    let json = serde_json::json!({
        "id": task.id,
        "title": task.title,
        "description": task.description,
        "status": task.status,
        "created_at": task.created_at,
        "completed_at": task.completed_at,
    });
    println!("{}", json);
}

fn print_task_plain(task: &Task, palette: &Palette) {
    println!("{}", palette.accentize(&task.title));
    if !task.description.is_empty() {
        println!("{}", task.description);
    }
    println!("id: {}", task.id);
    println!("status: {}", status_label(task.status));
    println!("created: {}", task.created_at);
    if let Some(completed_at) = task.completed_at.as_deref() {
        println!("completed: {}", completed_at);
    }
}

fn print_stats_plain(stats: StatsResult, palette: &Palette) {
    println!("{}", palette.accentize("Statistics"));
    println!("Active tasks: {:.1}%", stats.active_tasks_percent);
    println!("Completed tasks: {:.1}%", stats.completed_tasks_percent);
}

fn print_stats_json(stats: StatsResult) {
    let json = serde_json::json!({
        "active_tasks_percent": stats.active_tasks_percent,
        "completed_tasks_percent": stats.completed_tasks_percent,
    });
    println!("{}", json);
}

fn resolve_config(raw_overrides: &[String]) -> Result<Config, AppError> {
    let mut overrides = ConfigOverrides::default();
    for raw in raw_overrides {
        let (target, value) = parse_config_override(raw).map_err(AppError::invalid_input)?;
        match target {
            ConfigOverrideTarget::Theme => overrides.theme = Some(value),
            ConfigOverrideTarget::DefaultFilter(filter) => {
                overrides.default_filter = Some(filter);
            }
        }
    }

    let load = config::load_config_with_fallback();
    if let Some(err) = load.error {
        eprintln!("WARNING: {}", err);
    }

    Ok(config::merge_overrides(&load.config, &overrides))
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(current.clone());
                current.clear();
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let config = resolve_config(&cli.config_override)?;
    let palette = config::palette_for_theme(config.theme.as_deref());

    match cli.command {
        Command::Add { title, description } => {
            let title = match title {
                Some(value) if !value.trim().is_empty() => value,
                _ => return Err(AppError::invalid_input("title is required")),
            };

            let task =
                taskboard_core::task_api::add_task(&title, description.as_deref().unwrap_or(""))?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Added task: {} ({})", task.title, task.id);
            }
        }
        Command::Edit {
            id,
            new_title,
            description,
        } => {
            let description = match description {
                Some(value) => value,
                None => taskboard_core::task_api::get_task_by_id(&id)?.description,
            };

            let task = taskboard_core::task_api::edit_task(&id, &new_title, &description)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Updated task: {} ({})", task.title, task.id);
            }
        }
        Command::Delete { id } => {
            let task = taskboard_core::task_api::delete_task(&id)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Deleted task: {} ({})", task.title, task.id);
            }
        }
        Command::Show { id } => {
            let task = taskboard_core::task_api::get_task_by_id(&id)?;
            if cli.json {
                print_task_json(&task);
            } else {
                print_task_plain(&task, &palette);
            }
        }
        Command::Done { id } => {
            let task = taskboard_core::task_api::complete_task(&id)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Completed task: {} ({})", task.title, task.id);
            }
        }
        Command::Activate { id } => {
            let task = taskboard_core::task_api::activate_task(&id)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Reactivated task: {} ({})", task.title, task.id);
            }
        }
        Command::ClearCompleted => {
            let removed = taskboard_core::task_api::clear_completed_tasks()?;
            if cli.json {
                println!("{}", serde_json::json!({ "removed": removed }));
            } else {
                println!("Cleared {} completed task(s)", removed);
            }
        }
        Command::List { filter } => {
            let filter: TaskFilter = filter
                .map(TaskFilter::from)
                .or(config.default_filter)
                .unwrap_or(TaskFilter::AllTasks);

            let tasks = taskboard_core::task_api::list_tasks(filter)?;
            if cli.json {
                print_tasks_json(&tasks);
            } else {
                print_tasks_plain(&tasks, filter, &palette);
            }
        }
        Command::Stats => {
            let stats = taskboard_core::task_api::statistics()?;
            if cli.json {
                print_stats_json(stats);
            } else {
                print_stats_plain(stats, &palette);
            }
        }
    }

    Ok(())
}

fn run_interactive() -> Result<(), AppError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("taskboard".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(cli) {
            eprintln!("ERROR: {}", err);
        }
    }

    Ok(())
}

fn main() {
    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err)
            if matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            print!("{err}");
            return;
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
