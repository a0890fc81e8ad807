use chrono::Local;
use inquire::{InquireError, Text};
use weather_core::{WeatherLookup, WeatherViewModel, display};

const HELP: &str = "/history, /again <n>, /delete <n>, /quit";

#[derive(Debug, PartialEq)]
enum Input {
    /// Anything that is not a command, forwarded as the query text.
    Search(String),
    /// Zero-based history index.
    Again(usize),
    Delete(usize),
    History,
    Quit,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return Ok(Input::Search(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    match name {
        "history" | "h" => Ok(Input::History),
        "quit" | "q" => Ok(Input::Quit),
        "again" | "a" => parse_index(arg).map(Input::Again),
        "delete" | "d" => parse_index(arg).map(Input::Delete),
        other => Err(format!("Unknown command '/{other}'. Commands: {HELP}")),
    }
}

fn parse_index(arg: Option<&str>) -> Result<usize, String> {
    let arg = arg.ok_or_else(|| "Expected a history number, e.g. /again 1".to_string())?;
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("'{arg}' is not a history number")),
    }
}

fn print_panel<L>(vm: &WeatherViewModel<L>) {
    println!("{}", display::render_panel(vm.panel(), Local::now()));
}

fn print_history<L>(vm: &WeatherViewModel<L>) {
    if vm.history().is_empty() {
        println!("No searches yet.");
    } else {
        print!("{}", display::render_history(vm.history()));
    }
}

/// Interactive loop: every plain line is a search.
pub async fn run<L: WeatherLookup>(mut vm: WeatherViewModel<L>) -> anyhow::Result<()> {
    print_panel(&vm);

    loop {
        let line = match Text::new("City:").with_help_message(HELP).prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        match parse_input(&line) {
            Ok(Input::Search(city)) => {
                vm.set_query(city);
                vm.search(None).await;
                print_panel(&vm);
            }
            Ok(Input::Again(idx)) => match vm.history().get(idx) {
                Some(entry) => {
                    let city = entry.city_name.clone();
                    vm.search(Some(&city)).await;
                    print_panel(&vm);
                }
                None => println!("No history entry #{}", idx + 1),
            },
            Ok(Input::Delete(idx)) => match vm.history().get(idx) {
                Some(entry) => {
                    let city = entry.city_name.clone();
                    vm.delete_history_entry(&city);
                    print_history(&vm);
                }
                None => println!("No history entry #{}", idx + 1),
            },
            Ok(Input::History) => print_history(&vm),
            Ok(Input::Quit) => break,
            Err(msg) => println!("{msg}"),
        }
    }

    Ok(())
}
