use std::io::BufRead;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use newshound_app::{RonFileStore, SearchSession};
use newshound_core::{SearchConfig, SearchView};
use newshound_logging::LogDestination;

const LOG_FILENAME: &str = "newshound.log";
const ENDPOINT_ENV: &str = "NEWSHOUND_ENDPOINT";

fn main() -> anyhow::Result<()> {
    // Logs go to a file so stdout stays free for the story list.
    newshound_logging::initialize(LogDestination::File(Path::new(LOG_FILENAME)));

    let config = configured_endpoint()?;
    let prefs_dir = std::env::current_dir().context("resolve working directory")?;
    let store = RonFileStore::open(prefs_dir);
    let mut session = SearchSession::new(config, Box::new(store));

    print_help();
    session.subscribe(render);

    let lines = spawn_stdin_reader();
    loop {
        session.pump();
        match lines.recv_timeout(Duration::from_millis(50)) {
            Ok(line) => {
                if !run_command(&mut session, line.trim()) {
                    break;
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }
    Ok(())
}

/// Search endpoint from the environment, falling back to the live API.
fn configured_endpoint() -> anyhow::Result<SearchConfig> {
    match std::env::var(ENDPOINT_ENV) {
        Ok(endpoint) => {
            let config = SearchConfig::new(&endpoint)
                .with_context(|| format!("invalid {ENDPOINT_ENV}: {endpoint}"))?;
            log::info!("using search endpoint override: {endpoint}");
            Ok(config)
        }
        Err(std::env::VarError::NotPresent) => Ok(SearchConfig::default()),
        Err(err) => Err(err).with_context(|| format!("read {ENDPOINT_ENV}")),
    }
}

fn print_help() {
    println!("newshound - story search");
    println!("  <text>     search for <text>");
    println!("  :f <text>  narrow the list without searching");
    println!("  :d <n>     dismiss story <n>");
    println!("  :q         quit");
}

/// Applies one console line. Returns false when the session should end.
fn run_command(session: &mut SearchSession, line: &str) -> bool {
    if let Some(rest) = line.strip_prefix(':') {
        let (command, arg) = match rest.split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (rest, ""),
        };
        match command {
            "q" => return false,
            "f" => session.on_draft_change(arg),
            "d" => dismiss_by_number(session, arg),
            _ => println!("unknown command :{command}"),
        }
        return true;
    }
    if !line.is_empty() {
        session.on_draft_change(line);
        session.on_submit();
    }
    true
}

fn dismiss_by_number(session: &mut SearchSession, arg: &str) {
    let stories = session.current_view().visible_stories;
    let index = match arg.parse::<usize>() {
        Ok(number) if (1..=stories.len()).contains(&number) => number - 1,
        _ => {
            println!("no story numbered {arg:?}");
            return;
        }
    };
    session.on_dismiss(&stories[index]);
}

fn render(view: &SearchView) {
    println!();
    let mut status = Vec::new();
    if view.is_loading {
        status.push("loading");
    }
    if view.is_error {
        status.push("last search failed");
    }
    if !status.is_empty() {
        println!("[{}]", status.join(", "));
    }
    if view.visible_stories.is_empty() {
        println!("(no stories match {:?})", view.draft_query);
    } else {
        for (number, story) in view.visible_stories.iter().enumerate() {
            println!(
                "{:>2}. {} ({}) by {} | {} comments, {} points",
                number + 1,
                story.title,
                story.url,
                story.author,
                story.num_comments,
                story.points
            );
        }
    }
    println!("search: {:?}", view.draft_query);
}

/// Forwards stdin lines over a channel so the main loop can keep pumping
/// the session while idle.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        return;
                    }
                }
                Err(_) => return,
            }
        }
    });
    rx
}
