//! Delta Green Handler TUI application.
//!
//! A vim-style terminal interface for playing Delta Green with an AI
//! Handler:
//!
//! ```bash
//! cargo run -p handler -- \
//!     --rulebook rules/agents-handbook.txt \
//!     --sheet agents/reyes.txt --portrait agents/reyes.png
//! ```

mod app;
mod events;
mod ui;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use handler_core::{AgentFiles, CampaignFiles, Handler, HandlerSession};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::Duration;

use app::{App, PendingRequest};
use events::{handle_event, EventResult};
use ui::render::render;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Check for API key
    if std::env::var("GEMINI_API_KEY").is_err() {
        eprintln!("Error: GEMINI_API_KEY environment variable not set.");
        eprintln!("Please set it in .env file or with: export GEMINI_API_KEY=your_key_here");
        std::process::exit(1);
    }

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let files = match parse_campaign_files(&args) {
        Ok(files) => files,
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!("Run with --help for usage.");
            std::process::exit(1);
        }
    };

    // Load everything before touching the terminal; a bad path should
    // fail with a plain error, not a corrupted screen.
    let campaign = match files.load().await {
        Ok(campaign) => campaign,
        Err(e) => {
            eprintln!("Failed to load campaign files: {e}");
            std::process::exit(1);
        }
    };

    let handler = match Handler::from_env() {
        Ok(handler) => handler,
        Err(e) => {
            eprintln!("Failed to create the Handler: {e}");
            std::process::exit(1);
        }
    };

    let session = HandlerSession::new(campaign, handler);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, App::new(session)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, &app))?;

        // Process any pending session request. The request is awaited
        // inline, which also means only one can ever be in flight.
        if let Some(request) = app.pending_request.take() {
            app.request_in_flight = true;
            app.clear_status();
            terminal.draw(|f| render(f, &app))?;

            let result = match request {
                PendingRequest::Open => app.session.open().await,
                PendingRequest::Submit(input) => app.session.submit(input).await,
                PendingRequest::SelectChoice(index) => {
                    let agent = app.active_agent_name();
                    app.session.select_choice(index, agent).await
                }
                PendingRequest::Summarize => app.session.summarize().await,
                PendingRequest::Recall(path) => match tokio::fs::read_to_string(&path).await {
                    Ok(summary) => app.session.recall_summary(&summary).await,
                    Err(e) => {
                        app.set_status(format!("Could not read {}: {e}", path.display()));
                        Ok(())
                    }
                },
            };

            if let Err(e) = result {
                app.set_status(format!("{e}"));
            }

            app.request_in_flight = false;
            if app.scroll_locked_to_bottom {
                app.scroll_to_bottom();
            }
        }

        // Poll for events
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            match handle_event(&mut app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Build the campaign file set from command line flags. `--name` and
/// `--portrait` attach to the most recent `--sheet`.
fn parse_campaign_files(args: &[String]) -> Result<CampaignFiles, String> {
    let mut files = CampaignFiles::new();
    let mut agents: Vec<AgentFiles> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = || -> Result<&String, String> {
            args.get(i + 1)
                .ok_or_else(|| format!("{flag} requires a value"))
        };

        match flag {
            "--rulebook" => {
                files = files.rulebook(value()?);
                i += 2;
            }
            "--mythic" => {
                files = files.mythic_rulebook(value()?);
                i += 2;
            }
            "--sheet" => {
                agents.push(AgentFiles::new(value()?));
                i += 2;
            }
            "--name" => {
                let name = value()?.clone();
                match agents.last_mut() {
                    Some(agent) => agent.name = Some(name),
                    None => return Err("--name must follow a --sheet".to_string()),
                }
                i += 2;
            }
            "--portrait" => {
                let path = value()?.clone();
                match agents.last_mut() {
                    Some(agent) => agent.portrait = Some(path.into()),
                    None => return Err("--portrait must follow a --sheet".to_string()),
                }
                i += 2;
            }
            "--journal" | "--continue" => {
                files = files.journal(value()?);
                i += 2;
            }
            other => {
                return Err(format!("unknown flag: {other}"));
            }
        }
    }

    for agent in agents {
        files = files.agent(agent);
    }
    Ok(files)
}

fn print_help() {
    println!("Delta Green Handler - AI-narrated Delta Green sessions");
    println!();
    println!("USAGE:");
    println!("  handler --rulebook <FILE> --sheet <FILE> [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help            Show this help message");
    println!("  --rulebook <FILE>     Rulebook/setting text (repeatable, at least one)");
    println!("  --mythic <FILE>       Mythic GME rulebook for solo oracle play");
    println!("  --sheet <FILE>        Agent character sheet (repeatable, 1-8 agents)");
    println!("  --name <NAME>         Name for the preceding --sheet");
    println!("                        (otherwise parsed from the sheet)");
    println!("  --portrait <FILE>     Portrait image for the preceding --sheet");
    println!("  --journal <FILE>      Prior-session journal; continues that campaign");
    println!("  --continue <FILE>     Alias for --journal");
    println!();
    println!("IN-GAME:");
    println!("  i        Type an action        o     Toggle IC/OOC");
    println!("  1-9      Take an offered choice");
    println!("  :summary Generate a session summary");
    println!("  :recall <file>  Feed a past summary back to the Handler");
    println!("  :q       Quit");
    println!();
    println!("EXAMPLES:");
    println!("  handler --rulebook handbook.txt --sheet reyes.txt");
    println!("  handler --rulebook handbook.txt --mythic mythic.txt \\");
    println!("          --sheet reyes.txt --name \"Reyes, Maria\" --portrait reyes.png \\");
    println!("          --sheet carver.txt --journal last-session.txt");
}
