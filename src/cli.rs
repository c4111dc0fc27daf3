//! Terminal adapter — paints screens as plain text and reads numbered choices.

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::Result;
use crate::guide::screen::{ListStyle, Screen, Section, Tone};
use crate::guide::{Action, SectionKey, WizardState};

/// A line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Press the n-th action (1-based, as printed).
    Choose(usize),
    Toggle(SectionKey),
    Reset,
    Quit,
}

impl Command {
    /// Parse one input line. `None` for anything unrecognised.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        match line {
            "q" | "quit" | "/quit" => return Some(Command::Quit),
            "r" | "reset" => return Some(Command::Reset),
            _ => {}
        }
        if let Some(key) = line.strip_prefix("t ") {
            return key.trim().parse().ok().map(Command::Toggle);
        }
        line.parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(Command::Choose)
    }
}

/// Render a screen as plain text, numbering actions from 1.
pub fn render_text(screen: &Screen) -> String {
    let mut out = vec![format!("══ {} ══", screen.title)];

    for section in &screen.sections {
        out.push(String::new());
        match section {
            Section::Banner {
                heading,
                subheading,
            } => {
                out.push(heading.to_uppercase());
                out.push(subheading.to_string());
            }
            Section::Callout {
                tone,
                heading,
                body,
            } => {
                let marker = match tone {
                    Tone::Info => "[i]",
                    Tone::Success => "[ok]",
                    Tone::Warning => "[!]",
                    Tone::Danger => "[x]",
                };
                out.push(format!("{marker} {heading}"));
                out.push(format!("    {body}"));
            }
            Section::Prompt { heading, body } => {
                out.push(heading.to_string());
                out.push(body.to_string());
            }
            Section::Question {
                letter,
                prompt,
                hint,
                ..
            } => {
                out.push(format!("({letter}) {prompt}"));
                out.push(format!("    {hint}"));
            }
            Section::List {
                heading,
                style,
                items,
            } => {
                out.push(heading.to_string());
                for (i, item) in items.iter().enumerate() {
                    let bullet = match style {
                        ListStyle::Bulleted => "  •".to_string(),
                        ListStyle::Numbered => format!("  {}.", i + 1),
                        ListStyle::Checklist => "  [ ]".to_string(),
                    };
                    out.push(format!("{bullet} {item}"));
                }
            }
            Section::ResearchMeter {
                bar,
                caption,
                fill_percent,
            } => {
                let filled = usize::from(*fill_percent) / 5;
                out.push(format!(
                    "Research: [{}{}] {caption} ({bar})",
                    "#".repeat(filled),
                    "-".repeat(20 - filled)
                ));
            }
            Section::QuickReference {
                key,
                label,
                expanded,
                body,
            } => {
                let arrow = if *expanded { "▾" } else { "▸" };
                out.push(format!("{arrow} {label}  (t {key})"));
                for line in body.iter().flatten() {
                    out.push(format!("    • {line}"));
                }
            }
        }
    }

    out.push(String::new());
    for (i, action) in screen.actions.iter().enumerate() {
        match action.detail {
            Some(detail) => out.push(format!("[{}] {} ({detail})", i + 1, action.label)),
            None => out.push(format!("[{}] {}", i + 1, action.label)),
        }
    }
    out.join("\n")
}

/// Apply one command to the state. Returns false when the user quits.
pub fn apply(state: &mut WizardState, command: Command) -> bool {
    match command {
        Command::Quit => return false,
        Command::Reset => state.reset(),
        Command::Toggle(key) => {
            state.toggle_section(key);
        }
        Command::Choose(n) => {
            let chosen: Option<Action> = state
                .current_screen()
                .actions
                .get(n.saturating_sub(1))
                .filter(|_| n > 0)
                .map(|a| a.action);
            match chosen {
                Some(action) => {
                    // Offered actions always have a transition; an error here is already logged.
                    let _ = state.dispatch(action);
                }
                None => eprintln!("No action numbered {n}."),
            }
        }
    }
    true
}

/// Run the guide as a stdin/stdout REPL until EOF or `q`.
///
/// The local terminal user is the operator, so the access precondition is
/// taken as satisfied.
pub async fn run_repl() -> Result<()> {
    let mut state = WizardState::mount(true)?;
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    println!("\n{}\n", render_text(&state.current_screen()));
    eprint!("> ");

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break, // EOF
            Err(e) => return Err(e.into()),
        };
        if line.trim().is_empty() {
            eprint!("> ");
            continue;
        }

        match Command::parse(&line) {
            Some(command) => {
                if !apply(&mut state, command) {
                    break;
                }
                println!("\n{}\n", render_text(&state.current_screen()));
            }
            None => eprintln!("Enter an action number, 't <tiers|research|comms>', 'r' or 'q'."),
        }
        eprint!("> ");
    }

    Ok(())
}
