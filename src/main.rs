//! picklist CLI
//!
//! Pick items from a list in the terminal and print the selection.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode, Stdio};

use clap::Parser;
use serde_json::Value;

use picklist::config::{load_default_options, load_options};
use picklist::{ActionResult, HighlightColor, Menu, MenuError, MenuItem, MenuOptions, Selector};

/// Exit status after Ctrl+C, as a shell reports SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Parser)]
#[command(name = "picklist")]
#[command(about = "Pick items from a list in the terminal and print the selection")]
#[command(version)]
struct Cli {
    /// File with one item per line, or a JSON array with --json (default: stdin)
    file: Option<PathBuf>,

    /// Title shown above the list
    #[arg(long, default_value = "Select items")]
    title: String,

    /// Allow selecting several items before finishing
    #[arg(long)]
    toggle: bool,

    /// Start with every item selected (implies --toggle)
    #[arg(long)]
    all: bool,

    /// Highlight color: red, green, yellow, blue, magenta, cyan, white
    #[arg(long)]
    color: Option<String>,

    /// Cursor glyphs for inactive and active rows
    #[arg(long, num_args = 2, value_names = ["INACTIVE", "ACTIVE"])]
    selector: Option<Vec<String>>,

    /// Object field used as the label for JSON items
    #[arg(long)]
    display: Option<String>,

    /// Read items as a JSON array instead of lines
    #[arg(long)]
    json: bool,

    /// Output format for the selection
    #[arg(long, value_enum, default_value = "human")]
    format: OutputFormatArg,

    /// Extra action NAME=COMMAND; the command gets the selected labels as
    /// arguments and every line it prints becomes a new item
    #[arg(long = "action", value_name = "NAME=COMMAND")]
    actions: Vec<String>,

    /// Config file with default options (default: <config dir>/picklist/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write debug logs to --log-file
    #[arg(short, long)]
    verbose: bool,

    /// Log destination when --verbose is set
    #[arg(long, default_value = "picklist.log")]
    log_file: PathBuf,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, &cli.log_file) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match cmd_pick(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// SETUP
// ============================================================================

/// Send logs to a file: the menu owns the terminal while it runs.
fn init_logging(verbose: bool, log_file: &Path) -> Result<(), String> {
    if !verbose {
        return Ok(());
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| format!("cannot open log file {}: {}", log_file.display(), e))?;

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Config-file defaults overridden by command-line flags.
fn resolve_options(cli: &Cli) -> Result<MenuOptions, String> {
    let mut options = match &cli.config {
        Some(path) => load_options(path),
        None => load_default_options(),
    }
    .map_err(|e| e.to_string())?;

    if let Some(color) = &cli.color {
        options.color = HighlightColor::from_name(color);
    }
    if let Some([inactive, active]) = cli.selector.as_deref() {
        options.selector = Selector::new(inactive.as_str(), active.as_str());
    }
    if cli.display.is_some() {
        options.display = cli.display.clone();
    }
    if cli.toggle || cli.all {
        options.toggle = true;
    }
    if cli.all {
        options.preselect_all = true;
    }
    Ok(options)
}

// ============================================================================
// ITEMS
// ============================================================================

fn read_input(file: Option<&Path>) -> Result<String, String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e)),
        None => io::read_to_string(io::stdin()).map_err(|e| format!("cannot read stdin: {}", e)),
    }
}

/// One item per non-empty line, or a JSON array.
fn parse_items(text: &str, json: bool) -> Result<Vec<Value>, String> {
    if json {
        return serde_json::from_str(text).map_err(|e| format!("invalid JSON item list: {}", e));
    }
    Ok(text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| Value::String(line.to_string()))
        .collect())
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Split `NAME=COMMAND`.
fn parse_action(definition: &str) -> Result<(String, String), String> {
    match definition.split_once('=') {
        Some((name, command)) if !name.trim().is_empty() && !command.trim().is_empty() => {
            Ok((name.trim().to_string(), command.to_string()))
        }
        _ => Err(format!("invalid --action {:?}, expected NAME=COMMAND", definition)),
    }
}

/// Run `command` through the shell with the selected labels as `$@`.
///
/// The command's stdout lines become new items. A command that cannot
/// start or exits unsuccessfully changes nothing.
fn run_command(command: &str, selection: &[Value], display: Option<&str>) -> ActionResult<Value> {
    let labels: Vec<String> = selection
        .iter()
        .map(|item| item.label(display).into_owned())
        .collect();

    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .arg("picklist")
        .args(&labels)
        .stdin(Stdio::inherit())
        .stderr(Stdio::inherit())
        .output();

    match output {
        Ok(out) if out.status.success() => {
            let added: Vec<Value> = String::from_utf8_lossy(&out.stdout)
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| Value::String(line.to_string()))
                .collect();
            log::debug!("command {:?} produced {} new item(s)", command, added.len());
            ActionResult::none().adding(added)
        }
        Ok(out) => {
            log::warn!("command {:?} exited with {}", command, out.status);
            ActionResult::none()
        }
        Err(e) => {
            log::warn!("cannot run command {:?}: {}", command, e);
            ActionResult::none()
        }
    }
}

// ============================================================================
// COMMAND HANDLER
// ============================================================================

fn cmd_pick(cli: Cli) -> Result<ExitCode, String> {
    let options = resolve_options(&cli)?;
    let text = read_input(cli.file.as_deref())?;
    let items = parse_items(&text, cli.json)?;

    let mut menu = Menu::new(cli.title.clone(), items)
        .options(options.clone())
        .action("Remove", |selection: &[Value]| {
            ActionResult::none().removing(selection.to_vec())
        });

    for definition in &cli.actions {
        let (name, command) = parse_action(definition)?;
        let display = options.display.clone();
        menu = menu.action(name, move |selection: &[Value]| {
            run_command(&command, selection, display.as_deref())
        });
    }

    let selected = match menu.run() {
        Ok(selected) => selected,
        Err(MenuError::Interrupted) => return Ok(ExitCode::from(EXIT_INTERRUPTED)),
        Err(e) => return Err(e.to_string()),
    };

    match cli.format {
        OutputFormatArg::Human => {
            for item in &selected {
                println!("{}", item.label(options.display.as_deref()));
            }
        }
        OutputFormatArg::Json => {
            let json = serde_json::to_string_pretty(&selected).map_err(|e| e.to_string())?;
            println!("{}", json);
        }
    }

    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lines_become_string_items() {
        let items = parse_items("alpha\n\n  \nbeta\n", false).unwrap();
        assert_eq!(items, vec![json!("alpha"), json!("beta")]);
    }

    #[test]
    fn json_array_is_parsed() {
        let items = parse_items(r#"[{"name": "a"}, "b", 3]"#, true).unwrap();
        assert_eq!(items, vec![json!({"name": "a"}), json!("b"), json!(3)]);
    }

    #[test]
    fn json_that_is_not_an_array_is_rejected() {
        assert!(parse_items(r#"{"name": "a"}"#, true).is_err());
    }

    #[test]
    fn action_definition_splits_on_first_equals() {
        assert_eq!(
            parse_action("Grep=grep -c a=b").unwrap(),
            ("Grep".to_string(), "grep -c a=b".to_string())
        );
    }

    #[test]
    fn action_definition_needs_name_and_command() {
        assert!(parse_action("NoCommand").is_err());
        assert!(parse_action("=ls").is_err());
        assert!(parse_action("Name=").is_err());
    }

    #[test]
    fn command_output_lines_become_items() {
        let result = run_command("printf '%s\\n' \"$@\" new", &[json!("a"), json!("b")], None);
        assert_eq!(result.add, vec![json!("a"), json!("b"), json!("new")]);
        assert!(result.remove.is_empty());
    }

    #[test]
    fn command_uses_display_labels() {
        let result = run_command("echo \"$1\"", &[json!({"name": "x.txt"})], Some("name"));
        assert_eq!(result.add, vec![json!("x.txt")]);
    }

    #[test]
    fn failing_command_has_no_effect() {
        let result = run_command("echo ignored; exit 3", &[], None);
        assert!(result.is_none());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "picklist",
            "--all",
            "--color",
            "yellow",
            "--selector",
            " ",
            ">",
            "--config",
            "/nonexistent/picklist.json",
        ]);
        let options = resolve_options(&cli).unwrap();
        assert!(options.toggle);
        assert!(options.preselect_all);
        assert_eq!(options.color, HighlightColor::Yellow);
        assert_eq!(options.selector, Selector::new(" ", ">"));
    }
}
