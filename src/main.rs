use anyhow::Result;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use taskpad::context::{AppContext, StandardContext};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h" || args[1] == "help") {
        print_help();
        return Ok(());
    }

    // Optional data root override: taskpad --root <dir>
    let override_root = if args.len() > 2 && args[1] == "--root" {
        Some(PathBuf::from(&args[2]))
    } else {
        None
    };
    let ctx: Arc<dyn AppContext> = Arc::new(StandardContext::new(override_root));

    // The terminal belongs to the TUI, so logs go to a file in the data dir.
    if let Ok(log_path) = ctx.get_log_file_path()
        && let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
    {
        let _ = WriteLogger::init(LevelFilter::Info, ConfigBuilder::new().build(), file);
    }

    // Panic hook: raw mode swallows normal panic output, keep a trace on disk.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        use std::io::Write;
        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("taskpad_panic.log")
        {
            let _ = writeln!(file, "PANIC: {:?}", info);
        }
        default_hook(info);
    }));

    taskpad::tui::run(ctx)
}

fn print_help() {
    println!(
        "Taskpad v{} - A small and fast terminal task list manager",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    taskpad                 Start the interactive TUI");
    println!("    taskpad --root <dir>    Keep data and config under <dir>");
    println!("    taskpad --help          Show this help message");
    println!();
    println!("KEYBINDINGS:");
    println!("    a           Add a task");
    println!("    e / Enter   Edit the selected task");
    println!("    Space       Toggle completion");
    println!("    d           Delete the selected task");
    println!("    j/k         Move the selection");
    println!("    q           Quit");
    println!();
    println!("    In the task form: Tab switches fields, Enter saves, Esc cancels.");
    println!();
    println!("FILES:");
    println!("    Tasks are stored as a JSON array in the platform data directory");
    println!("    (tasks.json); display options live in config.toml next to it.");
}
