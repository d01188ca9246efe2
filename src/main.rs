use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::DisableMouseCapture;
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::time::Instant;

use scrollcast::config::{self, ConfigResult};
use scrollcast::consumers::MonitorReport;
use scrollcast::demo::{Demo, TerminalWindow};
use scrollcast::frame::IntervalFrames;

/// Scroll event coordinator demo over a virtual terminal document
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Unified scroll event coordinator with a live terminal demo"
)]
struct Args {
    /// Number of rows in the virtual document
    #[arg(long, default_value_t = 400)]
    lines: u32,

    /// Write the delivery monitor report as JSON to this path on exit
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    // Writes to /tmp/scrollcast-debug.log at DEBUG level
    #[cfg(debug_assertions)]
    init_debug_log();

    color_eyre::install()?;

    let config_result = config::load_config();

    let args = Args::parse();

    if args.print_config {
        print!("{}", config::to_toml_string(&config_result.config)?);
        return Ok(());
    }

    let terminal = init_terminal()?;
    let result = run(terminal, &args, config_result);
    restore_terminal()?;
    let report = result?;

    // Output after terminal restore to prevent corruption
    if let Some(path) = &args.report {
        write_report(path, &report)?;
    }

    #[cfg(debug_assertions)]
    log::debug!("=== SCROLLCAST DEBUG SESSION ENDED ===");

    Ok(())
}

#[cfg(debug_assertions)]
fn init_debug_log() {
    use std::io::Write;

    let log_file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("/tmp/scrollcast-debug.log")
    {
        Ok(file) => file,
        Err(_) => return,
    };

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .format(|buf, record| {
            use std::time::SystemTime;
            let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
            writeln!(
                buf,
                "[{}] [{}] {}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();

    log::debug!("=== SCROLLCAST DEBUG SESSION STARTED ===");
}

/// Initialize terminal with raw mode and alternate screen
fn init_terminal() -> Result<DefaultTerminal> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        // The coordinator catches consumer panics; the demo keeps running
        if scrollcast::error::panic_is_contained() {
            log::error!("Consumer {}", info);
            return;
        }
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        hook(info);
    }));

    enable_raw_mode()?;

    // If any subsequent operations fail, ensure raw mode is disabled
    if let Err(e) = execute!(stdout(), EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }

    match ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(stdout())) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = execute!(stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(e.into())
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen);
    disable_raw_mode()?;
    Ok(())
}

fn run(
    mut terminal: DefaultTerminal,
    args: &Args,
    config_result: ConfigResult,
) -> Result<MonitorReport> {
    let size = terminal.size()?;
    // The first render sizes the document pane to its real area
    let window = TerminalWindow::new(args.lines, size.width, size.height).with_mouse_capture();
    let frames = IntervalFrames::new(config_result.config.dispatch.frame_interval());
    let mut demo = Demo::new(&config_result.config, window, frames)?;

    if let Some(warning) = config_result.warning {
        demo.notification = Some(warning);
    }

    loop {
        demo.tick(Instant::now());

        if demo.should_render() {
            terminal.draw(|frame| demo.render(frame))?;
            demo.clear_dirty();
        }

        demo.handle_events(demo.idle_wait(Instant::now()))?;

        if demo.should_quit() {
            break;
        }
    }

    Ok(demo.shutdown())
}

fn write_report(path: &Path, report: &MonitorReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .wrap_err_with(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}
