mod alerts;
mod config;
mod error;
mod input;
mod pump;
mod storage;
mod ui;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

use clap::Parser;
use stopwatch_core::{Clock, Notification, Scheduler, Stopwatch, TickHandle};

use crate::alerts::{fire_alert, wants_feedback, AlertConfig};
use crate::config::{Settings, Theme};
use crate::error::AppError;
use crate::input::Command;
use crate::pump::{pump_thread, PumpScheduler, SystemClock};
use crate::storage::ExportStorage;
use crate::ui::{Frame, RawMode, Status};

/// Everything the main loop reacts to. Producers run on their own threads;
/// events are handled one at a time on the main thread.
#[derive(Debug)]
pub enum AppEvent {
    Tick(TickHandle),
    Key(char),
    Quit,
}

#[derive(Parser, Debug)]
#[command(version, about = "Terminal stopwatch with lap splits")]
struct Cli {
    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for saved times
    #[arg(short, long)]
    export_dir: Option<PathBuf>,

    /// Display refresh cadence in milliseconds
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Start with sound off
    #[arg(long)]
    mute: bool,
}

struct StopwatchApp<C, S, W> {
    stopwatch: Stopwatch<C, S>,
    alert_config: AlertConfig,
    storage: ExportStorage,
    out: W,

    theme: Theme,
    fullscreen: bool,
    help_visible: bool,
    status: Option<Status>,
    quit: bool,
    raw_mode: Option<RawMode>,
}

impl<C: Clock, S: Scheduler, W: Write> StopwatchApp<C, S, W> {
    fn new(stopwatch: Stopwatch<C, S>, settings: &Settings, out: W) -> Self {
        Self {
            stopwatch,
            alert_config: AlertConfig::new(settings.sound),
            storage: ExportStorage::new(settings.export_dir()),
            out,
            theme: settings.theme,
            fullscreen: settings.fullscreen,
            help_visible: false,
            status: None,
            quit: false,
            raw_mode: None,
        }
    }

    fn redraw(&mut self) -> Result<(), AppError> {
        let text = if self.help_visible {
            ui::draw_help(self.theme)
        } else {
            let time = self.stopwatch.display();
            let rows = self.stopwatch.lap_rows();
            let frame = Frame {
                time: &time,
                running: self.stopwatch.is_running(),
                rows: &rows,
                status: self.status.as_ref(),
                sound: self.alert_config.sound,
            };
            if self.fullscreen {
                ui::draw_fullscreen(&frame, self.theme)
            } else {
                ui::draw_inline(&frame, self.theme)
            }
        };
        self.out.write_all(ui::to_raw(&text).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    /// Inline mode has no room for the lap list, so print it above the
    /// status line whenever it changes.
    fn print_laps(&mut self) -> Result<(), AppError> {
        if self.fullscreen || self.help_visible {
            return Ok(());
        }
        let list = ui::draw_lap_list(&self.stopwatch.lap_rows(), self.theme);
        self.out.write_all(ui::to_raw(&format!("\n{}", list)).as_bytes())?;
        Ok(())
    }

    fn handle_tick(&mut self, handle: TickHandle) -> Result<(), AppError> {
        if self.stopwatch.on_tick(handle).is_some() && !self.help_visible {
            self.redraw()?;
        }
        Ok(())
    }

    fn handle_key(&mut self, key: char) -> Result<(), AppError> {
        // Any key closes the help screen
        if self.help_visible {
            self.help_visible = false;
            self.out.write_all(ui::clear_screen().as_bytes())?;
            return self.redraw();
        }

        let Some(command) = Command::from_key(key) else {
            log::trace!("unmapped key {:?}", key);
            return Ok(());
        };

        self.status = None;
        match command {
            Command::ToggleRun => {
                if let Some(notification) = self.stopwatch.toggle() {
                    self.feedback(&notification)?;
                }
            }
            Command::Reset => {
                if self.stopwatch.can_reset() {
                    let notification = self.stopwatch.reset();
                    self.feedback(&notification)?;
                    self.print_laps()?;
                }
            }
            Command::Lap => {
                if self.stopwatch.can_lap() {
                    match self.stopwatch.lap() {
                        Ok(notification) => {
                            self.feedback(&notification)?;
                            self.print_laps()?;
                        }
                        Err(e) => log::debug!("lap rejected: {}", e),
                    }
                }
            }
            Command::ClearLaps => {
                if self.stopwatch.can_clear_laps() {
                    let notification = self.stopwatch.clear_laps();
                    self.feedback(&notification)?;
                    self.print_laps()?;
                }
            }
            Command::Save => self.save()?,
            Command::ToggleSound => {
                let on = self.alert_config.toggle_sound();
                log::info!("sound {}", if on { "on" } else { "off" });
                fire_alert(&self.alert_config, &mut self.out)?;
                self.status = Some(Status::success(if on { "Sound On" } else { "Sound Off" }));
            }
            Command::ToggleTheme => {
                self.theme = self.theme.toggled();
                log::info!("theme {:?}", self.theme);
                self.clear_screen()?;
            }
            Command::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                self.out.write_all(ui::clear_screen().as_bytes())?;
            }
            Command::Help => {
                self.help_visible = true;
            }
            Command::Quit => {
                self.quit = true;
                return Ok(());
            }
        }
        self.redraw()
    }

    fn feedback(&mut self, notification: &Notification) -> Result<(), AppError> {
        log::info!("{:?}", notification);
        if wants_feedback(notification) {
            fire_alert(&self.alert_config, &mut self.out)?;
        }
        Ok(())
    }

    fn save(&mut self) -> Result<(), AppError> {
        let doc = self.stopwatch.export();
        match self.storage.save(&doc, chrono::Local::now()) {
            Ok(_) => {
                fire_alert(&self.alert_config, &mut self.out)?;
                self.status = Some(Status::success("Time saved successfully!"));
            }
            Err(e) => {
                log::error!("{}", e);
                self.status = Some(Status::error("Save failed"));
            }
        }
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<(), AppError> {
        if self.fullscreen {
            self.out.write_all(ui::clear_screen().as_bytes())?;
        }
        Ok(())
    }

    /// Stop the tick source and hand the terminal back in cooked mode.
    fn shutdown(&mut self) -> Result<(), AppError> {
        self.stopwatch.pause();
        self.out.write_all(ui::to_raw(&ui::restore()).as_bytes())?;
        self.out.flush()?;
        self.raw_mode.take();
        Ok(())
    }
}

fn load_settings(cli: &Cli) -> Result<Settings, AppError> {
    let mut settings = match cli.config.clone().or_else(Settings::default_path) {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };
    if let Some(dir) = &cli.export_dir {
        settings.export_dir = Some(dir.clone());
    }
    if let Some(interval) = cli.interval_ms {
        settings.tick_interval_ms = interval.max(1);
    }
    if cli.mute {
        settings.sound = false;
    }
    Ok(settings)
}

fn run(cli: Cli) -> Result<(), AppError> {
    let settings = load_settings(&cli)?;
    log::debug!("settings: {:?}", settings);

    let raw_mode = RawMode::enable()?;
    let (event_tx, event_rx) = mpsc::channel();
    let (pump_tx, pump_rx) = mpsc::channel();

    let pump_events = event_tx.clone();
    std::thread::Builder::new()
        .name("pump".into())
        .spawn(move || pump_thread(pump_rx, pump_events))
        .map_err(|e| AppError::Spawn("pump", e))?;
    input::spawn_reader(event_tx)?;

    let stopwatch = Stopwatch::new(
        SystemClock::new(),
        PumpScheduler::new(pump_tx),
        settings.tick_interval_ms,
    );
    let mut app = StopwatchApp::new(stopwatch, &settings, std::io::stdout());
    app.raw_mode = Some(raw_mode);

    let result = event_loop(&mut app, &event_rx);
    app.shutdown()?;
    app.stopwatch.timer().scheduler().quit();
    result
}

fn event_loop<C: Clock, S: Scheduler, W: Write>(
    app: &mut StopwatchApp<C, S, W>,
    events: &mpsc::Receiver<AppEvent>,
) -> Result<(), AppError> {
    app.out.write_all(ui::enter().as_bytes())?;
    app.clear_screen()?;
    app.redraw()?;

    while let Ok(event) = events.recv() {
        match event {
            AppEvent::Tick(handle) => app.handle_tick(handle)?,
            AppEvent::Key(key) => app.handle_key(key)?,
            AppEvent::Quit => break,
        }
        if app.quit {
            break;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("Stopwatch starting, press h for help");

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
