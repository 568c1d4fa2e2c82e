use std::fmt::Write;
use std::io;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, ResetColor, Stylize};
use crossterm::terminal::{self, Clear, ClearType};
use stopwatch_core::{format_elapsed, Badge, ElapsedParts, LapRow};

use crate::config::Theme;

struct Palette {
    text: Color,
    accent: Color,
    dim: Color,
    fastest: Color,
    slowest: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            text: Color::White,
            accent: Color::Cyan,
            dim: Color::DarkGrey,
            fastest: Color::Green,
            slowest: Color::Red,
        },
        Theme::Light => Palette {
            text: Color::Black,
            accent: Color::Blue,
            dim: Color::Grey,
            fastest: Color::DarkGreen,
            slowest: Color::DarkRed,
        },
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StatusKind {
    Success,
    Error,
}

/// Transient message shown under the time.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: StatusKind::Success }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: StatusKind::Error }
    }
}

/// Everything one redraw needs.
pub struct Frame<'a> {
    pub time: &'a ElapsedParts,
    pub running: bool,
    pub rows: &'a [LapRow],
    pub status: Option<&'a Status>,
    pub sound: bool,
}

fn status_color(p: &Palette, kind: StatusKind) -> Color {
    match kind {
        StatusKind::Success => p.fastest,
        StatusKind::Error => p.slowest,
    }
}

/// Raw mode for the lifetime of the guard, so keys arrive without Enter.
pub struct RawMode;

impl RawMode {
    pub fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            log::error!("failed to leave raw mode: {}", e);
        }
    }
}

/// Raw mode does no newline translation.
pub fn to_raw(text: &str) -> String {
    text.replace('\n', "\r\n")
}

pub fn clear_screen() -> String {
    format!("{}{}", Clear(ClearType::All), MoveTo(0, 0))
}

/// Lap list, most recent first.
pub fn draw_lap_list(rows: &[LapRow], theme: Theme) -> String {
    let p = palette(theme);
    let mut out = String::new();

    if rows.is_empty() {
        writeln!(out, "  {}", "No lap times recorded yet".with(p.dim)).ok();
        return out;
    }

    for row in rows {
        let time = format_elapsed(row.lap.elapsed_ms());
        let line = format!("Lap {:>2}  {}", row.lap.lap_number(), time);
        let badge = match row.badge {
            Some(Badge::Fastest) => format!("  {}", "[Fastest]".with(p.fastest)),
            Some(Badge::Slowest) => format!("  {}", "[Slowest]".with(p.slowest)),
            None => String::new(),
        };
        writeln!(out, "  {}{}", line.with(p.text), badge).ok();
    }
    out
}

pub fn draw_fullscreen(frame: &Frame, theme: Theme) -> String {
    let p = palette(theme);
    let mut out = MoveTo(0, 0).to_string();

    writeln!(out, "{}", "STOPWATCH".with(p.accent).bold()).ok();
    writeln!(out).ok();

    let state = if frame.running { "RUNNING" } else { "STOPPED" };
    let digits = format!(
        "{}  {}  {}",
        frame.time.minutes, frame.time.seconds, frame.time.centiseconds
    );
    writeln!(out, "    {}  {}", digits.with(p.text).bold(), state.with(p.dim)).ok();
    writeln!(out, "    {}", "min  sec  cs".with(p.dim)).ok();
    writeln!(out).ok();

    match frame.status {
        Some(status) => {
            writeln!(out, "{}", status.text.as_str().with(status_color(&p, status.kind))).ok();
        }
        None => {
            writeln!(out).ok();
        }
    }

    writeln!(out, "{}", "Laps".bold()).ok();
    out.push_str(&draw_lap_list(frame.rows, theme));
    writeln!(out).ok();

    let sound = if frame.sound { "on" } else { "off" };
    let footer = format!(
        "space=start/pause  l=lap  r=reset  c=clear laps  s=save\n\
         m=sound({})  t=theme  f=fullscreen  h=help  q=quit",
        sound
    );
    writeln!(out, "{}", footer.with(p.dim)).ok();
    write!(out, "{}", Clear(ClearType::FromCursorDown)).ok();
    out
}

/// Single status line, rewritten in place.
pub fn draw_inline(frame: &Frame, theme: Theme) -> String {
    let p = palette(theme);
    let mut out = format!("\r{}", Clear(ClearType::CurrentLine));

    let marker = if frame.running { ">" } else { "||" };
    let laps = format!("laps: {}", frame.rows.len());
    write!(
        out,
        "{} {}  {}",
        frame.time.to_string().with(p.text).bold(),
        marker,
        laps.with(p.dim)
    )
    .ok();
    if let Some(status) = frame.status {
        write!(out, "  {}", status.text.as_str().with(status_color(&p, status.kind))).ok();
    }
    out
}

pub fn draw_help(theme: Theme) -> String {
    let p = palette(theme);
    let keys = "space  Start/Pause\n\
                enter  Start/Pause\n\
                l      Record lap (running)\n\
                r      Reset (stopped)\n\
                c      Clear laps\n\
                s      Save time to file\n\
                m      Sound on/off\n\
                t      Dark/Light theme\n\
                f      Fullscreen on/off\n\
                q      Quit";
    format!(
        "{}{}\n\n{}\n\n{}\n",
        clear_screen(),
        "STOPWATCH HELP".with(p.accent).bold(),
        keys.with(p.text),
        "Press any key to close".with(p.dim)
    )
}

/// Hide the cursor while drawing.
pub fn enter() -> String {
    Hide.to_string()
}

/// Leave the terminal in a sane state.
pub fn restore() -> String {
    format!("{}{}\n", ResetColor, Show)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::session_with_laps;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_empty_lap_list_placeholder() {
        let text = strip_ansi(&draw_lap_list(&[], Theme::Dark));
        assert_eq!(text.trim(), "No lap times recorded yet");
    }

    #[test]
    fn test_lap_list_order_and_badges() {
        let sw = session_with_laps(&[1_000, 2_500, 3_000, 6_000]);
        let text = strip_ansi(&draw_lap_list(&sw.lap_rows(), Theme::Dark));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "  Lap  4  00:06:00  [Slowest]",
                "  Lap  3  00:03:00",
                "  Lap  2  00:02:50",
                "  Lap  1  00:01:00  [Fastest]",
            ]
        );
    }

    #[test]
    fn test_single_lap_has_no_badge() {
        let sw = session_with_laps(&[1_000]);
        let text = strip_ansi(&draw_lap_list(&sw.lap_rows(), Theme::Light));
        assert_eq!(text, "  Lap  1  00:01:00\n");
    }

    #[test]
    fn test_inline_line() {
        let time = format_elapsed(61_005);
        let status = Status::success("Time saved successfully!");
        let frame = Frame {
            time: &time,
            running: true,
            rows: &[],
            status: Some(&status),
            sound: true,
        };
        let text = strip_ansi(&draw_inline(&frame, Theme::Light));
        assert_eq!(text, "\r01:01:00 >  laps: 0  Time saved successfully!");
    }

    #[test]
    fn test_fullscreen_shows_time_and_placeholder() {
        let time = format_elapsed(500);
        let frame = Frame {
            time: &time,
            running: false,
            rows: &[],
            status: None,
            sound: false,
        };
        let text = strip_ansi(&draw_fullscreen(&frame, Theme::Dark));
        assert!(text.contains("00  00  50"));
        assert!(text.contains("STOPPED"));
        assert!(text.contains("No lap times recorded yet"));
        assert!(text.contains("m=sound(off)"));
    }

    #[test]
    fn test_help_lists_shortcuts() {
        let text = strip_ansi(&draw_help(Theme::Dark));
        assert!(text.contains("STOPWATCH HELP"));
        assert!(text.contains("l      Record lap"));
    }

    #[test]
    fn test_raw_newlines() {
        assert_eq!(to_raw("a\nb\n"), "a\r\nb\r\n");
    }
}
