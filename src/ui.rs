use anstyle::{AnsiColor, Style};
use is_terminal::IsTerminal;
use std::fmt::Display;
use std::io::{self, Write};
use std::time::{Duration, Instant};

const LABEL_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Pending,
    Success,
    Info,
    Warn,
    Error,
}

impl Tone {
    fn to_stderr(self) -> bool {
        matches!(self, Tone::Warn | Tone::Error)
    }

    fn style(self) -> Style {
        let color = match self {
            Tone::Pending => AnsiColor::Cyan,
            Tone::Success => AnsiColor::Green,
            Tone::Info => AnsiColor::Blue,
            Tone::Warn => AnsiColor::Yellow,
            Tone::Error => AnsiColor::Red,
        };
        Style::new().bold().fg_color(Some(color.into()))
    }
}

fn color_enabled(to_stderr: bool) -> bool {
    let terminal = if to_stderr {
        io::stderr().is_terminal()
    } else {
        io::stdout().is_terminal()
    };
    terminal && std::env::var_os("NO_COLOR").is_none()
}

fn render(tone: Tone, label: &str, message: &str) -> String {
    let label = format!("{label:>LABEL_WIDTH$}");
    let label = if color_enabled(tone.to_stderr()) {
        let style = tone.style();
        format!("{}{label}{}", style.render(), style.render_reset())
    } else {
        label
    };

    let mut rendered = String::new();
    for (idx, line) in message.split('\n').enumerate() {
        if idx == 0 {
            rendered.push_str(&format!("{label} {line}\n"));
        } else {
            rendered.push_str(&format!("{:LABEL_WIDTH$} {line}\n", ""));
        }
    }
    rendered
}

fn emit(tone: Tone, label: &str, message: &str) {
    let rendered = render(tone, label, message);
    // Broken pipes (e.g. `edhub available | head`) are not worth failing over.
    if tone.to_stderr() {
        let mut handle = io::stderr().lock();
        let _ = handle.write_all(rendered.as_bytes());
        let _ = handle.flush();
    } else {
        let mut handle = io::stdout().lock();
        let _ = handle.write_all(rendered.as_bytes());
        let _ = handle.flush();
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs >= 60 {
        match secs % 60 {
            0 => format!("{}m", secs / 60),
            rem => format!("{}m {rem}s", secs / 60),
        }
    } else if secs >= 1 {
        format!("{:.2}s", elapsed.as_secs_f64())
    } else {
        format!("{}ms", elapsed.as_millis())
    }
}

pub fn status(label: &str, message: impl Display) {
    emit(Tone::Pending, label, &message.to_string());
}

pub fn info(message: impl Display) {
    emit(Tone::Info, "Info", &message.to_string());
}

pub fn success(label: &str, message: impl Display) {
    emit(Tone::Success, label, &message.to_string());
}

/// A long-running step: announced when created, reported once when finished.
pub struct Progress {
    message: String,
    started: Instant,
    finished: bool,
}

impl Progress {
    pub fn new(label: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        emit(Tone::Pending, label, &message);
        Self {
            message,
            started: Instant::now(),
            finished: false,
        }
    }

    pub fn success(mut self, label: &str) {
        self.finished = true;
        let line = format!(
            "{} in {}",
            self.message,
            format_elapsed(self.started.elapsed())
        );
        emit(Tone::Success, label, &line);
    }

    pub fn fail(mut self, label: &str, reason: impl Display) {
        self.finished = true;
        let line = format!(
            "{} after {}: {reason}",
            self.message,
            format_elapsed(self.started.elapsed())
        );
        emit(Tone::Error, label, &line);
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        if !self.finished {
            emit(Tone::Warn, "Abandoned", &self.message);
        }
    }
}
