pub mod constants;
pub mod render;

use std::io::Write;

use parafetch_core::{AppViewModel, Severity};

/// Where the controller puts its output.
pub(crate) trait Screen {
    fn draw(&mut self, view: &AppViewModel);
    /// Blocking, user-visible notification.
    fn notify(&mut self, severity: Severity, message: &str);
}

/// Prints frames to stdout and error notifications to stderr.
#[derive(Default)]
pub(crate) struct TerminalScreen {
    last_frame: Vec<String>,
}

impl TerminalScreen {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn prompt(&self) {
        let mut out = std::io::stdout().lock();
        let _ = write!(out, "{}", constants::PROMPT);
        let _ = out.flush();
    }
}

impl Screen for TerminalScreen {
    fn draw(&mut self, view: &AppViewModel) {
        let frame = render::render(view);
        // Polls that return the same snapshot would only repeat the table.
        if frame == self.last_frame {
            return;
        }
        {
            let mut out = std::io::stdout().lock();
            let _ = writeln!(out);
            for line in &frame {
                let _ = writeln!(out, "{line}");
            }
        }
        self.last_frame = frame;
        self.prompt();
    }

    fn notify(&mut self, severity: Severity, message: &str) {
        let text = render::render_notification(severity, message);
        match severity {
            Severity::Error => eprintln!("\n{text}"),
            Severity::Information => println!("\n{text}"),
        }
        self.prompt();
    }
}
