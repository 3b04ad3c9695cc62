use kanban_board::{Notice, NoticeLevel, Notifier};

/// Prints board notices to stderr so stdout stays machine-readable.
#[derive(Clone, Copy, Debug)]
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        tracing::debug!(message = %notice.message, error = notice.is_error(), "notice");
        if self.quiet {
            return;
        }
        let marker = match notice.level {
            NoticeLevel::Success => "✓",
            NoticeLevel::Error => "✗",
        };
        eprintln!("{marker} {}", notice.message);
    }
}
