use std::io::Write;
use std::sync::atomic::{ AtomicUsize, Ordering };

use crate::models::chat::{ Role, Turn, TurnStatus, PENDING_TEXT };
use crate::transcript::{ Transcript, TranscriptObserver };

/// Console stand-in for the widget's turn renderer. New output always lands
/// at the bottom of the terminal, which is as close to scroll-to-bottom as a
/// line-oriented view gets; write failures are ignored.
pub struct ConsoleRenderer {
    printed: AtomicUsize,
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        ConsoleRenderer { printed: AtomicUsize::new(0) }
    }

    fn label(role: Role) -> &'static str {
        match role {
            Role::User => "You",
            Role::Model => "Bot",
        }
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        ConsoleRenderer::new()
    }
}

impl TranscriptObserver for ConsoleRenderer {
    fn transcript_changed(&self, transcript: &Transcript) {
        let mut out = std::io::stdout().lock();

        let resolved: Vec<&Turn> = transcript
            .visible()
            .filter(|turn| turn.status == TurnStatus::Resolved)
            .collect();

        let printed = self.printed.load(Ordering::SeqCst);
        for turn in resolved.iter().skip(printed) {
            let _ = writeln!(out, "{}: {}", ConsoleRenderer::label(turn.role), turn.text);
        }
        self.printed.store(resolved.len(), Ordering::SeqCst);

        // Transient line while a response is outstanding; the resolved turn
        // is printed on the next notification.
        if transcript.has_pending() {
            let _ = writeln!(out, "Bot: {}", PENDING_TEXT);
        }
        let _ = out.flush();
    }
}
