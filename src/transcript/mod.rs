use std::error::Error;
use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::models::chat::{ Turn, TurnStatus };

#[derive(Debug)]
pub enum TranscriptError {
    /// A submission arrived while an earlier one was still unresolved.
    RequestInFlight,
}

impl fmt::Display for TranscriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptError::RequestInFlight =>
                write!(f, "A response is already in progress"),
        }
    }
}

impl Error for TranscriptError {}

/// Render seam. Notified after every transcript mutation; implementations
/// must swallow their own failures (there may be no render target yet).
pub trait TranscriptObserver: Send + Sync {
    fn transcript_changed(&self, transcript: &Transcript);
}

/// Ordered sequence of conversation turns. Insertion order is display order
/// and wire order. Always holds at least the hidden context turn it was
/// seeded with, and at most one pending placeholder at a time.
pub struct Transcript {
    turns: Vec<Turn>,
    observer: Option<Arc<dyn TranscriptObserver>>,
}

impl Transcript {
    pub fn new(context_text: &str) -> Self {
        Transcript {
            turns: vec![Turn::hidden_context(context_text)],
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: Arc<dyn TranscriptObserver>) {
        self.observer = Some(observer);
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            observer.transcript_changed(self);
        }
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
        self.notify();
    }

    /// Appends a user turn plus a pending placeholder and returns the
    /// placeholder id. Rejected while an earlier placeholder is unresolved,
    /// which keeps the at-most-one-pending invariant explicit instead of
    /// relying on the caller's discipline.
    pub fn push_exchange(&mut self, user_text: &str) -> Result<Uuid, TranscriptError> {
        if self.has_pending() {
            return Err(TranscriptError::RequestInFlight);
        }
        self.append(Turn::user(user_text));
        let placeholder = Turn::pending();
        let pending_id = placeholder.id;
        self.append(placeholder);
        Ok(pending_id)
    }

    /// Removes the pending turn with `pending_id`, then appends the resolved
    /// turn. An unknown id removes nothing; the resolved turn is appended
    /// either way.
    pub fn resolve(&mut self, pending_id: Uuid, resolved: Turn) {
        self.turns.retain(|turn| !(turn.is_pending() && turn.id == pending_id));
        self.turns.push(resolved);
        self.notify();
    }

    pub fn has_pending(&self) -> bool {
        self.turns.iter().any(Turn::is_pending)
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The renderer's view: everything not marked hidden.
    pub fn visible(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter().filter(|turn| !turn.hide_in_chat)
    }

    /// The request path's view: every resolved turn in order, hidden context
    /// included, unresolved placeholders excluded.
    pub fn wire_history(&self) -> Vec<Turn> {
        self.turns
            .iter()
            .filter(|turn| turn.status == TurnStatus::Resolved)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::{ Role, PENDING_TEXT };
    use std::sync::atomic::{ AtomicUsize, Ordering };

    struct CountingObserver {
        mutations: AtomicUsize,
    }

    impl TranscriptObserver for CountingObserver {
        fn transcript_changed(&self, _transcript: &Transcript) {
            self.mutations.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn seeds_hidden_context_turn() {
        let transcript = Transcript::new("you are a helpful assistant");
        assert_eq!(transcript.len(), 1);
        let seed = &transcript.turns()[0];
        assert!(seed.hide_in_chat);
        assert_eq!(seed.role, Role::Model);
        assert_eq!(transcript.visible().count(), 0);
    }

    #[test]
    fn push_exchange_appends_user_and_placeholder() {
        let mut transcript = Transcript::new("ctx");
        let pending_id = transcript.push_exchange("hello").unwrap();

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.turns()[1].role, Role::User);
        assert_eq!(transcript.turns()[1].text, "hello");
        let placeholder = &transcript.turns()[2];
        assert!(placeholder.is_pending());
        assert_eq!(placeholder.id, pending_id);
        assert_eq!(placeholder.text, PENDING_TEXT);
    }

    #[test]
    fn push_exchange_rejects_while_pending() {
        let mut transcript = Transcript::new("ctx");
        transcript.push_exchange("first").unwrap();

        let err = transcript.push_exchange("second").unwrap_err();
        assert!(matches!(err, TranscriptError::RequestInFlight));
        // The rejected submission must not have mutated anything.
        assert_eq!(transcript.len(), 3);
    }

    #[test]
    fn resolve_replaces_placeholder() {
        let mut transcript = Transcript::new("ctx");
        let pending_id = transcript.push_exchange("hello").unwrap();

        transcript.resolve(pending_id, Turn::model("hi there"));

        assert!(!transcript.has_pending());
        assert_eq!(transcript.len(), 3);
        let last = transcript.turns().last().unwrap();
        assert_eq!(last.text, "hi there");
        assert_eq!(last.role, Role::Model);
        assert!(!last.is_error);
    }

    #[test]
    fn resolve_with_unknown_id_still_appends() {
        let mut transcript = Transcript::new("ctx");
        let pending_id = transcript.push_exchange("hello").unwrap();

        transcript.resolve(Uuid::new_v4(), Turn::model("stray"));

        // The real placeholder is untouched and can still be resolved.
        assert!(transcript.has_pending());
        transcript.resolve(pending_id, Turn::model("real"));
        assert!(!transcript.has_pending());
    }

    #[test]
    fn user_typing_placeholder_text_is_not_swept() {
        let mut transcript = Transcript::new("ctx");
        let pending_id = transcript.push_exchange(PENDING_TEXT).unwrap();

        transcript.resolve(pending_id, Turn::model("reply"));

        let user_turns: Vec<_> = transcript
            .turns()
            .iter()
            .filter(|t| t.role == Role::User)
            .collect();
        assert_eq!(user_turns.len(), 1);
        assert_eq!(user_turns[0].text, PENDING_TEXT);
    }

    #[test]
    fn wire_history_keeps_order_and_hidden_skips_pending() {
        let mut transcript = Transcript::new("ctx");
        transcript.push_exchange("question").unwrap();

        let wire = transcript.wire_history();
        assert_eq!(wire.len(), 2);
        assert!(wire[0].hide_in_chat);
        assert_eq!(wire[0].text, "ctx");
        assert_eq!(wire[1].role, Role::User);
        assert_eq!(wire[1].text, "question");
    }

    #[test]
    fn visible_excludes_hidden_but_shows_placeholder() {
        let mut transcript = Transcript::new("ctx");
        transcript.push_exchange("question").unwrap();

        let visible: Vec<_> = transcript.visible().collect();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|t| !t.hide_in_chat));
        assert!(visible[1].is_pending());
    }

    #[test]
    fn sequential_exchanges_alternate() {
        let mut transcript = Transcript::new("ctx");
        for i in 0..3 {
            let pending_id = transcript.push_exchange(&format!("q{}", i)).unwrap();
            transcript.resolve(pending_id, Turn::model(format!("a{}", i)));
        }

        let turns = transcript.turns();
        assert_eq!(turns.len(), 7);
        for i in 0..3 {
            assert_eq!(turns[1 + 2 * i].role, Role::User);
            assert_eq!(turns[2 + 2 * i].role, Role::Model);
        }
        assert!(!transcript.has_pending());
    }

    #[test]
    fn observer_sees_every_mutation() {
        let observer = Arc::new(CountingObserver { mutations: AtomicUsize::new(0) });
        let mut transcript = Transcript::new("ctx");
        transcript.set_observer(observer.clone());

        let pending_id = transcript.push_exchange("hello").unwrap();
        transcript.resolve(pending_id, Turn::model("hi"));

        // user append + placeholder append + resolution
        assert_eq!(observer.mutations.load(Ordering::SeqCst), 3);
    }
}
