//! The chat widget: lifecycle, action dispatch, backend exchange.

use std::collections::VecDeque;
use std::sync::Arc;
use std::thread;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::actions::Action;
use crate::backend::{ChatBackend, ChatRequest};
use crate::error::{ChatError, FailureKind};
use crate::state::{ChatMessage, MessageAuthor, WidgetState};
use crate::ui::widgets::messages;

pub const TITLE: &str = "Sikkim Tourism Assistant";
pub const GREETING: &str =
    "Hello! I'm your Sikkim Tourism Assistant. Ask me about monasteries, food, or festivals!";
pub const PLACEHOLDER: &str = "Type your question here...";
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";
/// Oldest diagnostics are dropped beyond this many.
pub const MAX_DIAGNOSTICS: usize = 32;

/// What `send_user_message` did with the current input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty after trimming.
    Ignored,
    /// A reply is still pending; input left untouched.
    Busy,
    Dispatched { request_id: u64 },
}

/// Structured record of a failed exchange. The user only ever sees
/// `FALLBACK_REPLY`.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub request_id: u64,
    pub kind: FailureKind,
    pub detail: String,
}

struct Reply {
    request_id: u64,
    generation: u64,
    result: Result<String, ChatError>,
}

pub struct ChatWidget {
    pub state: WidgetState,
    backend: Arc<dyn ChatBackend>,
    lang: String,
    mounted: bool,
    /// Bumped on unmount so late replies from a torn-down log are dropped.
    generation: u64,
    next_request_id: u64,
    replies_tx: UnboundedSender<Reply>,
    replies_rx: UnboundedReceiver<Reply>,
    diagnostics: VecDeque<Diagnostic>,
    /// Message viewport (width, height) from the last layout pass.
    viewport: (u16, u16),
    pub should_quit: bool,
    /// For spinner animation (incremented each tick).
    pub tick: usize,
}

impl ChatWidget {
    pub fn new(backend: Arc<dyn ChatBackend>, lang: impl Into<String>) -> Self {
        let (replies_tx, replies_rx) = unbounded_channel();
        Self {
            state: WidgetState::default(),
            backend,
            lang: lang.into(),
            mounted: false,
            generation: 0,
            next_request_id: 1,
            replies_tx,
            replies_rx,
            diagnostics: VecDeque::with_capacity(MAX_DIAGNOSTICS),
            viewport: (0, 0),
            should_quit: false,
            tick: 0,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Most recent failures, oldest first.
    pub fn diagnostics(&self) -> &VecDeque<Diagnostic> {
        &self.diagnostics
    }

    /// Build the widget once. Calling again while mounted does nothing.
    pub fn mount(&mut self) {
        if self.mounted {
            debug!("mount called on mounted widget; ignoring");
            return;
        }
        self.mounted = true;
        self.state = WidgetState::default();
        self.add_message(GREETING, MessageAuthor::Assistant);
        info!(generation = self.generation, "chat widget mounted");
    }

    /// Tear down: the log is destroyed and any in-flight reply is discarded.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.generation += 1;
        self.state.log.clear();
        self.state.input.clear();
        self.state.popup_open = false;
        self.state.pending = None;
        info!("chat widget unmounted");
    }

    pub fn toggle_popup(&mut self) {
        self.state.popup_open = !self.state.popup_open;
        debug!(open = self.state.popup_open, "popup toggled");
    }

    pub fn close_popup(&mut self) {
        self.state.popup_open = false;
    }

    pub fn add_message(&mut self, text: impl Into<String>, author: MessageAuthor) {
        let text = text.into();
        let message = match author {
            MessageAuthor::User => ChatMessage::user(text),
            MessageAuthor::Assistant => ChatMessage::assistant(text),
        };
        self.state.log.push(message);
        debug!(?author, entries = self.state.log.len(), "message appended");
    }

    pub fn send_user_message(&mut self) -> SendOutcome {
        let text = self.state.input.value().trim().to_string();
        if text.is_empty() {
            return SendOutcome::Ignored;
        }
        if self.state.is_pending() {
            debug!("send refused: reply pending");
            return SendOutcome::Busy;
        }

        self.add_message(text.clone(), MessageAuthor::User);
        self.state.input.clear();

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.state.pending = Some(request_id);

        let request = ChatRequest { message: text, lang: self.lang.clone() };
        let backend = Arc::clone(&self.backend);
        let tx = self.replies_tx.clone();
        let generation = self.generation;
        thread::spawn(move || {
            let result = backend.send(&request);
            // Receiver gone means the widget was dropped; nothing to report to.
            let _ = tx.send(Reply { request_id, generation, result });
        });

        debug!(request_id, "chat request dispatched");
        SendOutcome::Dispatched { request_id }
    }

    /// Apply every reply that has arrived since the last call.
    pub fn poll_replies(&mut self) {
        while let Ok(reply) = self.replies_rx.try_recv() {
            if reply.generation != self.generation {
                debug!(request_id = reply.request_id, "dropping reply for unmounted log");
                continue;
            }
            if self.state.pending == Some(reply.request_id) {
                self.state.pending = None;
            }
            match reply.result {
                Ok(text) => self.add_message(text, MessageAuthor::Assistant),
                Err(err) => {
                    self.record_failure(reply.request_id, &err);
                    self.add_message(FALLBACK_REPLY, MessageAuthor::Assistant);
                }
            }
        }
    }

    fn record_failure(&mut self, request_id: u64, err: &ChatError) {
        let diagnostic = Diagnostic {
            request_id,
            kind: err.kind(),
            detail: err.to_string(),
        };
        warn!(
            request_id,
            kind = %diagnostic.kind,
            detail = %diagnostic.detail,
            "chat request failed"
        );
        if self.diagnostics.len() == MAX_DIAGNOSTICS {
            self.diagnostics.pop_front();
        }
        self.diagnostics.push_back(diagnostic);
    }

    /// Record the message viewport size so scrolling can clamp.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    fn max_scroll(&self) -> usize {
        let (width, height) = self.viewport;
        let rows = messages::row_count(self.state.log.messages(), width);
        rows.saturating_sub(height as usize)
    }

    fn page(&self) -> usize {
        (self.viewport.1 as usize).saturating_sub(1).max(1)
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,

            Action::TogglePopup => self.toggle_popup(),
            Action::ClosePopup => self.close_popup(),

            Action::Char(c) => self.state.input.insert(c),
            Action::Backspace => self.state.input.backspace(),
            Action::Delete => self.state.input.delete(),
            Action::CursorLeft => self.state.input.left(),
            Action::CursorRight => self.state.input.right(),
            Action::CursorHome => self.state.input.home(),
            Action::CursorEnd => self.state.input.end(),
            Action::ClearInput => self.state.input.clear(),
            Action::Submit => {
                self.send_user_message();
            }

            Action::ScrollUp => {
                let max = self.max_scroll();
                self.state.log.scroll_up(1, max);
            }
            Action::ScrollDown => {
                let max = self.max_scroll();
                self.state.log.scroll_down(1, max);
            }
            Action::ScrollPageUp => {
                let (max, page) = (self.max_scroll(), self.page());
                self.state.log.scroll_up(page, max);
            }
            Action::ScrollPageDown => {
                let (max, page) = (self.max_scroll(), self.page());
                self.state.log.scroll_down(page, max);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::parse_reply;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{mpsc, Mutex};
    use std::time::{Duration, Instant};

    /// Replies with a fixed HTTP status and body.
    struct StubBackend {
        status: u16,
        body: String,
        calls: AtomicUsize,
        seen: Mutex<Vec<ChatRequest>>,
    }

    impl StubBackend {
        fn new(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body: body.to_string(),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl ChatBackend for StubBackend {
        fn send(&self, request: &ChatRequest) -> Result<String, ChatError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(request.clone());
            parse_reply(self.status, &self.body)
        }
    }

    /// Holds each reply until the test releases it.
    struct GatedBackend {
        gate: Mutex<mpsc::Receiver<Result<String, ChatError>>>,
    }

    impl ChatBackend for GatedBackend {
        fn send(&self, _request: &ChatRequest) -> Result<String, ChatError> {
            self.gate
                .lock()
                .unwrap()
                .recv()
                .unwrap_or_else(|_| Err(ChatError::Network("gate closed".into())))
        }
    }

    fn gated() -> (Arc<GatedBackend>, mpsc::Sender<Result<String, ChatError>>) {
        let (tx, rx) = mpsc::channel();
        (Arc::new(GatedBackend { gate: Mutex::new(rx) }), tx)
    }

    fn mounted(backend: Arc<dyn ChatBackend>) -> ChatWidget {
        let mut w = ChatWidget::new(backend, "en");
        w.mount();
        w.toggle_popup();
        w
    }

    fn type_text(w: &mut ChatWidget, text: &str) {
        for c in text.chars() {
            w.dispatch(Action::Char(c));
        }
    }

    fn settle(w: &mut ChatWidget) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while w.state.is_pending() && Instant::now() < deadline {
            w.poll_replies();
            thread::sleep(Duration::from_millis(5));
        }
        assert!(!w.state.is_pending(), "reply never arrived");
    }

    fn count(w: &ChatWidget, author: MessageAuthor) -> usize {
        w.state.log.messages().iter().filter(|m| m.author == author).count()
    }

    fn last_text(w: &ChatWidget) -> &str {
        &w.state.log.messages().last().unwrap().text
    }

    #[test]
    fn mount_is_idempotent() {
        let mut w = ChatWidget::new(StubBackend::new(200, "{}"), "en");
        w.mount();
        w.mount();
        assert!(w.is_mounted());
        assert_eq!(w.state.log.len(), 1);
        assert_eq!(last_text(&w), GREETING);
        assert!(!w.state.popup_open);
    }

    #[test]
    fn toggle_twice_restores_and_close_forces_false() {
        let mut w = ChatWidget::new(StubBackend::new(200, "{}"), "en");
        w.mount();
        for start in [false, true] {
            w.state.popup_open = start;
            w.toggle_popup();
            w.toggle_popup();
            assert_eq!(w.state.popup_open, start);
            w.close_popup();
            assert!(!w.state.popup_open);
        }
    }

    #[test]
    fn blank_input_is_ignored_without_network() {
        let backend = StubBackend::new(200, r#"{"response":"X"}"#);
        let mut w = mounted(backend.clone());
        type_text(&mut w, "   \t ");
        assert_eq!(w.send_user_message(), SendOutcome::Ignored);
        assert_eq!(w.send_user_message(), SendOutcome::Ignored);
        assert_eq!(w.state.log.len(), 1);
        assert!(!w.state.is_pending());
        thread::sleep(Duration::from_millis(20));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn user_message_is_appended_before_reply() {
        let (backend, release) = gated();
        let mut w = mounted(backend);
        type_text(&mut w, "  Best time to visit?  ");
        assert!(matches!(w.send_user_message(), SendOutcome::Dispatched { .. }));
        assert_eq!(count(&w, MessageAuthor::User), 1);
        assert_eq!(last_text(&w), "Best time to visit?");
        assert!(w.state.input.is_empty());
        w.poll_replies();
        assert_eq!(count(&w, MessageAuthor::Assistant), 1);

        release.send(Ok("March to May.".into())).unwrap();
        settle(&mut w);
        assert_eq!(last_text(&w), "March to May.");
    }

    #[test]
    fn ok_reply_appends_one_assistant_message() {
        let backend = StubBackend::new(200, r#"{"response":"X"}"#);
        let mut w = mounted(backend.clone());
        type_text(&mut w, "hello");
        w.dispatch(Action::Submit);
        settle(&mut w);
        // Greeting plus the reply.
        assert_eq!(count(&w, MessageAuthor::Assistant), 2);
        assert_eq!(last_text(&w), "X");
        assert!(w.diagnostics().is_empty());
        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen[0], ChatRequest { message: "hello".into(), lang: "en".into() });
    }

    #[test]
    fn server_error_appends_fallback_and_records_kind() {
        let mut w = mounted(StubBackend::new(500, "Internal Server Error"));
        type_text(&mut w, "hello");
        w.send_user_message();
        settle(&mut w);
        assert_eq!(count(&w, MessageAuthor::Assistant), 2);
        assert_eq!(last_text(&w), FALLBACK_REPLY);
        assert_eq!(w.diagnostics().len(), 1);
        assert_eq!(w.diagnostics()[0].kind, FailureKind::Http);
    }

    #[test]
    fn missing_response_key_appends_fallback() {
        let mut w = mounted(StubBackend::new(200, "{}"));
        type_text(&mut w, "hello");
        w.send_user_message();
        settle(&mut w);
        assert_eq!(last_text(&w), FALLBACK_REPLY);
        assert_eq!(w.diagnostics()[0].kind, FailureKind::MalformedResponse);
    }

    #[test]
    fn failure_does_not_affect_next_send() {
        let (backend, release) = gated();
        let mut w = mounted(backend);
        type_text(&mut w, "first");
        w.send_user_message();
        release.send(Err(ChatError::Network("connection refused".into()))).unwrap();
        settle(&mut w);
        assert_eq!(last_text(&w), FALLBACK_REPLY);
        assert_eq!(w.diagnostics()[0].kind, FailureKind::Network);

        type_text(&mut w, "second");
        w.send_user_message();
        release.send(Ok("fine now".into())).unwrap();
        settle(&mut w);
        assert_eq!(last_text(&w), "fine now");
        assert_eq!(w.diagnostics().len(), 1);
    }

    #[test]
    fn diagnostics_keep_only_the_latest() {
        let mut w = mounted(StubBackend::new(200, "{}"));
        for id in 1..=40 {
            w.record_failure(id, &ChatError::Http { status: 502 });
        }
        assert_eq!(w.diagnostics().len(), MAX_DIAGNOSTICS);
        assert_eq!(w.diagnostics()[0].request_id, 9);
        assert_eq!(w.diagnostics().back().map(|d| d.request_id), Some(40));
    }

    #[test]
    fn send_is_refused_while_pending() {
        let (backend, release) = gated();
        let mut w = mounted(backend);
        type_text(&mut w, "one");
        let first = w.send_user_message();
        type_text(&mut w, "two");
        assert_eq!(w.send_user_message(), SendOutcome::Busy);
        assert_eq!(w.state.input.value(), "two");
        assert_eq!(count(&w, MessageAuthor::User), 1);

        release.send(Ok("reply one".into())).unwrap();
        settle(&mut w);
        let second = w.send_user_message();
        assert!(matches!(second, SendOutcome::Dispatched { .. }));
        assert_ne!(first, second);
        release.send(Ok("reply two".into())).unwrap();
        settle(&mut w);

        let texts: Vec<&str> = w.state.log.messages().iter().skip(1).map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["one", "reply one", "two", "reply two"]);
    }

    #[test]
    fn reply_after_unmount_is_discarded() {
        let (backend, release) = gated();
        let mut w = mounted(backend);
        type_text(&mut w, "hello");
        w.send_user_message();
        w.unmount();
        assert_eq!(w.state.log.len(), 0);
        assert!(!w.state.popup_open);

        w.mount();
        release.send(Ok("late".into())).unwrap();
        for _ in 0..20 {
            w.poll_replies();
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(w.state.log.len(), 1);
        assert_eq!(last_text(&w), GREETING);
    }

    #[test]
    fn typing_question_then_enter() {
        let mut w = mounted(StubBackend::new(200, r#"{"response":"Rumtek and Enchey."}"#));
        type_text(&mut w, "What monasteries are near Gangtok?");
        w.dispatch(Action::Submit);
        let user: Vec<&ChatMessage> = w
            .state
            .log
            .messages()
            .iter()
            .filter(|m| m.author == MessageAuthor::User)
            .collect();
        assert_eq!(user.len(), 1);
        assert_eq!(user[0].text, "What monasteries are near Gangtok?");
        assert_eq!(w.state.input.value(), "");
        settle(&mut w);
    }

    #[test]
    fn scrolling_leaves_and_rejoins_the_tail() {
        let mut w = mounted(StubBackend::new(200, "{}"));
        for i in 0..30 {
            w.add_message(format!("line {i}"), MessageAuthor::Assistant);
        }
        w.set_viewport(40, 10);
        w.dispatch(Action::ScrollPageUp);
        assert!(!w.state.log.follow);
        w.dispatch(Action::ScrollPageDown);
        assert!(w.state.log.follow);
        w.dispatch(Action::ScrollUp);
        w.add_message("new", MessageAuthor::Assistant);
        assert!(w.state.log.follow);
    }
}
