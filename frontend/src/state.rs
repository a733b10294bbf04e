use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::notice::{Notices, NOTICE_MILLIS};
use crate::transcript::ChatSession;

const FAILED_NOTICE: &str = "Failed to get a response from the AI.";

/// Shared application state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Transcript, bookmarks and busy flag; all transitions go through [`ChatSession`].
    pub session: RwSignal<ChatSession>,
    /// Bookmark notices; each one dismisses itself after [`NOTICE_MILLIS`].
    pub notices: RwSignal<Notices>,

    // --- Read signals (for components to subscribe to) ---
    pub error: ReadSignal<Option<String>>,

    // --- Write signals (for mutating state) ---
    pub set_error: WriteSignal<Option<String>>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let session = RwSignal::new(ChatSession::new());
        let (error, set_error) = signal(None::<String>);
        let notices = RwSignal::new(Notices::default());

        let state = Self { session, notices, error, set_error };

        provide_context(state);
        state
    }

    pub fn is_busy(&self) -> bool {
        self.session.with(|s| s.is_busy())
    }

    /// Sends a prompt through the backend pipeline. Ignored while a request is in flight.
    pub fn send_message(&self, prompt: String) {
        let mut accepted = None;
        self.session.update(|s| accepted = s.begin_send(&prompt));
        let Some(turn) = accepted else {
            return;
        };

        self.set_error.set(None);
        self.notices.update(|n| n.clear());

        let session = self.session;
        let set_error = self.set_error;
        spawn_local(async move {
            let result = api::send_chat(&turn.prompt).await.map(|r| r.response);
            if let Err(e) = &result {
                log::error!("Chat request failed: {e}");
                set_error.set(Some(FAILED_NOTICE.to_string()));
            }
            session.update(|s| s.finish_send(&turn.assistant_id, result));
        });
    }

    /// Toggles a bookmark and shows the matching notice.
    pub fn toggle_bookmark(&self, id: &str) {
        let mut change = None;
        self.session.update(|s| change = s.toggle_bookmark(id));
        if let Some(change) = change {
            self.show_notice(change.notice());
        }
    }

    fn show_notice(&self, text: &str) {
        let mut seq = 0;
        self.notices.update(|n| seq = n.show(text));
        let notices = self.notices;
        Timeout::new(NOTICE_MILLIS, move || {
            notices.try_update(|n| n.dismiss(seq));
        })
        .forget();
    }
}
