//! Chat transcript and bookmark set as a plain state container.
//!
//! Every transition is a method on [`ChatSession`]; the reactive layer in `state.rs`
//! only wraps it in a signal.

pub const GREETING_ID: &str = "init";
pub const GREETING: &str =
    "Hello! I am BizSpark AI. Ask me a business question, or select a topic to get started.";
/// Content of an assistant message while its response is outstanding.
pub const THINKING: &str = "Thinking...";
pub const TROUBLE: &str = "Sorry, I had trouble getting a response.";

const PREVIEW_CHARS: usize = 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    /// True only for an assistant placeholder that has not been resolved yet.
    pub pending: bool,
}

/// A send that was accepted: the prompt to dispatch and the placeholder to resolve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingTurn {
    pub prompt: String,
    pub assistant_id: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookmarkChange {
    Saved,
    Unsaved,
}

impl BookmarkChange {
    pub fn notice(&self) -> &'static str {
        match self {
            BookmarkChange::Saved => "Answer saved to your Bookmarks.",
            BookmarkChange::Unsaved => "Answer unsaved.",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatSession {
    messages: Vec<Message>,
    saved: Vec<Message>,
    busy: bool,
    next_id: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![Message {
                id: GREETING_ID.to_string(),
                role: Role::Assistant,
                content: GREETING.to_string(),
                pending: false,
            }],
            saved: Vec::new(),
            busy: false,
            next_id: 0,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn bookmarks(&self) -> &[Message] {
        &self.saved
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    fn fresh_id(&mut self) -> String {
        self.next_id += 1;
        format!("msg-{}", self.next_id)
    }

    pub fn add_user_message(&mut self, content: impl Into<String>) -> String {
        let id = self.fresh_id();
        self.messages.push(Message {
            id: id.clone(),
            role: Role::User,
            content: content.into(),
            pending: false,
        });
        id
    }

    pub fn add_pending_assistant(&mut self) -> String {
        let id = self.fresh_id();
        self.messages.push(Message {
            id: id.clone(),
            role: Role::Assistant,
            content: THINKING.to_string(),
            pending: true,
        });
        id
    }

    /// Replaces a pending placeholder's content. Returns false if `id` is unknown or
    /// already resolved; a placeholder transitions at most once.
    pub fn resolve_assistant(&mut self, id: &str, content: impl Into<String>) -> bool {
        match self.messages.iter_mut().find(|m| m.id == id && m.pending) {
            Some(message) => {
                message.content = content.into();
                message.pending = false;
                true
            }
            None => false,
        }
    }

    /// Starts a turn. Blank prompts and sends while busy are no-ops.
    pub fn begin_send(&mut self, prompt: &str) -> Option<PendingTurn> {
        if self.busy || prompt.trim().is_empty() {
            return None;
        }
        self.busy = true;
        self.add_user_message(prompt);
        let assistant_id = self.add_pending_assistant();
        Some(PendingTurn { prompt: prompt.to_string(), assistant_id })
    }

    /// Ends the turn started by [`begin_send`](Self::begin_send).
    pub fn finish_send(&mut self, assistant_id: &str, result: Result<String, String>) {
        let content = result.unwrap_or_else(|_| TROUBLE.to_string());
        self.resolve_assistant(assistant_id, content);
        self.busy = false;
    }

    /// Resolved assistant answers other than the greeting can be bookmarked.
    pub fn is_bookmarkable(message: &Message) -> bool {
        message.role == Role::Assistant && !message.pending && message.id != GREETING_ID
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.saved.iter().any(|m| m.id == id)
    }

    /// Flips bookmark membership for `id`. `None` if the message cannot be bookmarked.
    pub fn toggle_bookmark(&mut self, id: &str) -> Option<BookmarkChange> {
        if self.is_saved(id) {
            self.saved.retain(|m| m.id != id);
            return Some(BookmarkChange::Unsaved);
        }
        let message = self
            .messages
            .iter()
            .find(|m| m.id == id && Self::is_bookmarkable(m))?
            .clone();
        self.saved.push(message);
        Some(BookmarkChange::Saved)
    }
}

/// Accordion title for a bookmark: the first 40 characters and an ellipsis.
pub fn bookmark_preview(content: &str) -> String {
    let head: String = content.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}
