use leptos::ev;
use leptos::prelude::*;

use crate::state::AppState;
use crate::transcript::{ChatSession, Message, Role, THINKING};

/// Main chat area with the transcript, banners, and input.
#[component]
pub fn ChatArea() -> impl IntoView {
    let state = expect_context::<AppState>();
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    // Keep the newest message in view.
    Effect::new(move |_| {
        state.session.track();
        if let Some(el) = messages_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    view! {
        <main class="chat-area">
            // Error banner
            {move || {
                state.error.get().map(|err| {
                    view! {
                        <div class="error-banner">{err}</div>
                    }
                })
            }}

            // Bookmark notices
            {move || {
                state.notices.with(|n| n.text().map(str::to_string)).map(|notice| {
                    view! {
                        <div class="notice-banner">{notice}</div>
                    }
                })
            }}

            <div class="chat-header">"BizSpark AI"</div>

            // Messages; the key changes when a placeholder resolves so the bubble re-renders.
            <div class="messages-container" node_ref=messages_ref>
                <For
                    each=move || state.session.with(|s| s.messages().to_vec())
                    key=|m| (m.id.clone(), m.pending)
                    let:msg
                >
                    <MessageBubble message=msg />
                </For>
            </div>

            <ChatInput />
        </main>
    }
}

/// A single chat message bubble with its bookmark toggle.
#[component]
fn MessageBubble(message: Message) -> impl IntoView {
    let state = expect_context::<AppState>();
    let css_class = if message.role == Role::User {
        "message user"
    } else {
        "message assistant"
    };
    let bookmarkable = ChatSession::is_bookmarkable(&message);
    let id = message.id.clone();

    let body = if message.pending {
        view! {
            <div class="thinking">
                <span class="spinner"></span>
                {THINKING}
            </div>
        }
        .into_any()
    } else {
        view! { <div class="content">{message.content.clone()}</div> }.into_any()
    };

    view! {
        <div class=css_class>
            <div class="role-label">{message.role.as_str()}</div>
            {body}
            {bookmarkable.then(|| {
                let id_saved = id.clone();
                let id_click = id.clone();
                view! {
                    <button
                        class="bookmark-btn"
                        class:saved=move || state.session.with(|s| s.is_saved(&id_saved))
                        title="Save answer"
                        on:click=move |_| state.toggle_bookmark(&id_click)
                    >
                        "🔖"
                    </button>
                }
            })}
        </div>
    }
}

/// Chat input form with a text field and send button.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (input, set_input) = signal(String::new());

    let is_sending = move || state.is_busy();

    let send = move || {
        let text = input.get();
        if text.trim().is_empty() || is_sending() {
            return;
        }
        set_input.set(String::new());
        state.send_message(text);
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send();
        }
    };

    view! {
        <div class="input-area">
            <div class="input-row">
                <textarea
                    rows="1"
                    placeholder="Ask a business question..."
                    prop:value=input
                    on:input=move |ev| {
                        set_input.set(event_target_value(&ev));
                    }
                    on:keydown=on_keydown
                    disabled=is_sending
                />
                <button
                    class="send-btn"
                    on:click=move |_| send()
                    disabled=is_sending
                >
                    {move || if is_sending() { "Thinking…" } else { "Send" }}
                </button>
            </div>
        </div>
    }
}
