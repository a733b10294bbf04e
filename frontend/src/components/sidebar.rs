use leptos::prelude::*;

use crate::state::AppState;
use crate::topics::TOPICS;
use crate::transcript::bookmark_preview;

/// Sidebar with topic shortcuts and saved answers.
#[component]
pub fn Sidebar() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <h2>"BizSpark AI"</h2>
            </div>

            <h3 class="sidebar-section">"Topic Browser"</h3>
            <div class="topic-list">
                {TOPICS
                    .iter()
                    .map(|topic| {
                        let prompt = topic.prompt;
                        view! {
                            <button
                                class="topic-item"
                                disabled=move || state.is_busy()
                                on:click=move |_| state.send_message(prompt.to_string())
                            >
                                {topic.name}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <h3 class="sidebar-section">"Bookmarks"</h3>
            <div class="bookmark-list">
                {move || {
                    let saved = state.session.with(|s| s.bookmarks().to_vec());
                    if saved.is_empty() {
                        view! {
                            <p class="empty-bookmarks">"No saved answers yet."</p>
                        }
                        .into_any()
                    } else {
                        saved
                            .into_iter()
                            .map(|msg| {
                                view! {
                                    <details class="bookmark-item">
                                        <summary>{bookmark_preview(&msg.content)}</summary>
                                        <div class="bookmark-content">{msg.content.clone()}</div>
                                    </details>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }
                }}
            </div>
        </aside>
    }
}
