//! Всплывающее уведомление внизу экрана, скрывается само через 3 секунды.

use crate::app::use_app_state;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use thaw::*;

const NOTICE_TIMEOUT_MS: u32 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Error,
        }
    }
}

#[component]
pub fn NoticeHost() -> impl IntoView {
    let state = use_app_state();

    Effect::new(move |_| {
        if let Some(shown) = state.notice.get() {
            Timeout::new(NOTICE_TIMEOUT_MS, move || {
                // не гасим уведомление, которое успело смениться
                if state.notice.get_untracked().as_ref() == Some(&shown) {
                    state.notice.set(None);
                }
            })
            .forget();
        }
    });

    move || {
        state.notice.get().map(|notice| {
            let intent = match notice.kind {
                NoticeKind::Success => MessageBarIntent::Success,
                NoticeKind::Error => MessageBarIntent::Error,
            };
            view! {
                <div style="position: fixed; right: 20px; bottom: 20px; min-width: 280px; z-index: 1000;">
                    <MessageBar intent=intent>
                        <div>{notice.message}</div>
                    </MessageBar>
                </div>
            }
        })
    }
}
