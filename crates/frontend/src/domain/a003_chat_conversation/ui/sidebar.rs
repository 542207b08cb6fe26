use super::view_model::ChatPanelVm;
use crate::app::AppState;
use contracts::domain::a003_chat_conversation::aggregate::ConversationId;
use leptos::prelude::*;
use services::shared::date_utils;
use services::shared::format::format_date;
use services::usecases::u101_inventory_assistant::ChatCommand;

#[derive(Clone)]
struct SidebarEntry {
    id: ConversationId,
    title: String,
    when: String,
    active: bool,
}

#[component]
#[allow(non_snake_case)]
pub fn ChatSidebar(vm: ChatPanelVm, state: AppState) -> impl IntoView {
    let entries = move || {
        let today = date_utils::today();
        vm.sessions.with(|sessions| {
            let current = sessions.current_id();
            sessions
                .sidebar()
                .into_iter()
                .map(|c| SidebarEntry {
                    id: c.id.clone(),
                    title: c.display_title().to_string(),
                    when: format_date(&c.timestamp, today),
                    active: current == Some(&c.id),
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div style="width: 240px; overflow-y: auto; border-right: 1px solid var(--colorNeutralStroke2); padding: 8px;">
            {move || {
                entries()
                    .into_iter()
                    .map(|entry| {
                        let id = entry.id.clone();
                        view! {
                            <div
                                style=if entry.active {
                                    "padding: 8px 10px; border-radius: 6px; cursor: pointer; background: var(--colorBrandBackground2);"
                                } else {
                                    "padding: 8px 10px; border-radius: 6px; cursor: pointer;"
                                }
                                on:click=move |_| vm.run(state, ChatCommand::Select(id.clone()))
                            >
                                <div style="white-space: nowrap; overflow: hidden; text-overflow: ellipsis;">
                                    {entry.title}
                                </div>
                                <div style="font-size: 12px; color: var(--colorNeutralForeground3);">
                                    {entry.when}
                                </div>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
