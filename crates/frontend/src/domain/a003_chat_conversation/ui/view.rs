use super::sidebar::ChatSidebar;
use super::view_model::ChatPanelVm;
use crate::app::use_app_state;
use crate::shared::icons::icon;
use leptos::prelude::*;
use services::usecases::u101_inventory_assistant::ChatCommand;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn ChatPanel() -> impl IntoView {
    let state = use_app_state();
    let vm = ChatPanelVm::load(state);
    let messages_container_ref = NodeRef::<leptos::html::Div>::new();

    // после любого изменения чата прокручиваем вниз
    Effect::new(move |_| {
        vm.sessions.track();
        if let Some(container) = messages_container_ref.get() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    let handle_send = Callback::new(move |_: ()| vm.send_input(state));

    view! {
        <div style="height: 100%; display: flex;">
            <ChatSidebar vm=vm state=state />

            <div style="flex: 1; display: flex; flex-direction: column; padding: 16px; min-width: 0;">
                <Flex
                    justify=FlexJustify::SpaceBetween
                    align=FlexAlign::Center
                    style="margin-bottom: 12px;"
                >
                    <h2 style="font-size: 18px; font-weight: bold;">
                        {move || {
                            vm.sessions
                                .with(|s| s.current().map(|c| c.display_title().to_string()))
                                .unwrap_or_default()
                        }}
                    </h2>
                    <Flex style="gap: 8px;">
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.run(state, ChatCommand::NewChat)
                        >
                            {icon("add")}
                            " New Chat"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.run(state, ChatCommand::ClearChat)
                        >
                            {icon("delete")}
                            " Clear Chat"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.run(state, ChatCommand::Export)
                        >
                            {icon("download")}
                            " Export"
                        </Button>
                    </Flex>
                </Flex>

                <div
                    node_ref=messages_container_ref
                    style="flex: 1; overflow-y: auto; display: flex; flex-direction: column; gap: 12px; margin-bottom: 12px; padding: 12px; border: 1px solid var(--colorNeutralStroke2); border-radius: 8px;"
                >
                    {move || {
                        vm.sessions
                            .with(|s| s.current().map(|c| c.messages.clone()).unwrap_or_default())
                            .into_iter()
                            .map(|msg| {
                                let is_user = msg.is_user;
                                view! {
                                    <div style=if is_user {
                                        "align-self: flex-end; max-width: 70%;"
                                    } else {
                                        "align-self: flex-start; max-width: 70%;"
                                    }>
                                        <div style=if is_user {
                                            "background: var(--colorBrandBackground2); padding: 10px 14px; border-radius: 12px;"
                                        } else {
                                            "background: var(--colorNeutralBackground2); padding: 10px 14px; border-radius: 12px;"
                                        }>
                                            <div style="white-space: pre-wrap;">{msg.content}</div>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>

                <Flex style="gap: 8px; align-items: flex-end;">
                    <div style="flex: 1;">
                        <Textarea
                            value=vm.input
                            placeholder="Ask about stock, prices, expiry or orders... (Shift+Enter for a new line)"
                            attr:style="width: 100%; min-height: 60px; max-height: 200px; resize: vertical;"
                            on:keydown=move |ev: web_sys::KeyboardEvent| {
                                if ev.key() == "Enter" && !ev.shift_key() {
                                    ev.prevent_default();
                                    handle_send.run(());
                                }
                            }
                        />
                    </div>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| handle_send.run(())
                    >
                        {icon("send")}
                        " Send"
                    </Button>
                </Flex>
            </div>
        </div>
    }
}
