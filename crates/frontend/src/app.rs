use crate::dashboards::d400_inventory_analytics::ui::AnalyticsDashboard;
use crate::domain::a001_inventory_item::ui::ExpiryTracker;
use crate::domain::a003_chat_conversation::ui::ChatPanel;
use crate::shared::icons::icon;
use crate::shared::local_storage::LocalStorage;
use crate::shared::notice::{Notice, NoticeHost};
use leptos::prelude::*;
use services::shared::config::{load_config, Config};
use thaw::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Chat,
    ExpiryTracker,
    Analytics,
}

impl Page {
    pub fn all() -> [Page; 3] {
        [Page::Chat, Page::ExpiryTracker, Page::Analytics]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Chat => "AI Assistant",
            Page::ExpiryTracker => "Expiry Tracker",
            Page::Analytics => "Analytics",
        }
    }

    fn icon_name(&self) -> &'static str {
        match self {
            Page::Chat => "chat",
            Page::ExpiryTracker => "calendar",
            Page::Analytics => "analytics",
        }
    }
}

/// Общее состояние приложения, раздаётся через context
#[derive(Clone, Copy)]
pub struct AppState {
    pub storage: LocalStorage,
    pub config: StoredValue<Config>,
    pub page: RwSignal<Page>,
    pub notice: RwSignal<Option<Notice>>,
}

impl AppState {
    pub fn new() -> Self {
        let storage = LocalStorage;
        let config = load_config(&storage).unwrap_or_else(|e| {
            log::error!("Failed to load config, using defaults: {:#}", e);
            Config::default()
        });
        Self {
            storage,
            config: StoredValue::new(config),
            page: RwSignal::new(Page::Chat),
            notice: RwSignal::new(None),
        }
    }

    pub fn notify(&self, notice: Notice) {
        self.notice.set(Some(notice));
    }
}

pub fn use_app_state() -> AppState {
    use_context::<AppState>().expect("AppState not found. Render inside <App/>.")
}

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    provide_context(state);

    view! {
        <div style="height: 100vh; display: flex; flex-direction: column;">
            <Flex
                align=FlexAlign::Center
                style="gap: 8px; padding: 10px 20px; border-bottom: 1px solid var(--colorNeutralStroke2);"
            >
                <h1 style="font-size: 20px; font-weight: bold; margin-right: 24px;">"RestroTrack"</h1>
                {Page::all()
                    .into_iter()
                    .map(|page| {
                        view! {
                            <Button
                                appearance=move || if state.page.get() == page { ButtonAppearance::Primary } else { ButtonAppearance::Subtle }
                                on_click=move |_| state.page.set(page)
                            >
                                {icon(page.icon_name())}
                                {format!(" {}", page.title())}
                            </Button>
                        }
                    })
                    .collect_view()}
            </Flex>

            <div style="flex: 1; min-height: 0;">
                {move || match state.page.get() {
                    Page::Chat => view! { <ChatPanel /> }.into_any(),
                    Page::ExpiryTracker => view! { <ExpiryTracker /> }.into_any(),
                    Page::Analytics => view! { <AnalyticsDashboard /> }.into_any(),
                }}
            </div>

            <NoticeHost />
        </div>
    }
}
