//! Трекер сроков годности: счётчики уровней, фильтр и списание позиций.

use crate::app::{use_app_state, AppState};
use crate::shared::icons::icon;
use crate::shared::notice::Notice;
use contracts::dashboards::d400_inventory_analytics::ExpiryTrackerRow;
use contracts::domain::a001_inventory_item::aggregate::{
    ExpiryFilter, ExpiryStatus, InventoryItem, InventoryItemId,
};
use leptos::prelude::*;
use services::domain::a001_inventory_item::service as inventory;
use services::shared::confirmation::Confirmation;
use services::shared::date_utils;
use services::shared::format::{format_optional_date, format_quantity};
use thaw::*;

const MARK_AS_USED_PROMPT: &str = "Mark this item as used and remove from inventory?";

fn load_items(state: AppState) -> Vec<InventoryItem> {
    inventory::list(&state.storage).unwrap_or_else(|e| {
        log::error!("Failed to load inventory: {:#}", e);
        state.notify(Notice::error("Inventory could not be loaded"));
        Vec::new()
    })
}

fn filter_label(filter: ExpiryFilter) -> &'static str {
    match filter {
        ExpiryFilter::Critical => "Critical",
        ExpiryFilter::Warning => "Warning",
        ExpiryFilter::Upcoming => "Upcoming",
        ExpiryFilter::All => "All",
    }
}

fn empty_message(filter: ExpiryFilter) -> String {
    let what = match filter {
        ExpiryFilter::All => "expiring",
        other => other.as_str(),
    };
    format!("No {} items found", what)
}

fn status_color(status: ExpiryStatus) -> BadgeColor {
    match status {
        ExpiryStatus::Critical => BadgeColor::Danger,
        ExpiryStatus::Warning => BadgeColor::Warning,
        ExpiryStatus::Upcoming => BadgeColor::Informative,
    }
}

fn confirm_mark_as_used() -> Confirmation {
    let confirmed = web_sys::window()
        .and_then(|w| w.confirm_with_message(MARK_AS_USED_PROMPT).ok())
        .unwrap_or(false);
    Confirmation::from_bool(confirmed)
}

#[component]
#[allow(non_snake_case)]
pub fn ExpiryTracker() -> impl IntoView {
    let state = use_app_state();
    let items = RwSignal::new(load_items(state));
    let filter = RwSignal::new(ExpiryFilter::default());

    let tracker = Memo::new(move |_| {
        let limits = state.config.with_value(|c| c.inventory.clone());
        items.with(|items| inventory::expiry_tracker(items, date_utils::today(), filter.get(), &limits))
    });

    let mark_as_used = move |id: InventoryItemId| {
        match inventory::mark_as_used(&state.storage, &id, confirm_mark_as_used()) {
            Ok(true) => {
                items.set(load_items(state));
                state.notify(Notice::success("Item marked as used and removed from inventory"));
            }
            Ok(false) => {}
            Err(e) => {
                log::error!("Failed to mark item {} as used: {:#}", id, e);
                state.notify(Notice::error("Item could not be removed"));
            }
        }
    };

    let count_card = move |title: &'static str, status: ExpiryStatus| {
        view! {
            <Card>
                <div style="padding: 12px 16px; min-width: 160px;">
                    <Badge appearance=BadgeAppearance::Tint color=status_color(status)>{title}</Badge>
                    <div style="font-size: 28px; font-weight: bold; margin-top: 8px;">
                        {move || {
                            let counts = tracker.with(|t| t.counts.clone());
                            match status {
                                ExpiryStatus::Critical => counts.critical,
                                ExpiryStatus::Warning => counts.warning,
                                ExpiryStatus::Upcoming => counts.upcoming,
                            }
                        }}
                    </div>
                </div>
            </Card>
        }
    };

    let row_view = move |row: ExpiryTrackerRow| {
        let id = row.item.id.clone();
        let name = row.item.name.clone();
        let category = row.item.category_or_default().to_string();
        let quantity_text = format!("{} {}", format_quantity(row.item.quantity), row.item.unit_or_default());
        let expiry_text = format_optional_date(row.item.expiry_date.as_deref());
        view! {
            <TableRow>
                <TableCell><TableCellLayout truncate=true>{name}</TableCellLayout></TableCell>
                <TableCell>{category}</TableCell>
                <TableCell>
                    {quantity_text}
                </TableCell>
                <TableCell>{expiry_text}</TableCell>
                <TableCell>{format!("{} days", row.days_until_expiry)}</TableCell>
                <TableCell>
                    <Badge appearance=BadgeAppearance::Tint color=status_color(row.status)>
                        {row.status.label()}
                    </Badge>
                </TableCell>
                <TableCell>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| mark_as_used(id.clone())
                    >
                        {icon("check")}
                        " Mark as used"
                    </Button>
                </TableCell>
            </TableRow>
        }
    };

    view! {
        <div style="padding: 20px; display: flex; flex-direction: column; gap: 16px;">
            <Flex style="gap: 12px;">
                {count_card("Critical (≤ 2 days)", ExpiryStatus::Critical)}
                {count_card("Warning (3-4 days)", ExpiryStatus::Warning)}
                {count_card("Upcoming (5-7 days)", ExpiryStatus::Upcoming)}
            </Flex>

            <Flex style="gap: 8px;">
                {ExpiryFilter::all()
                    .into_iter()
                    .map(|f| {
                        view! {
                            <Button
                                appearance=move || if filter.get() == f { ButtonAppearance::Primary } else { ButtonAppearance::Secondary }
                                on_click=move |_| filter.set(f)
                            >
                                {filter_label(f)}
                            </Button>
                        }
                    })
                    .collect_view()}
            </Flex>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Item"</TableHeaderCell>
                        <TableHeaderCell>"Category"</TableHeaderCell>
                        <TableHeaderCell>"Quantity"</TableHeaderCell>
                        <TableHeaderCell>"Expiry Date"</TableHeaderCell>
                        <TableHeaderCell>"Days Left"</TableHeaderCell>
                        <TableHeaderCell>"Status"</TableHeaderCell>
                        <TableHeaderCell>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let rows = tracker.with(|t| t.rows.clone());
                        if rows.is_empty() {
                            view! {
                                <TableRow>
                                    <TableCell>
                                        <span style="color: var(--colorNeutralForeground3);">
                                            {empty_message(filter.get())}
                                        </span>
                                    </TableCell>
                                </TableRow>
                            }
                            .into_any()
                        } else {
                            rows.into_iter().map(row_view).collect_view().into_any()
                        }
                    }}
                </TableBody>
            </Table>
        </div>
    }
}
