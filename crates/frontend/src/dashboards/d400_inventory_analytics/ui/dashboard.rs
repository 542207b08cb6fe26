use crate::app::{use_app_state, AppState};
use crate::shared::icons::icon;
use crate::shared::notice::Notice;
use contracts::dashboards::d400_inventory_analytics::{
    AnalyticsMetrics, AttentionItem, CategoryPerformance, CategoryValue, DashboardSummary,
    ExpiryDistribution, Insight, TopItem,
};
use leptos::prelude::*;
use services::dashboards::d400_inventory_analytics::service as analytics;
use services::domain::a001_inventory_item::service as inventory;
use services::domain::a002_purchase_order::repository as orders_repository;
use services::shared::date_utils;
use services::shared::format::{format_inr, format_quantity};
use thaw::*;

/// Всё, что нужно странице, считается одним проходом по хранилищу
#[derive(Debug, Clone, Default)]
struct AnalyticsData {
    metrics: AnalyticsMetrics,
    insights: Vec<Insight>,
    categories: Vec<CategoryValue>,
    top_items: Vec<TopItem>,
    expiry: ExpiryDistribution,
    performance: Vec<CategoryPerformance>,
    summary: DashboardSummary,
}

fn load_data(state: AppState) -> Result<AnalyticsData, String> {
    let items = inventory::list(&state.storage).map_err(|e| format!("{:#}", e))?;
    let orders = orders_repository::load_store(&state.storage).map_err(|e| e.to_string())?;
    let today = date_utils::today();

    Ok(state.config.with_value(|config| AnalyticsData {
        metrics: analytics::analytics_metrics(&items, &orders, today, config),
        insights: analytics::insights(&items, &orders, today, config),
        categories: analytics::category_values(&items),
        top_items: analytics::top_items(&items),
        expiry: analytics::expiry_distribution(&items, today),
        performance: analytics::category_performance(&items, &orders),
        summary: analytics::dashboard_summary(&items, today, config),
    }))
}

fn days_text(days: Option<i64>) -> String {
    match days {
        None => "-".to_string(),
        Some(d) if d < 0 => format!("Expired {} days ago", -d),
        Some(0) => "Expires today".to_string(),
        Some(d) => format!("{} days left", d),
    }
}

#[component]
#[allow(non_snake_case)]
fn MetricCard(title: &'static str, value: String) -> impl IntoView {
    view! {
        <Card>
            <div style="padding: 12px 16px; min-width: 180px;">
                <div style="font-size: 13px; color: var(--colorNeutralForeground3);">{title}</div>
                <div style="font-size: 22px; font-weight: bold; margin-top: 6px;">{value}</div>
            </div>
        </Card>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn AnalyticsDashboard() -> impl IntoView {
    let state = use_app_state();
    let data = RwSignal::new(AnalyticsData::default());

    let reload = move || match load_data(state) {
        Ok(loaded) => data.set(loaded),
        Err(e) => {
            log::error!("Failed to load analytics: {}", e);
            state.notify(Notice::error("Analytics could not be loaded"));
        }
    };
    reload();

    let decimals = state.config.with_value(|c| c.analytics.currency_decimals);
    let money = move |amount: f64| format_inr(amount, decimals);

    let metric_cards = move || {
        let m = data.with(|d| d.metrics.clone());
        view! {
            <MetricCard title="Inventory Value" value=money(m.total_inventory_value) />
            <MetricCard title="Orders Value" value=money(m.total_orders_value) />
            <MetricCard title="Average Order" value=money(m.average_order_value) />
            <MetricCard title="Low Stock Value" value=money(m.low_stock_value) />
            <MetricCard title="Waste (expired)" value=money(m.waste_value) />
            <MetricCard title="Inventory Efficiency" value=format!("{:.0}%", m.inventory_efficiency) />
        }
    };

    let insight_view = |insight: Insight| {
        view! {
            <Card>
                <Flex style="gap: 12px; padding: 12px 16px;" align=FlexAlign::FlexStart>
                    {icon(&insight.icon)}
                    <div>
                        <div style="font-weight: bold;">{insight.title}</div>
                        <div style="color: var(--colorNeutralForeground2);">{insight.description}</div>
                    </div>
                </Flex>
            </Card>
        }
    };

    let attention_row = move |entry: AttentionItem| {
        let name = entry.item.name.clone();
        let quantity_text = format!("{} {}", format_quantity(entry.item.quantity), entry.item.unit_or_default());
        view! {
            <TableRow>
                <TableCell><TableCellLayout truncate=true>{name}</TableCellLayout></TableCell>
                <TableCell>
                    {quantity_text}
                </TableCell>
                <TableCell>{entry.stock_status.label()}</TableCell>
                <TableCell>{days_text(entry.days_until_expiry)}</TableCell>
            </TableRow>
        }
    };

    view! {
        <div style="padding: 20px; display: flex; flex-direction: column; gap: 20px; overflow-y: auto; height: 100%;">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2 style="font-size: 18px; font-weight: bold;">"Inventory Analytics"</h2>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| reload()>
                    "Refresh"
                </Button>
            </Flex>

            <Flex style="gap: 12px; flex-wrap: wrap;">{metric_cards}</Flex>

            <div>
                <h3 style="font-size: 16px; margin-bottom: 8px;">"AI Insights"</h3>
                <div style="display: flex; flex-direction: column; gap: 8px;">
                    {move || data.with(|d| d.insights.clone()).into_iter().map(insight_view).collect_view()}
                </div>
            </div>

            <Flex style="gap: 20px; flex-wrap: wrap;" align=FlexAlign::FlexStart>
                <div style="flex: 1; min-width: 280px;">
                    <h3 style="font-size: 16px; margin-bottom: 8px;">"Top Items by Price"</h3>
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Item"</TableHeaderCell>
                                <TableHeaderCell>"Price"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                data.with(|d| d.top_items.clone())
                                    .into_iter()
                                    .map(|t| view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout truncate=true>{t.name}</TableCellLayout></TableCell>
                                            <TableCell>{money(t.price)}</TableCell>
                                        </TableRow>
                                    })
                                    .collect_view()
                            }}
                        </TableBody>
                    </Table>
                </div>

                <div style="flex: 1; min-width: 220px;">
                    <h3 style="font-size: 16px; margin-bottom: 8px;">"Expiry Analysis"</h3>
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Period"</TableHeaderCell>
                                <TableHeaderCell>"Items"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                data.with(|d| d.expiry.rows())
                                    .into_iter()
                                    .map(|(label, count)| view! {
                                        <TableRow>
                                            <TableCell>{label}</TableCell>
                                            <TableCell>{count}</TableCell>
                                        </TableRow>
                                    })
                                    .collect_view()
                            }}
                        </TableBody>
                    </Table>
                </div>

                <div style="flex: 2; min-width: 360px;">
                    <h3 style="font-size: 16px; margin-bottom: 8px;">"Category Performance"</h3>
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Category"</TableHeaderCell>
                                <TableHeaderCell>"Orders"</TableHeaderCell>
                                <TableHeaderCell>"Value"</TableHeaderCell>
                                <TableHeaderCell>"Completion"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                data.with(|d| d.performance.clone())
                                    .into_iter()
                                    .map(|p| view! {
                                        <TableRow>
                                            <TableCell>{p.category}</TableCell>
                                            <TableCell>{format!("{} ({} done)", p.total_orders, p.completed_orders)}</TableCell>
                                            <TableCell>{money(p.total_value)}</TableCell>
                                            <TableCell>{format!("{:.0}%", p.completion_rate)}</TableCell>
                                        </TableRow>
                                    })
                                    .collect_view()
                            }}
                        </TableBody>
                    </Table>
                </div>
            </Flex>

            <Flex style="gap: 20px; flex-wrap: wrap;" align=FlexAlign::FlexStart>
                <div style="flex: 1; min-width: 320px;">
                    <h3 style="font-size: 16px; margin-bottom: 8px;">"Value by Category"</h3>
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Category"</TableHeaderCell>
                                <TableHeaderCell>"Items"</TableHeaderCell>
                                <TableHeaderCell>"Value"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                data.with(|d| d.categories.clone())
                                    .into_iter()
                                    .map(|c| view! {
                                        <TableRow>
                                            <TableCell>{c.category}</TableCell>
                                            <TableCell>{c.item_count}</TableCell>
                                            <TableCell>{money(c.value)}</TableCell>
                                        </TableRow>
                                    })
                                    .collect_view()
                            }}
                        </TableBody>
                    </Table>
                </div>

                <div style="flex: 1; min-width: 320px;">
                    <h3 style="font-size: 16px; margin-bottom: 8px;">
                        {icon("warning")}
                        {move || {
                            data.with(|d| {
                                format!(
                                    " Needs Attention ({} low stock, {} expiring soon)",
                                    d.summary.low_stock_count,
                                    d.summary.expiring_soon_count,
                                )
                            })
                        }}
                    </h3>
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Item"</TableHeaderCell>
                                <TableHeaderCell>"Quantity"</TableHeaderCell>
                                <TableHeaderCell>"Stock"</TableHeaderCell>
                                <TableHeaderCell>"Expiry"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                data.with(|d| d.summary.attention_items.clone())
                                    .into_iter()
                                    .map(attention_row)
                                    .collect_view()
                            }}
                        </TableBody>
                    </Table>
                    <div style="font-size: 13px; color: var(--colorNeutralForeground3); margin-top: 8px;">
                        {move || {
                            data.with(|d| {
                                let s = &d.summary.stock;
                                format!(
                                    "{} items in stock: {} out, {} critical, {} low, {} good",
                                    d.summary.total_items, s.out_of_stock, s.critical, s.low, s.good,
                                )
                            })
                        }}
                    </div>
                </div>
            </Flex>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_text() {
        assert_eq!(days_text(None), "-");
        assert_eq!(days_text(Some(-3)), "Expired 3 days ago");
        assert_eq!(days_text(Some(0)), "Expires today");
        assert_eq!(days_text(Some(4)), "4 days left");
    }
}
