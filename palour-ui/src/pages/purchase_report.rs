//! Purchase Report Page
//!
//! Spending chart, recent purchases and purchase statistics.

use leptos::*;
use leptos_meta::{Meta, Title};
use palour::pages::Page;
use palour::report::{ChartFrame, PurchaseReport};

use crate::components::{Card, SpendingChart, StatCard};
use crate::state::GlobalState;

#[component]
pub fn PurchaseReportPage() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let meta = Page::PurchaseReport.meta();

    let report = PurchaseReport::build(&state.catalog);
    let layout = report.spending.layout(ChartFrame::default());

    view! {
        <Title text=meta.title />
        <Meta name="description" content=meta.description />

        <div class="space-y-8">
            <h1 class="text-3xl font-bold">{report.title}</h1>

            <div class="grid gap-8 md:grid-cols-2">
                <Card header=report.spending.header>
                    <SpendingChart layout=layout />
                </Card>

                <Card header=report.recent.header>
                    <table class="w-full text-sm">
                        <thead>
                            <tr class="border-b text-left text-zinc-500">
                                <th class="py-2 font-medium">"Event"</th>
                                <th class="py-2 font-medium">"Date"</th>
                                <th class="py-2 text-right font-medium">"Amount"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {report
                                .recent
                                .rows
                                .into_iter()
                                .map(|row| view! {
                                    <tr class="border-b last:border-0">
                                        <td class="py-2">{row.event}</td>
                                        <td class="py-2">{row.date}</td>
                                        <td class="py-2 text-right">{row.amount}</td>
                                    </tr>
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                </Card>
            </div>

            <Card header=report.statistics.header>
                <div class="grid gap-4 md:grid-cols-3">
                    {report
                        .statistics
                        .stats
                        .into_iter()
                        .map(|stat| view! { <StatCard stat=stat /> })
                        .collect_view()}
                </div>
            </Card>
        </div>
    }
}
