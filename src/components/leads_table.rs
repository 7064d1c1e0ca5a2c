//! Leads Table Component
//!
//! Renders the filtered lead list. The newest row is highlighted.

use chrono::Local;
use leptos::prelude::*;

use leads_core::format::{format_clock, format_day_month, format_phone, initial};

use crate::models::Lead;

#[component]
pub fn LeadsTable(#[prop(into)] leads: Signal<Vec<Lead>>) -> impl IntoView {
    // Rebuilt on every list change: an update may keep the same `updated_at`
    let rows = move || {
        leads
            .get()
            .into_iter()
            .enumerate()
            .map(|(index, lead)| view! { <LeadRow lead=lead highlighted=index == 0 /> })
            .collect_view()
    };

    view! {
        <Show
            when=move || leads.with(|l| !l.is_empty())
            fallback=|| view! {
                <div class="leads-empty">
                    <span class="empty-icon">"📭"</span>
                    <p>"Nenhum lead encontrado"</p>
                    <p class="muted">"Os leads aparecerão aqui automaticamente em tempo real"</p>
                </div>
            }
        >
            <div class="leads-table-wrap">
                <table class="leads-table">
                    <thead>
                        <tr>
                            <th>"Lead"</th>
                            <th>"Telefone"</th>
                            <th>"Interesse"</th>
                            <th>"Status"</th>
                            <th>"Origem"</th>
                            <th>"Respondeu"</th>
                            <th>"Data"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {rows}
                    </tbody>
                </table>
            </div>
        </Show>
    }
}

#[component]
fn LeadRow(lead: Lead, highlighted: bool) -> impl IntoView {
    let created = lead.created_at.with_timezone(&Local);
    let status_class = format!("status-badge {}", lead.status.tone());
    let (responded_class, responded_text) = if lead.responded {
        ("reply-badge yes", "Sim")
    } else {
        ("reply-badge", "Não")
    };

    view! {
        <tr class=if highlighted { "lead-row latest" } else { "lead-row" }>
            <td>
                <div class="lead-name">
                    <span class="avatar">{initial(&lead.name)}</span>
                    <span>{lead.name.clone()}</span>
                </div>
            </td>
            <td class="mono">{format_phone(&lead.phone)}</td>
            <td>{lead.interest.clone()}</td>
            <td><span class=status_class>{lead.status.label()}</span></td>
            <td class="muted">{lead.source.clone()}</td>
            <td><span class=responded_class>{responded_text}</span></td>
            <td>
                <div class="lead-date">
                    <span>{format_day_month(&created)}</span>
                    <span class="muted">{format_clock(&created)}</span>
                </div>
            </td>
        </tr>
    }
}
