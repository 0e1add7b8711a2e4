use enviroscan_api::DashboardView;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::views::chart::render_trend_chart;
use crate::views::format::{escape_html, format_reading};

const STYLE: &str = r#"
body { margin: 0; min-height: 100vh; font-family: system-ui, sans-serif; background: linear-gradient(135deg, #eff6ff, #ffffff, #dbeafe); color: #1f2937; }
main { max-width: 72rem; margin: 0 auto; padding: 2rem; }
header { text-align: center; margin-bottom: 3rem; }
h1 { font-size: 2.25rem; font-weight: 800; margin: 0; }
h1 span { color: #2563eb; }
.status { display: flex; justify-content: center; align-items: center; gap: 0.5rem; margin-top: 0.5rem; font-weight: 500; }
.dot { width: 0.75rem; height: 0.75rem; border-radius: 50%; }
.ok .dot { background: #22c55e; } .ok { color: #15803d; }
.bad .dot { background: #ef4444; } .bad { color: #b91c1c; }
.cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(12rem, 1fr)); gap: 1.5rem; }
.card { background: #fff; padding: 1.5rem; border-radius: 1rem; box-shadow: 0 4px 6px rgba(0,0,0,0.08); border-left: 8px solid #3b82f6; text-align: center; }
.card.warning { border-color: #ef4444; }
.card .title { color: #6b7280; font-size: 0.875rem; font-weight: 500; margin: 0; }
.card .value { font-size: 1.875rem; font-weight: 700; margin: 0.25rem 0 0; }
.card.warning .value { color: #dc2626; }
.card .alert { color: #ef4444; font-size: 0.75rem; margin: 0.75rem 0 0; }
.chart { background: #fff; border-radius: 1rem; padding: 1.5rem; margin-top: 2.5rem; box-shadow: 0 4px 6px rgba(0,0,0,0.08); }
.chart h2 { text-align: center; font-size: 1.5rem; font-weight: 600; color: #374151; margin: 0 0 1.25rem; }
.trend { width: 100%; height: 20rem; }
.updated { text-align: center; color: #6b7280; font-size: 0.875rem; margin-top: 2.5rem; }
"#;

const SCRIPT: &str = r#"
const events = new EventSource("/api/events");
events.onmessage = () => window.location.reload();
"#;

/// Renders the full dashboard page. `rendered_at` is printed as the
/// "Last updated" time.
pub fn render_page(view: &DashboardView, rendered_at: OffsetDateTime) -> String {
    let status_class = if view.is_connected() { "ok" } else { "bad" };

    let cards: String = view
        .metrics
        .iter()
        .map(|metric| {
            let value = view.values.get(*metric);
            let warning = metric.is_warning(value);

            format!(
                r#"<div class="card{}" data-metric="{}"><p class="title">{}</p><p class="value">{}</p>{}</div>"#,
                if warning { " warning" } else { "" },
                metric.key(),
                metric.label(),
                escape_html(&format_reading(*metric, value)),
                if warning {
                    r#"<p class="alert">⚠️ High level detected</p>"#
                } else {
                    ""
                },
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>EnviroScan Dashboard</title>
<style>{STYLE}</style>
</head>
<body>
<main>
<header>
<h1>EnviroScan <span>Dashboard</span></h1>
<div class="status {status_class}"><div class="dot"></div><p>Status: {status}</p></div>
</header>
<section class="cards">{cards}</section>
<section class="chart">
<h2>Environmental Data Trends</h2>
{chart}
</section>
<p class="updated">Last updated: {updated}</p>
</main>
<script>{SCRIPT}</script>
</body>
</html>
"#,
        status = escape_html(&view.status_label),
        chart = render_trend_chart(&view.trend),
        updated = format_timestamp(rendered_at),
    )
}

fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second] UTC"
    ))
    .unwrap_or_else(|_| at.to_string())
}
