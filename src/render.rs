//! Terminal tables for the listing commands.

use analytics::EngagementReport;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use core_types::{Campaign, Customer, MetricExtremes, PerformanceMetric, Segment};

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn campaigns(campaigns: &[Campaign]) -> Table {
    let mut t = table(vec!["ID", "Name", "Budget", "Start", "End", "Channels", "Description"]);
    for c in campaigns {
        let channels: Vec<&str> = c.channels.iter().map(|ch| ch.as_str()).collect();
        t.add_row(vec![
            c.id.to_string(),
            c.name.clone(),
            format!("{:.2}", c.budget),
            c.start_date.to_string(),
            c.end_date.to_string(),
            channels.join(", "),
            c.description.clone(),
        ]);
    }
    t
}

pub fn customers(customers: &[Customer]) -> Table {
    let mut t = table(vec!["ID", "Name", "Email", "Demographics"]);
    for c in customers {
        t.add_row(vec![
            c.id.to_string(),
            c.name.clone(),
            c.email.clone(),
            c.demographics.clone(),
        ]);
    }
    t
}

pub fn segments(segments: &[Segment]) -> Table {
    let mut t = table(vec!["ID", "Segment", "Criteria", "Customers"]);
    for s in segments {
        let members: Vec<&str> = s.members.iter().map(|m| m.name.as_str()).collect();
        t.add_row(vec![
            s.id.to_string(),
            s.name.clone(),
            s.criteria.clone(),
            members.join(", "),
        ]);
    }
    t
}

pub fn metrics(metrics: &[PerformanceMetric]) -> Table {
    let mut t = table(vec!["ID", "Campaign ID", "Emails Sent", "Emails Opened", "Clicks", "Timestamp"]);
    for m in metrics {
        t.add_row(vec![
            m.id.to_string(),
            m.campaign_id.to_string(),
            m.emails_sent.to_string(),
            m.emails_opened.to_string(),
            m.clicks.to_string(),
            m.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ]);
    }
    t
}

pub fn engagement(reports: &[EngagementReport]) -> Table {
    let mut t = table(vec![
        "Campaign",
        "Emails Sent",
        "Emails Opened",
        "Clicks",
        "Open Rate %",
        "Click-Through Rate %",
    ]);
    for r in reports {
        t.add_row(vec![
            r.campaign_name.clone(),
            r.emails_sent.to_string(),
            r.emails_opened.to_string(),
            r.clicks.to_string(),
            r.open_rate_pct.to_string(),
            r.click_through_rate_pct.to_string(),
        ]);
    }
    t
}

pub fn extremes(extremes: &MetricExtremes) -> Table {
    let mut t = table(vec!["Single entry", "Highest", "Lowest"]);
    t.add_row(vec![
        "Emails sent".to_string(),
        extremes.max_sent.to_string(),
        extremes.min_sent.to_string(),
    ]);
    t.add_row(vec![
        "Emails opened".to_string(),
        extremes.max_opened.to_string(),
        extremes.min_opened.to_string(),
    ]);
    t.add_row(vec![
        "Clicks".to_string(),
        extremes.max_clicks.to_string(),
        extremes.min_clicks.to_string(),
    ]);
    t
}
