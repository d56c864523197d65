//! Server-rendered HTML dashboard listing the postings of a scan.

use std::fmt::{self, Write};

use crate::dto::scan::ScanReport;

/// Escape text for inclusion in HTML element content or double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Only http(s) links are rendered as anchors.
fn is_web_link(link: &str) -> bool {
    link.starts_with("https://") || link.starts_with("http://")
}

/// Render the dashboard page for `report`.
pub fn render_dashboard(report: &ScanReport) -> Result<String, fmt::Error> {
    let mut html = String::new();
    write_dashboard(&mut html, report)?;
    Ok(html)
}

/// Write the dashboard page for `report` to `w`.
pub fn write_dashboard(w: &mut impl Write, report: &ScanReport) -> fmt::Result {
    w.write_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Job Scout</title>\n<style>\
         body{font-family:sans-serif;margin:2rem}\
         table{border-collapse:collapse;width:100%}\
         th,td{border:1px solid #ccc;padding:.4rem;text-align:left}\
         th{background:#f4f4f4}\
         </style>\n</head>\n<body>\n<h1>Job Scout</h1>\n",
    )?;

    writeln!(
        w,
        "<p>Scan started {}: {} postings, {} new.</p>",
        escape_html(&report.started_at),
        report.postings.len(),
        report.new_count()
    )?;

    writeln!(w, "<ul class=\"sources\">")?;
    for source in &report.sources {
        write!(
            w,
            "<li>{}: {} jobs, {} new",
            escape_html(&source.portal),
            source.found,
            source.new
        )?;
        if let Some(error) = &source.error {
            write!(w, " <em>({})</em>", escape_html(error))?;
        }
        writeln!(w, "</li>")?;
    }
    writeln!(w, "</ul>")?;

    if report.postings.is_empty() {
        writeln!(w, "<p>No matching jobs found.</p>")?;
    } else {
        writeln!(
            w,
            "<table>\n<thead><tr><th>Title</th><th>Company</th><th>Portal</th>\
             <th>Posted</th><th>Days ago</th></tr></thead>\n<tbody>"
        )?;
        for posting in &report.postings {
            let title = escape_html(&posting.title);
            let title_cell = if is_web_link(&posting.link) {
                format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{title}</a>",
                    escape_html(&posting.link)
                )
            } else {
                title
            };
            writeln!(
                w,
                "<tr><td>{title_cell}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&posting.company),
                escape_html(&posting.portal),
                escape_html(&posting.posted_date),
                posting.days_ago
            )?;
        }
        writeln!(w, "</tbody>\n</table>")?;
    }

    writeln!(w, "</body>\n</html>")
}
