// HTML results table

use crate::models::ResultRecord;

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 20px; }
        table { width: 100%; border-collapse: collapse; margin-top: 20px; }
        th, td { padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }
        th { background-color: #f2f2f2; position: sticky; top: 0; }
        tr:hover { background-color: #f5f5f5; }
        .actions { margin: 20px 0; }
        .btn { display: inline-block; padding: 10px 15px; background: #3498db; color: white; text-decoration: none; border-radius: 4px; }
"#;

/// Renders records newest first. `records` is in dataset (oldest-first) order.
/// `prefix` is the proxy mount point used for the navigation links.
pub fn render_results_page(records: &[ResultRecord], prefix: &str) -> String {
    let mut rows = String::new();
    for r in records.iter().rev() {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:?}</td><td>{:?}</td><td>{:?}</td><td>{:?}</td></tr>\n",
            escape_html(&r.timestamp),
            escape_html(&r.server),
            r.download,
            r.upload,
            r.ping,
            r.jitter,
        ));
    }
    let prefix = escape_html(prefix);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Test Results</title>
    <style>{STYLE}</style>
</head>
<body>
    <h1>Speed Test Results</h1>
    <div class="actions">
        <a href="{prefix}/" class="btn">Back to Test</a>
        <a href="{prefix}/download-results" class="btn">Download CSV</a>
    </div>
    <table>
        <thead>
            <tr>
                <th>Timestamp</th>
                <th>Server</th>
                <th>Download (Mbps)</th>
                <th>Upload (Mbps)</th>
                <th>Ping (ms)</th>
                <th>Jitter (ms)</th>
            </tr>
        </thead>
        <tbody>
{rows}        </tbody>
    </table>
</body>
</html>
"#
    )
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
