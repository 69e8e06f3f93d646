//! 运行时仪表盘页面

use std::fmt::Write;

pub struct DashboardView<'a> {
    pub uptime_secs: u64,
    pub memory_mb: u64,
    pub runtime_version: &'a str,
    pub platform: &'a str,
    pub environment: &'a str,
    pub version: &'a str,
    pub pid: u32,
}

const STYLE: &str = "body{font-family:'Segoe UI',Tahoma,sans-serif;background:#f0f2f5;margin:0;padding:20px}\
.navbar{background:linear-gradient(135deg,#667eea 0%,#764ba2 100%);color:#fff;padding:20px;border-radius:10px;margin-bottom:30px}\
.navbar a{color:#fff;text-decoration:none}\
.grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(240px,1fr));gap:20px;margin-bottom:30px}\
.card{background:#fff;padding:25px;border-radius:15px;box-shadow:0 2px 10px rgba(0,0,0,.1)}\
.card .value{font-size:2em;font-weight:bold;color:#667eea;margin:10px 0}\
.card .label{color:#666}\
table{width:100%;border-collapse:collapse;background:#fff;border-radius:15px;overflow:hidden}\
th{background:#667eea;color:#fff;padding:15px;text-align:left}\
td{padding:15px;border-bottom:1px solid #eee}";

/// 转义 HTML 文本
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_dashboard(view: &DashboardView<'_>) -> String {
    let mut cards = String::new();
    let card_items = [
        ("Uptime", format!("{}s", view.uptime_secs), "Server running time"),
        ("Memory Usage", format!("{}MB", view.memory_mb), "Resident memory"),
        ("Runtime", escape(view.runtime_version), "Compiler version"),
        ("Platform", escape(view.platform), "Operating system"),
    ];
    for (title, value, label) in card_items {
        let _ = write!(
            cards,
            "<div class=\"card\"><div>{}</div><div class=\"value\">{}</div><div class=\"label\">{}</div></div>",
            title, value, label
        );
    }

    let mut rows = String::new();
    let row_items = [
        ("API Health", "/health endpoint".to_string(), "Healthy"),
        ("Environment", escape(view.environment), "Active"),
        ("Version", escape(view.version), "Latest"),
        ("Process ID", view.pid.to_string(), "Running"),
    ];
    for (metric, value, status) in row_items {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            metric, value, status
        );
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
<title>Dashboard - ECS Application</title>\n<style>{style}</style>\n</head>\n<body>\n\
<div class=\"navbar\"><h1>Application Dashboard</h1><a href=\"/\">&larr; Back to Home</a></div>\n\
<div class=\"grid\">{cards}</div>\n\
<table><thead><tr><th>Metric</th><th>Value</th><th>Status</th></tr></thead><tbody>{rows}</tbody></table>\n\
</body>\n</html>\n",
        style = STYLE,
        cards = cards,
        rows = rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view<'a>(environment: &'a str) -> DashboardView<'a> {
        DashboardView {
            uptime_secs: 42,
            memory_mb: 12,
            runtime_version: "rustc 1.80.0",
            platform: "linux",
            environment,
            version: "1.0.0",
            pid: 7,
        }
    }

    #[test]
    fn test_render_dashboard() {
        let html = render_dashboard(&view("production"));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("42s"));
        assert!(html.contains("12MB"));
        assert!(html.contains("<td>Process ID</td><td>7</td>"));
    }

    #[test]
    fn test_values_are_escaped() {
        let html = render_dashboard(&view("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
