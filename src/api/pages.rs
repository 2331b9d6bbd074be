//! HTML pages. Plain string templates; every dynamic value goes through
//! [`escape_html`] or [`json_island`].

use crate::{service::AttendanceTable, utils::validation::escape_html};

const EXPORT_SCRIPT: &str = r#"
<script>
document.getElementById('export').addEventListener('click', function () {
    var lines = Array.from(document.querySelectorAll('#attendance tr')).map(function (tr) {
        return Array.from(tr.children).map(function (cell) {
            return '"' + cell.textContent.replace(/"/g, '""') + '"';
        }).join(',');
    });
    var blob = new Blob([lines.join('\n')], { type: 'text/csv' });
    var link = document.createElement('a');
    link.href = URL.createObjectURL(blob);
    link.download = 'attendance.csv';
    link.click();
});
</script>
"#;

const QR_SCRIPT: &str = r#"
<script>
var modules = JSON.parse(document.getElementById('qr-data').textContent);
var canvas = document.getElementById('qr');
var ctx = canvas.getContext('2d');
var tile = canvas.width / modules.length;
modules.forEach(function (row, y) {
    row.forEach(function (dark, x) {
        ctx.fillStyle = dark ? '#000000' : '#ffffff';
        ctx.fillRect(Math.floor(x * tile), Math.floor(y * tile), Math.ceil(tile), Math.ceil(tile));
    });
});
</script>
"#;

// Keeps the back button on the thank-you page instead of resubmitting.
const THANK_YOU_SCRIPT: &str = r#"
<script>
history.pushState(null, null, "s");
window.addEventListener('popstate', function () {
    history.pushState(null, null, "s");
});
</script>
"#;

pub fn layout(body: &str, script: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>QR Code Attendance</title>
</head>
<body>
{body}
</body>
{script}
</html>
"#
    )
}

/// JSON inside a `<script type="application/json">`, with `<` escaped so the
/// payload cannot close the element.
pub fn json_island(id: &str, json: &str) -> String {
    format!(
        r#"<script id="{id}" type="application/json">{}</script>"#,
        json.replace('<', "\\u003c")
    )
}

pub fn check_in_form(token: &str, err: Option<&str>) -> String {
    let banner = err
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape_html(e)))
        .unwrap_or_default();

    layout(
        &format!(
            r#"<h1>Attendance Check-In</h1>
{banner}
<form method="post">
    <label>Name</label>
    <input type="text" name="name">
    <label>NUSNET</label>
    <input type="text" name="nusnet">
    <input type="hidden" name="token" value="{}">
    <input type="submit">
</form>"#,
            escape_html(token)
        ),
        "",
    )
}

pub fn thank_you(name: &str) -> String {
    layout(
        &format!("Thank you {} for attending!", escape_html(name)),
        THANK_YOU_SCRIPT,
    )
}

pub fn admin_login() -> String {
    layout(
        r#"<h1>Attendance</h1>
<form method="post">
    <label>Password</label>
    <input type="password" name="pswd">
    <input type="submit">
</form>"#,
        "",
    )
}

pub fn attendance_page(table: &AttendanceTable, records_json: &str) -> String {
    let mut html = String::from("<h1>Attendance</h1>\n<button id=\"export\">Export CSV</button>\n");
    html.push_str("<table id=\"attendance\">\n<tr><th>NUSNET</th><th>Name</th>");
    for column in &table.columns {
        html.push_str(&format!("<th>{}</th>", escape_html(column)));
    }
    html.push_str("<th>Total</th></tr>\n");

    for row in &table.rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td>",
            escape_html(&row.identifier),
            escape_html(&row.name)
        ));
        for cell in &row.cells {
            html.push_str(&format!(
                "<td>{}</td>",
                cell.as_deref().map(escape_html).unwrap_or_default()
            ));
        }
        html.push_str(&format!("<td>{}</td></tr>\n", row.total));
    }
    html.push_str("</table>\n");
    html.push_str(&json_island("records", records_json));

    layout(&html, EXPORT_SCRIPT)
}

pub fn qr_page(target: &str, matrix_json: &str) -> String {
    let body = format!(
        r#"<h1>Scan to check in</h1>
<canvas id="qr" width="400" height="400"></canvas>
<p>{}</p>
{}"#,
        escape_html(target),
        json_island("qr-data", matrix_json)
    );
    layout(&body, QR_SCRIPT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::listing::TableRow;

    #[test]
    fn form_embeds_token_and_escaped_error() {
        let html = check_in_form("abc123", Some("<bad>"));
        assert!(html.contains(r#"name="token" value="abc123""#));
        assert!(html.contains("&lt;bad&gt;"));
        assert!(!html.contains("<bad>"));
    }

    #[test]
    fn json_island_cannot_close_script() {
        let island = json_island("x", r#"["</script>"]"#);
        assert!(island.ends_with(r#"["\u003c/script>"]</script>"#));
    }

    #[test]
    fn attendance_page_renders_gaps_as_empty_cells() {
        let table = AttendanceTable {
            columns: vec!["01/03".into(), "03/03".into()],
            rows: vec![TableRow {
                identifier: "B".into(),
                name: "Bo".into(),
                cells: vec![None, Some("20:10:00".into())],
                total: 1,
            }],
        };

        let html = attendance_page(&table, "[]");
        assert!(html.contains("<th>01/03</th><th>03/03</th>"));
        assert!(html.contains("<tr><td>B</td><td>Bo</td><td></td><td>20:10:00</td><td>1</td></tr>"));
    }
}
