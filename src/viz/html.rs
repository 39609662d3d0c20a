//! HTML page around the per-metric SVG views.
//!
//! All three views are rendered up front and stacked in the same grid cell. A button
//! click toggles which one is visible; the swap fades over `transition_ms`.

use crate::models::Metric;

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Fades the chosen view in. When both views carry the same circles (same points and
/// legend dots, in draw order), the new view's circles start at the old `cy` and slide
/// to their own.
const SWITCH_SCRIPT: &str = r#"(function () {
  var root = document.getElementById('my_dataviz');
  var ms = parseInt(root.getAttribute('data-transition-ms'), 10) || 0;
  function show(metric) {
    var from = root.querySelector('.view.active');
    var to = root.querySelector('.view[data-metric="' + metric + '"]');
    if (!to || to === from) return;
    var a = from ? from.querySelectorAll('circle') : [];
    var b = to.querySelectorAll('circle');
    if (a.length === b.length) {
      b.forEach(function (c, i) {
        c.style.transition = 'none';
        c.style.cy = a[i].getAttribute('cy') + 'px';
        c.getBoundingClientRect();
        c.style.transition = 'cy ' + ms + 'ms ease';
        c.style.cy = c.getAttribute('cy') + 'px';
      });
    }
    root.querySelectorAll('.view').forEach(function (view) {
      view.classList.toggle('active', view === to);
    });
  }
  root.querySelectorAll('.button-container button').forEach(function (btn) {
    btn.addEventListener('click', function () {
      show(btn.getAttribute('data-metric'));
    });
  });
})();"#;

/// Assemble the dashboard page. `views` are `(metric, svg markup)` in button order;
/// `initial` is the view shown on load.
pub fn dashboard_page(
    title: &str,
    views: &[(Metric, String)],
    initial: Metric,
    transition_ms: u32,
) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    html.push_str("<style>\n");
    html.push_str("#my_dataviz .views { display: grid; justify-content: center; }\n");
    html.push_str(&format!(
        "#my_dataviz .view {{ grid-area: 1 / 1; opacity: 0; visibility: hidden; \
         transition: opacity {ms}ms ease, visibility {ms}ms; }}\n",
        ms = transition_ms
    ));
    html.push_str("#my_dataviz .view.active { opacity: 1; visibility: visible; }\n");
    html.push_str("#my_dataviz .button-container { text-align: center; margin-top: 20px; }\n");
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str(&format!(
        "<div id=\"my_dataviz\" data-transition-ms=\"{transition_ms}\">\n<div class=\"views\">\n"
    ));

    for (metric, svg) in views {
        let class = if *metric == initial { "view active" } else { "view" };
        html.push_str(&format!(
            "<div class=\"{class}\" data-metric=\"{}\">\n{svg}\n</div>\n",
            metric.column()
        ));
    }
    html.push_str("</div>\n<div class=\"button-container\">\n");
    for (metric, _) in views {
        html.push_str(&format!(
            "<button type=\"button\" data-metric=\"{}\">{}</button>\n",
            metric.column(),
            escape_html(&metric.label())
        ));
    }
    html.push_str("</div>\n</div>\n<script>\n");
    html.push_str(SWITCH_SCRIPT);
    html.push_str("\n</script>\n</body>\n</html>\n");
    html
}
