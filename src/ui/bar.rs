//! HTML for the button bar and the scripts shared by both web views.

use crate::managers::window_controller::Affordances;
use crate::services::site_registry::SiteRegistry;

const DRAG_JS: &str = include_str!("../../resources/ui/drag.js");
const NAV_JS: &str = include_str!("../../resources/ui/nav.js");
const BAR_CSS: &str = include_str!("../../resources/ui/bar.css");

const BAR_JS: &str = r#"
function post(msg){try{window.ipc.postMessage(JSON.stringify(msg))}catch(e){}}
document.querySelectorAll('[data-site]').forEach(function(b){
  b.addEventListener('click',function(){post({cmd:'load_site',id:b.dataset.site})});
});
document.getElementById('back').addEventListener('click',function(){post({cmd:'back'})});
document.getElementById('hide').addEventListener('click',function(){post({cmd:'hide'})});
document.getElementById('close').addEventListener('click',function(){post({cmd:'close'})});
window.__launcher_apply=function(a){
  document.getElementById('back').classList.toggle('hidden',!a.back);
  document.getElementById('hide').classList.toggle('hidden',!a.hide);
  document.getElementById('close').classList.toggle('hidden',!a.close);
  document.querySelector('.bar').classList.toggle('expanded',a.browser);
};
post({cmd:'ready'});
"#;

/// Script injected into every page the browser loads: window dragging plus
/// reports of same-document URL changes.
pub fn browser_init_script() -> String {
    format!("{}\n{}", DRAG_JS, NAV_JS)
}

/// Full bar page: back, one button per site, hide, close.
///
/// `initial` sets which controls start hidden; later changes go through
/// [`apply_affordances_script`].
pub fn bar_html(registry: &SiteRegistry, initial: Affordances) -> String {
    let mut html = String::with_capacity(BAR_CSS.len() + DRAG_JS.len() + BAR_JS.len() + 1024);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><style>");
    html.push_str(BAR_CSS);
    html.push_str("</style></head><body>");

    html.push_str(if initial.browser {
        "<div class=\"bar expanded\">"
    } else {
        "<div class=\"bar\">"
    });
    push_button(&mut html, "back", "\u{2190}", !initial.back);
    for site in registry.sites() {
        html.push_str(&format!(
            "<button data-site=\"{}\" title=\"{}\">{}</button>",
            escape(&site.id),
            escape(&site.url),
            escape(&site.label)
        ));
    }
    push_button(&mut html, "hide", "Hide", !initial.hide);
    push_button(&mut html, "close", "Close", !initial.close);
    html.push_str("</div>");

    html.push_str("<script>");
    html.push_str(DRAG_JS);
    html.push_str(BAR_JS);
    html.push_str("</script></body></html>");
    html
}

/// Script that updates the bar to `affordances`.
pub fn apply_affordances_script(affordances: &Affordances) -> String {
    let json = serde_json::to_string(affordances).unwrap_or_else(|_| "{}".to_string());
    format!("if(window.__launcher_apply)window.__launcher_apply({})", json)
}

fn push_button(html: &mut String, id: &str, label: &str, hidden: bool) {
    let class = if hidden { " class=\"hidden\"" } else { "" };
    html.push_str(&format!("<button id=\"{}\"{}>{}</button>", id, class, label));
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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
