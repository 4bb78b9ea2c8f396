use capture_core::{AppViewModel, Browser};

/// Renders the form as a block of text; `timestamp` prefixes the status line.
pub fn render(view: &AppViewModel, timestamp: &str) -> String {
    let auth = if view.use_auth { "on" } else { "off" };
    let credentials_note = if view.auth_inputs_enabled {
        ""
    } else {
        " (inactive)"
    };
    let browsers = Browser::ALL
        .iter()
        .map(|browser| {
            if *browser == view.browser {
                format!("[{browser}]")
            } else {
                browser.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let submit = if view.submit_enabled {
        "ready"
    } else {
        "disabled while capturing"
    };

    let mut out = String::new();
    out.push_str(&format!("  URL        : {}{}\n", view.protocol, view.url));
    out.push_str(&format!("  Basic auth : {auth}\n"));
    out.push_str(&format!(
        "  Credentials: user={:?} password={}{}\n",
        view.username,
        "*".repeat(view.password_len),
        credentials_note
    ));
    out.push_str(&format!("  Hide       : {}\n", view.hidden_elements_text));
    out.push_str(&format!("  Browser    : {browsers}\n"));
    out.push_str(&format!("  Submit     : {submit}\n"));
    out.push_str(&format!("[{timestamp}] {}", view.status_text));
    out
}
