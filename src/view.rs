use crate::config::ToastConfig;
use crate::style::{self, TOAST_CLASS, Treatment};
use crate::types::{Severity, ToastId};

/// Everything a surface needs to put one toast on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastView {
    pub id: ToastId,
    pub severity: Severity,
    pub message: String,
    pub treatment: Treatment,
    /// Inline style of the toast box, without the animation.
    pub css: String,
    /// Running CSS animation: the enter slide until the toast starts leaving.
    pub animation: String,
}

impl ToastView {
    pub fn new(id: ToastId, severity: Severity, message: &str, config: &ToastConfig) -> Self {
        let treatment = Treatment::for_severity(severity);
        Self {
            id,
            severity,
            message: message.to_string(),
            treatment,
            css: style::toast_css(treatment, &config.placement),
            animation: style::animation_value(style::ENTER_KEYFRAMES, config.animation.enter),
        }
    }

    pub fn inline_style(&self) -> String {
        format!("{} animation: {};", self.css, self.animation)
    }

    /// Markup of the toast element: severity icon, message, close glyph.
    pub fn to_html(&self) -> String {
        format!(
            concat!(
                r#"<div id="{dom_id}" class="{class}" style="{css}">"#,
                r#"<i class="fas {icon}" style="color: {accent}; font-size: 20px;"></i>"#,
                r#"<span style="flex: 1; color: #333; font-size: 14px; font-weight: 500;">{message}</span>"#,
                r#"<i class="fas fa-times" style="color: #999; font-size: 14px; cursor: pointer;"></i>"#,
                "</div>"
            ),
            dom_id = self.id.dom_id(),
            class = TOAST_CLASS,
            css = self.inline_style(),
            icon = self.treatment.icon,
            accent = self.treatment.accent,
            message = escape_html(&self.message),
        )
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
