use std::time::Duration;

use humantime::parse_duration;
use storefront_toast::NotificationRequest;

/// One line of a demo script.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Notify(NotificationRequest),
    /// Click the toast at this position of the active sequence.
    Click(usize),
    Dismiss(usize),
    Wait(Duration),
    List,
    Quit,
}

/// Parse a script line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word.to_ascii_lowercase().as_str() {
        "success" | "error" | "warning" | "info" => {
            Command::Notify(NotificationRequest::lenient(rest, word, None))
        }
        "notify" => {
            let mut parts = rest.splitn(3, char::is_whitespace);
            let severity = parts.next().unwrap_or_default();
            let millis = parts
                .next()
                .ok_or("usage: notify <severity> <ms> <message>")?
                .parse::<u64>()
                .map_err(|err| format!("invalid duration: {err}"))?;
            let message = parts.next().unwrap_or_default().trim();
            Command::Notify(NotificationRequest::lenient(message, severity, Some(millis)))
        }
        "click" => Command::Click(parse_index(rest)?),
        "dismiss" => Command::Dismiss(parse_index(rest)?),
        "wait" => Command::Wait(parse_duration(rest).map_err(|err| format!("invalid wait: {err}"))?),
        "list" => Command::List,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(Some(command))
}

fn parse_index(raw: &str) -> Result<usize, String> {
    raw.parse()
        .map_err(|_| format!("expected a toast index, got {raw:?}"))
}
