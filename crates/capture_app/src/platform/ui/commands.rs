use capture_core::{Msg, Protocol};
use thiserror::Error;

pub const HELP_TEXT: &str = "\
Commands:
  url <host/path>          set the URL (protocol is chosen separately)
  protocol http|https      choose the protocol
  auth on|off              toggle basic auth
  user <name>              set the basic-auth username
  pass <secret>            set the basic-auth password
  hide <sel, sel, ...>     comma-separated selectors to hide
  browser <name>           Chrome, Firefox, Edge or Safari
  submit                   take the screenshot
  show                     print the form
  help                     print this help
  quit                     exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Msg(Msg),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}; type `help`")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    BadArgument {
        command: &'static str,
        expected: &'static str,
    },
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<UiCommand>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "url" => UiCommand::Msg(Msg::UrlChanged(rest.to_string())),
        "protocol" => {
            let protocol: Protocol = rest.parse().map_err(|_| CommandError::BadArgument {
                command: "protocol",
                expected: "http or https",
            })?;
            UiCommand::Msg(Msg::ProtocolChanged(protocol))
        }
        "auth" => UiCommand::Msg(Msg::AuthToggled(parse_toggle(rest.trim())?)),
        "user" => UiCommand::Msg(Msg::UsernameChanged(rest.to_string())),
        "pass" => UiCommand::Msg(Msg::PasswordChanged(rest.to_string())),
        // Selector text is stored verbatim.
        "hide" => UiCommand::Msg(Msg::HiddenElementsChanged(rest.to_string())),
        "browser" => UiCommand::Msg(Msg::BrowserSelected(rest.trim().to_string())),
        "submit" => UiCommand::Msg(Msg::SubmitClicked),
        "show" => UiCommand::Show,
        "help" | "?" => UiCommand::Help,
        "quit" | "exit" => UiCommand::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn parse_toggle(value: &str) -> Result<bool, CommandError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(CommandError::BadArgument {
            command: "auth",
            expected: "on or off",
        }),
    }
}
