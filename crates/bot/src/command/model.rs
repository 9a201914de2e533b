//! Model — command names, parsed commands, lifecycle actions.

use std::fmt;

use crate::auth::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandName {
    List,
    Status,
    Restart,
    Stop,
    Start,
    Help,
}

impl CommandName {
    /// Unknown names fall back to `Help`.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "list" => CommandName::List,
            "status" => CommandName::Status,
            "restart" => CommandName::Restart,
            "stop" => CommandName::Stop,
            "start" => CommandName::Start,
            _ => CommandName::Help,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandName::List => "list",
            CommandName::Status => "status",
            CommandName::Restart => "restart",
            CommandName::Stop => "stop",
            CommandName::Start => "start",
            CommandName::Help => "help",
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inbound command. Created per message, dropped after dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: CommandName,
    pub args: Vec<String>,
    pub sender: Identity,
}

impl Command {
    pub fn new(name: CommandName, args: &[&str], sender: Identity) -> Self {
        Self {
            name,
            args: args.iter().map(|a| a.to_string()).collect(),
            sender,
        }
    }

    /// Parse `/name[@botname] arg1 arg2 ...`. Text that does not start with
    /// `/` is not a command and yields `None`.
    pub fn parse(text: &str, sender: Identity) -> Option<Self> {
        Self::parse_addressed(text, sender, None)
    }

    /// Like [`Command::parse`], but when `bot_username` is known a command
    /// explicitly addressed to another bot (`/list@other_bot`) yields `None`.
    pub fn parse_addressed(text: &str, sender: Identity, bot_username: Option<&str>) -> Option<Self> {
        let mut parts = text.split_whitespace();
        let head = parts.next()?.strip_prefix('/')?;
        let (name, mention) = match head.split_once('@') {
            Some((name, mention)) => (name, Some(mention)),
            None => (head, None),
        };
        if let (Some(mention), Some(own)) = (mention, bot_username) {
            if !mention.eq_ignore_ascii_case(own.trim_start_matches('@')) {
                return None;
            }
        }
        Some(Self {
            name: CommandName::parse(name),
            args: parts.map(str::to_string).collect(),
            sender,
        })
    }
}

/// The two container actions a command can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Restart,
    Stop,
}

impl LifecycleAction {
    pub fn usage(&self) -> &'static str {
        match self {
            LifecycleAction::Restart => "Usage: /restart <container_name_or_id>",
            LifecycleAction::Stop => "Usage: /stop <container_name_or_id>",
        }
    }

    /// Success reply, naming the target as the user typed it.
    pub fn done(&self, target: &str) -> String {
        match self {
            LifecycleAction::Restart => format!("{} riavviato.", target),
            LifecycleAction::Stop => format!("{} fermato.", target),
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleAction::Restart => f.write_str("restart"),
            LifecycleAction::Stop => f.write_str("stop"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_command() {
        let cmd = Command::parse("/list", 111).unwrap();
        assert_eq!(cmd, Command::new(CommandName::List, &[], 111));
    }

    #[test]
    fn test_parse_with_args() {
        let cmd = Command::parse("/restart  web   extra", 7).unwrap();
        assert_eq!(cmd.name, CommandName::Restart);
        assert_eq!(cmd.args, vec!["web", "extra"]);
        assert_eq!(cmd.sender, 7);
    }

    #[test]
    fn test_parse_bot_suffix() {
        let cmd = Command::parse("/stop@docker_watch_bot db", 1).unwrap();
        assert_eq!(cmd.name, CommandName::Stop);
        assert_eq!(cmd.args, vec!["db"]);
    }

    #[test]
    fn test_command_for_another_bot_is_ignored() {
        assert!(Command::parse_addressed("/list@other_bot", 1, Some("docker_watch_bot")).is_none());
        assert!(Command::parse_addressed("/restart@OtherBot web", 1, Some("docker_watch_bot")).is_none());
    }

    #[test]
    fn test_command_for_this_bot_is_accepted() {
        let cmd = Command::parse_addressed("/list@Docker_Watch_Bot", 1, Some("docker_watch_bot")).unwrap();
        assert_eq!(cmd.name, CommandName::List);
        let cmd = Command::parse_addressed("/status", 1, Some("docker_watch_bot")).unwrap();
        assert_eq!(cmd.name, CommandName::Status);
    }

    #[test]
    fn test_unknown_username_accepts_any_mention() {
        let cmd = Command::parse_addressed("/list@other_bot", 1, None).unwrap();
        assert_eq!(cmd.name, CommandName::List);
    }

    #[test]
    fn test_parse_unknown_is_help() {
        assert_eq!(Command::parse("/reboot", 1).unwrap().name, CommandName::Help);
        assert_eq!(Command::parse("/", 1).unwrap().name, CommandName::Help);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(Command::parse("/STATUS", 1).unwrap().name, CommandName::Status);
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert!(Command::parse("hello /list", 1).is_none());
        assert!(Command::parse("", 1).is_none());
        assert!(Command::parse("   ", 1).is_none());
    }

    #[test]
    fn test_lifecycle_messages() {
        assert_eq!(LifecycleAction::Restart.done("web"), "web riavviato.");
        assert_eq!(LifecycleAction::Stop.done("web"), "web fermato.");
        assert!(LifecycleAction::Stop.usage().starts_with("Usage: /stop"));
    }
}
