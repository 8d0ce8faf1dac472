use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Attempt the General -> Manage Hosts step gate
    Next,
    /// Return to the General step
    Back,
    /// Submit the queue
    Finish,
    /// Jump to a tab by name ("general" / "hosts")
    Tab(Option<String>),
    /// Add a host by uniqname
    Host(Option<String>),
    Cancel,
    Help,
    Quit,
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
}

pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let arg = parts.next().map(|s| s.trim().to_string());

    match cmd {
        "next" | "n" => Ok(Command::Next),
        "back" | "b" => Ok(Command::Back),
        "finish" | "fin" | "submit" => Ok(Command::Finish),
        "tab" | "t" => Ok(Command::Tab(arg)),
        "host" | "add" => Ok(Command::Host(arg)),
        "cancel" | "c" => Ok(Command::Cancel),
        "help" | "h" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "" => Err(CommandError::Unknown("empty command".to_string())),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_with_aliases_and_args() {
        assert_eq!(parse_command("next").unwrap(), Command::Next);
        assert_eq!(parse_command(" n ").unwrap(), Command::Next);
        assert_eq!(
            parse_command("tab hosts").unwrap(),
            Command::Tab(Some("hosts".to_string()))
        );
        assert_eq!(
            parse_command("host jdoe").unwrap(),
            Command::Host(Some("jdoe".to_string()))
        );
        assert_eq!(parse_command("host").unwrap(), Command::Host(None));
        assert!(parse_command("frobnicate").is_err());
        assert!(parse_command("").is_err());
    }
}
