use thiserror::Error;

pub(crate) const HELP_TEXT: &str = "commands: w|up, s|down, a|left, d|right, e|interact, \
i|inventory, click <x> <y>, draw, scene, help, quit|esc";

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum DriverCommand {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    Interact,
    ToggleInventory,
    Click { x: f32, y: f32 },
    Draw,
    Scene,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{command}' takes no arguments")]
    UnexpectedArguments { command: String },
    #[error("usage: click <x> <y>")]
    ClickUsage,
    #[error("invalid coordinate '{0}'")]
    InvalidCoordinate(String),
}

pub(crate) fn parse_command(line: &str) -> Result<DriverCommand, CommandParseError> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err(CommandParseError::Empty);
    };
    let head = head.to_lowercase();

    if head == "click" {
        let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(CommandParseError::ClickUsage);
        };
        return Ok(DriverCommand::Click {
            x: parse_coordinate(x)?,
            y: parse_coordinate(y)?,
        });
    }

    let command = match head.as_str() {
        "w" | "up" | "forward" => DriverCommand::MoveForward,
        "s" | "down" | "back" => DriverCommand::MoveBack,
        "a" | "left" => DriverCommand::MoveLeft,
        "d" | "right" => DriverCommand::MoveRight,
        "e" | "interact" => DriverCommand::Interact,
        "i" | "inventory" => DriverCommand::ToggleInventory,
        "draw" => DriverCommand::Draw,
        "scene" => DriverCommand::Scene,
        "help" | "?" => DriverCommand::Help,
        "quit" | "exit" | "esc" => DriverCommand::Quit,
        _ => return Err(CommandParseError::Unknown(head)),
    };
    if parts.next().is_some() {
        return Err(CommandParseError::UnexpectedArguments { command: head });
    }
    Ok(command)
}

fn parse_coordinate(raw: &str) -> Result<f32, CommandParseError> {
    raw.parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CommandParseError::InvalidCoordinate(raw.to_string()))
}
