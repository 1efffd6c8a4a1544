use iced::mouse;

/// Pointer buttons the cube cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PointerButton {
    /// Picks and drags slices, or spins the whole cube
    Primary,
    Secondary,
    Other,
}

impl From<mouse::Button> for PointerButton {
    fn from(button: mouse::Button) -> Self {
        match button {
            mouse::Button::Left => PointerButton::Primary,
            mouse::Button::Right => PointerButton::Secondary,
            _ => PointerButton::Other,
        }
    }
}

/// Menu commands offered next to the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MenuCommand {
    Scramble,
    /// Start demo spin
    Rotate,
    /// Stop demo spin
    Stop,
    Reset,
    Quit,
}

impl MenuCommand {
    pub(crate) const ALL: [MenuCommand; 5] = [
        MenuCommand::Scramble,
        MenuCommand::Rotate,
        MenuCommand::Stop,
        MenuCommand::Reset,
        MenuCommand::Quit,
    ];
}

impl std::fmt::Display for MenuCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuCommand::Scramble => write!(f, "Scramble"),
            MenuCommand::Rotate => write!(f, "Rotate Cube"),
            MenuCommand::Stop => write!(f, "Stop Rotate"),
            MenuCommand::Reset => write!(f, "Reset"),
            MenuCommand::Quit => write!(f, "Quit"),
        }
    }
}
