use std::io;

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum ColorSetting {
    #[default]
    Automatic,
    Always,
    Never,
}

impl ColorSetting {
    /// Resolve the setting against a target that may or may not render colors.
    pub fn use_color(self, target_supports_color: bool) -> bool {
        match self {
            ColorSetting::Automatic => target_supports_color,
            ColorSetting::Always => true,
            ColorSetting::Never => false,
        }
    }
}

impl From<bool> for ColorSetting {
    fn from(value: bool) -> Self {
        match value {
            true => ColorSetting::Always,
            false => ColorSetting::Never,
        }
    }
}

pub(crate) mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
}

pub trait SupportsColor {
    fn supports_color(&self) -> bool;
}

impl<T: io::IsTerminal> SupportsColor for T {
    fn supports_color(&self) -> bool {
        self.is_terminal()
    }
}
