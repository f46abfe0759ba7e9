// Palette for the image window
use ratatui::style::Color;

pub const ACCENT_PRIMARY: Color = Color::Rgb(235, 111, 146);
pub const ACCENT_SECONDARY: Color = Color::Rgb(156, 207, 216);
pub const ACCENT_HIGHLIGHT: Color = Color::Rgb(246, 193, 119);
pub const TEXT_PRIMARY: Color = Color::Rgb(224, 222, 244);
pub const TEXT_SECONDARY: Color = Color::Rgb(144, 140, 170);
pub const BORDER_COLOR: Color = Color::Rgb(82, 79, 103);
