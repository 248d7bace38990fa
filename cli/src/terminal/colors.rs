use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::Yellow;
pub const SEPARATOR: Color = Color::BrightBlack;

pub const IPV4_ADDR: Color = Color::BrightBlue;
pub const IPV6_ADDR: Color = Color::Cyan;

pub const PORT: Color = Color::BrightGreen;
pub const SERVICE: Color = Color::White;
pub const UNCONFIRMED_SERVICE: Color = Color::BrightBlack;
