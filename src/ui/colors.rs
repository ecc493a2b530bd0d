//! Rose Pine color palettes, light and dark.
//! Based on the official Rose Pine theme: https://rosepinetheme.com/

use ratatui::style::Color;

use crate::models::Theme;

pub struct Palette {
    pub base: Color,
    pub surface: Color,
    pub text: Color,
    pub subtle: Color,
    pub muted: Color,
    pub love: Color,
    pub gold: Color,
    pub foam: Color,
    pub iris: Color,
    pub pine: Color,
    pub highlight_high: Color,
}

/// Rose Pine (main).
pub const DARK: Palette = Palette {
    base: Color::Rgb(25, 23, 36),
    surface: Color::Rgb(31, 29, 46),
    text: Color::Rgb(224, 222, 244),
    subtle: Color::Rgb(144, 140, 170),
    muted: Color::Rgb(110, 106, 134),
    love: Color::Rgb(235, 111, 146),
    gold: Color::Rgb(246, 193, 119),
    foam: Color::Rgb(156, 207, 216),
    iris: Color::Rgb(196, 167, 231),
    pine: Color::Rgb(49, 116, 143),
    highlight_high: Color::Rgb(82, 79, 103),
};

/// Rose Pine Dawn.
pub const LIGHT: Palette = Palette {
    base: Color::Rgb(250, 244, 237),
    surface: Color::Rgb(255, 250, 243),
    text: Color::Rgb(87, 82, 121),
    subtle: Color::Rgb(121, 117, 147),
    muted: Color::Rgb(152, 147, 165),
    love: Color::Rgb(180, 99, 122),
    gold: Color::Rgb(234, 157, 52),
    foam: Color::Rgb(86, 148, 159),
    iris: Color::Rgb(144, 122, 169),
    pine: Color::Rgb(40, 105, 131),
    highlight_high: Color::Rgb(206, 202, 205),
};

/// Resolves the configured theme to a palette. Terminals expose no
/// color-scheme preference, so `auto` falls back to dark.
pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark | Theme::Auto => &DARK,
    }
}
