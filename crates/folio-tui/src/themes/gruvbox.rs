//! Gruvbox Material themes
//! https://github.com/sainnhe/gruvbox-material

use ratatui::style::Color;
use crate::theme::Theme;

/// Gruvbox Material dark (medium)
pub fn dark() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x28, 0x28),
        bg1: Color::Rgb(0x32, 0x30, 0x2f),
        bg2: Color::Rgb(0x45, 0x40, 0x3d),
        bg3: Color::Rgb(0x50, 0x49, 0x45),
        fg0: Color::Rgb(0xd4, 0xbe, 0x98),
        fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
        grey0: Color::Rgb(0x7c, 0x6f, 0x64),
        grey1: Color::Rgb(0x92, 0x83, 0x74),
        grey2: Color::Rgb(0xa8, 0x99, 0x84),
        red: Color::Rgb(0xea, 0x69, 0x62),
        orange: Color::Rgb(0xe7, 0x8a, 0x4e),
        yellow: Color::Rgb(0xd8, 0xa6, 0x57),
        green: Color::Rgb(0xa9, 0xb6, 0x65),
        aqua: Color::Rgb(0x89, 0xb4, 0x82),
        blue: Color::Rgb(0x7d, 0xae, 0xa3),
        purple: Color::Rgb(0xd3, 0x86, 0x9b),
        selection: Color::Rgb(0x45, 0x40, 0x3d),
        heading: Color::Rgb(0xd8, 0xa6, 0x57),
        muted: Color::Rgb(0x92, 0x83, 0x74),
        error: Color::Rgb(0xea, 0x69, 0x62),
        success: Color::Rgb(0xa9, 0xb6, 0x65),
        warning: Color::Rgb(0xe7, 0x8a, 0x4e),
        info: Color::Rgb(0x7d, 0xae, 0xa3),
        accent: Color::Rgb(0x89, 0xb4, 0x82),
    }
}

/// Gruvbox Material light (medium)
pub fn light() -> Theme {
    Theme {
        bg0: Color::Rgb(0xfb, 0xf1, 0xc7),
        bg1: Color::Rgb(0xf4, 0xe8, 0xbe),
        bg2: Color::Rgb(0xeb, 0xdb, 0xb2),
        bg3: Color::Rgb(0xdd, 0xcc, 0xab),
        fg0: Color::Rgb(0x65, 0x47, 0x35),
        fg1: Color::Rgb(0x4f, 0x38, 0x29),
        grey0: Color::Rgb(0xa8, 0x99, 0x84),
        grey1: Color::Rgb(0x92, 0x83, 0x74),
        grey2: Color::Rgb(0x7c, 0x6f, 0x64),
        red: Color::Rgb(0xc1, 0x4a, 0x4a),
        orange: Color::Rgb(0xc3, 0x5e, 0x0a),
        yellow: Color::Rgb(0xb4, 0x71, 0x09),
        green: Color::Rgb(0x6c, 0x78, 0x2e),
        aqua: Color::Rgb(0x4c, 0x7a, 0x5d),
        blue: Color::Rgb(0x45, 0x70, 0x7a),
        purple: Color::Rgb(0x94, 0x5e, 0x80),
        selection: Color::Rgb(0xeb, 0xdb, 0xb2),
        heading: Color::Rgb(0xb4, 0x71, 0x09),
        muted: Color::Rgb(0x92, 0x83, 0x74),
        error: Color::Rgb(0xc1, 0x4a, 0x4a),
        success: Color::Rgb(0x6c, 0x78, 0x2e),
        warning: Color::Rgb(0xc3, 0x5e, 0x0a),
        info: Color::Rgb(0x45, 0x70, 0x7a),
        accent: Color::Rgb(0x4c, 0x7a, 0x5d),
    }
}
