use keepsake_core::season::Season;
use keepsake_core::tone::Rgb;
use termimad::{
    Alignment, MadSkin,
    crossterm::style::{Attribute, Color},
};

/// Night-sky palette for the terminal, with one accent per season.
pub struct Keepsake;

impl Keepsake {
    pub fn skin(season: Season) -> MadSkin {
        let mut skin = MadSkin::default();
        let accent = Keepsake::accent(season);

        skin.paragraph.set_fg(Keepsake::FG);
        skin.bold.set_fg(Keepsake::FG);
        skin.italic.set_fg(Keepsake::ROSE);

        skin.headers[0].set_fg(accent);
        skin.headers[0].add_attr(Attribute::Bold);
        skin.headers[0].align = Alignment::Left;

        skin.headers[1].set_fg(Keepsake::GOLD);
        skin.headers[1].add_attr(Attribute::Bold);

        skin.headers[2].set_fg(Keepsake::LILAC);

        skin.table.set_fg(Keepsake::LILAC);
        skin.bullet.set_fg(accent);
        skin.quote_mark.set_char('┃');
        skin.quote_mark.set_fg(Keepsake::COMMENT);
        skin.inline_code.set_fg(Keepsake::GOLD);
        skin.inline_code.set_bg(Keepsake::BG);

        skin
    }

    pub fn accent(season: Season) -> Color {
        match season {
            Season::Winter => Keepsake::ICE,
            Season::Spring => Keepsake::ROSE,
            Season::Summer => Keepsake::GOLD,
            Season::Autumn => Keepsake::EMBER,
        }
    }

    pub fn rgb(color: Rgb) -> Color {
        Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }

    pub const BG: Color = Color::Rgb {
        r: 0x1A,
        g: 0x0B,
        b: 0x2A,
    }; // #1A0B2A
    pub const FG: Color = Color::Rgb {
        r: 0xE8,
        g: 0xE0,
        b: 0xF0,
    }; // #E8E0F0

    pub const ROSE: Color = Color::Rgb {
        r: 0xFF,
        g: 0xC7,
        b: 0xD4,
    }; // #FFC7D4
    pub const GOLD: Color = Color::Rgb {
        r: 0xE5,
        g: 0xC0,
        b: 0x7B,
    }; // #E5C07B
    pub const LILAC: Color = Color::Rgb {
        r: 0xC6,
        g: 0x78,
        b: 0xDD,
    }; // #C678DD
    pub const ICE: Color = Color::Rgb {
        r: 0x87,
        g: 0xCE,
        b: 0xEB,
    }; // #87CEEB
    pub const EMBER: Color = Color::Rgb {
        r: 0xD1,
        g: 0x9A,
        b: 0x66,
    }; // #D19A66

    pub const COMMENT: Color = Color::Rgb {
        r: 0x5C,
        g: 0x63,
        b: 0x70,
    }; // #5C6370
}
