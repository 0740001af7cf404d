/// Named palette and hex color handling
use std::fmt;
use std::str::FromStr;

use nom::{
    bytes::complete::{tag, take_while_m_n},
    combinator::{all_consuming, map_res},
    sequence::preceded,
    IResult,
};

use crate::error::PcvisError;

/// Colors with a fixed RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Red,
    Green,
    Blue,
    Black,
    White,
    Aqua,
    Yellow,
    Orange,
    Grey,
}

impl NamedColor {
    pub const ALL: [NamedColor; 9] = [
        NamedColor::Red,
        NamedColor::Green,
        NamedColor::Blue,
        NamedColor::Black,
        NamedColor::White,
        NamedColor::Aqua,
        NamedColor::Yellow,
        NamedColor::Orange,
        NamedColor::Grey,
    ];

    pub fn rgb(self) -> [u8; 3] {
        match self {
            NamedColor::Red => [255, 0, 0],
            NamedColor::Green => [0, 255, 0],
            NamedColor::Blue => [0, 0, 255],
            NamedColor::Black => [0, 0, 0],
            NamedColor::White => [255, 255, 255],
            NamedColor::Aqua => [0, 255, 255],
            NamedColor::Yellow => [255, 255, 0],
            NamedColor::Orange => [255, 125, 0],
            NamedColor::Grey => [125, 125, 125],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NamedColor::Red => "red",
            NamedColor::Green => "green",
            NamedColor::Blue => "blue",
            NamedColor::Black => "black",
            NamedColor::White => "white",
            NamedColor::Aqua => "aqua",
            NamedColor::Yellow => "yellow",
            NamedColor::Orange => "orange",
            NamedColor::Grey => "grey",
        }
    }
}

impl FromStr for NamedColor {
    type Err = PcvisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" => Ok(NamedColor::Red),
            "green" => Ok(NamedColor::Green),
            "blue" => Ok(NamedColor::Blue),
            "black" => Ok(NamedColor::Black),
            "white" => Ok(NamedColor::White),
            // "aque" is the historical spelling of the palette entry
            "aqua" | "aque" => Ok(NamedColor::Aqua),
            "yellow" => Ok(NamedColor::Yellow),
            "orange" => Ok(NamedColor::Orange),
            "grey" | "gray" => Ok(NamedColor::Grey),
            _ => Err(PcvisError::UnknownColor(s.to_string())),
        }
    }
}

/// A color as handed to renderers: either a palette entry or a raw hex string.
///
/// Hex strings are stored verbatim; only [`Color::rgb`] looks inside them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Color {
    Named(NamedColor),
    Hex(String),
}

impl Color {
    /// Resolve to concrete channels. `None` for hex strings that are not `#rgb` or `#rrggbb`.
    pub fn rgb(&self) -> Option<[u8; 3]> {
        match self {
            Color::Named(named) => Some(named.rgb()),
            Color::Hex(hex) => parse_hex(hex),
        }
    }
}

impl From<NamedColor> for Color {
    fn from(named: NamedColor) -> Self {
        Color::Named(named)
    }
}

impl FromStr for Color {
    type Err = PcvisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('#') {
            return Ok(Color::Hex(s.to_string()));
        }
        s.parse::<NamedColor>().map(Color::Named)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(named) => f.write_str(named.name()),
            Color::Hex(hex) => f.write_str(hex),
        }
    }
}

fn hex_digits(n: usize) -> impl Fn(&str) -> IResult<&str, u8> {
    move |input| {
        map_res(
            take_while_m_n(n, n, |c: char| c.is_ascii_hexdigit()),
            |digits: &str| u8::from_str_radix(digits, 16).map(|v| if n == 1 { v * 17 } else { v }),
        )(input)
    }
}

fn hex_color(digits_per_channel: usize) -> impl Fn(&str) -> IResult<&str, [u8; 3]> {
    move |input| {
        let (input, r) = preceded(tag("#"), hex_digits(digits_per_channel))(input)?;
        let (input, g) = hex_digits(digits_per_channel)(input)?;
        let (input, b) = hex_digits(digits_per_channel)(input)?;
        Ok((input, [r, g, b]))
    }
}

fn parse_hex(input: &str) -> Option<[u8; 3]> {
    all_consuming(hex_color(2))(input)
        .or_else(|_| all_consuming(hex_color(1))(input))
        .ok()
        .map(|(_, rgb)| rgb)
}
