//! Marker-based color formatting
//!
//! Renderers describe styling with inline markers such as `{{red}}` and the
//! reset marker `{{/}}`. A [`Formatter`] resolves those markers into terminal
//! escapes, strips them, or leaves them verbatim.

use colored::{Color, ColoredString, Colorize};

/// Reset marker: every style applied since the previous reset is dropped.
pub const RESET: &str = "{{/}}";
/// Bold marker
pub const BOLD: &str = "{{bold}}";
/// Underline marker
pub const UNDERLINE: &str = "{{underline}}";
/// Green marker
pub const GREEN: &str = "{{green}}";
/// Red marker
pub const RED: &str = "{{red}}";
/// Yellow marker
pub const YELLOW: &str = "{{yellow}}";
/// Light yellow marker
pub const LIGHT_YELLOW: &str = "{{light-yellow}}";
/// Cyan marker
pub const CYAN: &str = "{{cyan}}";
/// Magenta marker
pub const MAGENTA: &str = "{{magenta}}";
/// Orange marker
pub const ORANGE: &str = "{{orange}}";
/// Coral marker
pub const CORAL: &str = "{{coral}}";
/// Gray marker
pub const GRAY: &str = "{{gray}}";

/// How markers are resolved when text is emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Translate markers into terminal escape sequences
    #[default]
    Terminal,
    /// Remove every marker
    Plain,
    /// Keep markers as literal text
    Passthrough,
}

/// A single palette entry
#[derive(Debug, Clone, Copy)]
enum Tag {
    Reset,
    Bold,
    Underline,
    Fg(Color),
}

/// Known marker names and what they map to.
const PALETTE: &[(&str, Tag)] = &[
    ("{{/}}", Tag::Reset),
    ("{{bold}}", Tag::Bold),
    ("{{underline}}", Tag::Underline),
    ("{{green}}", Tag::Fg(Color::Green)),
    ("{{red}}", Tag::Fg(Color::Red)),
    ("{{yellow}}", Tag::Fg(Color::Yellow)),
    (
        "{{light-yellow}}",
        Tag::Fg(Color::TrueColor {
            r: 255,
            g: 255,
            b: 135,
        }),
    ),
    ("{{cyan}}", Tag::Fg(Color::Cyan)),
    ("{{magenta}}", Tag::Fg(Color::Magenta)),
    (
        "{{orange}}",
        Tag::Fg(Color::TrueColor {
            r: 255,
            g: 175,
            b: 0,
        }),
    ),
    (
        "{{coral}}",
        Tag::Fg(Color::TrueColor {
            r: 255,
            g: 95,
            b: 135,
        }),
    ),
    (
        "{{gray}}",
        Tag::Fg(Color::TrueColor {
            r: 118,
            g: 118,
            b: 118,
        }),
    ),
];

/// Styles accumulated since the last reset
#[derive(Debug, Clone, Copy, Default)]
struct Style {
    fg: Option<Color>,
    bold: bool,
    underline: bool,
}

impl Style {
    fn apply(&mut self, tag: Tag) {
        match tag {
            Tag::Reset => *self = Self::default(),
            Tag::Bold => self.bold = true,
            Tag::Underline => self.underline = true,
            Tag::Fg(color) => self.fg = Some(color),
        }
    }

    fn paint(self, text: &str) -> ColoredString {
        let mut painted = text.normal();
        if let Some(color) = self.fg {
            painted = painted.color(color);
        }
        if self.bold {
            painted = painted.bold();
        }
        if self.underline {
            painted = painted.underline();
        }
        painted
    }
}

/// Either a run of literal text or a recognised marker.
enum Piece<'a> {
    Text(&'a str),
    Marker(Tag),
}

/// Split `text` into literal runs and known markers.
///
/// Unknown `{{...}}` sequences stay part of the literal text.
fn tokenize(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find('{') {
        let at = cursor + offset;
        let rest = &text[at..];
        match PALETTE.iter().find(|(marker, _)| rest.starts_with(marker)) {
            Some((marker, tag)) => {
                if literal_start < at {
                    pieces.push(Piece::Text(&text[literal_start..at]));
                }
                pieces.push(Piece::Marker(*tag));
                cursor = at + marker.len();
                literal_start = cursor;
            }
            None => cursor = at + 1,
        }
    }

    if literal_start < text.len() {
        pieces.push(Piece::Text(&text[literal_start..]));
    }
    pieces
}

/// Resolves color markers according to a [`ColorMode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Formatter {
    mode: ColorMode,
}

impl Formatter {
    /// Create a formatter for the given mode
    #[must_use]
    pub const fn new(mode: ColorMode) -> Self {
        Self { mode }
    }

    /// Formatter that emits terminal styling when `color` is set and plain text otherwise
    #[must_use]
    pub const fn for_color(color: bool) -> Self {
        if color {
            Self::new(ColorMode::Terminal)
        } else {
            Self::new(ColorMode::Plain)
        }
    }

    /// The configured mode
    #[must_use]
    pub const fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Resolve every marker in `text`.
    #[must_use]
    pub fn style(&self, text: &str) -> String {
        match self.mode {
            ColorMode::Passthrough => text.to_string(),
            ColorMode::Plain => tokenize(text)
                .into_iter()
                .filter_map(|piece| match piece {
                    Piece::Text(run) => Some(run),
                    Piece::Marker(_) => None,
                })
                .collect(),
            ColorMode::Terminal => {
                let mut style = Style::default();
                let mut out = String::with_capacity(text.len());
                for piece in tokenize(text) {
                    match piece {
                        Piece::Marker(tag) => style.apply(tag),
                        Piece::Text(run) => out.push_str(&style.paint(run).to_string()),
                    }
                }
                out
            }
        }
    }
}

/// Join `elements` alternating between default and gray styling.
///
/// The first element gets a reset prefix, the second gray, and so on; the
/// result always ends with a reset. An empty slice yields an empty string.
#[must_use]
pub fn cycle_join<S: AsRef<str>>(elements: &[S], joiner: &str) -> String {
    if elements.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            out.push_str(joiner);
        }
        out.push_str(if i % 2 == 0 { RESET } else { GRAY });
        out.push_str(element.as_ref());
    }
    out.push_str(RESET);
    out
}
