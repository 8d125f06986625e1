//! Style and gradient mapping.
//!
//! The admin panel stores presentation choices as string identifiers (card
//! gradients, badge gradients, Tailwind-style `from-x to-y` pairs, icon
//! names). Each identifier space is closed: it is modelled as an enumeration
//! or a fixed table with one default arm, and every mapping is plain data
//! lookup so the output matches the design palette exactly.
//!
//! ## Card styles
//!
//! [`card_style`] picks a `{background, border, accent}` triple:
//!
//! | gradient id              | result                              |
//! |--------------------------|-------------------------------------|
//! | recognized               | its mapped triple                   |
//! | present, unrecognized    | [`NEUTRAL_CARD`]                    |
//! | absent or empty          | `POSITIONAL_PALETTE[index % 6]`     |

use std::fmt;

/// Colors for one credential card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStyle {
    pub background: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
}

const fn card(background: &'static str, border: &'static str, accent: &'static str) -> CardStyle {
    CardStyle {
        background,
        border,
        accent,
    }
}

/// Card gradients selectable in the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardGradient {
    PinkPurple,
    PurpleIndigo,
    GreenTeal,
    BlueCyan,
    OrangeRed,
    YellowOrange,
    TealGreen,
    IndigoPurple,
    GraySlate,
    PinkPink,
}

impl CardGradient {
    pub const ALL: [CardGradient; 10] = [
        CardGradient::PinkPurple,
        CardGradient::PurpleIndigo,
        CardGradient::GreenTeal,
        CardGradient::BlueCyan,
        CardGradient::OrangeRed,
        CardGradient::YellowOrange,
        CardGradient::TealGreen,
        CardGradient::IndigoPurple,
        CardGradient::GraySlate,
        CardGradient::PinkPink,
    ];

    pub fn id(self) -> &'static str {
        match self {
            CardGradient::PinkPurple => "from-pink-50 to-purple-50",
            CardGradient::PurpleIndigo => "from-purple-50 to-indigo-50",
            CardGradient::GreenTeal => "from-green-50 to-teal-50",
            CardGradient::BlueCyan => "from-blue-50 to-cyan-50",
            CardGradient::OrangeRed => "from-orange-50 to-red-50",
            CardGradient::YellowOrange => "from-yellow-50 to-orange-50",
            CardGradient::TealGreen => "from-teal-50 to-green-50",
            CardGradient::IndigoPurple => "from-indigo-50 to-purple-50",
            CardGradient::GraySlate => "from-gray-50 to-slate-50",
            CardGradient::PinkPink => "from-pink-50 to-pink-100",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.id() == id)
    }

    pub fn style(self) -> CardStyle {
        match self {
            CardGradient::PinkPurple => card("#fdf2f8", "#fbcfe8", "#ec4899"),
            CardGradient::PurpleIndigo => card("#faf5ff", "#e9d5ff", "#8b5cf6"),
            CardGradient::GreenTeal => card("#f0fdf4", "#bbf7d0", "#10b981"),
            CardGradient::BlueCyan => card("#eff6ff", "#bfdbfe", "#06b6d4"),
            CardGradient::OrangeRed => card("#fff7ed", "#fed7aa", "#f97316"),
            CardGradient::YellowOrange => card("#fffbeb", "#fde68a", "#f59e0b"),
            CardGradient::TealGreen => card("#f0fdfa", "#99f6e4", "#14b8a6"),
            CardGradient::IndigoPurple => card("#eef2ff", "#c7d2fe", "#6366f1"),
            CardGradient::GraySlate => card("#f9fafb", "#e5e7eb", "#6b7280"),
            CardGradient::PinkPink => card("#fdf2f8", "#fce7f3", "#ec4899"),
        }
    }
}

/// Returned for a gradient id that is present but unknown.
pub const NEUTRAL_CARD: CardStyle = card("#fefefe", "#f1f5f9", "#ec4899");

/// Cycled by position when a card carries no gradient id.
pub const POSITIONAL_PALETTE: [CardStyle; 6] = [
    card("#fdf2f8", "#fbcfe8", "#ec4899"),
    card("#faf5ff", "#e9d5ff", "#8b5cf6"),
    card("#eff6ff", "#bfdbfe", "#06b6d4"),
    card("#f0fdf4", "#bbf7d0", "#10b981"),
    card("#fffbeb", "#fde68a", "#f59e0b"),
    card("#fff7ed", "#fed7aa", "#ef4444"),
];

pub fn card_style(gradient: Option<&str>, index: usize) -> CardStyle {
    match gradient.filter(|g| !g.is_empty()) {
        Some(id) => CardGradient::from_id(id)
            .map(CardGradient::style)
            .unwrap_or(NEUTRAL_CARD),
        None => POSITIONAL_PALETTE[index % POSITIONAL_PALETTE.len()],
    }
}

// ============================================================================
// Tailwind-style gradient pairs (badges, footer buttons, seals)
// ============================================================================

/// Swatches referenced by the gradient pairs the admin panel can emit.
const SWATCHES: &[(&str, &str)] = &[
    ("amber-500", "#f59e0b"),
    ("blue-500", "#3b82f6"),
    ("blue-600", "#2563eb"),
    ("cyan-500", "#06b6d4"),
    ("cyan-600", "#0891b2"),
    ("emerald-500", "#10b981"),
    ("emerald-600", "#059669"),
    ("gray-500", "#6b7280"),
    ("gray-600", "#4b5563"),
    ("green-500", "#22c55e"),
    ("green-600", "#16a34a"),
    ("indigo-500", "#6366f1"),
    ("indigo-600", "#4f46e5"),
    ("orange-500", "#f97316"),
    ("orange-600", "#ea580c"),
    ("pink-500", "#ec4899"),
    ("pink-600", "#db2777"),
    ("purple-500", "#a855f7"),
    ("purple-600", "#9333ea"),
    ("red-500", "#ef4444"),
    ("red-600", "#dc2626"),
    ("rose-500", "#f43f5e"),
    ("rose-600", "#e11d48"),
    ("sky-500", "#0ea5e9"),
    ("teal-500", "#14b8a6"),
    ("teal-600", "#0d9488"),
    ("yellow-500", "#eab308"),
];

fn swatch(name: &str) -> Option<&'static str> {
    SWATCHES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, hex)| *hex)
}

/// Two color stops of a left-to-right gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradientStops {
    pub from: &'static str,
    pub to: &'static str,
}

impl GradientStops {
    pub fn to_css(self) -> String {
        format!("linear-gradient(to right, {}, {})", self.from, self.to)
    }
}

/// Parse a `from-<swatch> to-<swatch>` pair. Unknown swatches yield `None`.
pub fn gradient_stops(classes: &str) -> Option<GradientStops> {
    let mut from = None;
    let mut to = None;
    for class in classes.split_whitespace() {
        if let Some(name) = class.strip_prefix("from-") {
            from = swatch(name);
        } else if let Some(name) = class.strip_prefix("to-") {
            to = swatch(name);
        }
    }
    Some(GradientStops {
        from: from?,
        to: to?,
    })
}

/// Site-wide badge gradient chosen through `badge_gradient.gradient`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeGradient {
    #[default]
    PinkPurple,
    BluePurple,
    GreenBlue,
    OrangeRed,
    TealCyan,
    IndigoPurple,
    RosePink,
    AmberOrange,
}

impl BadgeGradient {
    pub const ALL: [BadgeGradient; 8] = [
        BadgeGradient::PinkPurple,
        BadgeGradient::BluePurple,
        BadgeGradient::GreenBlue,
        BadgeGradient::OrangeRed,
        BadgeGradient::TealCyan,
        BadgeGradient::IndigoPurple,
        BadgeGradient::RosePink,
        BadgeGradient::AmberOrange,
    ];

    pub fn id(self) -> &'static str {
        match self {
            BadgeGradient::PinkPurple => "pink-purple",
            BadgeGradient::BluePurple => "blue-purple",
            BadgeGradient::GreenBlue => "green-blue",
            BadgeGradient::OrangeRed => "orange-red",
            BadgeGradient::TealCyan => "teal-cyan",
            BadgeGradient::IndigoPurple => "indigo-purple",
            BadgeGradient::RosePink => "rose-pink",
            BadgeGradient::AmberOrange => "amber-orange",
        }
    }

    /// Unknown or absent ids fall back to pink-purple.
    pub fn from_id(id: Option<&str>) -> Self {
        id.and_then(|id| Self::ALL.into_iter().find(|g| g.id() == id))
            .unwrap_or_default()
    }

    pub fn classes(self) -> &'static str {
        match self {
            BadgeGradient::PinkPurple => "from-pink-500 to-purple-600",
            BadgeGradient::BluePurple => "from-blue-500 to-purple-600",
            BadgeGradient::GreenBlue => "from-green-500 to-blue-600",
            BadgeGradient::OrangeRed => "from-orange-500 to-red-600",
            BadgeGradient::TealCyan => "from-teal-500 to-cyan-600",
            BadgeGradient::IndigoPurple => "from-indigo-500 to-purple-600",
            BadgeGradient::RosePink => "from-rose-500 to-pink-600",
            BadgeGradient::AmberOrange => "from-amber-500 to-orange-600",
        }
    }

    pub fn stops(self) -> GradientStops {
        gradient_stops(self.classes()).unwrap_or(GradientStops {
            from: "#ec4899",
            to: "#9333ea",
        })
    }
}

// ============================================================================
// Icons
// ============================================================================

/// Icons the admin panel can attach to contact items and footer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Whatsapp,
    Instagram,
    Linkedin,
    XTwitter,
    Twitter,
    Facebook,
    Telegram,
    Discord,
    Skype,
    Mail,
    MapPin,
    Clock,
}

impl Icon {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "FaWhatsapp" => Icon::Whatsapp,
            "FaInstagram" => Icon::Instagram,
            "FaLinkedin" => Icon::Linkedin,
            "FaXTwitter" => Icon::XTwitter,
            "FaTwitter" => Icon::Twitter,
            "FaFacebook" => Icon::Facebook,
            "FaTelegram" => Icon::Telegram,
            "FaDiscord" => Icon::Discord,
            "FaSkype" => Icon::Skype,
            "Mail" => Icon::Mail,
            "MapPin" => Icon::MapPin,
            "Clock" => Icon::Clock,
            _ => return None,
        })
    }

    /// Total mapping: unknown or absent names become `default`.
    pub fn resolve(name: Option<&str>, default: Icon) -> Icon {
        name.and_then(Icon::from_name).unwrap_or(default)
    }

    /// CSS class suffix, e.g. `icon-whatsapp`.
    pub fn slug(self) -> &'static str {
        match self {
            Icon::Whatsapp => "whatsapp",
            Icon::Instagram => "instagram",
            Icon::Linkedin => "linkedin",
            Icon::XTwitter => "x-twitter",
            Icon::Twitter => "twitter",
            Icon::Facebook => "facebook",
            Icon::Telegram => "telegram",
            Icon::Discord => "discord",
            Icon::Skype => "skype",
            Icon::Mail => "mail",
            Icon::MapPin => "map-pin",
            Icon::Clock => "clock",
        }
    }

    /// Short text glyph rendered inside the icon tile.
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Whatsapp => "WA",
            Icon::Instagram => "IG",
            Icon::Linkedin => "in",
            Icon::XTwitter => "X",
            Icon::Twitter => "TW",
            Icon::Facebook => "f",
            Icon::Telegram => "TG",
            Icon::Discord => "DC",
            Icon::Skype => "S",
            Icon::Mail => "✉",
            Icon::MapPin => "⌖",
            Icon::Clock => "◷",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

// ============================================================================
// Highlighted titles
// ============================================================================

/// A piece of a title: plain text or an accent-highlighted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Highlight(&'a str),
}

/// Split a title on `(...)` markers: `"Galeria de (fotos)"` becomes
/// `[Plain("Galeria de "), Highlight("fotos")]`.
///
/// An opening parenthesis without a closing one is literal text.
pub fn highlight_segments(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('(') {
        let Some(close) = rest[open + 1..].find(')').map(|i| open + 1 + i) else {
            break;
        };
        if open > 0 {
            segments.push(Segment::Plain(&rest[..open]));
        }
        let inner = &rest[open + 1..close];
        if !inner.is_empty() {
            segments.push(Segment::Highlight(inner));
        }
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Plain(rest));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_gradient_maps_to_its_triple() {
        let style = card_style(Some("from-green-50 to-teal-50"), 4);
        assert_eq!(style, card("#f0fdf4", "#bbf7d0", "#10b981"));
    }

    #[test]
    fn unknown_gradient_gets_neutral_not_positional() {
        assert_eq!(card_style(Some("from-lime-50 to-red-50"), 0), NEUTRAL_CARD);
        assert_eq!(card_style(Some("nonsense"), 3), NEUTRAL_CARD);
    }

    #[test]
    fn absent_gradient_cycles_positional_palette() {
        for index in 0..20 {
            assert_eq!(card_style(None, index), POSITIONAL_PALETTE[index % 6]);
        }
        assert_eq!(card_style(None, 6), card_style(None, 0));
    }

    #[test]
    fn empty_gradient_counts_as_absent() {
        assert_eq!(card_style(Some(""), 1), POSITIONAL_PALETTE[1]);
    }

    #[test]
    fn every_card_gradient_roundtrips_its_id() {
        for g in CardGradient::ALL {
            assert_eq!(CardGradient::from_id(g.id()), Some(g));
        }
    }

    #[test]
    fn badge_gradient_defaults_to_pink_purple() {
        assert_eq!(BadgeGradient::from_id(None), BadgeGradient::PinkPurple);
        assert_eq!(BadgeGradient::from_id(Some("???")), BadgeGradient::PinkPurple);
        assert_eq!(
            BadgeGradient::from_id(Some("teal-cyan")),
            BadgeGradient::TealCyan
        );
    }

    #[test]
    fn every_badge_gradient_has_known_swatches() {
        for g in BadgeGradient::ALL {
            assert!(gradient_stops(g.classes()).is_some(), "{}", g.id());
        }
    }

    #[test]
    fn gradient_stops_parse_pairs() {
        let stops = gradient_stops("from-green-500 to-green-600").unwrap();
        assert_eq!(stops.from, "#22c55e");
        assert_eq!(stops.to, "#16a34a");
        assert_eq!(
            stops.to_css(),
            "linear-gradient(to right, #22c55e, #16a34a)"
        );
        assert_eq!(gradient_stops("from-green-500"), None);
        assert_eq!(gradient_stops("from-chartreuse-500 to-green-600"), None);
    }

    #[test]
    fn icon_resolution_is_total() {
        assert_eq!(Icon::resolve(Some("FaInstagram"), Icon::Mail), Icon::Instagram);
        assert_eq!(Icon::resolve(Some("FaMyspace"), Icon::Mail), Icon::Mail);
        assert_eq!(Icon::resolve(None, Icon::Whatsapp), Icon::Whatsapp);
    }

    #[test]
    fn highlight_marks_parenthesised_spans() {
        assert_eq!(
            highlight_segments("Galeria de (fotos)"),
            vec![Segment::Plain("Galeria de "), Segment::Highlight("fotos")]
        );
        assert_eq!(
            highlight_segments("Dra. (Adrielle) (Benhossi)!"),
            vec![
                Segment::Plain("Dra. "),
                Segment::Highlight("Adrielle"),
                Segment::Plain(" "),
                Segment::Highlight("Benhossi"),
                Segment::Plain("!"),
            ]
        );
    }

    #[test]
    fn highlight_leaves_unbalanced_text_alone() {
        assert_eq!(
            highlight_segments("Vamos conversar? (sem fim"),
            vec![Segment::Plain("Vamos conversar? (sem fim")]
        );
        assert_eq!(highlight_segments(""), Vec::<Segment>::new());
    }
}
