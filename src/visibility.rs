//! Visibility Resolver.
//!
//! One `section_visibility` entry maps section names to booleans. Policy is
//! default-open: a section is hidden only when its flag is present and is a
//! literal `false`. A missing entry, a non-object value, or any other flag
//! value leaves the section visible.
//!
//! The gallery is also visible whenever any photo-carousel configuration entry
//! exists, whatever its own flag says. Every other section follows the
//! plain rule.

use crate::store::ConfigStore;
use serde_json::Value;
use std::fmt;

/// Configuration keys whose presence forces the gallery on.
pub const CAROUSEL_KEYS: [&str; 2] = ["photo_carousel_section", "carousel_section"];

/// Named page sections that can be toggled from the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Specialties,
    Services,
    Gallery,
    Testimonials,
    Inspirational,
    Faq,
    Contact,
}

impl Section {
    /// Page order.
    pub const ALL: [Section; 8] = [
        Section::About,
        Section::Specialties,
        Section::Services,
        Section::Gallery,
        Section::Testimonials,
        Section::Inspirational,
        Section::Faq,
        Section::Contact,
    ];

    /// Key inside `section_visibility`, also used as the anchor id.
    pub fn key(self) -> &'static str {
        match self {
            Section::About => "about",
            Section::Specialties => "specialties",
            Section::Services => "services",
            Section::Gallery => "gallery",
            Section::Testimonials => "testimonials",
            Section::Inspirational => "inspirational",
            Section::Faq => "faq",
            Section::Contact => "contact",
        }
    }

    /// Navigation label.
    pub fn label(self) -> &'static str {
        match self {
            Section::About => "Sobre",
            Section::Specialties => "Especialidades",
            Section::Services => "Serviços",
            Section::Gallery => "Galeria",
            Section::Testimonials => "Depoimentos",
            Section::Inspirational => "Inspirações",
            Section::Faq => "FAQ",
            Section::Contact => "Contato",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Resolved visibility of every section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionVisibility {
    hidden: [bool; 8],
}

impl Default for SectionVisibility {
    /// Everything visible, as before the configuration has loaded.
    fn default() -> Self {
        Self { hidden: [false; 8] }
    }
}

impl SectionVisibility {
    pub fn resolve(store: &ConfigStore) -> Self {
        let flags = store.get("section_visibility").and_then(Value::as_object);
        let carousel_configured = CAROUSEL_KEYS.iter().any(|k| store.contains(k));

        let mut hidden = [false; 8];
        for (slot, section) in hidden.iter_mut().zip(Section::ALL) {
            let disabled = flags
                .and_then(|f| f.get(section.key()))
                .is_some_and(|v| *v == Value::Bool(false));
            *slot = match section {
                Section::Gallery => disabled && !carousel_configured,
                _ => disabled,
            };
        }
        Self { hidden }
    }

    pub fn is_visible(&self, section: Section) -> bool {
        !self.hidden[section as usize]
    }

    pub fn visible(&self) -> impl Iterator<Item = Section> + '_ {
        Section::ALL.into_iter().filter(|s| self.is_visible(*s))
    }
}
