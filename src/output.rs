//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (section, photo) is its semantic identity, meaning its
//! positional index and title. Snapshot files and URLs are secondary context
//! on indented lines. The output reads as a content inventory of the page.
//!
//! # Entity Display Contract
//!
//! Every entity follows the same two-level pattern:
//!
//! 1. **Header line**: positional index + title (+ optional detail)
//! 2. **Context lines**: indented `Source:`, counts, status
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Snapshot
//!     config.json: loaded
//!     contact-settings.json: missing (using defaults)
//!
//! Sections
//! 001 Sobre
//!     Credentials: 3
//! 002 Especialidades (hidden)
//! 004 Galeria (2 photos)
//!     001 Consultório
//!         Source: /uploads/consultorio.jpg
//!     002 (/uploads/sala.jpg)
//!
//! Footer
//!     Buttons: 2
//!     Seals: 3
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//!     001 Sobre → #about
//!     002 Galeria (2 photos) → #gallery
//!
//! Generated index.html (4 sections, 2 photos)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>` or
//! `String`) for testability and a `print_*` wrapper that writes to stdout.
//! Format functions are pure: no I/O, no side effects.

use crate::carousel::{Frame, Playback};
use crate::generate::{GenerateReport, GenerateStatus};
use crate::sections::ResolvedSite;
use crate::store::{ContentCache, Resource};
use crate::types::PhotoEntry;
use crate::visibility::Section;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional detail.
///
/// ```text
/// 004 Galeria (5 photos)
/// 002 Especialidades (hidden)
/// 001 Sobre
/// ```
fn entity_header(index: usize, title: &str, detail: Option<&str>) -> String {
    match detail {
        Some(d) => format!("{} {} ({})", format_index(index), title, d),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Format a photo line: titled photos show title, untitled show the URL in parens.
fn photo_line(index: usize, photo: &PhotoEntry) -> String {
    if photo.title.is_empty() {
        format!("{} ({})", format_index(index), photo.image_url)
    } else {
        format!("{} {}", format_index(index), photo.title)
    }
}

fn photo_count(n: usize) -> String {
    match n {
        1 => "1 photo".to_string(),
        n => format!("{n} photos"),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((at, _)) => format!("{}...", &text[..at]),
        None => text.to_string(),
    }
}

fn anchor(section: Section) -> String {
    format!("#{}", section.key())
}

// ============================================================================
// Check output
// ============================================================================

/// Format the resolved content inventory.
pub fn format_check_output(site: &ResolvedSite, cache: &ContentCache) -> Vec<String> {
    let mut lines = vec!["Snapshot".to_string()];
    for resource in Resource::ALL {
        let status = if cache.is_loaded(resource) {
            "loaded"
        } else {
            "missing (using defaults)"
        };
        lines.push(format!("{}{}: {}", indent(1), resource.file_name(), status));
    }

    lines.push(String::new());
    lines.push("Sections".to_string());
    for (i, section) in Section::ALL.into_iter().enumerate() {
        let visible = site.visibility.is_visible(section);
        if !visible {
            lines.push(entity_header(i + 1, section.label(), Some("hidden")));
            continue;
        }
        match section {
            Section::About => {
                lines.push(entity_header(i + 1, section.label(), None));
                lines.push(format!(
                    "{}{}",
                    indent(1),
                    truncate(&site.about.paragraphs.join(" "), 60)
                ));
                lines.push(format!(
                    "{}Credentials: {}",
                    indent(1),
                    site.about.credentials.len()
                ));
            }
            Section::Gallery => {
                let count = photo_count(site.photos.len());
                lines.push(entity_header(i + 1, section.label(), Some(&count)));
                if site.photos.is_empty() {
                    lines.push(format!("{}Not rendered: no active photos", indent(1)));
                }
                for (n, photo) in site.photos.iter().enumerate() {
                    lines.push(format!("{}{}", indent(1), photo_line(n + 1, photo)));
                    if !photo.title.is_empty() {
                        lines.push(format!("{}Source: {}", indent(2), photo.image_url));
                    }
                }
            }
            Section::Inspirational => {
                lines.push(entity_header(i + 1, section.label(), None));
                lines.push(format!(
                    "{}\"{}\" - {}",
                    indent(1),
                    truncate(&site.inspirational.quote, 60),
                    site.inspirational.author
                ));
            }
            Section::Contact => {
                lines.push(entity_header(i + 1, section.label(), None));
                let contact = &site.contact;
                for (n, entry) in contact.items.iter().enumerate() {
                    let title = entry.item.title.as_deref().unwrap_or(entry.icon.slug());
                    lines.push(format!("{}{} {}", indent(1), format_index(n + 1), title));
                }
                if let Some(schedule) = &contact.schedule {
                    lines.push(format!(
                        "{}Schedule: {} / {} / {}",
                        indent(1),
                        schedule.weekdays,
                        schedule.saturday,
                        schedule.sunday
                    ));
                }
                if let Some(location) = &contact.location {
                    lines.push(format!("{}Location: {}", indent(1), location.city));
                }
            }
            Section::Specialties | Section::Services | Section::Testimonials | Section::Faq => {
                lines.push(entity_header(i + 1, section.label(), Some("no content")));
            }
        }
    }

    let footer = &site.footer;
    lines.push(String::new());
    lines.push("Footer".to_string());
    lines.push(format!("{}Buttons: {}", indent(1), footer.buttons.len()));
    lines.push(format!("{}Seals: {}", indent(1), footer.seals.len()));
    lines.push(format!(
        "{}Certifications: {}",
        indent(1),
        footer.certifications.len()
    ));
    lines.push(format!("{}{}", indent(1), footer.copyright));
    if let Some(cnpj) = &footer.cnpj {
        lines.push(format!("{}CNPJ: {}", indent(1), cnpj));
    }

    lines
}

/// Print check output to stdout.
pub fn print_check_output(site: &ResolvedSite, cache: &ContentCache) {
    for line in format_check_output(site, cache) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Format the generate summary: one line per rendered section anchor.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let site = &report.site;
    let mut lines = vec!["Home \u{2192} index.html".to_string()];

    let rendered = site.rendered_sections();

    for (i, &section) in rendered.iter().enumerate() {
        let detail = (section == Section::Gallery).then(|| photo_count(site.photos.len()));
        lines.push(format!(
            "{}{} \u{2192} {}",
            indent(1),
            entity_header(i + 1, section.label(), detail.as_deref()),
            anchor(section)
        ));
    }

    lines.push(String::new());
    if report.fetch_failures > 0 {
        lines.push(format!(
            "{} snapshot file(s) missing or unreadable, defaults used",
            report.fetch_failures
        ));
    }
    let short = &report.fingerprint[..report.fingerprint.len().min(12)];
    lines.push(match report.status {
        GenerateStatus::Written => format!(
            "Generated index.html ({} sections, {}) [{}]",
            rendered.len(),
            photo_count(site.photos.len()),
            short
        ),
        GenerateStatus::Unchanged => format!("Content unchanged, kept index.html [{}]", short),
    });
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Carousel output
// ============================================================================

/// One status line for a carousel frame.
///
/// ```text
/// 002/005 Sala de espera [autoplay]
/// 003/005 Jardim [suspended] fullscreen 001
/// ```
pub fn format_frame(frame: Option<Frame>, photos: &[PhotoEntry]) -> String {
    let Some(frame) = frame else {
        return "(no photos)".to_string();
    };
    let title = photos
        .get(frame.index)
        .map(|p| {
            if p.title.is_empty() {
                format!("({})", p.image_url)
            } else {
                p.title.clone()
            }
        })
        .unwrap_or_default();
    let playback = match frame.playback {
        Playback::Autoplaying => "autoplay",
        Playback::PausedByInteraction => "paused",
        Playback::Suspended => "suspended",
    };
    let mut line = format!(
        "{}/{} {} [{}]",
        format_index(frame.index + 1),
        format_index(frame.len),
        title,
        playback
    );
    if let Some(pinned) = frame.fullscreen {
        line.push_str(&format!(" fullscreen {}", format_index(pinned + 1)));
    }
    line
}

pub fn print_frame(frame: Option<Frame>, photos: &[PhotoEntry]) {
    println!("{}", format_frame(frame, photos));
}

// ============================================================================
// Tests
// ============================================================================
