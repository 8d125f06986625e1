//! HTML site generation.
//!
//! Loads the snapshot into a [`ContentCache`], resolves every section, and
//! renders a single static page.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html              # The whole site
//! └── .content-fingerprint    # SHA-256 of snapshot + config, for skip detection
//! ```
//!
//! Page sections, top to bottom: navigation, about, gallery, inspirational
//! quote, contact, footer. A section hidden through `section_visibility` is
//! omitted from the markup entirely, and so is its navigation link. The
//! gallery is also omitted when there are no active photos.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/site.css`: Base styles (theme variables injected from `site.toml`)
//! - `static/carousel.js`: Client-side carousel, configured by `data-*`
//!   attributes on the carousel element
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All admin-supplied text is interpolated escaped.

use crate::carousel::{Carousel, Frame};
use crate::config::{self, ConfigError, SiteConfig};
use crate::sections::{
    AboutContent, ContactContent, FooterContent, InspirationalContent, Navigation, ResolvedSite,
    SectionHeader,
};
use crate::store::{ContentCache, DirSource};
use crate::style::{BadgeGradient, Segment, highlight_segments};
use crate::types::PhotoEntry;
use crate::visibility::Section;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub const FINGERPRINT_FILE: &str = ".content-fingerprint";

const CSS_STATIC: &str = include_str!("../static/site.css");
const JS: &str = include_str!("../static/carousel.js");

/// Whether `index.html` was rendered or left as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateStatus {
    Written,
    Unchanged,
}

#[derive(Debug)]
pub struct GenerateReport {
    pub site: ResolvedSite,
    pub status: GenerateStatus,
    pub fingerprint: String,
    /// Snapshot resources that were missing or unreadable.
    pub fetch_failures: usize,
}

/// Load the snapshot in `source` and resolve it without writing anything.
pub fn load_site(source: &Path) -> Result<(SiteConfig, ContentCache, usize), GenerateError> {
    let config = config::load_config(source)?;
    let mut cache = ContentCache::default();
    let failures = cache.refetch(&DirSource::new(source));
    Ok((config, cache, failures))
}

pub fn generate(
    source: &Path,
    output_dir: &Path,
    use_cache: bool,
) -> Result<GenerateReport, GenerateError> {
    let (config, cache, fetch_failures) = load_site(source)?;
    let site = ResolvedSite::resolve(&cache);
    let fingerprint = build_fingerprint(&cache, &config)?;

    let index_path = output_dir.join("index.html");
    let fingerprint_path = output_dir.join(FINGERPRINT_FILE);
    if use_cache
        && index_path.exists()
        && fs::read_to_string(&fingerprint_path).is_ok_and(|prev| prev.trim() == fingerprint)
    {
        info!(%fingerprint, "content unchanged, skipping render");
        return Ok(GenerateReport {
            site,
            status: GenerateStatus::Unchanged,
            fingerprint,
            fetch_failures,
        });
    }

    fs::create_dir_all(output_dir)?;
    let page = render_page(&site, &config);
    fs::write(&index_path, page.into_string())?;
    fs::write(&fingerprint_path, &fingerprint)?;
    info!(path = %index_path.display(), photos = site.photos.len(), "generated index.html");

    Ok(GenerateReport {
        site,
        status: GenerateStatus::Written,
        fingerprint,
        fetch_failures,
    })
}

/// Hash of everything that affects the rendered page.
fn build_fingerprint(cache: &ContentCache, config: &SiteConfig) -> Result<String, GenerateError> {
    let mut hasher = Sha256::new();
    hasher.update(env!("CARGO_PKG_VERSION").as_bytes());
    hasher.update(cache.fingerprint().as_bytes());
    hasher.update(serde_json::to_vec(config)?);
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, lang: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Title text with `(...)` spans painted in the badge gradient.
fn highlighted(text: &str, badge: BadgeGradient) -> Markup {
    let gradient = format!("background-image: {}", badge.stops().to_css());
    html! {
        @for segment in highlight_segments(text) {
            @match segment {
                Segment::Plain(s) => (s),
                Segment::Highlight(s) => span.highlight style=(gradient) { (s) },
            }
        }
    }
}

fn badge(text: &str, badge: BadgeGradient) -> Markup {
    html! {
        span.badge style={ "background-image: " (badge.stops().to_css()) } { (text) }
    }
}

fn section_header(header: &SectionHeader, gradient: BadgeGradient) -> Markup {
    html! {
        header.section-header {
            (badge(&header.badge, gradient))
            h2 { (highlighted(&header.title, gradient)) }
            p.section-subtitle { (header.subtitle) }
        }
    }
}

fn portrait(src: Option<&str>, alt: &str, class: &str) -> Markup {
    html! {
        @if let Some(src) = src {
            img class=(class) src=(src) alt=(alt);
        } @else {
            div class={ (class) " portrait-placeholder" } aria-hidden="true" {}
        }
    }
}

/// Renders the fixed top navigation bar
fn render_nav(nav: &Navigation, site: &ResolvedSite) -> Markup {
    html! {
        nav.site-nav {
            a.nav-brand href="#home" {
                (portrait(nav.portrait.as_deref(), &nav.header_name, "nav-portrait"))
                span.nav-identity {
                    span.nav-name { (nav.header_name) }
                    span.nav-crp { "CRP " (nav.crp) }
                }
            }
            input.nav-toggle type="checkbox" id="nav-toggle";
            label.nav-hamburger for="nav-toggle" aria-label="Menu" {
                span.hamburger-line {}
                span.hamburger-line {}
                span.hamburger-line {}
            }
            ul.nav-links {
                li { a href="#home" { "Início" } }
                @for section in nav.links.iter().filter(|s| site.renders(**s)) {
                    li { a href={ "#" (section.key()) } { (section.label()) } }
                }
            }
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

fn render_about(about: &AboutContent, site: &ResolvedSite) -> Markup {
    html! {
        section.about id="about" data-section="about" {
            div.about-profile {
                (portrait(site.general.portrait.as_deref(), &site.general.name, "about-portrait"))
                h2.about-name { (highlighted(&about.name, site.badge)) }
                p.about-title { (about.professional_title) }
                p.about-crp { "CRP " (about.crp) }
            }
            div.about-body {
                @for paragraph in &about.paragraphs {
                    p { (paragraph) }
                }
            }
            div.credentials {
                @for card in &about.credentials {
                    div.credential-card
                        style={ "background: " (card.style.background) "; border-color: " (card.style.border) }
                    {
                        span.credential-accent style={ "background: " (card.style.accent) } {}
                        @if let Some(title) = &card.credential.title {
                            h3 { (title) }
                        }
                        @if let Some(subtitle) = &card.credential.subtitle {
                            p { (subtitle) }
                        }
                    }
                }
            }
        }
    }
}

fn render_slide(photo: &PhotoEntry, index: usize, frame: &Frame) -> Markup {
    let active = index == frame.index;
    html! {
        figure.slide.active[active]
            data-index=(index)
            aria-hidden=(if active { "false" } else { "true" })
        {
            img src=(photo.image_url) alt=(photo.title) loading=(if index == 0 { "eager" } else { "lazy" });
            @if photo.show_text {
                figcaption {
                    h3 { (photo.title) }
                    @if let Some(description) = &photo.description {
                        p { (description) }
                    }
                }
            }
        }
    }
}

/// Renders the gallery with the carousel's initial frame baked in.
fn render_gallery(site: &ResolvedSite, config: &SiteConfig) -> Markup {
    let engine = Carousel::new(site.photos.clone(), config.carousel.timing(), 0);
    let Some(frame) = engine.view() else {
        return html! {};
    };
    let carousel = &config.carousel;
    html! {
        section.gallery id="gallery" data-section="gallery" {
            (section_header(&site.gallery, site.badge))
            div.carousel
                tabindex="0"
                data-count=(frame.len)
                data-autoplay-interval=(carousel.autoplay_interval_ms)
                data-resume-after=(carousel.resume_after_ms)
                data-swipe-threshold=(carousel.swipe_threshold_px)
            {
                div.carousel-track {
                    @for (i, photo) in engine.photos().iter().enumerate() {
                        (render_slide(photo, i, &frame))
                    }
                }
                @if frame.len > 1 {
                    button.carousel-prev type="button" aria-label="Foto anterior" { "‹" }
                    button.carousel-next type="button" aria-label="Próxima foto" { "›" }
                    div.carousel-dots {
                        @for i in 0..frame.len {
                            button.dot.active[i == frame.index]
                                type="button"
                                data-jump=(i)
                                aria-label={ "Ir para foto " (i + 1) } {}
                        }
                    }
                    button.carousel-play type="button" aria-label="Pausar" { "❚❚" }
                }
                span.carousel-counter { (frame.index + 1) " / " (frame.len) }
                button.carousel-fullscreen type="button" aria-label="Tela cheia" { "⤢" }
            }
            div.carousel-overlay hidden {
                button.overlay-close type="button" aria-label="Fechar" { "×" }
                img.overlay-image src="" alt="";
            }
        }
    }
}

fn render_inspirational(content: &InspirationalContent) -> Markup {
    html! {
        section.inspirational id="inspirational" data-section="inspirational" {
            blockquote {
                p.quote { "“" (content.quote) "”" }
                footer.quote-author { "— " (content.author) }
            }
        }
    }
}

fn render_contact(contact: &ContactContent, badge_gradient: BadgeGradient) -> Markup {
    html! {
        section.contact id="contact" data-section="contact" {
            (section_header(&contact.header, badge_gradient))
            div.contact-grid {
                div.contact-card {
                    @for entry in &contact.items {
                        @let color = entry.item.color.as_deref().unwrap_or(&contact.scheduling_button_color);
                        a.contact-item
                            href=(entry.item.link.as_deref().unwrap_or("#"))
                            target="_blank"
                            rel="noopener noreferrer"
                        {
                            span class={ "icon icon-" (entry.icon.slug()) } style={ "background: " (color) } {
                                (entry.icon.glyph())
                            }
                            span.contact-text {
                                @if let Some(title) = &entry.item.title {
                                    strong { (title) }
                                }
                                @if let Some(description) = &entry.item.description {
                                    small { (description) }
                                }
                            }
                        }
                    }
                }
                @if let Some((title, subtitle)) = contact.info_card_title() {
                    div.info-card {
                        h3 { (title) }
                        p.info-subtitle { (subtitle) }
                        @if let Some(schedule) = &contact.schedule {
                            dl.schedule {
                                dt { "Segunda à Sexta:" } dd { (schedule.weekdays) }
                                dt { "Sábado:" } dd { (schedule.saturday) }
                                dt { "Domingo:" } dd { (schedule.sunday) }
                            }
                            @if let Some(info) = &schedule.additional_info {
                                p.schedule-note { (info) }
                            }
                        }
                        @if let Some(location) = &contact.location {
                            a.location href=(location.maps_link) target="_blank" rel="noopener noreferrer" {
                                span.icon.icon-map-pin { "⌖" }
                                span { (location.city) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_footer(footer: &FooterContent) -> Markup {
    html! {
        footer.site-footer {
            div.footer-grid {
                div.footer-brand {
                    (portrait(footer.portrait.as_deref(), &footer.name, "footer-portrait"))
                    div {
                        h3 { (footer.name) }
                        p.footer-crp { "CRP: " (footer.crp) }
                    }
                    p.footer-description { (footer.description) }
                }
                div.footer-contact {
                    h4 { "Contato" }
                    @for entry in &footer.buttons {
                        a.footer-button
                            href=(entry.button.link.as_deref().unwrap_or("#"))
                            target="_blank"
                            rel="noopener noreferrer"
                        {
                            span class={ "icon icon-" (entry.icon.slug()) }
                                style={ "background-image: " (entry.stops.to_css()) }
                            {
                                (entry.icon.glyph())
                            }
                            span { (entry.button.label.as_deref().unwrap_or_default()) }
                        }
                    }
                }
                div.footer-trust {
                    h4 { "Certificações" }
                    div.seals {
                        @for entry in &footer.seals {
                            span.seal style={ "background: " (entry.background.to_css()) } {
                                (entry.seal.label.as_deref().unwrap_or_default())
                            }
                        }
                    }
                    @if !footer.certifications.is_empty() {
                        ul.certifications {
                            @for item in &footer.certifications {
                                li {
                                    @if let Some(title) = &item.title { strong { (title) } }
                                    @if let Some(description) = &item.description { " " span { (description) } }
                                }
                            }
                        }
                    }
                    @if let Some(text) = &footer.certification_text {
                        p.certification-text { (text) }
                    }
                }
            }
            div.footer-bottom {
                p.copyright { (footer.copyright) }
                @if let Some(cnpj) = &footer.cnpj {
                    p.cnpj { "CNPJ: " (cnpj) }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderer
// ============================================================================

pub fn render_page(site: &ResolvedSite, config: &SiteConfig) -> Markup {
    let css = format!(
        "{}\n\n{}",
        config::generate_theme_css(&config.theme),
        CSS_STATIC
    );
    let title = config.site.title.clone().unwrap_or_else(|| {
        format!("{} | {}", site.general.name, site.about.professional_title)
    });
    let show = |section| site.renders(section);
    debug!(
        about = show(Section::About),
        gallery = show(Section::Gallery),
        inspirational = show(Section::Inspirational),
        contact = show(Section::Contact),
        "rendering page"
    );

    let content = html! {
        (render_nav(&site.navigation, site))
        main id="home" {
            @if show(Section::About) { (render_about(&site.about, site)) }
            @if show(Section::Gallery) { (render_gallery(site, config)) }
            @if show(Section::Inspirational) { (render_inspirational(&site.inspirational)) }
            @if show(Section::Contact) { (render_contact(&site.contact, site.badge)) }
        }
        (render_footer(&site.footer))
        @if show(Section::Gallery) {
            script { (PreEscaped(JS)) }
        }
    };
    base_document(&title, &config.site.lang, &css, content)
}

// ============================================================================
// Tests
// ============================================================================
