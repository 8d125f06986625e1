//! Per-section Content Resolvers.
//!
//! Each resolver is a pure function of the current [`ContentCache`]: it reads
//! the relevant entries, substitutes the named defaults from
//! [`crate::defaults`] for every gap, and returns a fully populated value. A
//! cache that has never been filled resolves to the documented default page.
//!
//! [`ResolvedSite::resolve`] runs every resolver once and is what the
//! renderer and the `check` command consume.

use crate::content::{self, Fields, FromFields, active_ordered, decode_items, resolve_list};
use crate::defaults;
use crate::store::{ConfigStore, ContentCache, Resource};
use crate::style::{self, BadgeGradient, CardStyle, GradientStops, Icon};
use crate::types::{CertificationItem, ContactButton, ContactItem, Credential, PhotoEntry, TrustSeal};
use crate::visibility::{CAROUSEL_KEYS, Section, SectionVisibility};

// ============================================================================
// General info
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GeneralInfo {
    pub name: String,
    pub header_name: String,
    pub crp: String,
    pub scheduling_button_color: String,
    /// `hero_image.path`; `None` renders the silhouette placeholder.
    pub portrait: Option<String>,
}

impl FromFields for GeneralInfo {
    fn from_fields(fields: Fields<'_>) -> Self {
        GeneralInfo {
            name: fields.text_or("name", defaults::NAME),
            header_name: fields.text_or("headerName", defaults::NAME),
            crp: fields.text_or("crp", defaults::CRP),
            scheduling_button_color: fields
                .text_or("schedulingButtonColor", defaults::SCHEDULING_BUTTON_COLOR),
            portrait: None,
        }
    }
}

impl GeneralInfo {
    pub fn resolve(store: &ConfigStore) -> Self {
        let mut info: GeneralInfo = content::resolve(store, "general_info");
        info.portrait = Fields::of(store.get("hero_image")).text("path");
        info
    }
}

/// Badge/title/subtitle triple heading a section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionHeader {
    pub badge: String,
    /// May contain `(...)` highlight markers, see [`style::highlight_segments`].
    pub title: String,
    pub subtitle: String,
}

impl SectionHeader {
    fn from_fields(
        fields: Fields<'_>,
        subtitle_field: &str,
        [badge, title, subtitle]: [&str; 3],
    ) -> Self {
        SectionHeader {
            badge: fields.text_or("badge", badge),
            title: fields.text_or("title", title),
            subtitle: fields.text_or(subtitle_field, subtitle),
        }
    }
}

// ============================================================================
// About
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct StyledCredential {
    pub credential: Credential,
    pub style: CardStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AboutContent {
    /// Display name with highlight markers.
    pub name: String,
    pub professional_title: String,
    pub crp: String,
    pub paragraphs: Vec<String>,
    pub credentials: Vec<StyledCredential>,
}

impl AboutContent {
    pub fn resolve(store: &ConfigStore) -> Self {
        let general = Fields::of(store.get("general_info"));
        let about = Fields::of(store.get("about_section"));
        let title = Fields::of(store.get("professional_title"));

        let credentials = resolve_list(store.get("about_credentials"), defaults::credentials)
            .into_iter()
            .enumerate()
            .map(|(i, credential)| StyledCredential {
                style: style::card_style(credential.gradient.as_deref(), i),
                credential,
            })
            .collect();

        AboutContent {
            name: general.text_or("name", defaults::ABOUT_NAME),
            professional_title: title.text_or("title", defaults::PROFESSIONAL_TITLE),
            crp: general.text_or("crp", defaults::CRP),
            paragraphs: content::paragraphs(
                about.text("description").as_deref(),
                defaults::ABOUT_BODY,
            ),
            credentials,
        }
    }
}

// ============================================================================
// Gallery
// ============================================================================

impl SectionHeader {
    /// Header of the photo gallery, from the first carousel entry in the store.
    pub fn gallery(store: &ConfigStore) -> Self {
        Self::from_fields(
            Fields::of(store.first_of(&CAROUSEL_KEYS)),
            "subtitle",
            [
                defaults::GALLERY_BADGE,
                defaults::GALLERY_TITLE,
                defaults::GALLERY_SUBTITLE,
            ],
        )
    }

    pub fn contact(store: &ConfigStore) -> Self {
        Self::from_fields(
            Fields::of(store.get("contact_section")),
            "description",
            [
                defaults::CONTACT_BADGE,
                defaults::CONTACT_TITLE,
                defaults::CONTACT_DESCRIPTION,
            ],
        )
    }
}

/// Photos the carousel cycles through: active only, sorted by `order`.
///
/// No fallback list: an empty result means the gallery renders nothing.
pub fn active_photos(cache: &ContentCache) -> Vec<PhotoEntry> {
    active_ordered(decode_items(Some(cache.raw(Resource::PhotoCarousel))))
}

// ============================================================================
// Inspirational
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct InspirationalContent {
    pub quote: String,
    pub author: String,
}

impl FromFields for InspirationalContent {
    fn from_fields(fields: Fields<'_>) -> Self {
        InspirationalContent {
            quote: fields.text_or("quote", defaults::QUOTE),
            author: fields.text_or("author", defaults::QUOTE_AUTHOR),
        }
    }
}

// ============================================================================
// Contact
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ContactEntry {
    pub item: ContactItem,
    pub icon: Icon,
}

/// Opening hours card. Day labels are rendered by the page, so the admin's
/// own `"Sábado: "` style prefixes are stripped.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub weekdays: String,
    pub saturday: String,
    pub sunday: String,
    pub additional_info: Option<String>,
}

impl FromFields for Schedule {
    fn from_fields(fields: Fields<'_>) -> Self {
        Schedule {
            weekdays: day_hours(fields, "weekdays", "Segunda à Sexta: ", defaults::SCHEDULE_WEEKDAYS),
            saturday: day_hours(fields, "saturday", "Sábado: ", defaults::SCHEDULE_SATURDAY),
            sunday: day_hours(fields, "sunday", "Domingo: ", defaults::SCHEDULE_SUNDAY),
            additional_info: fields.text("additional_info"),
        }
    }
}

fn day_hours(fields: Fields<'_>, field: &str, label: &str, default: &str) -> String {
    fields
        .text(field)
        .map(|hours| hours.replacen(label, "", 1))
        .filter(|hours| !hours.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub city: String,
    pub maps_link: String,
}

impl FromFields for Location {
    fn from_fields(fields: Fields<'_>) -> Self {
        Location {
            city: fields.text_or("city", defaults::LOCATION_CITY),
            maps_link: fields.text_or("maps_link", defaults::LOCATION_MAPS_LINK),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactContent {
    pub header: SectionHeader,
    pub scheduling_button_color: String,
    pub items: Vec<ContactEntry>,
    /// `None` when `schedule_info.isActive` is explicitly `false`.
    pub schedule: Option<Schedule>,
    /// `None` when `location_info.isActive` is explicitly `false`.
    pub location: Option<Location>,
}

impl ContactContent {
    pub fn resolve(cache: &ContentCache) -> Self {
        let store = cache.config();
        let settings = Fields::of(Some(cache.raw(Resource::ContactSettings)));

        let items = resolve_list(settings.get("contact_items"), defaults::contact_items)
            .into_iter()
            .map(|item| ContactEntry {
                icon: Icon::resolve(item.icon.as_deref(), Icon::Mail),
                item,
            })
            .collect();

        let schedule = settings.nested("schedule_info");
        let location = settings.nested("location_info");

        ContactContent {
            header: SectionHeader::contact(store),
            scheduling_button_color: GeneralInfo::resolve(store).scheduling_button_color,
            items,
            schedule: schedule
                .activity()
                .is_active()
                .then(|| Schedule::from_fields(schedule)),
            location: location
                .activity()
                .is_active()
                .then(|| Location::from_fields(location)),
        }
    }

    /// Heading of the practical-info card, `None` when both halves are off.
    pub fn info_card_title(&self) -> Option<(&'static str, &'static str)> {
        match (self.schedule.is_some(), self.location.is_some()) {
            (true, true) => Some((
                "Horários & Localização",
                "Informações práticas para seu atendimento",
            )),
            (true, false) => Some(("Horários de atendimento", "Confira nossa disponibilidade")),
            (false, true) => Some(("Localização", "Onde nos encontrar")),
            (false, false) => None,
        }
    }
}

// ============================================================================
// Footer
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FooterButton {
    pub button: ContactButton,
    pub icon: Icon,
    pub stops: GradientStops,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SealBackground {
    /// Solid emerald, used for the padlock seal.
    Secure,
    Gradient(GradientStops),
}

impl SealBackground {
    pub fn to_css(self) -> String {
        match self {
            SealBackground::Secure => "#059669".to_string(),
            SealBackground::Gradient(stops) => stops.to_css(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FooterSeal {
    pub seal: TrustSeal,
    pub background: SealBackground,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FooterContent {
    pub name: String,
    pub crp: String,
    pub portrait: Option<String>,
    pub description: String,
    pub buttons: Vec<FooterButton>,
    pub certifications: Vec<CertificationItem>,
    pub seals: Vec<FooterSeal>,
    /// Shown as plain text.
    pub certification_text: Option<String>,
    pub copyright: String,
    pub cnpj: Option<String>,
}

impl FooterContent {
    pub fn resolve(cache: &ContentCache) -> Self {
        let general = GeneralInfo::resolve(cache.config());
        let settings = Fields::of(Some(cache.raw(Resource::FooterSettings)));
        let footer_info = settings.nested("general_info");
        let bottom = settings.nested("bottom_info");

        let buttons = resolve_list(settings.get("contact_buttons"), defaults::contact_buttons)
            .into_iter()
            .map(|button| FooterButton {
                icon: Icon::resolve(button.icon.as_deref(), Icon::Whatsapp),
                stops: gradient_or_badge_default(button.gradient.as_deref()),
                button,
            })
            .collect();

        let seals = resolve_list(settings.get("trust_seals"), defaults::trust_seals)
            .into_iter()
            .map(|seal| FooterSeal {
                background: if seal.label.as_deref() == Some(defaults::SECURE_SEAL_LABEL) {
                    SealBackground::Secure
                } else {
                    SealBackground::Gradient(gradient_or_badge_default(seal.gradient.as_deref()))
                },
                seal,
            })
            .collect();

        let cnpj = footer_info
            .flag("showCnpj")
            .then(|| footer_info.text("cnpj"))
            .flatten();

        FooterContent {
            copyright: bottom
                .text("copyright")
                .unwrap_or_else(|| defaults::copyright(&general.name)),
            name: general.name,
            crp: general.crp,
            portrait: general.portrait,
            description: footer_info.text_or("description", defaults::FOOTER_DESCRIPTION),
            buttons,
            certifications: active_ordered(decode_items(settings.get("certification_items"))),
            seals,
            certification_text: bottom.text("certificationText"),
            cnpj,
        }
    }
}

fn gradient_or_badge_default(classes: Option<&str>) -> GradientStops {
    classes
        .and_then(style::gradient_stops)
        .unwrap_or_else(|| BadgeGradient::default().stops())
}

// ============================================================================
// Navigation and whole-page resolution
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub header_name: String,
    pub crp: String,
    pub portrait: Option<String>,
    /// One anchor per visible section, in page order.
    pub links: Vec<Section>,
}

impl Navigation {
    pub fn resolve(general: &GeneralInfo, visibility: &SectionVisibility) -> Self {
        Navigation {
            header_name: general.header_name.clone(),
            crp: general.crp.clone(),
            portrait: general.portrait.clone(),
            links: visibility.visible().collect(),
        }
    }
}

/// Everything the page renders, resolved from one cache snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSite {
    pub general: GeneralInfo,
    pub visibility: SectionVisibility,
    pub badge: BadgeGradient,
    pub navigation: Navigation,
    pub about: AboutContent,
    pub gallery: SectionHeader,
    pub photos: Vec<PhotoEntry>,
    pub inspirational: InspirationalContent,
    pub contact: ContactContent,
    pub footer: FooterContent,
}

impl ResolvedSite {
    pub fn resolve(cache: &ContentCache) -> Self {
        let store = cache.config();
        let general = GeneralInfo::resolve(store);
        let visibility = SectionVisibility::resolve(store);
        let badge =
            BadgeGradient::from_id(Fields::of(store.get("badge_gradient")).text("gradient").as_deref());

        ResolvedSite {
            navigation: Navigation::resolve(&general, &visibility),
            about: AboutContent::resolve(store),
            gallery: SectionHeader::gallery(store),
            photos: active_photos(cache),
            inspirational: content::resolve(store, "inspirational_section"),
            contact: ContactContent::resolve(cache),
            footer: FooterContent::resolve(cache),
            general,
            visibility,
            badge,
        }
    }

    /// The gallery renders only when visible and there is something to show.
    pub fn shows_gallery(&self) -> bool {
        self.visibility.is_visible(Section::Gallery) && !self.photos.is_empty()
    }

    /// Whether the page carries a block (and a navigation anchor) for `section`.
    ///
    /// Specialties, services, testimonials and FAQ have no content of their
    /// own yet and are never rendered.
    pub fn renders(&self, section: Section) -> bool {
        match section {
            Section::About | Section::Inspirational | Section::Contact => {
                self.visibility.is_visible(section)
            }
            Section::Gallery => self.shows_gallery(),
            Section::Specialties | Section::Services | Section::Testimonials | Section::Faq => false,
        }
    }

    /// Rendered sections in page order.
    pub fn rendered_sections(&self) -> Vec<Section> {
        self.navigation
            .links
            .iter()
            .copied()
            .filter(|&s| self.renders(s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::cache_with;
    use crate::types::ItemId;
    use serde_json::json;

    #[test]
    fn empty_cache_resolves_documented_defaults() {
        let site = ResolvedSite::resolve(&ContentCache::default());

        assert_eq!(site.general.name, defaults::NAME);
        assert_eq!(site.general.crp, defaults::CRP);
        assert_eq!(site.general.portrait, None);
        assert_eq!(site.about.name, defaults::ABOUT_NAME);
        assert_eq!(site.about.professional_title, defaults::PROFESSIONAL_TITLE);
        assert_eq!(site.about.paragraphs, vec![defaults::ABOUT_BODY]);
        assert_eq!(
            site.about
                .credentials
                .iter()
                .map(|c| c.credential.clone())
                .collect::<Vec<_>>(),
            defaults::credentials()
        );
        assert_eq!(site.gallery.title, defaults::GALLERY_TITLE);
        assert_eq!(site.inspirational.quote, defaults::QUOTE);
        assert_eq!(site.inspirational.author, defaults::QUOTE_AUTHOR);
        assert_eq!(site.contact.header.badge, defaults::CONTACT_BADGE);
        assert_eq!(site.contact.items.len(), defaults::contact_items().len());
        assert_eq!(site.footer.copyright, defaults::copyright(defaults::NAME));
        assert_eq!(site.footer.cnpj, None);
        assert!(site.photos.is_empty());
        assert!(!site.shows_gallery());
        assert_eq!(site.badge, BadgeGradient::PinkPurple);
        assert_eq!(site.navigation.links.len(), Section::ALL.len());
    }

    #[test]
    fn missing_key_resolves_same_as_empty_cache() {
        let cache = cache_with(
            json!([{"key": "unrelated", "value": {"name": "nope"}}]),
            json!(null),
            json!(null),
            json!(null),
        );
        assert_eq!(
            ResolvedSite::resolve(&cache),
            ResolvedSite::resolve(&ContentCache::default())
        );
    }

    #[test]
    fn falsy_fields_fall_back_individually() {
        let cache = cache_with(
            json!([
                {"key": "general_info", "value": {"name": "", "crp": "06/999999"}},
                {"key": "professional_title", "value": {"title": 0}},
            ]),
            json!(null),
            json!(null),
            json!(null),
        );
        let site = ResolvedSite::resolve(&cache);
        assert_eq!(site.general.name, defaults::NAME);
        assert_eq!(site.general.crp, "06/999999");
        assert_eq!(site.about.crp, "06/999999");
        assert_eq!(site.about.professional_title, defaults::PROFESSIONAL_TITLE);
    }

    #[test]
    fn about_body_splits_into_paragraphs() {
        let store = ConfigStore::from_value(&json!([
            {"key": "about_section", "value": {"description": "Primeiro.\nSegundo."}}
        ]));
        let about = AboutContent::resolve(&store);
        assert_eq!(about.paragraphs, vec!["Primeiro.", "Segundo."]);
    }

    #[test]
    fn credentials_are_styled_by_gradient_then_position() {
        let store = ConfigStore::from_value(&json!([
            {"key": "about_credentials", "value": [
                {"id": 1, "title": "A", "order": 2},
                {"id": 2, "title": "B", "order": 1, "gradient": "from-green-50 to-teal-50"},
                {"id": 3, "title": "C", "order": 3, "gradient": "unknown"},
                {"id": 4, "title": "D", "order": 0, "isActive": false},
            ]}
        ]));
        let about = AboutContent::resolve(&store);
        let ids: Vec<_> = about
            .credentials
            .iter()
            .map(|c| c.credential.id.clone())
            .collect();
        assert_eq!(ids, vec![ItemId::from("2"), ItemId::from("1"), ItemId::from("3")]);
        assert_eq!(about.credentials[0].style.accent, "#10b981");
        assert_eq!(about.credentials[1].style, style::POSITIONAL_PALETTE[1]);
        assert_eq!(about.credentials[2].style, style::NEUTRAL_CARD);
    }

    #[test]
    fn gallery_header_reads_first_carousel_entry() {
        let store = ConfigStore::from_value(&json!([
            {"key": "carousel_section", "value": {"badge": "FOTOS"}},
            {"key": "photo_carousel_section", "value": {"badge": "IGNORADO"}},
        ]));
        let header = SectionHeader::gallery(&store);
        assert_eq!(header.badge, "FOTOS");
        assert_eq!(header.subtitle, defaults::GALLERY_SUBTITLE);
    }

    #[test]
    fn schedule_strips_day_labels() {
        let cache = cache_with(
            json!(null),
            json!({"schedule_info": {
                "weekdays": "Segunda à Sexta: 9h às 17h",
                "saturday": "Sábado: ",
                "additional_info": "Atendimento online disponível"
            }}),
            json!(null),
            json!(null),
        );
        let contact = ContactContent::resolve(&cache);
        let schedule = contact.schedule.unwrap();
        assert_eq!(schedule.weekdays, "9h às 17h");
        assert_eq!(schedule.saturday, defaults::SCHEDULE_SATURDAY);
        assert_eq!(schedule.sunday, defaults::SCHEDULE_SUNDAY);
        assert_eq!(
            schedule.additional_info.as_deref(),
            Some("Atendimento online disponível")
        );
        assert!(contact.location.is_some());
    }

    #[test]
    fn info_cards_hide_only_on_explicit_false() {
        let cache = cache_with(
            json!(null),
            json!({
                "schedule_info": {"isActive": false},
                "location_info": {"isActive": null, "city": "Maringá, Paraná"}
            }),
            json!(null),
            json!(null),
        );
        let contact = ContactContent::resolve(&cache);
        assert!(contact.schedule.is_none());
        assert_eq!(contact.location.as_ref().unwrap().city, "Maringá, Paraná");
        assert_eq!(contact.info_card_title().unwrap().0, "Localização");
    }

    #[test]
    fn contact_icons_default_to_mail() {
        let cache = cache_with(
            json!(null),
            json!({"contact_items": [
                {"id": 1, "title": "E-mail", "icon": "FaPager"},
                {"id": 2, "title": "Telegram", "icon": "FaTelegram"},
            ]}),
            json!(null),
            json!(null),
        );
        let contact = ContactContent::resolve(&cache);
        let icons: Vec<_> = contact.items.iter().map(|e| e.icon).collect();
        assert_eq!(icons, vec![Icon::Mail, Icon::Telegram]);
    }

    #[test]
    fn footer_cnpj_requires_flag_and_value() {
        let with = |general: serde_json::Value| {
            let cache = cache_with(
                json!(null),
                json!(null),
                json!({"general_info": general}),
                json!(null),
            );
            FooterContent::resolve(&cache).cnpj
        };
        assert_eq!(with(json!({"showCnpj": true, "cnpj": "00.000/0001-00"})).as_deref(), Some("00.000/0001-00"));
        assert_eq!(with(json!({"showCnpj": false, "cnpj": "00.000/0001-00"})), None);
        assert_eq!(with(json!({"showCnpj": true, "cnpj": ""})), None);
    }

    #[test]
    fn padlock_seal_gets_secure_background() {
        let cache = cache_with(
            json!(null),
            json!(null),
            json!({"trust_seals": [
                {"id": 1, "label": "🔒", "gradient": "from-pink-500 to-pink-600"},
                {"id": 2, "label": "CRP", "gradient": "from-purple-500 to-purple-600"},
                {"id": 3, "label": "?", "gradient": "from-nothing to-nowhere"},
            ]}),
            json!(null),
        );
        let footer = FooterContent::resolve(&cache);
        assert_eq!(footer.seals[0].background, SealBackground::Secure);
        assert_eq!(
            footer.seals[1].background.to_css(),
            "linear-gradient(to right, #a855f7, #9333ea)"
        );
        assert_eq!(
            footer.seals[2].background,
            SealBackground::Gradient(BadgeGradient::PinkPurple.stops())
        );
    }

    #[test]
    fn footer_copyright_uses_resolved_name() {
        let cache = cache_with(
            json!([{"key": "general_info", "value": {"name": "Dra. Maria"}}]),
            json!(null),
            json!(null),
            json!(null),
        );
        let footer = FooterContent::resolve(&cache);
        assert_eq!(footer.copyright, "© 2024 Dra. Maria • Todos os direitos reservados");
    }

    #[test]
    fn photos_are_filtered_and_ordered_without_fallback() {
        let cache = cache_with(
            json!(null),
            json!(null),
            json!(null),
            json!([
                {"id": 1, "imageUrl": "/a.jpg", "title": "A", "order": 2},
                {"id": 2, "imageUrl": "/b.jpg", "title": "B", "order": 1, "isActive": false},
                {"id": 3, "imageUrl": "/c.jpg", "title": "C", "order": 0},
            ]),
        );
        let titles: Vec<_> = active_photos(&cache).into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["C", "A"]);

        let empty = cache_with(json!(null), json!(null), json!(null), json!([]));
        assert!(active_photos(&empty).is_empty());
    }

    #[test]
    fn hidden_sections_drop_out_of_navigation() {
        let cache = cache_with(
            json!([{"key": "section_visibility", "value": {"contact": false, "about": false}}]),
            json!(null),
            json!(null),
            json!(null),
        );
        let site = ResolvedSite::resolve(&cache);
        assert!(!site.navigation.links.contains(&Section::Contact));
        assert!(!site.navigation.links.contains(&Section::About));
        assert!(site.navigation.links.contains(&Section::Gallery));
    }

    #[test]
    fn only_sections_with_content_render() {
        let site = ResolvedSite::resolve(&ContentCache::default());
        assert_eq!(
            site.rendered_sections(),
            vec![Section::About, Section::Inspirational, Section::Contact]
        );
        assert!(site.navigation.links.contains(&Section::Faq));
        assert!(!site.renders(Section::Faq));
    }
}
