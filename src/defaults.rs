//! Named default content.
//!
//! Every field a resolver can fill in has a constant here. The site is
//! single-locale, so these are the Portuguese strings the practice shipped
//! with before anything was edited in the admin panel.

use crate::types::{ContactButton, ContactItem, Credential, ItemId, TrustSeal};

// General info
pub const NAME: &str = "Dra. Adrielle Benhossi";
pub const CRP: &str = "08/123456";
pub const SCHEDULING_BUTTON_COLOR: &str = "#25D366";

// About section
/// Title-cased display name; the parenthesised part is highlighted.
pub const ABOUT_NAME: &str = "Dra. (Adrielle Benhossi)";
pub const PROFESSIONAL_TITLE: &str = "Psicóloga Clínica";
pub const ABOUT_BODY: &str = "Este é o espaço para escrever sobre você no painel administrativo.";

// Gallery header
pub const GALLERY_BADGE: &str = "GALERIA";
pub const GALLERY_TITLE: &str = "Galeria de (fotos)";
pub const GALLERY_SUBTITLE: &str = "Um olhar pelo ambiente acolhedor onde acontece o cuidado";

// Inspirational quote
pub const QUOTE: &str = "A transformação começa quando decidimos cuidar de nós mesmos.";
pub const QUOTE_AUTHOR: &str = NAME;

// Contact section
pub const CONTACT_BADGE: &str = "AGENDAMENTO";
pub const CONTACT_TITLE: &str = "Vamos conversar?";
pub const CONTACT_DESCRIPTION: &str = "Se algo dentro de você pede cuidado, atenção ou simplesmente um espaço para respirar — estou aqui.";
pub const SCHEDULE_WEEKDAYS: &str = "8h às 18h";
pub const SCHEDULE_SATURDAY: &str = "8h às 12h";
pub const SCHEDULE_SUNDAY: &str = "Fechado";
pub const LOCATION_CITY: &str = "Campo Mourão, Paraná";
pub const LOCATION_MAPS_LINK: &str = "https://maps.google.com/search/Campo+Mourão+Paraná";

// Footer
pub const FOOTER_DESCRIPTION: &str = "Cuidando da sua saúde mental com carinho e dedicação";

pub fn copyright(name: &str) -> String {
    format!("© 2024 {name} • Todos os direitos reservados")
}

/// Exemplar credential cards shown until the admin configures real ones.
pub fn credentials() -> Vec<Credential> {
    [
        ("1", "Centro Universitário Integrado", "Formação Acadêmica"),
        ("2", "Terapia Cognitivo-Comportamental", "Abordagem Terapêutica"),
        ("3", "Escuta clínica em Inglês", "Espaço terapêutico bilíngue"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (id, title, subtitle))| Credential {
        id: ItemId::from(id),
        title: Some(title.to_string()),
        subtitle: Some(subtitle.to_string()),
        order: i as f64,
        ..Default::default()
    })
    .collect()
}

pub fn contact_items() -> Vec<ContactItem> {
    vec![
        ContactItem {
            id: ItemId::from("1"),
            title: Some("WhatsApp".to_string()),
            description: Some("Agende sua consulta".to_string()),
            icon: Some("FaWhatsapp".to_string()),
            color: Some(SCHEDULING_BUTTON_COLOR.to_string()),
            link: Some("https://wa.me/".to_string()),
            order: 0.0,
            ..Default::default()
        },
        ContactItem {
            id: ItemId::from("2"),
            title: Some("Instagram".to_string()),
            description: Some("Acompanhe nosso conteúdo".to_string()),
            icon: Some("FaInstagram".to_string()),
            color: Some("#E1306C".to_string()),
            link: Some("https://instagram.com/".to_string()),
            order: 1.0,
            ..Default::default()
        },
    ]
}

pub fn contact_buttons() -> Vec<ContactButton> {
    vec![ContactButton {
        id: ItemId::from("1"),
        label: Some("WhatsApp".to_string()),
        icon: Some("FaWhatsapp".to_string()),
        link: Some("https://wa.me/".to_string()),
        gradient: Some("from-green-500 to-green-600".to_string()),
        order: 0.0,
        ..Default::default()
    }]
}

pub fn trust_seals() -> Vec<TrustSeal> {
    vec![
        TrustSeal {
            id: ItemId::from("1"),
            label: Some("CFP".to_string()),
            gradient: Some("from-blue-500 to-blue-600".to_string()),
            order: 0.0,
            ..Default::default()
        },
        TrustSeal {
            id: ItemId::from("2"),
            label: Some(SECURE_SEAL_LABEL.to_string()),
            order: 1.0,
            ..Default::default()
        },
    ]
}

/// Seal label rendered on a fixed emerald background instead of its gradient.
pub const SECURE_SEAL_LABEL: &str = "🔒";
