//! # psi-site
//!
//! Static site generator for a solo psychology practice. Every piece of
//! editable content lives in a key/value content store filled from an admin
//! panel; this crate turns a snapshot of that store into a single-page site.
//!
//! # Architecture: Snapshot → Resolve → Render
//!
//! ```text
//! 1. Load     snapshot/*.json  →  ContentCache     (last-known value per resource)
//! 2. Resolve  ContentCache     →  ResolvedSite     (defaults filled, lists filtered)
//! 3. Render   ResolvedSite     →  dist/index.html  (maud markup + embedded carousel)
//! ```
//!
//! Resolution is a pure function of the cache. A cache that never loaded
//! anything resolves to the documented default page, so a missing or broken
//! snapshot file degrades to defaults instead of failing the build.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | Snapshot resources, the `ConfigStore` key/value accessor, and the `ContentCache` |
//! | [`content`] | Field access with per-field fallback, list filtering and ordering |
//! | [`defaults`] | Named default content for every resolvable field |
//! | [`sections`] | Per-section resolvers and the whole-page [`sections::ResolvedSite`] |
//! | [`visibility`] | Section visibility flags with the gallery override |
//! | [`style`] | Gradient identifiers → colors, icon names, title highlight markers |
//! | [`carousel`] | Photo carousel state machine, its timer scheduler and tokio driver |
//! | [`config`] | `site.toml` loading, validation, merging, and theme CSS generation |
//! | [`generate`] | Renders the page and skips unchanged content by fingerprint |
//! | [`output`] | CLI output formatting |
//! | [`types`] | Shared data model for store entries and list items |
//!
//! # Content Conventions
//!
//! ## Absent Means Default
//!
//! A key missing from the store, a field missing from an entry, and a field
//! holding an empty string all resolve to the same named default. Each field
//! falls back on its own, so a half-filled entry keeps what it has.
//!
//! ## Soft-Deleted List Items
//!
//! List items carry an `isActive` flag that is hidden only when literally
//! `false`. Items are sorted by their `order` key. An empty result after
//! filtering falls back to the default list for credentials, contact items,
//! footer buttons and trust seals; certifications and photos have none.
//!
//! ## Highlight Markers
//!
//! Titles may wrap words in parentheses, `Galeria de (fotos)`. The wrapped text
//! is rendered in the site's badge gradient and the parentheses are dropped.
//!
//! # Carousel
//!
//! The gallery carousel is modelled as an explicit state machine
//! ([`carousel::Carousel`]) driven by inputs and an injected clock. Both of its
//! timers live in one [`carousel::Scheduler`], so tearing the view down cancels
//! everything at once. The generated page ships a small vanilla-JS port of the
//! same machine, configured from `site.toml`.

pub mod carousel;
pub mod config;
pub mod content;
pub mod defaults;
pub mod generate;
pub mod output;
pub mod sections;
pub mod store;
pub mod style;
pub mod types;
pub mod visibility;

#[cfg(test)]
pub(crate) mod test_helpers;
