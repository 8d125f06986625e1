//! Shared test utilities for the psi-site test suite.
//!
//! Provides fixture setup plus builders for caches and photo lists, so
//! resolver, renderer and carousel tests don't each hand-assemble JSON.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let cache = cache_with(
//!     json!([{"key": "general_info", "value": {"name": "Dra. Maria"}}]),
//!     json!(null),
//!     json!(null),
//!     photos_json(3),
//! );
//! let site = ResolvedSite::resolve(&cache);
//! ```

use serde_json::{Value, json};
use std::path::Path;
use tempfile::TempDir;

use crate::store::{ContentCache, Resource};
use crate::types::PhotoEntry;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/snapshot/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/snapshot");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Cache builders
// =========================================================================

/// Build a cache as if each non-null payload had been fetched successfully.
///
/// A `null` argument leaves that resource unloaded.
pub fn cache_with(config: Value, contact: Value, footer: Value, photos: Value) -> ContentCache {
    let mut cache = ContentCache::default();
    for (resource, value) in [
        (Resource::Config, config),
        (Resource::ContactSettings, contact),
        (Resource::FooterSettings, footer),
        (Resource::PhotoCarousel, photos),
    ] {
        if !value.is_null() {
            cache.apply(resource, Ok(value));
        }
    }
    cache
}

// =========================================================================
// Photos
// =========================================================================

/// `n` active photos titled `Photo 1..=n`, already in display order.
pub fn photos(n: usize) -> Vec<PhotoEntry> {
    serde_json::from_value(photos_json(n)).unwrap()
}

/// The JSON the photo endpoint would return for [`photos`].
pub fn photos_json(n: usize) -> Value {
    Value::Array(
        (1..=n)
            .map(|i| {
                json!({
                    "id": i,
                    "imageUrl": format!("/uploads/{i}.jpg"),
                    "title": format!("Photo {i}"),
                    "order": i,
                    "isActive": true,
                })
            })
            .collect(),
    )
}
