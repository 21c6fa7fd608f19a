use derive_more::{AsRef, Deref, Display, From, Into};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Forwarded in place of a material name when the user never picked one.
pub const NOT_SELECTED: &str = "Not selected";

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct MaterialName(String);

crate::impl_string_newtype!(MaterialName);

impl MaterialName {
    pub fn not_selected() -> Self {
        Self::from(NOT_SELECTED)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: MaterialName,
    /// Opaque image reference; the catalog never opens it.
    #[serde(default)]
    pub asset: PathBuf,
}

impl Material {
    pub fn new(name: impl Into<String>, asset: impl Into<PathBuf>) -> Self {
        Self {
            name: MaterialName::new(name),
            asset: asset.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    materials: Vec<Material>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(
            [
                "Cotton",
                "Linen",
                "Silk",
                "Wool",
                "Denim",
                "Leather",
                "Velvet",
                "Polyester",
            ]
            .into_iter()
            .map(|name| Material::new(name, format!("{}.jpg", name.to_lowercase())))
            .collect(),
        )
    }
}

impl Catalog {
    pub fn new(materials: Vec<Material>) -> Self {
        Self { materials }
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Material> {
        self.materials
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    pub fn asset_for(&self, name: &str) -> Option<&Path> {
        self.find(name).map(|m| m.asset.as_path())
    }

    /// Relative asset paths are taken relative to `base`.
    pub fn rooted_at(mut self, base: &Path) -> Self {
        for material in &mut self.materials {
            if material.asset.is_relative() && !material.asset.as_os_str().is_empty() {
                material.asset = base.join(&material.asset);
            }
        }
        self
    }
}

static CATALOG: OnceLock<RwLock<Catalog>> = OnceLock::new();

fn catalog_lock() -> &'static RwLock<Catalog> {
    CATALOG.get_or_init(|| RwLock::new(Catalog::default()))
}

/// Replaces the process-wide catalog, e.g. after a config reload.
pub fn install(catalog: Catalog) {
    *catalog_lock().write() = catalog;
}

pub fn current() -> Catalog {
    catalog_lock().read().clone()
}

pub fn asset_for(name: &str) -> Option<PathBuf> {
    catalog_lock().read().asset_for(name).map(Path::to_path_buf)
}
