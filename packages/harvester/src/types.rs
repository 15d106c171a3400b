//! API resource records returned by the ONS API.
//!
//! The API wraps every collection in a `{ total_count, items }` envelope,
//! and every resource carries a `links` object mapping relation names to
//! `{ href }` objects. Upstream schemas drift between datasets, so the
//! models are deliberately tolerant: optional links, defaulted fields,
//! unknown fields ignored.

use serde::Deserialize;

/// A `{ href }` link object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Link {
    pub href: String,
}

/// The ONS collection envelope.
#[derive(Debug, Deserialize)]
pub struct Collection<T> {
    #[serde(default)]
    pub total_count: u64,

    // The explicit default fn keeps the derived impl free of a
    // `T: Default` bound; item types are plain records without one.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Link map carried by a dataset resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetLinks {
    /// Link to the dataset's edition collection.
    pub editions: Option<Link>,

    /// Link to the newest published version (latest-value fast path).
    pub latest_version: Option<Link>,
}

/// A dataset record from `/datasets`.
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// Keyword list used for relevance matching. Absent or null for some
    /// datasets, which simply never match.
    #[serde(default)]
    pub keywords: Option<Vec<String>>,

    #[serde(default)]
    pub links: DatasetLinks,
}

/// Link map carried by an edition item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditionLinks {
    pub versions: Option<Link>,
}

/// An edition item from a dataset's editions collection.
#[derive(Debug, Clone, Deserialize)]
pub struct Edition {
    /// Edition label, e.g. "time-series" or "2023".
    #[serde(default)]
    pub edition: String,

    #[serde(default)]
    pub links: EditionLinks,
}

/// Download map carried by a version item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Downloads {
    pub csv: Option<Link>,
}

/// A dimension descriptor attached to a version.
#[derive(Debug, Clone, Deserialize)]
pub struct DimensionDescriptor {
    /// Declared dimension name, preferred over URL parsing when present.
    #[serde(default)]
    pub name: Option<String>,

    pub href: String,
}

/// A version item from an edition's versions collection.
#[derive(Debug, Clone, Deserialize)]
pub struct Version {
    pub id: String,

    #[serde(default)]
    pub dataset_id: String,

    /// Version number within the edition.
    #[serde(default)]
    pub version: u64,

    #[serde(default)]
    pub downloads: Option<Downloads>,

    #[serde(default)]
    pub dimensions: Vec<DimensionDescriptor>,
}

impl Version {
    /// The CSV download URL, if this version publishes one.
    ///
    /// Versions without a CSV download are filtered out by callers, not
    /// treated as errors.
    #[must_use]
    pub fn csv_href(&self) -> Option<&str> {
        self.downloads
            .as_ref()?
            .csv
            .as_ref()
            .map(|link| link.href.as_str())
    }
}

/// A single row of a dimension code list.
#[derive(Debug, Clone, Deserialize)]
pub struct CodeItem {
    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub label: String,
}
