//! # Part Classification
//!
//! Maps mesh identifiers coming out of the authoring tool onto the logical
//! customizable parts of the garment.
//!
//! Classification is two-tiered:
//! 1. An exact lookup in the curated [`PartTable`] authored for the asset revision.
//! 2. Keyword heuristics for names the table does not know, in a fixed
//!    priority order: lining markers, then hardware markers, then `Body`.
//!
//! The result is a pure function of the mesh name and the table; nothing is
//! cached on the mesh itself.

use serde::{Deserialize, Serialize};

/// Logical customization group a mesh belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartCategory {
    /// Outer body fabric (front, back, sleeves, cuffs, hood outside)
    Body,
    /// Inner fabric (hood interior, lining)
    Lining,
    /// Zippers, piping, cords and other trim
    Hardware,
}

impl PartCategory {
    /// All categories in display order
    pub const ALL: [PartCategory; 3] = [PartCategory::Body, PartCategory::Lining, PartCategory::Hardware];

    /// Texture-routing slot for this category
    pub fn slot(self) -> MaterialSlot {
        match self {
            PartCategory::Body => MaterialSlot::Main,
            PartCategory::Lining => MaterialSlot::Lining,
            PartCategory::Hardware => MaterialSlot::None,
        }
    }

    /// Parse the identifiers used by the page layer (`body`, `lining`, `hardware`)
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "body" => Some(PartCategory::Body),
            "lining" | "hoodInterior" => Some(PartCategory::Lining),
            "hardware" | "zipperDetails" => Some(PartCategory::Hardware),
            _ => None,
        }
    }
}

/// Texture-routing bucket a fabric's textures are assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialSlot {
    /// Main body fabric
    Main,
    /// Lining fabric
    Lining,
    /// No fabric texture (hardware)
    None,
}

impl MaterialSlot {
    /// Slots that carry a fabric selection
    pub const FABRIC_SLOTS: [MaterialSlot; 2] = [MaterialSlot::Main, MaterialSlot::Lining];

    /// Label shown next to the fabric picker
    pub fn display_name(self) -> &'static str {
        match self {
            MaterialSlot::Main => "Main material",
            MaterialSlot::Lining => "Lining material",
            MaterialSlot::None => "",
        }
    }

    /// Parse the identifiers used by the page layer (`main`, `lining`)
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "main" => Some(MaterialSlot::Main),
            "lining" => Some(MaterialSlot::Lining),
            _ => None,
        }
    }
}

/// Surface-finish family of a hardware mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HardwareKind {
    /// Straps, strings and cords: fabric-like matte
    Cord,
    /// Piping and binding: semi-matte plastic
    Piping,
    /// Zippers, stoppers and other rigid parts: metallic
    Rigid,
}

impl HardwareKind {
    /// Derive the finish family from a mesh name
    pub fn from_mesh_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if CORD_MARKERS.iter().any(|m| lower.contains(m)) {
            HardwareKind::Cord
        } else if PIPING_MARKERS.iter().any(|m| lower.contains(m)) {
            HardwareKind::Piping
        } else {
            HardwareKind::Rigid
        }
    }
}

/// Result of classifying one mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Logical part
    pub category: PartCategory,
    /// Texture slot (derived from the category)
    pub slot: MaterialSlot,
}

impl From<PartCategory> for Classification {
    fn from(category: PartCategory) -> Self {
        Self { category, slot: category.slot() }
    }
}

const LINING_MARKERS: &[&str] = &["hood_inside", "lining", "interior"];
const HARDWARE_MARKERS: &[&str] = &[
    "zipper", "stopper", "trim", "piping", "binding", "strap", "string", "cord", "topstitch",
];
const CORD_MARKERS: &[&str] = &["strap", "string", "cord"];
const PIPING_MARKERS: &[&str] = &["piping", "binding"];

/// Curated mesh-name table for one asset revision
///
/// Mesh names come from the authoring tool and are not stable across asset
/// revisions, so the table ships with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartTable {
    /// Exact mesh names of body parts
    pub body: Vec<String>,
    /// Exact mesh names of lining parts
    pub lining: Vec<String>,
    /// Exact mesh names of hardware parts
    pub hardware: Vec<String>,
}

impl PartTable {
    /// Look up an exact mesh name
    pub fn lookup(&self, mesh_name: &str) -> Option<PartCategory> {
        [
            (PartCategory::Body, &self.body),
            (PartCategory::Lining, &self.lining),
            (PartCategory::Hardware, &self.hardware),
        ]
        .into_iter()
        .find(|(_, names)| names.iter().any(|n| n == mesh_name))
        .map(|(category, _)| category)
    }

    /// Number of tabled mesh names
    pub fn len(&self) -> usize {
        self.body.len() + self.lining.len() + self.hardware.len()
    }

    /// Whether the table is empty (heuristics only)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over every `(name, category)` entry
    pub fn entries(&self) -> impl Iterator<Item = (&str, PartCategory)> {
        self.body
            .iter()
            .map(|n| (n.as_str(), PartCategory::Body))
            .chain(self.lining.iter().map(|n| (n.as_str(), PartCategory::Lining)))
            .chain(self.hardware.iter().map(|n| (n.as_str(), PartCategory::Hardware)))
    }

    /// Check that no mesh name is listed under two categories
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = std::collections::HashMap::new();
        for (name, category) in self.entries() {
            if let Some(previous) = seen.insert(name, category) {
                if previous != category {
                    return Err(format!(
                        "Mesh '{}' listed as both {:?} and {:?}",
                        name, previous, category
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Default for PartTable {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(|n| (*n).to_string()).collect();
        Self {
            body: owned(&[
                "Main_fabric", "Sleeves", "Body_Back", "Body_Front",
                "Cuff_outside", "Cuff_inside", "Hood_outside",
            ]),
            lining: owned(&["Hood_inside", "Lining_fabric", "Trim", "Stopper"]),
            hardware: owned(&[
                "Zipper", "Piping_27584630", "Piping_27606017", "Piping_32967410",
                "Piping_33094821", "Straps_1", "Straps_2",
            ]),
        }
    }
}

/// Classifier combining the curated table with keyword heuristics
#[derive(Debug, Clone, Default)]
pub struct PartClassifier {
    table: PartTable,
}

impl PartClassifier {
    /// Create a classifier over a curated table
    pub fn new(table: PartTable) -> Self {
        Self { table }
    }

    /// The curated table in use
    pub fn table(&self) -> &PartTable {
        &self.table
    }

    /// Classify a mesh name; always terminates, defaulting to `Body`/`Main`
    pub fn classify(&self, mesh_name: &str) -> Classification {
        if let Some(category) = self.table.lookup(mesh_name) {
            return category.into();
        }

        let lower = mesh_name.to_ascii_lowercase();
        let category = if LINING_MARKERS.iter().any(|m| lower.contains(m)) {
            PartCategory::Lining
        } else if HARDWARE_MARKERS.iter().any(|m| lower.contains(m)) {
            PartCategory::Hardware
        } else {
            PartCategory::Body
        };

        log::trace!("Mesh '{}' not in part table, heuristics chose {:?}", mesh_name, category);
        category.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tabled_name_returns_its_category() {
        let classifier = PartClassifier::default();
        let table = classifier.table().clone();
        for (name, category) in table.entries() {
            let result = classifier.classify(name);
            assert_eq!(result.category, category, "mesh {}", name);
            assert_eq!(result.slot, category.slot(), "mesh {}", name);
        }
    }

    #[test]
    fn test_table_wins_over_heuristics() {
        // "Trim" contains a hardware marker but the table lists it as lining
        let classifier = PartClassifier::default();
        assert_eq!(classifier.classify("Trim").category, PartCategory::Lining);
        assert_eq!(classifier.classify("Cuff_inside").category, PartCategory::Body);
    }

    #[test]
    fn test_unknown_hardware_keywords() {
        let classifier = PartClassifier::default();
        for name in [
            "Zipper_pull_2", "Drawstring_left", "Cord_end", "Topstitch_017",
            "Binding_neck", "Piping_999", "Strap_loop", "Trim_hem",
        ] {
            let result = classifier.classify(name);
            assert_eq!(result.category, PartCategory::Hardware, "mesh {}", name);
            assert_eq!(result.slot, MaterialSlot::None, "mesh {}", name);
        }
    }

    #[test]
    fn test_lining_markers_take_priority() {
        let classifier = PartClassifier::default();
        // Both a lining and a hardware marker: lining is checked first
        let result = classifier.classify("Lining_zipper_guard");
        assert_eq!(result.category, PartCategory::Lining);
        assert_eq!(result.slot, MaterialSlot::Lining);
        assert_eq!(classifier.classify("Hood_inside_2").category, PartCategory::Lining);
    }

    #[test]
    fn test_unknown_names_default_to_body() {
        let classifier = PartClassifier::default();
        let result = classifier.classify("Pocket_kangaroo");
        assert_eq!(result.category, PartCategory::Body);
        assert_eq!(result.slot, MaterialSlot::Main);
        assert_eq!(classifier.classify("").category, PartCategory::Body);
    }

    #[test]
    fn test_hardware_kinds() {
        assert_eq!(HardwareKind::from_mesh_name("Straps_1"), HardwareKind::Cord);
        assert_eq!(HardwareKind::from_mesh_name("drawstring"), HardwareKind::Cord);
        assert_eq!(HardwareKind::from_mesh_name("Piping_27584630"), HardwareKind::Piping);
        assert_eq!(HardwareKind::from_mesh_name("Binding"), HardwareKind::Piping);
        assert_eq!(HardwareKind::from_mesh_name("Zipper"), HardwareKind::Rigid);
    }

    #[test]
    fn test_table_validation_catches_conflicts() {
        let mut table = PartTable::default();
        assert!(table.validate().is_ok());
        table.hardware.push("Sleeves".to_string());
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_parse_page_identifiers() {
        assert_eq!(PartCategory::parse("zipperDetails"), Some(PartCategory::Hardware));
        assert_eq!(PartCategory::parse("sleeve"), None);
        assert_eq!(MaterialSlot::parse("lining"), Some(MaterialSlot::Lining));
        assert_eq!(MaterialSlot::Main.display_name(), "Main material");
    }
}
