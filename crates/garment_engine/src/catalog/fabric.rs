//! Purchasable fabric options

use serde::{Deserialize, Serialize};

/// Closed set of textile options, each with its own texture trio and price delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FabricId {
    /// Cotton fleece (base price)
    Cotton,
    /// Teddy pile
    Teddy,
    /// Nylon shell
    Nylon,
}

impl FabricId {
    /// Every fabric, in catalog order
    pub const ALL: [FabricId; 3] = [FabricId::Cotton, FabricId::Teddy, FabricId::Nylon];

    /// Parse a page-level fabric identifier; unknown ids yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cotton" => Some(FabricId::Cotton),
            "teddy" => Some(FabricId::Teddy),
            "nylon" => Some(FabricId::Nylon),
            _ => None,
        }
    }

    /// Stable identifier
    pub fn id(self) -> &'static str {
        match self {
            FabricId::Cotton => "cotton",
            FabricId::Teddy => "teddy",
            FabricId::Nylon => "nylon",
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            FabricId::Cotton => "Cotton",
            FabricId::Teddy => "Teddy",
            FabricId::Nylon => "Nylon",
        }
    }

    /// Extra cost over the base garment, in kroner
    pub fn price(self) -> u32 {
        match self {
            FabricId::Cotton => 0,
            FabricId::Teddy => 20,
            FabricId::Nylon => 50,
        }
    }

    /// Price delta as shown on the fabric card
    pub fn display_price(self) -> String {
        format!("+{}kr", self.price())
    }

    /// File-name prefix of this fabric's texture maps
    pub fn texture_prefix(self) -> &'static str {
        self.id()
    }

    /// Swatch image shown in the fabric picker
    pub fn preview_image(self) -> &'static str {
        match self {
            FabricId::Cotton => "/images/Cotton_Material.jpg",
            FabricId::Teddy => "/images/Teddy_Material.jpg",
            FabricId::Nylon => "/images/Nylon_Material.jpg",
        }
    }
}

impl std::fmt::Display for FabricId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_and_unknown() {
        assert_eq!(FabricId::parse("teddy"), Some(FabricId::Teddy));
        assert_eq!(FabricId::parse("silk"), None);
        assert_eq!(FabricId::parse("Cotton"), None);
    }

    #[test]
    fn test_prices() {
        assert_eq!(FabricId::Nylon.display_price(), "+50kr");
        let total: u32 = FabricId::ALL.iter().map(|f| f.price()).sum();
        assert_eq!(total, 70);
    }
}
