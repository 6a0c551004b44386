//! Fruit crop reference data

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Soil classes recognised by the estimator (Brazilian soil classification)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SoilClass {
    Latossolo,
    Argissolo,
    Neossolo,
    Vertissolo,
}

impl SoilClass {
    /// Fixed order used by the deterministic soil classification
    pub const ALL: [SoilClass; 4] = [
        SoilClass::Latossolo,
        SoilClass::Argissolo,
        SoilClass::Neossolo,
        SoilClass::Vertissolo,
    ];
}

impl std::fmt::Display for SoilClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoilClass::Latossolo => write!(f, "Latossolo"),
            SoilClass::Argissolo => write!(f, "Argissolo"),
            SoilClass::Neossolo => write!(f, "Neossolo"),
            SoilClass::Vertissolo => write!(f, "Vertissolo"),
        }
    }
}

impl std::str::FromStr for SoilClass {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "latossolo" => Ok(SoilClass::Latossolo),
            "argissolo" => Ok(SoilClass::Argissolo),
            "neossolo" => Ok(SoilClass::Neossolo),
            "vertissolo" => Ok(SoilClass::Vertissolo),
            _ => Err("Unknown soil class"),
        }
    }
}

/// Environmental requirements and agronomic notes for one crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropProfile {
    pub name: String,
    /// Minimum vegetation index the site must show
    pub min_vegetation_index: f64,
    pub compatible_soils: Vec<SoilClass>,
    /// Minimum annual rainfall in millimetres
    pub min_rainfall_mm: u32,
    pub benefits: String,
    pub spacing: String,
    pub time_to_production: String,
}

impl CropProfile {
    pub fn accepts_soil(&self, soil: SoilClass) -> bool {
        self.compatible_soils.contains(&soil)
    }
}

/// Ordered crop table. Order doubles as the tie-break order when ranking.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CropCatalog {
    profiles: Vec<CropProfile>,
}

impl CropCatalog {
    /// Build a catalog, rejecting tables the scorer cannot use
    pub fn new(profiles: Vec<CropProfile>) -> Result<Self, CatalogError> {
        if profiles.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen: Vec<String> = Vec::with_capacity(profiles.len());
        for profile in &profiles {
            let key = profile.name.trim().to_lowercase();
            if seen.contains(&key) {
                return Err(CatalogError::DuplicateCrop(profile.name.clone()));
            }
            seen.push(key);

            if !(0.0..=1.0).contains(&profile.min_vegetation_index) {
                return Err(CatalogError::VegetationIndexOutOfRange {
                    subject: profile.name.clone(),
                    value: profile.min_vegetation_index,
                });
            }
            if profile.compatible_soils.is_empty() {
                return Err(CatalogError::NoCompatibleSoil {
                    crop: profile.name.clone(),
                });
            }
        }

        Ok(Self { profiles })
    }

    pub fn profiles(&self) -> &[CropProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Case-insensitive lookup by crop name
    pub fn find(&self, name: &str) -> Option<&CropProfile> {
        let name = name.trim().to_lowercase();
        self.profiles.iter().find(|p| p.name.to_lowercase() == name)
    }

    /// Crops that tolerate the given soil, in catalog order
    pub fn compatible_with(&self, soil: SoilClass) -> impl Iterator<Item = &CropProfile> {
        self.profiles.iter().filter(move |p| p.accepts_soil(soil))
    }
}

impl Default for CropCatalog {
    fn default() -> Self {
        Self {
            profiles: default_crop_profiles(),
        }
    }
}

fn profile(
    name: &str,
    min_vegetation_index: f64,
    compatible_soils: &[SoilClass],
    min_rainfall_mm: u32,
    benefits: &str,
    spacing: &str,
    time_to_production: &str,
) -> CropProfile {
    CropProfile {
        name: name.to_string(),
        min_vegetation_index,
        compatible_soils: compatible_soils.to_vec(),
        min_rainfall_mm,
        benefits: benefits.to_string(),
        spacing: spacing.to_string(),
        time_to_production: time_to_production.to_string(),
    }
}

/// Fruit crops commonly grown in the semi-arid interior and coast of Ceará
pub fn default_crop_profiles() -> Vec<CropProfile> {
    use SoilClass::*;

    vec![
        profile(
            "Mamão",
            0.45,
            &[Latossolo, Argissolo],
            800,
            "Produção contínua o ano todo e retorno rápido do investimento",
            "3 x 2 m",
            "8 a 10 meses",
        ),
        profile(
            "Banana",
            0.50,
            &[Latossolo, Argissolo],
            1000,
            "Alta demanda no mercado local e colheita escalonada",
            "3 x 3 m",
            "12 a 14 meses",
        ),
        profile(
            "Coco",
            0.40,
            &[Neossolo, Argissolo],
            700,
            "Tolerante à salinidade e bem adaptado ao litoral",
            "7,5 x 7,5 m",
            "3 a 4 anos",
        ),
        profile(
            "Caju",
            0.25,
            &[Neossolo, Latossolo, Argissolo],
            500,
            "Resistente à seca, castanha e pedúnculo comercializáveis",
            "8 x 6 m",
            "2 a 3 anos",
        ),
        profile(
            "Manga",
            0.35,
            &[Latossolo, Argissolo],
            600,
            "Boa adaptação ao clima quente e forte mercado de exportação",
            "8 x 5 m",
            "3 a 4 anos",
        ),
        profile(
            "Melão",
            0.30,
            &[Neossolo, Argissolo],
            400,
            "Ciclo curto sob irrigação e principal fruta exportada do estado",
            "2 x 0,4 m",
            "60 a 75 dias",
        ),
        profile(
            "Acerola",
            0.35,
            &[Latossolo, Argissolo, Neossolo],
            600,
            "Rica em vitamina C, várias safras por ano",
            "4 x 4 m",
            "1 a 2 anos",
        ),
        profile(
            "Maracujá",
            0.45,
            &[Latossolo, Argissolo],
            800,
            "Boa rentabilidade em pequenas áreas com espaldeira",
            "3 x 3 m",
            "6 a 8 meses",
        ),
        profile(
            "Goiaba",
            0.40,
            &[Latossolo, Argissolo],
            700,
            "Rústica, com mercado para fruta fresca e polpa",
            "6 x 5 m",
            "1 a 2 anos",
        ),
    ]
}
