//! Monitored cultivated areas

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::types::PointCoordinate;
use crate::validation::validate_coordinates;

/// Vegetation index at or above which an area is considered healthy
pub const HEALTHY_VEGETATION_INDEX: f64 = 0.6;

/// A cultivated area observed from satellite imagery
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CultivatedRegion {
    pub id: u32,
    pub name: String,
    pub location: PointCoordinate,
    pub crop: String,
    pub vegetation_index: f64,
    pub influence_radius_m: f64,
}

impl CultivatedRegion {
    pub fn is_healthy(&self) -> bool {
        self.vegetation_index >= HEALTHY_VEGETATION_INDEX
    }

    pub fn covers(&self, point: &PointCoordinate) -> bool {
        self.location.distance_meters(point) <= self.influence_radius_m
    }
}

/// Dashboard filter over monitored areas
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RegionFilter {
    #[default]
    All,
    Healthy,
    Attention,
}

impl RegionFilter {
    pub fn matches(&self, region: &CultivatedRegion) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Healthy => region.is_healthy(),
            RegionFilter::Attention => !region.is_healthy(),
        }
    }
}

/// A region that influences a clicked point
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NearbyRegion {
    pub id: u32,
    pub name: String,
    pub crop: String,
    pub vegetation_index: f64,
    pub distance_m: f64,
}

/// Number of monitored areas per crop
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CropAreaCount {
    pub crop: String,
    pub regions: usize,
}

/// Aggregate figures over the registry
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionSummary {
    pub total_regions: usize,
    pub healthy_regions: usize,
    pub mean_vegetation_index: f64,
    pub crops: Vec<CropAreaCount>,
}

/// Seeded table of cultivated areas
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionRegistry {
    regions: Vec<CultivatedRegion>,
}

impl RegionRegistry {
    pub fn new(regions: Vec<CultivatedRegion>) -> Result<Self, CatalogError> {
        if regions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut ids: Vec<u32> = Vec::with_capacity(regions.len());
        for region in &regions {
            if ids.contains(&region.id) {
                return Err(CatalogError::DuplicateRegion(region.id));
            }
            ids.push(region.id);

            validate_coordinates(region.location.latitude, region.location.longitude).map_err(
                |reason| CatalogError::InvalidCoordinates {
                    id: region.id,
                    reason,
                },
            )?;
            if !(0.0..=1.0).contains(&region.vegetation_index) {
                return Err(CatalogError::VegetationIndexOutOfRange {
                    subject: region.name.clone(),
                    value: region.vegetation_index,
                });
            }
            if region.influence_radius_m <= 0.0 || !region.influence_radius_m.is_finite() {
                return Err(CatalogError::InvalidRadius { id: region.id });
            }
        }

        Ok(Self { regions })
    }

    pub fn all(&self) -> &[CultivatedRegion] {
        &self.regions
    }

    pub fn get(&self, id: u32) -> Option<&CultivatedRegion> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn filter(&self, filter: RegionFilter) -> Vec<&CultivatedRegion> {
        self.regions.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Regions whose influence radius contains the point, nearest first
    pub fn within_influence(&self, point: &PointCoordinate) -> Vec<NearbyRegion> {
        let mut nearby: Vec<NearbyRegion> = self
            .regions
            .iter()
            .filter_map(|r| {
                let distance_m = r.location.distance_meters(point);
                (distance_m <= r.influence_radius_m).then(|| NearbyRegion {
                    id: r.id,
                    name: r.name.clone(),
                    crop: r.crop.clone(),
                    vegetation_index: r.vegetation_index,
                    distance_m,
                })
            })
            .collect();
        nearby.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
        nearby
    }

    pub fn summary(&self) -> RegionSummary {
        let total = self.regions.len();
        let mean = if total > 0 {
            self.regions.iter().map(|r| r.vegetation_index).sum::<f64>() / total as f64
        } else {
            0.0
        };

        let mut crops: Vec<CropAreaCount> = Vec::new();
        for region in &self.regions {
            match crops.iter_mut().find(|c| c.crop == region.crop) {
                Some(entry) => entry.regions += 1,
                None => crops.push(CropAreaCount {
                    crop: region.crop.clone(),
                    regions: 1,
                }),
            }
        }
        crops.sort_by(|a, b| b.regions.cmp(&a.regions).then_with(|| a.crop.cmp(&b.crop)));

        RegionSummary {
            total_regions: total,
            healthy_regions: self.regions.iter().filter(|r| r.is_healthy()).count(),
            mean_vegetation_index: mean,
            crops,
        }
    }
}

impl Default for RegionRegistry {
    fn default() -> Self {
        Self {
            regions: default_regions(),
        }
    }
}

fn region(
    id: u32,
    name: &str,
    latitude: f64,
    longitude: f64,
    crop: &str,
    vegetation_index: f64,
    influence_radius_m: f64,
) -> CultivatedRegion {
    CultivatedRegion {
        id,
        name: name.to_string(),
        location: PointCoordinate::new(latitude, longitude),
        crop: crop.to_string(),
        vegetation_index,
        influence_radius_m,
    }
}

/// Monitored fruit-growing areas across the coast, Jaguaribe valley and sertão
pub fn default_regions() -> Vec<CultivatedRegion> {
    vec![
        region(1, "Jaguaruana", -4.8356, -37.7811, "Mamão", 0.68, 5_000.0),
        region(2, "Russas", -4.9394, -37.9761, "Banana", 0.74, 4_000.0),
        region(3, "Aracati", -4.5614, -37.7697, "Coco", 0.62, 6_000.0),
        region(4, "Fortaleza", -3.7319, -38.5267, "Caju", 0.55, 3_000.0),
        region(5, "Quixadá", -4.9714, -39.0153, "Mamão", 0.48, 3_500.0),
        region(6, "Iguatu", -6.3614, -39.2986, "Melão", 0.52, 4_500.0),
        region(7, "Crateús", -5.1783, -40.6775, "Caju", 0.41, 5_000.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_is_valid() {
        let registry = RegionRegistry::new(default_regions()).unwrap();
        assert_eq!(registry.all().len(), 7);
    }

    #[test]
    fn test_get_by_id() {
        let registry = RegionRegistry::default();
        assert_eq!(registry.get(2).map(|r| r.name.as_str()), Some("Russas"));
        assert!(registry.get(99).is_none());
    }

    #[test]
    fn test_filter_partitions_registry() {
        let registry = RegionRegistry::default();
        let healthy = registry.filter(RegionFilter::Healthy).len();
        let attention = registry.filter(RegionFilter::Attention).len();
        assert_eq!(healthy + attention, registry.all().len());
        assert_eq!(healthy, 3);
    }

    #[test]
    fn test_within_influence_finds_containing_region() {
        let registry = RegionRegistry::default();
        let near_jaguaruana = PointCoordinate::new(-4.84, -37.78);
        let nearby = registry.within_influence(&near_jaguaruana);
        assert_eq!(nearby.first().map(|r| r.id), Some(1));
        assert!(nearby[0].distance_m < 1_000.0);
    }

    #[test]
    fn test_within_influence_empty_far_away() {
        let registry = RegionRegistry::default();
        let ocean = PointCoordinate::new(-2.0, -36.0);
        assert!(registry.within_influence(&ocean).is_empty());
    }

    #[test]
    fn test_summary_counts_crops() {
        let summary = RegionRegistry::default().summary();
        assert_eq!(summary.total_regions, 7);
        assert_eq!(summary.crops[0].regions, 2);
        assert_eq!(summary.crops[0].crop, "Caju");
        assert_eq!(summary.crops[1].crop, "Mamão");
        assert!(summary.mean_vegetation_index > 0.5 && summary.mean_vegetation_index < 0.6);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut regions = default_regions();
        regions[1].id = 1;
        assert_eq!(
            RegionRegistry::new(regions),
            Err(CatalogError::DuplicateRegion(1))
        );
    }

    #[test]
    fn test_rejects_bad_radius_and_coordinates() {
        let mut regions = default_regions();
        regions[0].influence_radius_m = 0.0;
        assert_eq!(
            RegionRegistry::new(regions),
            Err(CatalogError::InvalidRadius { id: 1 })
        );

        let mut regions = default_regions();
        regions[0].location.latitude = 120.0;
        assert!(matches!(
            RegionRegistry::new(regions),
            Err(CatalogError::InvalidCoordinates { id: 1, .. })
        ));
    }
}
