//! The two scenes from the landing page and the query-string options that pick
//! between them.

use crate::camera::Camera;
use crate::constants::*;
use crate::field::{FieldConfig, PointerDeflection};
use crate::rotation::{PointerTilt, ScrollRotation};
use std::fmt;
use std::str::FromStr;

/// Everything needed to mount one visualization.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub field: FieldConfig,
    pub deflection: PointerDeflection,
    pub scroll_rotation: Option<ScrollRotation>,
    pub pointer_tilt: Option<PointerTilt>,
    pub point_size: f32,
    pub opacity: f32,
    pub camera: Camera,
}

impl Default for SceneConfig {
    fn default() -> Self {
        FieldPreset::InteractiveCluster.scene_config()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldPreset {
    /// Cloud that collapses onto a tight shell and tilts toward the pointer.
    InteractiveCluster,
    /// Sparser cloud that turns as the page scrolls.
    DataTransformation,
}

impl FieldPreset {
    pub const ALL: [FieldPreset; 2] = [
        FieldPreset::InteractiveCluster,
        FieldPreset::DataTransformation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FieldPreset::InteractiveCluster => "cluster",
            FieldPreset::DataTransformation => "transformation",
        }
    }

    /// DOM id of the canvas the web frontend mounts this preset on.
    pub fn canvas_id(self) -> &'static str {
        match self {
            FieldPreset::InteractiveCluster => "cluster-canvas",
            FieldPreset::DataTransformation => "transformation-canvas",
        }
    }

    pub fn scene_config(self) -> SceneConfig {
        match self {
            FieldPreset::InteractiveCluster => SceneConfig {
                field: FieldConfig {
                    count: CLUSTER_PARTICLE_COUNT,
                    initial_radius: CLUSTER_INITIAL_RADIUS,
                    target_radius: CLUSTER_TARGET_RADIUS,
                    speed: CLUSTER_SPEED,
                    scale: CLUSTER_SCALE,
                    color: CLUSTER_COLOR,
                },
                deflection: PointerDeflection::default(),
                scroll_rotation: None,
                pointer_tilt: Some(PointerTilt::default()),
                point_size: POINT_SIZE,
                opacity: POINT_OPACITY,
                camera: Camera::default(),
            },
            FieldPreset::DataTransformation => SceneConfig {
                field: FieldConfig {
                    count: TRANSFORMATION_PARTICLE_COUNT,
                    initial_radius: TRANSFORMATION_INITIAL_RADIUS,
                    target_radius: TRANSFORMATION_TARGET_RADIUS,
                    speed: TRANSFORMATION_SPEED,
                    scale: TRANSFORMATION_SCALE,
                    color: TRANSFORMATION_COLOR,
                },
                deflection: PointerDeflection::default(),
                scroll_rotation: Some(ScrollRotation::default()),
                pointer_tilt: None,
                point_size: TRANSFORMATION_POINT_SIZE,
                opacity: POINT_OPACITY,
                camera: Camera::default(),
            },
        }
    }
}

impl fmt::Display for FieldPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownPreset(pub String);

impl fmt::Display for UnknownPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown preset '{}' (expected 'cluster' or 'transformation')",
            self.0
        )
    }
}

impl std::error::Error for UnknownPreset {}

impl FromStr for FieldPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cluster" | "interactive-cluster" => Ok(FieldPreset::InteractiveCluster),
            "transformation" | "data-transformation" => Ok(FieldPreset::DataTransformation),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}

/// Runtime overrides read from the page URL (`?preset=cluster&seed=7&count=500`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MountOptions {
    /// Restrict mounting to one preset; `None` mounts every canvas present.
    pub preset: Option<FieldPreset>,
    pub seed: Option<u64>,
    pub count: Option<usize>,
}

impl MountOptions {
    /// Parse a query string with or without the leading `?`.
    ///
    /// Unknown keys are ignored. Malformed values are skipped and described in
    /// the returned warnings so the caller can log them.
    pub fn from_query(query: &str) -> (Self, Vec<String>) {
        let mut opts = MountOptions::default();
        let mut warnings = Vec::new();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "preset" => match value.parse::<FieldPreset>() {
                    Ok(p) => opts.preset = Some(p),
                    Err(e) => warnings.push(e.to_string()),
                },
                "seed" => match value.parse::<u64>() {
                    Ok(s) => opts.seed = Some(s),
                    Err(_) => warnings.push(format!("ignoring seed '{}'", value)),
                },
                "count" => match value.parse::<usize>() {
                    Ok(c) if (1..=MAX_PARTICLE_COUNT).contains(&c) => opts.count = Some(c),
                    Ok(c) if c > MAX_PARTICLE_COUNT => warnings.push(format!(
                        "ignoring count {c}: at most {MAX_PARTICLE_COUNT} particles"
                    )),
                    _ => warnings.push(format!("ignoring count '{}'", value)),
                },
                _ => {}
            }
        }
        (opts, warnings)
    }

    pub fn wants(&self, preset: FieldPreset) -> bool {
        self.preset.map_or(true, |p| p == preset)
    }

    /// Scene config for `preset` with any overrides applied.
    pub fn scene_config(&self, preset: FieldPreset) -> SceneConfig {
        let mut config = preset.scene_config();
        if let Some(count) = self.count {
            config.field.count = count;
        }
        config
    }

    /// Seed for `preset`; mounts get distinct streams from one base seed.
    pub fn seed_for(&self, preset: FieldPreset) -> u64 {
        let base = self.seed.unwrap_or(DEFAULT_SEED);
        let index = FieldPreset::ALL
            .iter()
            .position(|p| *p == preset)
            .unwrap_or(0) as u64;
        base ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}
