//! Record types exchanged with the host application

use crate::error::{Error, Result};

/// Rotation quaternion kept in scalar-first order.
///
/// IPL files store the components as `(x, y, z, w)`; in memory the scalar
/// part comes first to match quaternion-consuming code.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quaternion {
    /// Scalar component
    pub w: f64,
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Quaternion {
    /// The identity rotation
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a quaternion from scalar-first components
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Build from IPL column order `(x, y, z, w)`
    ///
    /// ```
    /// use gta_ipl::Quaternion;
    ///
    /// let q = Quaternion::from_file_order([0.0, 0.0, 0.0, 1.0]);
    /// assert_eq!(q, Quaternion::IDENTITY);
    /// ```
    pub fn from_file_order([x, y, z, w]: [f64; 4]) -> Self {
        Self { w, x, y, z }
    }

    /// Components in IPL column order `(x, y, z, w)`
    pub fn to_file_order(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// `lod_index` value meaning "no LOD"
pub const NO_LOD: i32 = -1;

/// Model name prefix marking a level-of-detail proxy
pub const LOD_PREFIX: &str = "lod";

/// Strip a case-insensitive `lod` prefix, returning the base name
///
/// ```
/// use gta_ipl::strip_lod_prefix;
///
/// assert_eq!(strip_lod_prefix("LODbarrel"), Some("barrel"));
/// assert_eq!(strip_lod_prefix("barrel"), None);
/// ```
pub fn strip_lod_prefix(name: &str) -> Option<&str> {
    let prefix = name.get(..LOD_PREFIX.len())?;
    prefix
        .eq_ignore_ascii_case(LOD_PREFIX)
        .then(|| &name[LOD_PREFIX.len()..])
}

/// One placed object from an `inst` section
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceRecord {
    /// Model id; records without one are skipped on export
    pub id: Option<i32>,
    /// Model name
    pub model_name: String,
    /// Interior the object belongs to (0 for the outside world)
    pub interior: i32,
    /// World position
    pub position: [f64; 3],
    /// Orientation
    pub rotation: Quaternion,
    /// Linked LOD, [`NO_LOD`] when there is none
    pub lod_index: i32,
}

impl InstanceRecord {
    /// Create a record at the origin with identity rotation and no LOD
    pub fn new(id: i32, model_name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            model_name: model_name.into(),
            interior: 0,
            position: [0.0; 3],
            rotation: Quaternion::IDENTITY,
            lod_index: NO_LOD,
        }
    }

    /// Whether the model name marks a LOD proxy
    pub fn is_lod(&self) -> bool {
        strip_lod_prefix(&self.model_name).is_some()
    }

    /// Whether a LOD is linked
    pub fn has_lod(&self) -> bool {
        self.lod_index != NO_LOD
    }
}

/// Default draw distance written for object definitions
pub const DEFAULT_DRAW_DISTANCE: f64 = 300.0;

/// One object definition from an `objs` section
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdeRecord {
    /// Model id; records without one are skipped on export
    pub id: Option<i32>,
    /// Model name
    pub model_name: String,
    /// Texture dictionary name, `<model_name>_tex` when unset
    pub texture_set: Option<String>,
    /// Draw distance in world units
    pub draw_distance: f64,
    /// Object flags
    pub flags: u32,
}

impl IdeRecord {
    /// Create a definition with default texture set, draw distance and flags
    pub fn new(id: i32, model_name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            model_name: model_name.into(),
            texture_set: None,
            draw_distance: DEFAULT_DRAW_DISTANCE,
            flags: 0,
        }
    }

    /// Texture dictionary name that will be written
    pub fn texture_set_name(&self) -> String {
        match &self.texture_set {
            Some(name) => name.clone(),
            None => format!("{}_tex", self.model_name),
        }
    }
}

/// Give `records` consecutive ids starting at `id_start`.
///
/// LOD proxies (names starting with `lod`) get `lod_index = lod_start + i`
/// where `i` is their position in the slice; every other record loses its
/// LOD link. If any resulting id or index would not fit in an `i32`, nothing
/// is changed and [`Error::IdOverflow`] is returned.
pub fn assign_ids(records: &mut [InstanceRecord], id_start: i32, lod_start: i32) -> Result<()> {
    if let Some(last) = records.len().checked_sub(1) {
        check_range(id_start, last, records.len())?;
    }
    if let Some(last_lod) = records.iter().rposition(InstanceRecord::is_lod) {
        check_range(lod_start, last_lod, records.len())?;
    }

    for (i, record) in records.iter_mut().enumerate() {
        let offset = i as i32;
        record.id = Some(id_start + offset);
        record.lod_index = if record.is_lod() {
            lod_start + offset
        } else {
            NO_LOD
        };
    }
    Ok(())
}

/// Give object definitions consecutive ids starting at `id_start`
pub fn assign_definition_ids(records: &mut [IdeRecord], id_start: i32) -> Result<()> {
    if let Some(last) = records.len().checked_sub(1) {
        check_range(id_start, last, records.len())?;
    }
    for (i, record) in records.iter_mut().enumerate() {
        record.id = Some(id_start + i as i32);
    }
    Ok(())
}

fn check_range(start: i32, last_offset: usize, count: usize) -> Result<()> {
    i32::try_from(last_offset)
        .ok()
        .and_then(|offset| start.checked_add(offset))
        .map(|_| ())
        .ok_or(Error::IdOverflow { start, count })
}

/// Values stamped onto a whole selection of records at once.
///
/// `None` leaves the field of each record untouched.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchValues {
    /// Interior (area code) for instances
    pub interior: Option<i32>,
    /// Texture dictionary for definitions
    pub texture_set: Option<String>,
    /// Draw distance for definitions
    pub draw_distance: Option<f64>,
    /// Object flags for definitions
    pub flags: Option<u32>,
}

impl BatchValues {
    /// Stamp the instance fields onto `records`
    pub fn apply_to_instances(&self, records: &mut [InstanceRecord]) {
        if let Some(interior) = self.interior {
            for record in records {
                record.interior = interior;
            }
        }
    }

    /// Stamp the definition fields onto `records`
    pub fn apply_to_definitions(&self, records: &mut [IdeRecord]) {
        for record in records {
            if let Some(texture_set) = &self.texture_set {
                record.texture_set = Some(texture_set.clone());
            }
            if let Some(distance) = self.draw_distance {
                record.draw_distance = distance;
            }
            if let Some(flags) = self.flags {
                record.flags = flags;
            }
        }
    }
}
