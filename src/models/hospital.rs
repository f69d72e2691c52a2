use crate::consts;
use anyhow::{Context, anyhow};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

/// Hospital record as returned by the directory.
///
/// Counts are optional because the directory leaves them null for
/// hospitals that do not report a given resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    /// Opaque id, base64 of `Hospital:<numeric id>`
    pub id: String,
    pub name: String,

    pub icu_available: Option<u32>,
    pub hdu_available: Option<u32>,
    pub oxygen_available: Option<u32>,
    pub general_available: Option<u32>,
    pub ventilators_available: Option<u32>,

    pub icu_occupied: Option<u32>,
    pub hdu_occupied: Option<u32>,
    pub oxygen_occupied: Option<u32>,
    pub general_occupied: Option<u32>,
    pub ventilators_occupied: Option<u32>,

    pub icu_total: Option<u32>,
    pub hdu_total: Option<u32>,
    pub oxygen_total: Option<u32>,
    pub general_total: Option<u32>,
    pub ventilators_total: Option<u32>,

    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub website: Option<String>,

    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

/// Bed and equipment kinds tracked per hospital
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Icu,
    Hdu,
    Oxygen,
    General,
    Ventilators,
}

impl ResourceKind {
    /// Display order used when rendering a hospital
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Icu,
        ResourceKind::Hdu,
        ResourceKind::Oxygen,
        ResourceKind::General,
        ResourceKind::Ventilators,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Icu => "ICU",
            ResourceKind::Hdu => "HDU",
            ResourceKind::Oxygen => "Oxygen",
            ResourceKind::General => "General",
            ResourceKind::Ventilators => "Ventilators",
        }
    }
}

/// Availability counts of one resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceCounts {
    pub available: Option<u32>,
    pub occupied: Option<u32>,
    pub total: Option<u32>,
}

impl ResourceCounts {
    /// Percentage of occupied units, `None` when occupancy is unknown or
    /// there is no non-zero total
    pub fn occupied_percentage(&self) -> Option<u64> {
        match (self.occupied, self.total) {
            (Some(occupied), Some(total)) if total > 0 => {
                Some(u64::from(occupied) * 100 / u64::from(total))
            }
            _ => None,
        }
    }
}

impl Hospital {
    pub fn resource(&self, kind: ResourceKind) -> ResourceCounts {
        let (available, occupied, total) = match kind {
            ResourceKind::Icu => (self.icu_available, self.icu_occupied, self.icu_total),
            ResourceKind::Hdu => (self.hdu_available, self.hdu_occupied, self.hdu_total),
            ResourceKind::Oxygen => (
                self.oxygen_available,
                self.oxygen_occupied,
                self.oxygen_total,
            ),
            ResourceKind::General => (
                self.general_available,
                self.general_occupied,
                self.general_total,
            ),
            ResourceKind::Ventilators => (
                self.ventilators_available,
                self.ventilators_occupied,
                self.ventilators_total,
            ),
        };

        ResourceCounts {
            available,
            occupied,
            total,
        }
    }

    /// Numeric id hidden inside the opaque [`Hospital::id`]
    pub fn numeric_id(&self) -> anyhow::Result<u64> {
        decode_hospital_id(&self.id)
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Builds the opaque directory id of a hospital from its numeric id.
pub fn encode_hospital_id(hospital_id: u64) -> String {
    STANDARD.encode(format!("{}{hospital_id}", consts::HOSPITAL_ID_PREFIX))
}

/// Recovers the numeric id from an opaque directory id.
///
/// The decoded value must start with the fixed `Hospital:` prefix,
/// everything after those 9 characters is the numeric id.
pub fn decode_hospital_id(encoded_id: &str) -> anyhow::Result<u64> {
    let decoded = STANDARD
        .decode(encoded_id)
        .with_context(|| format!("hospital id is not base64: {encoded_id}"))?;
    let decoded = String::from_utf8(decoded).context("hospital id is not utf-8")?;

    let numeric = decoded
        .strip_prefix(consts::HOSPITAL_ID_PREFIX)
        .ok_or_else(|| anyhow!("hospital id has an unexpected type prefix: {decoded}"))?;

    numeric
        .parse::<u64>()
        .with_context(|| format!("hospital id is not numeric: {numeric}"))
}
