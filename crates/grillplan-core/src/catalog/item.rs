//! Grill item definitions and boundary validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, ItemValidationError};

/// Minimum minutes accepted for any per-side duration.
pub const MIN_COOK_TIME_MIN: f64 = 0.5;

/// Category of a grill item. Affects presentation only, never scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Veggie,
    Meat,
    Fish,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Veggie => "veggie",
            ItemKind::Meat => "meat",
            ItemKind::Fish => "fish",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "veggie" => Ok(ItemKind::Veggie),
            "meat" => Ok(ItemKind::Meat),
            "fish" => Ok(ItemKind::Fish),
            other => Err(format!(
                "unknown item kind '{other}' (expected veggie, meat or fish)"
            )),
        }
    }
}

/// A catalog entry. Immutable once created.
///
/// `cook_time_per_side` covers the first side and, when
/// `cook_time_second_side` is absent, every other side as well. When the
/// second-side time is present the item has exactly two sides with
/// different durations and `sides` plays no role in scheduling.
///
/// Serializes in camelCase with `kind` under the key `"type"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrillItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Minutes per side.
    pub cook_time_per_side: f64,
    /// Minutes for the second side, when it differs from the first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time_second_side: Option<f64>,
    /// Number of sides for uniform-timing items.
    pub sides: u32,
    /// Free-text display note.
    #[serde(default)]
    pub notes: String,
}

/// A new catalog entry as submitted by the user. The catalog assigns
/// the id on [`add`](super::Catalog::add).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub cook_time_per_side: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time_second_side: Option<f64>,
    pub sides: u32,
    #[serde(default)]
    pub notes: String,
}

impl ItemDraft {
    /// Check the catalog boundary contract.
    ///
    /// Collects every failing field instead of stopping at the first, so
    /// one round trip surfaces all problems.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        let mut fields = Vec::new();

        if self.name.trim().is_empty() {
            fields.push(FieldError {
                field: "name",
                message: "Name is required".to_string(),
            });
        }
        if self.cook_time_per_side.is_nan() || self.cook_time_per_side < MIN_COOK_TIME_MIN {
            fields.push(FieldError {
                field: "cookTimePerSide",
                message: "Cooking time must be at least 0.5 minutes".to_string(),
            });
        }
        if let Some(second) = self.cook_time_second_side {
            if second.is_nan() || second < MIN_COOK_TIME_MIN {
                fields.push(FieldError {
                    field: "cookTimeSecondSide",
                    message: "Cooking time must be at least 0.5 minutes".to_string(),
                });
            }
        }
        if self.sides < 1 {
            fields.push(FieldError {
                field: "sides",
                message: "Must have at least 1 side".to_string(),
            });
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ItemValidationError { fields })
        }
    }
}
