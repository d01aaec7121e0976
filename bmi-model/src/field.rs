use strum::{Display, EnumIter, EnumString};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inputs of the registration form, named after their database columns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString,
)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Field {
    #[strum(serialize = "nombre")]
    #[cfg_attr(feature = "serde", serde(rename = "nombre"))]
    Name,
    #[strum(serialize = "telefono")]
    #[cfg_attr(feature = "serde", serde(rename = "telefono"))]
    Phone,
    #[strum(serialize = "edad")]
    #[cfg_attr(feature = "serde", serde(rename = "edad"))]
    Age,
    #[strum(serialize = "peso")]
    #[cfg_attr(feature = "serde", serde(rename = "peso"))]
    Weight,
    #[strum(serialize = "altura")]
    #[cfg_attr(feature = "serde", serde(rename = "altura"))]
    Height,
}

impl Field {
    pub const MEASUREMENT: [Field; 3] = [Field::Age, Field::Weight, Field::Height];
    pub const CONTACT: [Field; 2] = [Field::Name, Field::Phone];

    /// Measurement fields feed the BMI computation; editing one invalidates
    /// any result computed from them.
    pub fn is_measurement(self) -> bool {
        matches!(self, Field::Age | Field::Weight | Field::Height)
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Phone => "Phone",
            Field::Age => "Age",
            Field::Weight => "Weight",
            Field::Height => "Height",
        }
    }
}

/// Free text exactly as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawFormInput {
    #[cfg_attr(feature = "serde", serde(rename = "nombre"))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "telefono"))]
    pub phone: String,
    #[cfg_attr(feature = "serde", serde(rename = "edad"))]
    pub age: String,
    #[cfg_attr(feature = "serde", serde(rename = "peso"))]
    pub weight: String,
    #[cfg_attr(feature = "serde", serde(rename = "altura"))]
    pub height: String,
}

impl RawFormInput {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Phone => &self.phone,
            Field::Age => &self.age,
            Field::Weight => &self.weight,
            Field::Height => &self.height,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Phone => &mut self.phone,
            Field::Age => &mut self.age,
            Field::Weight => &mut self.weight,
            Field::Height => &mut self.height,
        };
        *slot = value.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
