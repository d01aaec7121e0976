use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::measurement::{BmiResult, Category, ValidatedMeasurement};

pub const RECORDS_TABLE: &str = "registros_imc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "Nuevo"))]
    New,
}

/// Registration of one participant, as stored in [`RECORDS_TABLE`].
///
/// `id` and `created_at` are assigned by the database and stay empty on
/// records built locally.
#[cfg_attr(feature = "serde", serde_with::skip_serializing_none)]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Record {
    pub id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    #[cfg_attr(feature = "serde", serde(rename = "nombre"))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "telefono"))]
    pub phone: String,
    #[cfg_attr(feature = "serde", serde(rename = "edad"))]
    pub age: u32,
    #[cfg_attr(feature = "serde", serde(rename = "peso"))]
    pub weight_kg: f64,
    #[cfg_attr(feature = "serde", serde(rename = "altura"))]
    pub height_cm: f64,
    #[cfg_attr(feature = "serde", serde(rename = "imc"))]
    pub bmi: f64,
    #[cfg_attr(feature = "serde", serde(rename = "categoria"))]
    pub category: Category,
    #[cfg_attr(feature = "serde", serde(rename = "estado"))]
    pub status: Status,
}

impl Record {
    pub fn new(contact: ContactInfo, measurement: ValidatedMeasurement, result: BmiResult) -> Self {
        Self {
            id: None,
            created_at: None,
            name: contact.name,
            phone: contact.phone,
            age: measurement.age,
            weight_kg: measurement.weight_kg,
            height_cm: measurement.height_cm,
            bmi: result.bmi,
            category: result.category,
            status: Status::New,
        }
    }
}
