use strum::{Display, EnumIter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Category {
    #[strum(to_string = "Underweight")]
    #[cfg_attr(feature = "serde", serde(rename = "Bajo peso"))]
    Underweight,
    #[strum(to_string = "Normal weight")]
    #[cfg_attr(feature = "serde", serde(rename = "Peso normal"))]
    NormalWeight,
    #[strum(to_string = "Overweight")]
    #[cfg_attr(feature = "serde", serde(rename = "Sobrepeso"))]
    Overweight,
    #[strum(to_string = "Obesity class I")]
    #[cfg_attr(feature = "serde", serde(rename = "Obesidad clase I"))]
    ObesityClassI,
    #[strum(to_string = "Obesity class II")]
    #[cfg_attr(feature = "serde", serde(rename = "Obesidad clase II"))]
    ObesityClassII,
    #[strum(to_string = "Obesity class III")]
    #[cfg_attr(feature = "serde", serde(rename = "Obesidad clase III"))]
    ObesityClassIII,
    #[strum(to_string = "Undetermined")]
    #[cfg_attr(feature = "serde", serde(rename = "Categoría no determinada"))]
    Undetermined,
}

/// Lower bounds of each category, ascending. A value belongs to the last
/// category whose bound it reaches.
const THRESHOLDS: [(f64, Category); 5] = [
    (18.5, Category::NormalWeight),
    (25.0, Category::Overweight),
    (30.0, Category::ObesityClassI),
    (35.0, Category::ObesityClassII),
    (40.0, Category::ObesityClassIII),
];

pub fn classify(bmi: f64) -> Category {
    if !bmi.is_finite() || bmi < 0.0 {
        return Category::Undetermined;
    }

    THRESHOLDS
        .iter()
        .take_while(|(lower_bound, _)| bmi >= *lower_bound)
        .last()
        .map(|(_, category)| *category)
        .unwrap_or(Category::Underweight)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: Category,
}

/// Body mass index for a weight in kilograms and a height in centimeters,
/// rounded half-up to two decimal places.
pub fn compute(weight_kg: f64, height_cm: f64) -> BmiResult {
    let height_m = height_cm / 100.0;
    let bmi = round_to_hundredths(weight_kg / (height_m * height_m));
    BmiResult {
        bmi,
        category: classify(bmi),
    }
}

// Rounds on the exact binary value of `x`, so 7.675 (stored just below)
// goes down and an exact tie such as 20.125 goes up.
fn round_to_hundredths(x: f64) -> f64 {
    let whole = (x * 100.0).floor();
    // Single rounding keeps the sign of x * 100 - (whole + 0.5) exact.
    if x.mul_add(100.0, -(whole + 0.5)) >= 0.0 {
        (whole + 1.0) / 100.0
    } else {
        whole / 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedMeasurement {
    pub age: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
}

impl ValidatedMeasurement {
    pub fn bmi(&self) -> BmiResult {
        compute(self.weight_kg, self.height_cm)
    }
}
