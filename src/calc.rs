//src/calc.rs
//! Body-mass index and basal metabolic rate.
use std::fmt;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BmiCategory {
    #[strum(serialize = "underweight")]
    Underweight,
    #[strum(serialize = "normal weight")]
    NormalWeight,
    #[strum(serialize = "overweight")]
    Overweight,
    #[strum(serialize = "obese")]
    Obese,
}

impl BmiCategory {
    /// Thresholds apply to the BMI already rounded to one decimal.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::NormalWeight
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bmi {
    /// kg/m², rounded to one decimal
    pub value: f64,
    pub category: BmiCategory,
}

impl fmt::Display for Bmi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} kg/m²", self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bmr {
    pub kcal_per_day: i64,
}

impl fmt::Display for Bmr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kcal/day", self.kcal_per_day)
    }
}

/// Computes the BMI from height in cm and weight in kg.
/// Returns `None` unless both are positive finite numbers.
pub fn bmi(height_cm: f64, weight_kg: f64) -> Option<Bmi> {
    let height_m = height_cm / 100.0;
    let positive = |v: f64| v > 0.0 && v.is_finite();
    if !(positive(height_m) && positive(weight_kg)) {
        return None;
    }
    let raw = weight_kg / (height_m * height_m);
    if !raw.is_finite() {
        return None;
    }
    // Formatting rounds the exact binary value, so 18.45 (stored as 18.4499..) gives 18.4
    let value = format!("{raw:.1}").parse::<f64>().ok()?;
    Some(Bmi {
        value,
        category: BmiCategory::from_bmi(value),
    })
}

/// Mifflin-St Jeor basal metabolic rate.
/// Returns `None` if any input is zero, NaN or infinite.
pub fn bmr(sex: Sex, height_cm: f64, weight_kg: f64, age_years: f64) -> Option<Bmr> {
    let usable = |v: f64| v != 0.0 && v.is_finite();
    if !(usable(height_cm) && usable(weight_kg) && usable(age_years)) {
        return None;
    }
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years;
    let raw = match sex {
        Sex::Male => base + 5.0,
        Sex::Other => base - 161.0,
    };
    if !raw.is_finite() {
        return None;
    }
    // halves round towards +inf
    #[allow(clippy::cast_possible_truncation)]
    let kcal_per_day = (raw + 0.5).floor() as i64;
    Some(Bmr { kcal_per_day })
}

/// Parses a form value from its leading decimal number, ignoring any trailing text
/// (`"180cm"` reads as 180). Input without a leading number becomes NaN so the
/// calculators reject it. Only the literal `Infinity` spelling is read as infinite.
pub fn parse_measurement(input: &str) -> f64 {
    let text = input.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if text[end..].starts_with("Infinity") {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let count_digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };
    let int_digits = count_digits(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    text[..end].parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_normal_weight_example() {
        let result = bmi(180.0, 72.0).unwrap();
        assert!((result.value - 22.2).abs() < f64::EPSILON);
        assert_eq!(result.category, BmiCategory::NormalWeight);
        assert_eq!(result.to_string(), "22.2 kg/m²");
        assert_eq!(result.category.to_string(), "normal weight");
    }

    #[test]
    fn bmi_categories() {
        assert_eq!(bmi(180.0, 55.0).unwrap().category, BmiCategory::Underweight);
        assert_eq!(bmi(180.0, 85.0).unwrap().category, BmiCategory::Overweight);
        assert_eq!(bmi(170.0, 100.0).unwrap().category, BmiCategory::Obese);
    }

    #[test]
    fn bmi_category_uses_rounded_value() {
        // 18.46 rounds to 18.5
        let result = bmi(100.0, 18.46).unwrap();
        assert!((result.value - 18.5).abs() < f64::EPSILON);
        assert_eq!(result.category, BmiCategory::NormalWeight);
    }

    #[test]
    fn bmi_rejects_non_positive_or_nan() {
        assert!(bmi(0.0, 70.0).is_none());
        assert!(bmi(180.0, -1.0).is_none());
        assert!(bmi(f64::NAN, 70.0).is_none());
        assert!(bmi(parse_measurement("tall"), 70.0).is_none());
    }

    #[test]
    fn bmr_male_example() {
        let result = bmr(Sex::Male, 180.0, 80.0, 25.0).unwrap();
        assert_eq!(result.kcal_per_day, 1805);
        assert_eq!(result.to_string(), "1805 kcal/day");
    }

    #[test]
    fn bmr_other_formula() {
        // 10*60 + 6.25*165 - 5*30 - 161 = 1320.25
        assert_eq!(bmr(Sex::Other, 165.0, 60.0, 30.0).unwrap().kcal_per_day, 1320);
    }

    #[test]
    fn bmr_rounds_halves_up() {
        // 10*70 + 6.25*170.8 - 5*30 + 5 = 1622.5
        assert_eq!(bmr(Sex::Male, 170.8, 70.0, 30.0).unwrap().kcal_per_day, 1623);
    }

    #[test]
    fn bmr_rejects_zero_or_nan() {
        assert!(bmr(Sex::Male, 0.0, 80.0, 25.0).is_none());
        assert!(bmr(Sex::Male, 180.0, f64::NAN, 25.0).is_none());
        assert!(bmr(Sex::Other, 180.0, 80.0, 0.0).is_none());
    }

    #[test]
    fn bmi_rounds_the_binary_value_at_category_boundaries() {
        // 73.8 / 2^2 is stored just below 18.45
        let result = bmi(200.0, 73.8).unwrap();
        assert_eq!(result.to_string(), "18.4 kg/m²");
        assert_eq!(result.category, BmiCategory::Underweight);

        let result = bmi(100.0, 24.95).unwrap();
        assert_eq!(result.to_string(), "24.9 kg/m²");
        assert_eq!(result.category, BmiCategory::NormalWeight);

        let result = bmi(100.0, 29.95).unwrap();
        assert_eq!(result.to_string(), "29.9 kg/m²");
        assert_eq!(result.category, BmiCategory::Overweight);
    }

    #[test]
    fn calculators_reject_infinite_inputs() {
        assert!(bmi(f64::INFINITY, 70.0).is_none());
        assert!(bmi(180.0, f64::INFINITY).is_none());
        assert!(bmr(Sex::Male, f64::INFINITY, 80.0, 25.0).is_none());
        assert!(bmr(Sex::Other, 180.0, 80.0, f64::NEG_INFINITY).is_none());
        assert!(bmr(Sex::Male, 180.0, f64::MAX, 25.0).is_none());
    }

    #[test]
    fn measurement_reads_the_leading_number() {
        assert_eq!(parse_measurement("180cm"), 180.0);
        assert_eq!(parse_measurement(" 72 kg"), 72.0);
        assert_eq!(parse_measurement("-3.5e1x"), -35.0);
        assert_eq!(parse_measurement(".5"), 0.5);
        assert_eq!(parse_measurement("7."), 7.0);
        assert_eq!(parse_measurement("1e"), 1.0);
        assert_eq!(parse_measurement("Infinity"), f64::INFINITY);
    }

    #[test]
    fn measurement_rejects_non_numbers() {
        for raw in ["", "tall", ".", "-", "inf", "infinity", "nan", "NaN", "cm180"] {
            assert!(parse_measurement(raw).is_nan(), "{raw}");
        }
        assert!(bmi(parse_measurement("inf"), 70.0).is_none());
        assert_eq!(bmi(parse_measurement("180cm"), 72.0).unwrap().to_string(), "22.2 kg/m²");
    }
}
