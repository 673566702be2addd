// Salary record domain model
use serde::{de, Deserialize, Deserializer, Serialize};

/// One row of the salary dataset.
///
/// Deserialization reads the source CSV's column names; serialization uses
/// the field names below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    #[serde(rename(deserialize = "ano"), deserialize_with = "deserialize_year")]
    pub year: i32,
    #[serde(rename(deserialize = "senioridade"))]
    pub seniority: String,
    #[serde(rename(deserialize = "contrato"))]
    pub contract_type: String,
    #[serde(rename(deserialize = "tamanho_empresa"))]
    pub company_size: String,
    #[serde(rename(deserialize = "cargo"))]
    pub role: String,
    #[serde(rename(deserialize = "remoto"))]
    pub remote_type: String,
    #[serde(rename(deserialize = "residencia_iso3"))]
    pub residence_iso3: String,
    #[serde(rename(deserialize = "usd"))]
    pub salary_usd: f64,
}

impl SalaryRecord {
    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if !self.salary_usd.is_finite() {
            return Err(format!("salary '{}' is not a finite number", self.salary_usd));
        }
        if self.salary_usd < 0.0 {
            return Err(format!("salary {} is negative", self.salary_usd));
        }
        let categories = [
            ("seniority", &self.seniority),
            ("contract_type", &self.contract_type),
            ("company_size", &self.company_size),
            ("role", &self.role),
            ("remote_type", &self.remote_type),
            ("residence_iso3", &self.residence_iso3),
        ];
        if let Some((field, _)) = categories.iter().find(|(_, value)| value.is_empty()) {
            return Err(format!("{field} is empty"));
        }
        Ok(())
    }
}

/// Years are sometimes exported as floats ("2023.0"); accept those but reject
/// anything with a fractional part.
fn deserialize_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() || raw.fract() != 0.0 {
        return Err(de::Error::custom(format!("year '{raw}' is not a whole number")));
    }
    if raw < i32::MIN as f64 || raw > i32::MAX as f64 {
        return Err(de::Error::custom(format!("year '{raw}' is out of range")));
    }
    Ok(raw as i32)
}

#[cfg(test)]
mod tests {
    use crate::test_support::record;

    #[test]
    fn test_validate_rejects_negative_salary() {
        let mut r = record(2024, "senior", "integral", "media", "Data Engineer", 1000.0);
        assert!(r.validate().is_ok());

        r.salary_usd = -1.0;
        assert!(r.validate().unwrap_err().contains("negative"));

        r.salary_usd = f64::NAN;
        assert!(r.validate().unwrap_err().contains("finite"));
    }

    #[test]
    fn test_validate_rejects_empty_categories() {
        let base = record(2024, "senior", "integral", "media", "Data Engineer", 1000.0);

        let mut r = base.clone();
        r.company_size.clear();
        assert_eq!(r.validate().unwrap_err(), "company_size is empty");

        let mut r = base.clone();
        r.remote_type.clear();
        assert_eq!(r.validate().unwrap_err(), "remote_type is empty");

        let mut r = base;
        r.residence_iso3.clear();
        assert_eq!(r.validate().unwrap_err(), "residence_iso3 is empty");
    }

    #[test]
    fn test_serializes_with_english_field_names() {
        let r = record(2023, "pleno", "integral", "grande", "Data Analyst", 50000.0);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["year"], 2023);
        assert_eq!(json["contract_type"], "integral");
        assert_eq!(json["salary_usd"], 50000.0);
        assert!(json.get("ano").is_none());
    }
}
