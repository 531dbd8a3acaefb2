//! Prediction request schema

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PredictError;
use crate::preprocess::FeatureValue;

/// One vehicle to price. Every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub year: i64,
    pub odometer: f64,
    pub manufacturer_id: i64,
    pub fuel_id: i64,
    pub transmission_id: i64,
    pub type_id: i64,
    pub age_car: i64,
}

impl PredictRequest {
    /// Request field names, in schema order
    pub const FIELDS: [&'static str; 7] = [
        "year",
        "odometer",
        "manufacturer_id",
        "fuel_id",
        "transmission_id",
        "type_id",
        "age_car",
    ];

    /// Validate an untyped JSON body against the schema
    ///
    /// Absent fields are reported together; a present field of the wrong
    /// type is reported through serde's message.
    pub fn from_value(body: Value) -> Result<Self, PredictError> {
        let Some(object) = body.as_object() else {
            return Err(PredictError::InvalidBody(format!(
                "expected a JSON object, got {}",
                json_type_name(&body)
            )));
        };

        let missing: Vec<String> = Self::FIELDS
            .iter()
            .filter(|f| !object.contains_key(**f))
            .map(|f| f.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PredictError::MissingFields(missing));
        }

        serde_json::from_value(body).map_err(|e| PredictError::InvalidBody(e.to_string()))
    }

    /// Value of a column by name
    pub fn column(&self, name: &str) -> Option<FeatureValue> {
        let value = match name {
            "year" => FeatureValue::Int(self.year),
            "odometer" => FeatureValue::Float(self.odometer),
            "manufacturer_id" => FeatureValue::Int(self.manufacturer_id),
            "fuel_id" => FeatureValue::Int(self.fuel_id),
            "transmission_id" => FeatureValue::Int(self.transmission_id),
            "type_id" => FeatureValue::Int(self.type_id),
            "age_car" => FeatureValue::Int(self.age_car),
            _ => return None,
        };
        Some(value)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body() -> Value {
        json!({
            "year": 2015,
            "odometer": 60000.0,
            "manufacturer_id": 3,
            "fuel_id": 1,
            "transmission_id": 0,
            "type_id": 2,
            "age_car": 9
        })
    }

    #[test]
    fn test_from_value() {
        let req = PredictRequest::from_value(body()).unwrap();
        assert_eq!(req.year, 2015);
        assert_eq!(req.odometer, 60000.0);
        assert_eq!(req.age_car, 9);
    }

    #[test]
    fn test_integer_odometer_accepted() {
        let mut body = body();
        body["odometer"] = json!(60000);
        let req = PredictRequest::from_value(body).unwrap();
        assert_eq!(req.odometer, 60000.0);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let mut body = body();
        body["color"] = json!("red");
        assert!(PredictRequest::from_value(body).is_ok());
    }

    #[test]
    fn test_missing_fields_all_listed() {
        let mut body = body();
        let object = body.as_object_mut().unwrap();
        object.remove("year");
        object.remove("type_id");

        let err = PredictRequest::from_value(body).unwrap_err();
        assert_eq!(
            err,
            PredictError::MissingFields(vec!["year".into(), "type_id".into()])
        );
    }

    #[test]
    fn test_wrong_type_rejected() {
        let mut body = body();
        body["year"] = json!("2015");
        let err = PredictRequest::from_value(body).unwrap_err();
        assert_eq!(err.kind(), "InvalidBody");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_fractional_integer_field_rejected() {
        let mut body = body();
        body["fuel_id"] = json!(1.5);
        assert!(PredictRequest::from_value(body).is_err());
    }

    #[test]
    fn test_non_object_rejected() {
        let err = PredictRequest::from_value(json!([1, 2, 3])).unwrap_err();
        assert_eq!(
            err,
            PredictError::InvalidBody("expected a JSON object, got an array".into())
        );
    }

    #[test]
    fn test_column_lookup() {
        let req = PredictRequest::from_value(body()).unwrap();
        for field in PredictRequest::FIELDS {
            assert!(req.column(field).is_some(), "{field}");
        }
        assert_eq!(req.column("odometer"), Some(FeatureValue::Float(60000.0)));
        assert_eq!(req.column("color"), None);
    }
}
