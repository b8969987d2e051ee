//! JSON request and response bodies.
//!
//! Field names follow the wire format clients already use (`P`, `GammaOil`,
//! `QMix`, ...), so the structs rename from snake case to Pascal case.

use pvtmix_core::constraint::ConstraintError;
use pvtmix_correlations::{Field, PvtOutput, RawPvtInput, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Body of `POST /pvt`.
///
/// `Rp` is accepted as any JSON number and must be a whole number.
/// Unknown keys are ignored. Incoming bodies go through [`parse_request`],
/// which reports problems per field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PvtRequest {
    /// Pressure (Pa).
    pub p: f64,
    /// Temperature (K).
    pub t: f64,
    /// Oil relative density.
    pub gamma_oil: f64,
    /// Gas relative density.
    pub gamma_gas: f64,
    /// Water relative density.
    pub gamma_wat: f64,
    /// Water cut, a fraction in `[0, 1]`.
    pub wct: f64,
    /// Production gas-oil ratio (m³/t).
    pub rp: f64,
    /// Liquid flow rate (m³).
    pub q_liq: f64,
}

impl Default for PvtRequest {
    fn default() -> Self {
        RawPvtInput::default().into()
    }
}

impl From<RawPvtInput> for PvtRequest {
    fn from(raw: RawPvtInput) -> Self {
        Self {
            p: raw.pressure,
            t: raw.temperature,
            gamma_oil: raw.gamma_oil,
            gamma_gas: raw.gamma_gas,
            gamma_wat: raw.gamma_wat,
            wct: raw.water_cut,
            rp: raw.gas_oil_ratio,
            q_liq: raw.liquid_rate,
        }
    }
}

impl From<PvtRequest> for RawPvtInput {
    fn from(request: PvtRequest) -> Self {
        Self {
            pressure: request.p,
            temperature: request.t,
            gamma_oil: request.gamma_oil,
            gamma_gas: request.gamma_gas,
            gamma_wat: request.gamma_wat,
            water_cut: request.wct,
            gas_oil_ratio: request.rp,
            liquid_rate: request.q_liq,
        }
    }
}

/// Body of a successful `POST /pvt` response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PvtResponse {
    /// Mixture flow rate (m³).
    pub q_mix: f64,
    /// Mixture density (kg/m³).
    pub rho_mix: f64,
    /// Mixture viscosity (cP).
    pub mu_mix: f64,
}

impl From<PvtOutput> for PvtResponse {
    fn from(output: PvtOutput) -> Self {
        let (q_mix, rho_mix, mu_mix) = output.values();
        Self {
            q_mix,
            rho_mix,
            mu_mix,
        }
    }
}

/// Body of a `422 Unprocessable Entity` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationDetail {
    pub detail: Vec<FieldError>,
}

/// One entry of a [`ValidationDetail`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Location of the offending value, e.g. `["body", "Wct"]`.
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
}

/// Extracts the request fields from a `POST /pvt` body.
///
/// Each field is pulled from the JSON object on its own. Numbers and
/// numeric strings are accepted. When a field is missing or not numeric,
/// the error lists every such field together with any constraint
/// violations among the fields that did parse.
///
/// # Errors
///
/// Returns a [`ValidationDetail`] located at `["body"]` if the body is not
/// valid JSON or not an object, and at `["body", <field>]` otherwise.
pub fn parse_request(body: &[u8]) -> Result<RawPvtInput, ValidationDetail> {
    let value: Value = serde_json::from_slice(body).map_err(|error| {
        debug!(%error, "request body is not valid JSON");
        ValidationDetail::json_invalid()
    })?;

    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(ValidationDetail {
                detail: vec![FieldError {
                    loc: vec![String::from("body")],
                    msg: String::from(
                        "Input should be a valid dictionary or object to extract fields from",
                    ),
                    kind: String::from("model_attributes_type"),
                    input: Some(other),
                }],
            });
        }
    };

    let mut raw = RawPvtInput::default();
    let mut detail = Vec::new();
    let mut incomplete = false;

    for field in Field::ALL {
        match extract(&object, field) {
            Ok(value) => {
                *raw.value_mut(field) = value;
                if let Err(source) = field.check(value) {
                    detail.push(FieldError::constraint(field, source, value));
                }
            }
            Err(error) => {
                incomplete = true;
                detail.push(error);
            }
        }
    }

    if incomplete {
        Err(ValidationDetail { detail })
    } else {
        Ok(raw)
    }
}

fn extract(object: &Map<String, Value>, field: Field) -> Result<f64, FieldError> {
    let Some(value) = object.get(field.name()) else {
        return Err(FieldError::new(field, "missing", "Field required", None));
    };

    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            return text.trim().parse().map_err(|_| {
                FieldError::new(
                    field,
                    "float_parsing",
                    "Input should be a valid number, unable to parse string as a number",
                    Some(value.clone()),
                )
            });
        }
        _ => None,
    };

    parsed.ok_or_else(|| {
        FieldError::new(
            field,
            "float_type",
            "Input should be a valid number",
            Some(value.clone()),
        )
    })
}

impl ValidationDetail {
    fn json_invalid() -> Self {
        Self {
            detail: vec![FieldError {
                loc: vec![String::from("body")],
                msg: String::from("JSON decode error"),
                kind: String::from("json_invalid"),
                input: None,
            }],
        }
    }

    /// Describes every field that failed its constraint.
    #[must_use]
    pub fn from_validation_errors(raw: &RawPvtInput, errors: &[ValidationError]) -> Self {
        Self {
            detail: errors
                .iter()
                .map(|error| {
                    FieldError::constraint(error.field, error.source, raw.value(error.field))
                })
                .collect(),
        }
    }
}

impl FieldError {
    fn new(field: Field, kind: &str, msg: &str, input: Option<Value>) -> Self {
        Self {
            loc: vec![String::from("body"), field.name().to_string()],
            msg: msg.to_string(),
            kind: kind.to_string(),
            input,
        }
    }

    fn constraint(field: Field, source: ConstraintError, value: f64) -> Self {
        let (kind, msg) = describe(field, source);
        Self::new(field, kind, msg, Some(Value::from(value)))
    }
}

fn describe(field: Field, error: ConstraintError) -> (&'static str, &'static str) {
    match (field, error) {
        (_, ConstraintError::Zero | ConstraintError::Negative) => {
            ("greater_than", "Input should be greater than 0")
        }
        (Field::WaterCut, ConstraintError::BelowMinimum) => (
            "greater_than_equal",
            "Input should be greater than or equal to 0",
        ),
        (Field::WaterCut, ConstraintError::AboveMaximum) => {
            ("less_than_equal", "Input should be less than or equal to 1")
        }
        (_, ConstraintError::NotIntegral) => (
            "int_from_float",
            "Input should be a valid integer, got a number with a fractional part",
        ),
        (_, ConstraintError::AboveMaximum) => ("int_too_large", "Input is too large"),
        (_, ConstraintError::NotANumber | ConstraintError::NotFinite) => {
            ("finite_number", "Input should be a finite number")
        }
        _ => ("value_error", "Input is out of range"),
    }
}

/// Body of a `500 Internal Server Error` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use pvtmix_correlations::PvtInput;
    use serde_json::json;

    use super::*;

    #[test]
    fn request_uses_wire_names() {
        let value = serde_json::to_value(PvtRequest::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "P": 40.5,
                "T": 296.0,
                "GammaOil": 0.8,
                "GammaGas": 0.7,
                "GammaWat": 1.0,
                "Wct": 0.5,
                "Rp": 100.0,
                "QLiq": 90.0,
            })
        );
    }

    #[test]
    fn integer_literals_and_extra_keys_are_accepted() {
        let request: PvtRequest = serde_json::from_value(json!({
            "P": 40.5, "T": 296, "GammaOil": 0.8, "GammaGas": 0.7,
            "GammaWat": 1, "Wct": 0.5, "Rp": 100, "QLiq": 90, "Comment": "well 7"
        }))
        .unwrap();

        assert_eq!(request, PvtRequest::default());
    }

    fn parse(body: &Value) -> Result<RawPvtInput, ValidationDetail> {
        parse_request(&serde_json::to_vec(body).unwrap())
    }

    fn sample() -> Value {
        serde_json::to_value(PvtRequest::default()).unwrap()
    }

    #[test]
    fn parses_sample() {
        assert_eq!(parse(&sample()).unwrap(), RawPvtInput::default());
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let mut body = sample();
        body["T"] = json!(" 296 ");
        body["Rp"] = json!("100");

        assert_eq!(parse(&body).unwrap(), RawPvtInput::default());
    }

    #[test]
    fn constraint_violations_are_left_to_validation() {
        let mut body = sample();
        body["Wct"] = json!(1.5);

        let raw = parse(&body).unwrap();
        assert_eq!(raw.water_cut, 1.5);
    }

    #[test]
    fn missing_fields_are_reported_per_field() {
        let mut body = sample();
        let object = body.as_object_mut().unwrap();
        object.remove("T");
        object.remove("QLiq");

        let detail = parse(&body).unwrap_err();
        assert_eq!(
            serde_json::to_value(&detail).unwrap(),
            json!({
                "detail": [
                    { "loc": ["body", "T"], "msg": "Field required", "type": "missing" },
                    { "loc": ["body", "QLiq"], "msg": "Field required", "type": "missing" },
                ]
            })
        );
    }

    #[test]
    fn wrong_types_are_reported_with_their_input() {
        let mut body = sample();
        body["T"] = json!("hot");
        body["GammaGas"] = json!(null);
        body["Wct"] = json!([0.5]);

        let detail = parse(&body).unwrap_err();
        let entries: Vec<_> = detail
            .detail
            .iter()
            .map(|e| (e.loc[1].as_str(), e.kind.as_str(), e.input.clone()))
            .collect();

        assert_eq!(
            entries,
            [
                ("T", "float_parsing", Some(json!("hot"))),
                ("GammaGas", "float_type", Some(Value::Null)),
                ("Wct", "float_type", Some(json!([0.5]))),
            ]
        );
    }

    #[test]
    fn type_errors_are_combined_with_constraint_errors() {
        let mut body = sample();
        body["P"] = json!(0);
        body["Rp"] = json!("lots");

        let detail = parse(&body).unwrap_err();
        let entries: Vec<_> = detail
            .detail
            .iter()
            .map(|e| (e.loc[1].as_str(), e.kind.as_str()))
            .collect();

        assert_eq!(entries, [("P", "greater_than"), ("Rp", "float_parsing")]);
    }

    #[test]
    fn malformed_json_is_located_at_the_body() {
        let detail = parse_request(b"{\"P\": ").unwrap_err();
        assert_eq!(detail.detail.len(), 1);
        assert_eq!(detail.detail[0].kind, "json_invalid");
        assert_eq!(detail.detail[0].loc, ["body"]);
    }

    #[test]
    fn non_object_body_is_located_at_the_body() {
        let detail = parse(&json!([40.5, 296])).unwrap_err();
        assert_eq!(detail.detail[0].kind, "model_attributes_type");
        assert_eq!(detail.detail[0].loc, ["body"]);
        assert_eq!(detail.detail[0].input, Some(json!([40.5, 296])));
    }

    #[test]
    fn validation_errors_name_each_field() {
        let raw = RawPvtInput {
            water_cut: 1.2,
            gas_oil_ratio: 100.5,
            ..RawPvtInput::default()
        };
        let errors = PvtInput::validate_all(raw).unwrap_err();
        let detail = ValidationDetail::from_validation_errors(&raw, &errors);

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(
            value,
            json!({
                "detail": [
                    {
                        "loc": ["body", "Wct"],
                        "msg": "Input should be less than or equal to 1",
                        "type": "less_than_equal",
                        "input": 1.2,
                    },
                    {
                        "loc": ["body", "Rp"],
                        "msg": "Input should be a valid integer, got a number with a fractional part",
                        "type": "int_from_float",
                        "input": 100.5,
                    },
                ]
            })
        );
    }

    #[test]
    fn non_positive_values_are_greater_than_errors() {
        let raw = RawPvtInput {
            pressure: 0.0,
            liquid_rate: -5.0,
            ..RawPvtInput::default()
        };
        let errors = PvtInput::validate_all(raw).unwrap_err();
        let detail = ValidationDetail::from_validation_errors(&raw, &errors);

        let kinds: Vec<_> = detail.detail.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, ["greater_than", "greater_than"]);
        assert_eq!(detail.detail[0].loc, ["body", "P"]);
        assert_eq!(detail.detail[1].loc, ["body", "QLiq"]);
    }
}
