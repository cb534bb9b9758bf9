//! Astronomical data and physical constants read from YAML.
//!
//! Numbers are stored as a mantissa plus a decimal exponent, the way the
//! reference tables print them:
//!
//! ```yaml
//! constants:
//!   - name: Gravitational constant
//!     symbol: G
//!     value: 6.674
//!     order: -11
//!     unit: m^3 kg^-1 s^-2
//!
//! bodies:
//!   Earth:
//!     type: planet
//!     physical_data:
//!       mass: { value: 5.972, order: 24, unit: kg }
//!       radius: { value: 6.371, order: 6, unit: m }
//!     rotation_data:
//!       rotational_velocity: { value: 465.1, unit: m/s }
//!       obliquity: 23.44
//!     orbital_data:
//!       semimajor_axis: { value: 1.496, order: 11, unit: m }
//! ```
//!
//! A bare number is read with order 0. Consumers only ever see descaled SI
//! values through [`DataProvider`] and [`ConstantsProvider`].

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::simulation::states::{Body, BodyType};

const BUILTIN: &str = include_str!("../../data/astronomical_data.yaml");

/// Source of per-body physical and orbital data
pub trait DataProvider {
    fn body_record(&self, name: &str) -> EngineResult<BodyRecord>;
}

/// Source of universal constants
pub trait ConstantsProvider {
    fn constant_by_symbol(&self, symbol: &str) -> EngineResult<f64>;
    fn constant_by_name(&self, name: &str) -> EngineResult<f64>;
}

/// Descaled SI data for one body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyRecord {
    pub name: String,
    pub body_type: Option<BodyType>,
    pub mass: f64,                        // kg
    pub radius: f64,                      // m
    pub rotational_velocity: f64,         // equatorial surface speed, m/s
    pub obliquity: f64,                   // degrees
    pub semimajor_axis: Option<f64>,      // m
    pub orbital_velocity: Option<f64>,    // m/s
    pub inclination: Option<f64>,         // degrees
}

impl BodyRecord {
    pub fn semimajor_axis(&self) -> EngineResult<f64> {
        self.semimajor_axis
            .ok_or_else(|| EngineError::missing(&self.name, "semimajor_axis"))
    }

    pub fn orbital_velocity(&self) -> EngineResult<f64> {
        self.orbital_velocity
            .ok_or_else(|| EngineError::missing(&self.name, "orbital_velocity"))
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(untagged)]
enum Quantity {
    Plain(f64),
    Scaled {
        value: f64,
        #[serde(default)]
        order: i32,
    },
}

impl Quantity {
    fn si(&self) -> f64 {
        match *self {
            Quantity::Plain(v) => v,
            Quantity::Scaled { value, order } => value * 10f64.powi(order),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
struct ConstantEntry {
    name: String,
    symbol: String,
    value: f64,
    #[serde(default)]
    order: i32,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct BodyEntry {
    #[serde(rename = "type")]
    body_type: Option<BodyType>,
    #[serde(default)]
    physical_data: BTreeMap<String, Quantity>,
    #[serde(default)]
    rotation_data: BTreeMap<String, Quantity>,
    #[serde(default)]
    orbital_data: BTreeMap<String, Quantity>,
}

impl BodyEntry {
    /// Look a field up across all data categories
    fn field(&self, key: &str) -> Option<f64> {
        [&self.physical_data, &self.rotation_data, &self.orbital_data]
            .into_iter()
            .find_map(|category| category.get(key))
            .map(Quantity::si)
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Catalog {
    #[serde(default)]
    constants: Vec<ConstantEntry>,
    #[serde(default)]
    bodies: BTreeMap<String, BodyEntry>,
}

impl Catalog {
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }

    /// Solar system, the Moon and TRAPPIST-1, shipped with the crate
    pub fn builtin() -> Result<Self, serde_yaml::Error> {
        Self::from_yaml_str(BUILTIN)
    }

    pub fn body_names(&self) -> impl Iterator<Item = &str> {
        self.bodies.keys().map(String::as_str)
    }
}

impl DataProvider for Catalog {
    fn body_record(&self, name: &str) -> EngineResult<BodyRecord> {
        let entry = self
            .bodies
            .get(name)
            .ok_or_else(|| EngineError::NotFound(name.to_string()))?;
        let required = |key: &str| entry.field(key).ok_or_else(|| EngineError::missing(name, key));

        Ok(BodyRecord {
            name: name.to_string(),
            body_type: entry.body_type,
            mass: required("mass")?,
            radius: required("radius")?,
            rotational_velocity: required("rotational_velocity")?,
            obliquity: required("obliquity")?,
            semimajor_axis: entry.field("semimajor_axis"),
            orbital_velocity: entry.field("orbital_velocity"),
            inclination: entry.field("inclination"),
        })
    }
}

impl ConstantsProvider for Catalog {
    fn constant_by_symbol(&self, symbol: &str) -> EngineResult<f64> {
        self.constants
            .iter()
            .find(|c| c.symbol == symbol)
            .map(|c| c.value * 10f64.powi(c.order))
            .ok_or_else(|| EngineError::NotFound(symbol.to_string()))
    }

    fn constant_by_name(&self, name: &str) -> EngineResult<f64> {
        self.constants
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value * 10f64.powi(c.order))
            .ok_or_else(|| EngineError::NotFound(name.to_string()))
    }
}

/// Build a body entirely from provider data. Nothing is returned unless every
/// required field is present and physical.
pub fn prefab_body(name: &str, provider: &impl DataProvider) -> EngineResult<Body> {
    let record = provider.body_record(name)?;
    body_from_record(&record)
}

pub fn body_from_record(record: &BodyRecord) -> EngineResult<Body> {
    let mut body = Body::new(&record.name, record.mass, record.radius)?
        .with_rotational_velocity(record.rotational_velocity)?
        .with_obliquity(record.obliquity);
    if let Some(t) = record.body_type {
        body = body.with_type(t);
    }
    Ok(body)
}
