//! Typed risk-domain models shared by the integration tests.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use faker_core::{FieldDefinition, Model, SchemaCatalog, SchemaError, TypeExpr};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Path of the fixture catalog shipped with the workspace.
pub const RISK_SCHEMA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../schemas/risk.yaml");

pub fn risk_catalog() -> SchemaCatalog {
    SchemaCatalog::from_file(RISK_SCHEMA).expect("Failed to load risk catalog")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShockTo {
    Asset,
    Factor,
}

impl ShockTo {
    pub fn type_expr() -> TypeExpr {
        TypeExpr::enumeration("ShockTo", ["ASSET", "FACTOR"])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shock {
    pub shock_id: Uuid,
    pub target: String,
    pub target_type: ShockTo,
    pub magnitude: f64,
}

impl Model for Shock {
    const NAME: &'static str = "Shock";

    fn fields() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("shock_id", TypeExpr::UUID),
            FieldDefinition::new("target", TypeExpr::STRING),
            FieldDefinition::new("target_type", ShockTo::type_expr()),
            FieldDefinition::new("magnitude", TypeExpr::FLOAT),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    pub scenario_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub shocks: Vec<Shock>,
}

impl Model for ScenarioDefinition {
    const NAME: &'static str = "ScenarioDefinition";

    fn fields() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("scenario_id", TypeExpr::UUID),
            FieldDefinition::new("name", TypeExpr::STRING),
            FieldDefinition::new("description", TypeExpr::optional(TypeExpr::STRING)),
            FieldDefinition::new("created_at", TypeExpr::DATETIME),
            FieldDefinition::new("shocks", TypeExpr::sequence(TypeExpr::record(Shock::NAME))),
        ]
    }

    fn register_nested(catalog: &mut SchemaCatalog) -> Result<(), SchemaError> {
        Shock::register(catalog)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pnl {
    pub base_pnl: f64,
    pub total_shock_pnl: f64,
}

impl Model for Pnl {
    const NAME: &'static str = "PnL";

    fn fields() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("base_pnl", TypeExpr::FLOAT),
            FieldDefinition::new("total_shock_pnl", TypeExpr::FLOAT),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPnl {
    pub scenario_id: Uuid,
    pub total: Pnl,
    pub pnl_by_asset: HashMap<Uuid, Pnl>,
}

impl Model for ScenarioPnl {
    const NAME: &'static str = "ScenarioPnL";

    fn fields() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("scenario_id", TypeExpr::UUID),
            FieldDefinition::new("total", TypeExpr::record(Pnl::NAME)),
            FieldDefinition::new(
                "pnl_by_asset",
                TypeExpr::mapping(TypeExpr::UUID, TypeExpr::record(Pnl::NAME)),
            ),
        ]
    }

    fn register_nested(catalog: &mut SchemaCatalog) -> Result<(), SchemaError> {
        Pnl::register(catalog)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub tenor: f64,
    pub rate: f64,
}

impl Model for CurvePoint {
    const NAME: &'static str = "CurvePoint";

    fn fields() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("tenor", TypeExpr::FLOAT),
            FieldDefinition::new("rate", TypeExpr::FLOAT),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldCurve {
    pub curve_id: Uuid,
    pub as_of: NaiveDate,
    pub points: Vec<CurvePoint>,
}

impl Model for YieldCurve {
    const NAME: &'static str = "YieldCurve";

    fn fields() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("curve_id", TypeExpr::UUID),
            FieldDefinition::new("as_of", TypeExpr::DATE),
            FieldDefinition::new("points", TypeExpr::sequence(TypeExpr::record(CurvePoint::NAME))),
        ]
    }

    fn register_nested(catalog: &mut SchemaCatalog) -> Result<(), SchemaError> {
        CurvePoint::register(catalog)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolPoint {
    pub strike: f64,
    pub expiry: NaiveDate,
    pub rates: Option<HashMap<Uuid, f64>>,
}

impl Model for VolPoint {
    const NAME: &'static str = "VolPoint";

    fn fields() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("strike", TypeExpr::FLOAT),
            FieldDefinition::new("expiry", TypeExpr::DATE),
            FieldDefinition::new(
                "rates",
                TypeExpr::optional(TypeExpr::mapping(TypeExpr::UUID, TypeExpr::FLOAT)),
            ),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilitySurface {
    pub surface_id: Uuid,
    pub points: Vec<VolPoint>,
}

impl Model for VolatilitySurface {
    const NAME: &'static str = "VolatilitySurface";

    fn fields() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("surface_id", TypeExpr::UUID),
            FieldDefinition::new("points", TypeExpr::sequence(TypeExpr::record(VolPoint::NAME))),
        ]
    }

    fn register_nested(catalog: &mut SchemaCatalog) -> Result<(), SchemaError> {
        VolPoint::register(catalog)
    }
}

/// Valuation input taking either a yield curve or a volatility surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionValuationRequest {
    pub request_id: Uuid,
    pub valuation_time: DateTime<Utc>,
    pub spot: f64,
    pub yield_curve: Option<YieldCurve>,
    pub vol_surface: Option<VolatilitySurface>,
}

impl Model for OptionValuationRequest {
    const NAME: &'static str = "OptionValuationRequest";

    fn fields() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("request_id", TypeExpr::UUID),
            FieldDefinition::new("valuation_time", TypeExpr::DATETIME),
            FieldDefinition::new("spot", TypeExpr::FLOAT),
            FieldDefinition::new(
                "yield_curve",
                TypeExpr::optional(TypeExpr::record(YieldCurve::NAME)),
            ),
            FieldDefinition::new(
                "vol_surface",
                TypeExpr::union(vec![TypeExpr::record(VolatilitySurface::NAME), TypeExpr::Null]),
            ),
        ]
    }

    fn register_nested(catalog: &mut SchemaCatalog) -> Result<(), SchemaError> {
        YieldCurve::register(catalog)?;
        VolatilitySurface::register(catalog)
    }

    fn validate(&self) -> Result<(), String> {
        if self.yield_curve.is_some() && self.vol_surface.is_some() {
            return Err("yield_curve and vol_surface are mutually exclusive".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Notional {
    Amount(i64),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: Uuid,
    pub notional: Notional,
    pub settle_time: NaiveTime,
    pub tags: Vec<String>,
    pub flags: HashMap<String, bool>,
}

impl Model for Trade {
    const NAME: &'static str = "Trade";

    fn fields() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("trade_id", TypeExpr::UUID),
            FieldDefinition::new(
                "notional",
                TypeExpr::union(vec![TypeExpr::INT, TypeExpr::STRING]),
            ),
            FieldDefinition::new("settle_time", TypeExpr::TIME),
            FieldDefinition::new("tags", TypeExpr::sequence(TypeExpr::STRING)),
            FieldDefinition::new("flags", TypeExpr::mapping(TypeExpr::STRING, TypeExpr::BOOL)),
        ]
    }
}
