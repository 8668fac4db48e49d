//! Field-name schema for live market feeds.
//!
//! Feeds disagree on naming, so each semantic role is read from an ordered
//! list of candidate field names and converted by a role extractor.

use serde::Serialize;
use serde_json::Value;

use dualtem_core::Date;

use crate::json;

/// Meaning of a feed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Price per 100 of face.
    Price,
    /// Annual effective yield.
    Yield,
    /// Face (par) value.
    Face,
    /// Maturity date.
    Maturity,
}

impl Role {
    /// All roles, in extraction order.
    pub const ALL: [Role; 4] = [Role::Price, Role::Yield, Role::Face, Role::Maturity];

    /// The extractor converting raw values for this role.
    pub fn extractor(self) -> &'static dyn FieldExtractor {
        match self {
            Role::Price => &PriceExtractor,
            Role::Yield => &YieldExtractor,
            Role::Face => &FaceExtractor,
            Role::Maturity => &MaturityExtractor,
        }
    }
}

/// A converted field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    /// Numeric value.
    Number(f64),
    /// Calendar date.
    Date(Date),
}

/// Converts a raw JSON value for one role.
pub trait FieldExtractor: Send + Sync {
    /// Role handled.
    fn role(&self) -> Role;

    /// Converted value, or `None` when the raw value is unusable.
    fn extract(&self, raw: &Value) -> Option<FieldValue>;
}

/// JSON numbers only.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceExtractor;

impl FieldExtractor for PriceExtractor {
    fn role(&self) -> Role {
        Role::Price
    }

    fn extract(&self, raw: &Value) -> Option<FieldValue> {
        json::strict_number(raw).map(FieldValue::Number)
    }
}

/// JSON numbers; magnitudes above one are percentages and scaled to decimals.
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldExtractor;

impl YieldExtractor {
    /// `31.5` becomes `0.315`; `0.315` is kept.
    pub fn normalize(value: f64) -> f64 {
        if value.abs() > 1.0 {
            value / 100.0
        } else {
            value
        }
    }
}

impl FieldExtractor for YieldExtractor {
    fn role(&self) -> Role {
        Role::Yield
    }

    fn extract(&self, raw: &Value) -> Option<FieldValue> {
        json::strict_number(raw)
            .map(Self::normalize)
            .map(FieldValue::Number)
    }
}

/// JSON numbers only.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaceExtractor;

impl FieldExtractor for FaceExtractor {
    fn role(&self) -> Role {
        Role::Face
    }

    fn extract(&self, raw: &Value) -> Option<FieldValue> {
        json::strict_number(raw).map(FieldValue::Number)
    }
}

/// Date text in any tolerated format.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaturityExtractor;

impl FieldExtractor for MaturityExtractor {
    fn role(&self) -> Role {
        Role::Maturity
    }

    fn extract(&self, raw: &Value) -> Option<FieldValue> {
        json::date(raw).map(FieldValue::Date)
    }
}

/// Symbol fields and ordered `(field, role)` pairs of a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSchema {
    symbol_fields: Vec<String>,
    fields: Vec<(String, Role)>,
}

impl Default for FeedSchema {
    fn default() -> Self {
        Self::new(["symbol", "ticker", "code", "name", "bond"])
            .field("last", Role::Price)
            .field("price", Role::Price)
            .field("close", Role::Price)
            .field("p", Role::Price)
            .field("c", Role::Price)
            .field("px", Role::Price)
            .field("ytm", Role::Yield)
            .field("yield", Role::Yield)
            .field("tirea", Role::Yield)
            .field("tir", Role::Yield)
            .field("ear", Role::Yield)
            .field("face", Role::Face)
            .field("par", Role::Face)
            .field("vn", Role::Face)
            .field("maturity", Role::Maturity)
            .field("maturityDate", Role::Maturity)
            .field("due", Role::Maturity)
            .field("vencimiento", Role::Maturity)
            .field("vto", Role::Maturity)
    }
}

impl FeedSchema {
    /// Schema with the given symbol fields and no role fields.
    pub fn new<I, S>(symbol_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbol_fields: symbol_fields.into_iter().map(Into::into).collect(),
            fields: Vec::new(),
        }
    }

    /// Append a candidate field for `role`; earlier fields take priority.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, role: Role) -> Self {
        self.fields.push((name.into(), role));
        self
    }

    /// Candidate field names for `role`, in priority order.
    pub fn fields_for(&self, role: Role) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(move |(_, r)| *r == role)
            .map(|(name, _)| name.as_str())
    }

    /// True if any symbol field of `node` contains `ticker` (upper-case).
    pub fn matches_symbol(&self, node: &serde_json::Map<String, Value>, ticker: &str) -> bool {
        self.symbol_fields.iter().any(|field| {
            node.get(field)
                .is_some_and(|v| json::text(v).to_uppercase().contains(ticker))
        })
    }

    /// First usable `(field, value)` for `role` in `node`.
    pub fn extract<'a>(
        &'a self,
        node: &serde_json::Map<String, Value>,
        role: Role,
    ) -> Option<(&'a str, FieldValue)> {
        let extractor = role.extractor();
        self.fields_for(role).find_map(|field| {
            node.get(field)
                .and_then(|raw| extractor.extract(raw))
                .map(|value| (field, value))
        })
    }
}
