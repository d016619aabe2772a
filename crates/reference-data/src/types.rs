use serde::{Deserialize, Serialize};

/// An advisory about pest or disease pressure in a region
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PestAlert {
    pub id: String,
    pub crop: String,
    pub pest_name: String,
    /// Free-form severity label, e.g. "low", "high"
    pub severity: String,
    pub region: String,
    pub description: String,
    pub advisory: String,
    /// ISO date the alert was issued
    pub issued_on: String,
}

/// A commodity price quote from one market on one day
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketPrice {
    pub commodity: String,
    pub variety: Option<String>,
    pub market: String,
    pub district: String,
    pub state: String,
    /// Prices are per quintal
    pub min_price: f64,
    pub max_price: f64,
    pub modal_price: f64,
    pub arrival_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct GovernmentScheme {
    pub id: String,
    pub name: String,
    pub description: String,
    pub eligibility: String,
    pub benefits: String,
    pub how_to_apply: String,
    pub link: Option<String>,
}

/// Optional filters for the market price resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketPriceQuery {
    pub commodity: Option<String>,
    pub state: Option<String>,
}

impl MarketPriceQuery {
    #[must_use]
    pub fn commodity(mut self, commodity: impl Into<String>) -> Self {
        self.commodity = Some(commodity.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Query-string pairs for the filters that are set and non-blank
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::new();
        if let Some(commodity) = self.commodity.as_deref().filter(|v| !v.trim().is_empty()) {
            params.push(("commodity", commodity));
        }
        if let Some(state) = self.state.as_deref().filter(|v| !v.trim().is_empty()) {
            params.push(("state", state));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn query_params_skip_unset_and_blank_filters() {
        assert!(MarketPriceQuery::default().params().is_empty());
        assert_eq!(
            MarketPriceQuery::default().commodity("Tomato").params(),
            vec![("commodity", "Tomato")]
        );
        assert_eq!(
            MarketPriceQuery::default()
                .commodity(" ")
                .state("Karnataka")
                .params(),
            vec![("state", "Karnataka")]
        );
    }

    #[test]
    fn records_tolerate_missing_fields() {
        let alert: PestAlert =
            serde_json::from_str(r#"{"crop":"cotton","pestName":"pink bollworm"}"#).unwrap();
        assert_eq!(alert.pest_name, "pink bollworm");
        assert_eq!(alert.severity, "");

        let price: MarketPrice =
            serde_json::from_str(r#"{"commodity":"Onion","modalPrice":1850.5}"#).unwrap();
        assert_eq!(price.modal_price, 1850.5);
        assert_eq!(price.variety, None);
    }
}
