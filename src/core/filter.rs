//! List query parameters and the conjunctive document filter
//!
//! Query parameters arrive as strings and are normalized into a
//! [`ListingFilter`]: empty strings count as absent, `isPublished` is true
//! only for the literal string `"true"`, and numeric parameters are coerced
//! without bounds checking — a non-numeric value coerces to NaN, a sentinel
//! that matches no document. All criteria are combined conjunctively.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw query parameters of `GET /api/listings`.
///
/// Everything is optional and arrives as a string; unknown parameters are
/// ignored by deserialization. Use [`ListingQuery::filter`] to obtain the
/// normalized criteria.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emirate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<String>,
}

/// Normalized filter criteria derived from a [`ListingQuery`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub emirate: Option<String>,
    pub city: Option<String>,
    pub community: Option<String>,
    pub property_type: Option<String>,
    pub purpose: Option<String>,
    /// Exact-match count; NaN when the parameter was not numeric.
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub is_published: Option<bool>,
}

/// Treat empty strings as absent, the way the query string does.
fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Coerce a numeric parameter. Non-numeric input yields NaN, which matches
/// no document in either backend.
fn coerce_number(value: &Option<String>) -> Option<f64> {
    present(value).map(|s| s.parse::<f64>().unwrap_or(f64::NAN))
}

impl ListingQuery {
    /// Normalize into filter criteria.
    pub fn filter(&self) -> ListingFilter {
        ListingFilter {
            emirate: present(&self.emirate),
            city: present(&self.city),
            community: present(&self.community),
            property_type: present(&self.property_type),
            purpose: present(&self.purpose),
            bedrooms: coerce_number(&self.bedrooms),
            bathrooms: coerce_number(&self.bathrooms),
            min_price: coerce_number(&self.min_price),
            max_price: coerce_number(&self.max_price),
            is_published: present(&self.is_published).map(|s| s == "true"),
        }
    }

    /// Render the set parameters as query pairs for an HTTP request.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let mut push = |key, value: &Option<String>| {
            if let Some(v) = value {
                pairs.push((key, v.clone()));
            }
        };
        push("emirate", &self.emirate);
        push("city", &self.city);
        push("community", &self.community);
        push("propertyType", &self.property_type);
        push("purpose", &self.purpose);
        push("bedrooms", &self.bedrooms);
        push("bathrooms", &self.bathrooms);
        push("minPrice", &self.min_price);
        push("maxPrice", &self.max_price);
        push("isPublished", &self.is_published);
        pairs
    }
}

/// Read a dotted path (`location.emirate`) out of a JSON document.
fn lookup<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(doc, |node, segment| node.get(segment))
}

fn field_eq_str(doc: &Value, path: &str, expected: &str) -> bool {
    lookup(doc, path).and_then(Value::as_str) == Some(expected)
}

fn field_eq_number(doc: &Value, path: &str, expected: f64) -> bool {
    // NaN compares unequal to everything, including itself.
    lookup(doc, path).and_then(Value::as_f64) == Some(expected)
}

impl ListingFilter {
    /// Whether a stored document satisfies every set criterion.
    pub fn matches(&self, doc: &Value) -> bool {
        if let Some(emirate) = &self.emirate
            && !field_eq_str(doc, "location.emirate", emirate)
        {
            return false;
        }
        if let Some(city) = &self.city
            && !field_eq_str(doc, "location.city", city)
        {
            return false;
        }
        if let Some(community) = &self.community
            && !field_eq_str(doc, "location.community", community)
        {
            return false;
        }
        if let Some(property_type) = &self.property_type
            && !field_eq_str(doc, "propertyType", property_type)
        {
            return false;
        }
        if let Some(purpose) = &self.purpose
            && !field_eq_str(doc, "purpose", purpose)
        {
            return false;
        }
        if let Some(published) = self.is_published
            && lookup(doc, "isPublished").and_then(Value::as_bool) != Some(published)
        {
            return false;
        }
        if let Some(bedrooms) = self.bedrooms
            && !field_eq_number(doc, "bedrooms", bedrooms)
        {
            return false;
        }
        if let Some(bathrooms) = self.bathrooms
            && !field_eq_number(doc, "bathrooms", bathrooms)
        {
            return false;
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            let Some(price) = lookup(doc, "price").and_then(Value::as_f64) else {
                return false;
            };
            if let Some(min) = self.min_price
                && !(price >= min)
            {
                return false;
            }
            if let Some(max) = self.max_price
                && !(price <= max)
            {
                return false;
            }
        }
        true
    }
}
