//! Declarative listing schema
//!
//! One rule per field, applied at the service boundary before every write.
//! Create validates the whole document; update validates only the fields
//! the patch carries. Because partial updates replace nested objects
//! wholesale, a patched nested object is validated as a complete value —
//! its required subfields must be present.
//!
//! Fields outside the schema are allowed and pass through untouched.

use super::validators::{
    boolean, email, in_list, min_value, number, object, string, string_array, string_length,
};
use serde_json::Value;

const PROPERTY_TYPES: &[&str] = &["apartment", "villa", "townhouse", "penthouse"];
const PURPOSES: &[&str] = &["sale", "rent"];
const STATUSES: &[&str] = &["draft", "published"];
const COMPLETION_STATUSES: &[&str] = &["ready", "off-plan", "under-construction"];
const OWNERSHIPS: &[&str] = &["freehold", "leasehold"];

type Check = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

struct FieldRule {
    /// Dotted path from the document root, e.g. `location.emirate`.
    path: &'static str,
    /// Required fields must be present and non-null whenever their parent
    /// object is being written.
    required: bool,
    checks: Vec<Check>,
}

fn rule(path: &'static str, required: bool, checks: Vec<Check>) -> FieldRule {
    FieldRule {
        path,
        required,
        checks,
    }
}

fn boxed<V>(validator: V) -> Check
where
    V: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
{
    Box::new(validator)
}

fn listing_rules() -> Vec<FieldRule> {
    vec![
        rule(
            "title",
            true,
            vec![boxed(string()), boxed(string_length(3, 200))],
        ),
        rule(
            "description",
            true,
            vec![boxed(string()), boxed(string_length(10, 5000))],
        ),
        rule("price", true, vec![boxed(number()), boxed(min_value(0.0))]),
        rule("currency", true, vec![boxed(string())]),
        rule(
            "propertyType",
            true,
            vec![boxed(string()), boxed(in_list(PROPERTY_TYPES))],
        ),
        rule(
            "purpose",
            true,
            vec![boxed(string()), boxed(in_list(PURPOSES))],
        ),
        rule("sizeSqFt", true, vec![boxed(number())]),
        rule("bedrooms", true, vec![boxed(number())]),
        rule("bathrooms", true, vec![boxed(number())]),
        rule("parkingSpots", false, vec![boxed(number())]),
        rule("location", true, vec![boxed(object())]),
        rule(
            "location.emirate",
            true,
            vec![boxed(string()), boxed(string_length(1, 120))],
        ),
        rule(
            "location.city",
            true,
            vec![boxed(string()), boxed(string_length(1, 120))],
        ),
        rule("location.buildingName", false, vec![boxed(string())]),
        rule("location.community", false, vec![boxed(string())]),
        rule("location.street", false, vec![boxed(string())]),
        rule("location.coordinates", true, vec![boxed(object())]),
        rule("location.coordinates.lat", true, vec![boxed(number())]),
        rule("location.coordinates.lng", true, vec![boxed(number())]),
        rule(
            "status",
            true,
            vec![boxed(string()), boxed(in_list(STATUSES))],
        ),
        rule("isPublished", true, vec![boxed(boolean())]),
        rule("amenities", false, vec![boxed(string_array())]),
        rule("developer", false, vec![boxed(string())]),
        rule(
            "completionStatus",
            false,
            vec![boxed(string()), boxed(in_list(COMPLETION_STATUSES))],
        ),
        rule("yearBuilt", false, vec![boxed(number())]),
        rule("paymentPlan", false, vec![boxed(object())]),
        rule("paymentPlan.available", true, vec![boxed(boolean())]),
        rule(
            "ownership",
            false,
            vec![boxed(string()), boxed(in_list(OWNERSHIPS))],
        ),
        rule("agent", false, vec![boxed(object())]),
        rule(
            "agent.name",
            true,
            vec![boxed(string()), boxed(string_length(1, 120))],
        ),
        rule(
            "agent.phone",
            true,
            vec![boxed(string()), boxed(string_length(1, 40))],
        ),
        rule("agent.email", true, vec![boxed(string()), boxed(email())]),
        rule("agent.company", false, vec![boxed(string())]),
        rule("createdAt", false, vec![boxed(string())]),
        rule("updatedAt", false, vec![boxed(string())]),
    ]
}

/// Which write is being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
}

/// Validate a payload against the listing schema.
///
/// Returns all violations, not just the first.
pub fn validate(payload: &Value, operation: Operation) -> Result<(), Vec<String>> {
    let Some(root) = payload.as_object() else {
        return Err(vec!["payload must be a JSON object".to_string()]);
    };

    let mut errors = Vec::new();

    for rule in listing_rules() {
        let (head, rest) = match rule.path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (rule.path, None),
        };

        let Some(head_value) = root.get(head).filter(|v| !v.is_null()) else {
            // On update an untouched top-level field is simply not being
            // written; on create every required root must be there.
            if rest.is_none() && rule.required && operation == Operation::Create {
                errors.push(format!("'{}' is required", rule.path));
            }
            continue;
        };

        let target = match rest {
            None => Some(head_value),
            Some(rest) => rest
                .split('.')
                .try_fold(head_value, |node, segment| node.get(segment))
                .filter(|v| !v.is_null()),
        };

        match target {
            Some(value) => {
                for check in &rule.checks {
                    if let Err(message) = check(rule.path, value) {
                        errors.push(message);
                    }
                }
            }
            None => {
                // The parent object is being written, so its required
                // subfields must come along with it.
                if rule.required {
                    errors.push(format!("'{}' is required", rule.path));
                }
            }
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate a complete document for creation.
pub fn validate_create(payload: &Value) -> Result<(), Vec<String>> {
    validate(payload, Operation::Create)
}

/// Validate a partial patch for update.
pub fn validate_update(patch: &Value) -> Result<(), Vec<String>> {
    validate(patch, Operation::Update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "title": "Luxury 2BR Apartment",
            "description": "A premium 2-bedroom apartment in Dubai Marina.",
            "price": 1_850_000,
            "currency": "AED",
            "propertyType": "apartment",
            "purpose": "sale",
            "sizeSqFt": 1380,
            "bedrooms": 2,
            "bathrooms": 3,
            "location": {
                "emirate": "Dubai",
                "city": "Dubai Marina",
                "coordinates": {"lat": 25.085779, "lng": 55.14545}
            },
            "status": "draft",
            "isPublished": false
        })
    }

    #[test]
    fn valid_payload_passes_create() {
        assert!(validate_create(&valid_payload()).is_ok());
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(validate_create(&json!("not a document")).is_err());
        assert!(validate_create(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let errors = validate_create(&json!({"title": "Apt"})).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("'description'")));
        assert!(errors.iter().any(|e| e.contains("'price'")));
        assert!(errors.iter().any(|e| e.contains("'location'")));
    }

    #[test]
    fn short_title_is_rejected() {
        let mut payload = valid_payload();
        payload["title"] = json!("ab");
        let errors = validate_create(&payload).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("at least 3")));
    }

    #[test]
    fn short_description_is_rejected() {
        let mut payload = valid_payload();
        payload["description"] = json!("too short");
        // nine characters
        let errors = validate_create(&payload).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("at least 10")));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut payload = valid_payload();
        payload["price"] = json!(-100);
        let errors = validate_create(&payload).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("'price'")));
    }

    #[test]
    fn unknown_enum_value_is_rejected() {
        let mut payload = valid_payload();
        payload["propertyType"] = json!("castle");
        let errors = validate_create(&payload).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("'propertyType'")));
    }

    #[test]
    fn missing_coordinates_are_reported() {
        let mut payload = valid_payload();
        payload["location"] = json!({"emirate": "Dubai", "city": "Deira"});
        let errors = validate_create(&payload).unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| e.contains("'location.coordinates'"))
        );
    }

    #[test]
    fn agent_is_optional_but_validated_when_present() {
        let mut payload = valid_payload();
        assert!(validate_create(&payload).is_ok());

        payload["agent"] = json!({"name": "Aqib", "phone": "+971501112233", "email": "nope"});
        let errors = validate_create(&payload).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("valid email")));

        payload["agent"]["email"] = json!("aqib@example.com");
        assert!(validate_create(&payload).is_ok());
    }

    #[test]
    fn unknown_extra_fields_are_allowed() {
        let mut payload = valid_payload();
        payload["virtualTourUrl"] = json!("https://example.com/tour");
        assert!(validate_create(&payload).is_ok());
    }

    #[test]
    fn update_accepts_partial_patches() {
        assert!(validate_update(&json!({"price": 500_000})).is_ok());
        assert!(validate_update(&json!({"title": "New marina apartment"})).is_ok());
        assert!(
            validate_update(&json!({"isPublished": true, "status": "published"})).is_ok()
        );
    }

    #[test]
    fn update_still_checks_present_fields() {
        assert!(validate_update(&json!({"price": -5})).is_err());
        assert!(validate_update(&json!({"title": "ab"})).is_err());
        assert!(validate_update(&json!({"purpose": "lease"})).is_err());
    }

    #[test]
    fn update_of_nested_object_requires_a_complete_value() {
        // A patched location replaces the old one wholesale, so it must be
        // complete on its own.
        let errors =
            validate_update(&json!({"location": {"emirate": "Sharjah"}})).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("'location.city'")));
        assert!(
            errors
                .iter()
                .any(|e| e.contains("'location.coordinates'"))
        );

        assert!(
            validate_update(&json!({"location": {
                "emirate": "Sharjah",
                "city": "Al Majaz",
                "coordinates": {"lat": 25.32, "lng": 55.38}
            }}))
            .is_ok()
        );
    }

    #[test]
    fn update_ignores_absent_required_roots() {
        // Not sending the title at all is fine on update.
        assert!(validate_update(&json!({"developer": "Emaar"})).is_ok());
    }

    #[test]
    fn null_counts_as_absent() {
        let mut payload = valid_payload();
        payload["amenities"] = json!(null);
        assert!(validate_create(&payload).is_ok());

        payload["title"] = json!(null);
        assert!(validate_create(&payload).is_err());
    }
}
