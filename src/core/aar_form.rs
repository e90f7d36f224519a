//! New AAR form
//!
//! Items are typed one per line into three text areas.

use super::api::{ApiClient, Transport};
use super::models::{Aar, NewAar, UnitId};
use super::validation::{Field, FieldErrors, SubmitError, ValidationError, parse_id, parse_items};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AarForm {
    /// Selected event id, empty until one is picked
    pub event_id: String,
    pub sustain: String,
    pub improve: String,
    pub action: String,
}

impl AarForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-blank items across all three lists
    pub fn item_count(&self) -> usize {
        parse_items(&self.sustain).len()
            + parse_items(&self.improve).len()
            + parse_items(&self.action).len()
    }

    /// Build the request for the author's unit
    pub fn validate(&self, unit_id: UnitId) -> Result<NewAar, FieldErrors> {
        let mut errors = FieldErrors::new();

        let event_id = parse_id(Field::Event, &self.event_id)
            .map_err(|e| errors.add(Field::Event, e))
            .ok();

        let sustain_items = parse_items(&self.sustain);
        let improve_items = parse_items(&self.improve);
        let action_items = parse_items(&self.action);
        if sustain_items.is_empty() && improve_items.is_empty() && action_items.is_empty() {
            errors.add(Field::Items, ValidationError::NoItems);
        }

        match event_id {
            Some(event_id) if errors.is_empty() => Ok(NewAar {
                event_id,
                unit_id,
                sustain_items,
                improve_items,
                action_items,
            }),
            _ => Err(errors),
        }
    }
}

/// Validate, then `POST /api/aars`
pub async fn submit<T: Transport>(
    client: &ApiClient<T>,
    form: &AarForm,
    unit_id: UnitId,
) -> Result<Aar, SubmitError> {
    let new_aar = form.validate(unit_id).map_err(SubmitError::Invalid)?;
    Ok(client.create_aar(&new_aar).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::testing::ScriptedTransport;

    #[test]
    fn test_requires_event_and_items() {
        let errors = AarForm::new().validate(3).unwrap_err();
        assert_eq!(
            errors.get(Field::Event),
            Some(&ValidationError::Required(Field::Event))
        );
        assert_eq!(errors.get(Field::Items), Some(&ValidationError::NoItems));
    }

    #[test]
    fn test_items_are_trimmed_and_blank_lines_dropped() {
        let form = AarForm {
            event_id: " 12 ".into(),
            sustain: "- Good comms\n\n   \n* Early SP".into(),
            improve: String::new(),
            action: "  Rehearse the breach  ".into(),
        };
        assert_eq!(form.item_count(), 3);

        let aar = form.validate(3).unwrap();
        assert_eq!(aar.event_id, 12);
        assert_eq!(aar.unit_id, 3);
        assert_eq!(aar.sustain_items, vec!["Good comms", "Early SP"]);
        assert!(aar.improve_items.is_empty());
        assert_eq!(aar.action_items, vec!["Rehearse the breach"]);
    }

    #[test]
    fn test_bad_event_id() {
        let form = AarForm {
            event_id: "abc".into(),
            improve: "Radio checks".into(),
            ..AarForm::new()
        };
        let errors = form.validate(1).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(Field::Event),
            Some(&ValidationError::NotNumeric(Field::Event))
        );
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let client = ApiClient::new(ScriptedTransport::new());
        let err = submit(&client, &AarForm::new(), 1).await.unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(_)));
        assert_eq!(client.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_posts_aar() {
        let created = r#"{"id":40,"eventId":12,"unitId":3,"createdBy":4,"sustainItems":["Good comms"],"improveItems":[],"actionItems":[],"createdAt":"2026-03-01T12:00:00Z"}"#;
        let client = ApiClient::new(ScriptedTransport::new().respond(201, created));
        let form = AarForm {
            event_id: "12".into(),
            sustain: "Good comms".into(),
            ..AarForm::new()
        };

        let aar = submit(&client, &form, 3).await.unwrap();
        assert_eq!(aar.id, 40);

        let requests = client.transport().requests();
        assert_eq!(requests[0].path, "/api/aars");
        let body = requests[0].body.as_deref().unwrap();
        assert!(body.contains(r#""eventId":12"#));
        assert!(body.contains(r#""sustainItems":["Good comms"]"#));
    }
}
