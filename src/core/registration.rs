//! Self-service registration
//!
//! [`RegistrationForm`] holds the raw input of the register page. The unit
//! field starts at [`DEFAULT_UNIT_ID`] and is locked once a referral code has
//! been resolved to a unit.

use super::api::{ApiClient, ApiError, Transport};
use super::models::{DEFAULT_UNIT_ID, NewUser, Unit, User};
use super::validation::{
    Field, FieldErrors, SubmitError, parse_role, parse_unit_id, validate_password,
    validate_required, validate_username,
};

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub name: String,
    pub rank: String,
    pub role: String,
    pub bio: String,
    unit_id: String,
    locked_unit: Option<Unit>,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            name: String::new(),
            rank: String::new(),
            role: String::new(),
            bio: String::new(),
            unit_id: DEFAULT_UNIT_ID.to_string(),
            locked_unit: None,
        }
    }
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unit_id(&self) -> &str {
        &self.unit_id
    }

    pub fn is_unit_locked(&self) -> bool {
        self.locked_unit.is_some()
    }

    /// Unit the referral code resolved to
    pub fn referral_unit(&self) -> Option<&Unit> {
        self.locked_unit.as_ref()
    }

    /// Manual edit of the unit field; ignored while locked
    pub fn set_unit_id(&mut self, value: impl Into<String>) -> bool {
        if self.is_unit_locked() {
            return false;
        }
        self.unit_id = value.into();
        true
    }

    /// Pin the unit field to the unit a referral code resolved to
    pub fn lock_to_unit(&mut self, unit: Unit) {
        self.unit_id = unit.id.to_string();
        self.locked_unit = Some(unit);
    }

    /// Check every field and build the request body
    pub fn validate(&self) -> Result<NewUser, FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.check(Field::Username, validate_username(&self.username));
        errors.check(Field::Password, validate_password(&self.password));
        errors.check(Field::Name, validate_required(Field::Name, &self.name));
        errors.check(Field::Rank, validate_required(Field::Rank, &self.rank));

        let role = parse_role(&self.role)
            .map_err(|e| errors.add(Field::Role, e))
            .ok();
        let unit_id = parse_unit_id(&self.unit_id)
            .map_err(|e| errors.add(Field::UnitId, e))
            .ok();

        match (role, unit_id) {
            (Some(role), Some(unit_id)) if errors.is_empty() => {
                let bio = self.bio.trim();
                Ok(NewUser {
                    username: self.username.trim().to_string(),
                    password: self.password.clone(),
                    name: self.name.trim().to_string(),
                    rank: self.rank.trim().to_string(),
                    role,
                    unit_id,
                    bio: (!bio.is_empty()).then(|| bio.to_string()),
                })
            }
            _ => Err(errors),
        }
    }
}

/// Resolve a referral code and lock the form to its unit.
///
/// On failure the form is left untouched, i.e. unlocked at whatever unit id
/// it already held.
pub async fn apply_referral<T: Transport>(
    client: &ApiClient<T>,
    form: &mut RegistrationForm,
    code: &str,
) -> Result<Unit, ApiError> {
    let unit = client.unit_by_referral(code).await?;
    form.lock_to_unit(unit.clone());
    Ok(unit)
}

/// Validate, then create the account. Invalid input never reaches the network.
pub async fn submit<T: Transport>(
    client: &ApiClient<T>,
    form: &RegistrationForm,
) -> Result<User, SubmitError> {
    let new_user = form.validate().map_err(SubmitError::Invalid)?;
    Ok(client.create_user(&new_user).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::testing::ScriptedTransport;
    use crate::core::models::Role;
    use crate::core::validation::ValidationError;

    const UNIT_7: &str = r#"{"id":7,"name":"2nd Platoon","parentId":3,"unitLevel":"platoon","referralCode":"BRAVO2"}"#;

    fn filled_form() -> RegistrationForm {
        RegistrationForm {
            username: "jdoe".into(),
            password: "secret1".into(),
            name: "Doe".into(),
            rank: "PFC".into(),
            role: "soldier".into(),
            ..RegistrationForm::new()
        }
    }

    #[test]
    fn test_defaults_to_fallback_unit() {
        let form = RegistrationForm::new();
        assert_eq!(form.unit_id(), DEFAULT_UNIT_ID.to_string());
        assert!(!form.is_unit_locked());
    }

    #[test]
    fn test_validate_builds_request() {
        let mut form = filled_form();
        form.bio = "   ".into();
        assert!(form.set_unit_id("12"));

        let body = form.validate().unwrap();
        assert_eq!(body.unit_id, 12);
        assert_eq!(body.role, Role::Soldier);
        assert_eq!(body.bio, None);
    }

    #[test]
    fn test_validate_reports_every_field() {
        let mut form = RegistrationForm::new();
        form.set_unit_id("abc");
        let errors = form.validate().unwrap_err();

        for field in [
            Field::Username,
            Field::Password,
            Field::Name,
            Field::Rank,
            Field::Role,
            Field::UnitId,
        ] {
            assert!(errors.get(field).is_some(), "missing error for {:?}", field);
        }
        assert_eq!(
            errors.get(Field::UnitId),
            Some(&ValidationError::NotNumeric(Field::UnitId))
        );
    }

    #[tokio::test]
    async fn test_short_password_never_hits_network() {
        let client = ApiClient::new(ScriptedTransport::new().respond(201, "{}"));
        let mut form = filled_form();
        form.password = "12345".into();

        let err = submit(&client, &form).await.unwrap_err();
        match err {
            SubmitError::Invalid(errors) => {
                assert!(errors.get(Field::Password).is_some());
                assert_eq!(errors.len(), 1);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(client.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_referral_locks_unit_field() {
        let client = ApiClient::new(ScriptedTransport::new().respond(200, UNIT_7));
        let mut form = RegistrationForm::new();

        let unit = apply_referral(&client, &mut form, "BRAVO2").await.unwrap();
        assert_eq!(unit.id, 7);
        assert_eq!(form.unit_id(), "7");
        assert!(form.is_unit_locked());

        assert!(!form.set_unit_id("99"));
        assert_eq!(form.unit_id(), "7");
        assert_eq!(form.referral_unit().unwrap().name, "2nd Platoon");
    }

    #[tokio::test]
    async fn test_failed_referral_leaves_fallback() {
        let client = ApiClient::new(
            ScriptedTransport::new().respond(404, r#"{"message":"Unknown referral code"}"#),
        );
        let mut form = RegistrationForm::new();

        let err = apply_referral(&client, &mut form, "NOPE").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!form.is_unit_locked());
        assert_eq!(form.unit_id(), "1");
    }

    #[tokio::test]
    async fn test_submit_sends_locked_unit() {
        let client = ApiClient::new(
            ScriptedTransport::new().respond(200, UNIT_7).respond(
                201,
                r#"{"id":31,"username":"jdoe","name":"Doe","rank":"PFC","role":"soldier","unitId":7}"#,
            ),
        );
        let mut form = filled_form();
        apply_referral(&client, &mut form, "BRAVO2").await.unwrap();

        let user = submit(&client, &form).await.unwrap();
        assert_eq!(user.unit_id, 7);

        let requests = client.transport().requests();
        assert_eq!(requests[1].path, "/api/users");
        let body: serde_json::Value =
            serde_json::from_str(requests[1].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["unitId"], 7);
    }

    #[tokio::test]
    async fn test_submit_remote_failure() {
        let client = ApiClient::new(
            ScriptedTransport::new().respond(409, r#"{"message":"Username already taken"}"#),
        );
        let err = submit(&client, &filled_form()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Remote(ref e) if e.status() == Some(409)));
    }
}
