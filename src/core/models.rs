//! Records exchanged with the REST backend
//!
//! All entities are owned by the backend; the client only keeps cached copies.
//! Field names follow the backend's camelCase JSON.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub type UserId = i64;
pub type UnitId = i64;
pub type EventId = i64;
pub type AarId = i64;

/// Unit assigned to self-registered users when no referral code is given
pub const DEFAULT_UNIT_ID: UnitId = 1;

/// Military role of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Soldier,
    TeamLeader,
    SquadLeader,
    PlatoonSergeant,
    PlatoonLeader,
    FirstSergeant,
    CompanyCommander,
    CommandSergeantMajor,
    BattalionCommander,
}

impl Role {
    pub const ALL: [Role; 9] = [
        Role::Soldier,
        Role::TeamLeader,
        Role::SquadLeader,
        Role::PlatoonSergeant,
        Role::PlatoonLeader,
        Role::FirstSergeant,
        Role::CompanyCommander,
        Role::CommandSergeantMajor,
        Role::BattalionCommander,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Soldier => "Soldier",
            Role::TeamLeader => "Team Leader",
            Role::SquadLeader => "Squad Leader",
            Role::PlatoonSergeant => "Platoon Sergeant",
            Role::PlatoonLeader => "Platoon Leader",
            Role::FirstSergeant => "First Sergeant",
            Role::CompanyCommander => "Company Commander",
            Role::CommandSergeantMajor => "Command Sergeant Major",
            Role::BattalionCommander => "Battalion Commander",
        }
    }

    /// Wire value, as used in `<select>` options
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Soldier => "soldier",
            Role::TeamLeader => "team_leader",
            Role::SquadLeader => "squad_leader",
            Role::PlatoonSergeant => "platoon_sergeant",
            Role::PlatoonLeader => "platoon_leader",
            Role::FirstSergeant => "first_sergeant",
            Role::CompanyCommander => "company_commander",
            Role::CommandSergeantMajor => "command_sergeant_major",
            Role::BattalionCommander => "battalion_commander",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.as_str() == value)
    }

    pub fn is_leader(&self) -> bool {
        !matches!(self, Role::Soldier)
    }

    /// Squad leaders and above schedule and remove training events
    pub fn can_manage_events(&self) -> bool {
        !matches!(self, Role::Soldier | Role::TeamLeader)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Echelon of a unit, ordered from smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitLevel {
    Team,
    Squad,
    Platoon,
    Company,
    Battalion,
    Brigade,
    Division,
}

impl UnitLevel {
    pub fn label(&self) -> &'static str {
        match self {
            UnitLevel::Team => "Team",
            UnitLevel::Squad => "Squad",
            UnitLevel::Platoon => "Platoon",
            UnitLevel::Company => "Company",
            UnitLevel::Battalion => "Battalion",
            UnitLevel::Brigade => "Brigade",
            UnitLevel::Division => "Division",
        }
    }
}

impl fmt::Display for UnitLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Step of the eight-step training model
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TrainingStep(u8);

impl TrainingStep {
    pub const FIRST: u8 = 1;
    pub const LAST: u8 = 8;

    pub fn new(step: u8) -> Option<Self> {
        (Self::FIRST..=Self::LAST)
            .contains(&step)
            .then_some(TrainingStep(step))
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn title(&self) -> &'static str {
        match self.0 {
            1 => "Plan the Training",
            2 => "Train and Certify Leaders",
            3 => "Recon the Site",
            4 => "Issue the Plan",
            5 => "Rehearse",
            6 => "Execute",
            7 => "Conduct AAR",
            _ => "Retrain",
        }
    }

    pub fn all() -> impl Iterator<Item = TrainingStep> {
        (Self::FIRST..=Self::LAST).map(TrainingStep)
    }
}

impl TryFrom<u8> for TrainingStep {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        TrainingStep::new(value).ok_or_else(|| format!("training step {} is outside 1-8", value))
    }
}

impl From<TrainingStep> for u8 {
    fn from(step: TrainingStep) -> Self {
        step.0
    }
}

impl fmt::Display for TrainingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}: {}", self.0, self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub rank: String,
    pub role: Role,
    pub unit_id: UnitId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl User {
    /// "SGT Smith" style name used in headers
    pub fn display_name(&self) -> String {
        if self.rank.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.rank, self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<UnitId>,
    pub unit_level: UnitLevel,
    pub referral_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub unit_id: UnitId,
    pub created_by: UserId,
    pub step: TrainingStep,
    #[serde(deserialize_with = "event_date")]
    pub start_date: NaiveDate,
    #[serde(default, deserialize_with = "optional_event_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub objectives: String,
    #[serde(default)]
    pub participants: Vec<UserId>,
    #[serde(default)]
    pub is_deleted: bool,
}

impl Event {
    /// Events that have not ended before `today`
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.end_date.unwrap_or(self.start_date) >= today
    }

    pub fn date_range(&self) -> String {
        match self.end_date {
            Some(end) if end != self.start_date => format!("{} – {}", self.start_date, end),
            _ => self.start_date.to_string(),
        }
    }
}

/// Calendar date of an event: either `2026-03-01` or an RFC 3339 timestamp,
/// in which case the date in the timestamp's own offset is kept
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    raw.parse::<NaiveDate>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn event_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_event_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid event date `{}`", raw)))
}

fn optional_event_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_event_date(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid event date `{}`", raw))),
    }
}

/// Drops soft-deleted events and orders the rest by start date
pub fn visible_events(events: Vec<Event>) -> Vec<Event> {
    let mut events: Vec<Event> = events.into_iter().filter(|e| !e.is_deleted).collect();
    events.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id)));
    events
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aar {
    pub id: AarId,
    pub event_id: EventId,
    pub unit_id: UnitId,
    pub created_by: UserId,
    #[serde(default)]
    pub sustain_items: Vec<String>,
    #[serde(default)]
    pub improve_items: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /api/users`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
    pub rank: String,
    pub role: Role,
    pub unit_id: UnitId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Body of `POST /api/aars`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAar {
    pub event_id: EventId,
    pub unit_id: UnitId,
    pub sustain_items: Vec<String>,
    pub improve_items: Vec<String>,
    pub action_items: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: EventId, start: &str, deleted: bool) -> Event {
        Event {
            id,
            title: format!("Event {}", id),
            unit_id: 1,
            created_by: 1,
            step: TrainingStep::new(1).unwrap(),
            start_date: start.parse().unwrap(),
            end_date: None,
            location: String::new(),
            objectives: String::new(),
            participants: vec![],
            is_deleted: deleted,
        }
    }

    #[test]
    fn test_role_wire_format() {
        let json = serde_json::to_string(&Role::CommandSergeantMajor).unwrap();
        assert_eq!(json, "\"command_sergeant_major\"");
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("general"), None);
    }

    #[test]
    fn test_role_permissions() {
        assert!(!Role::Soldier.is_leader());
        assert!(Role::TeamLeader.is_leader());
        assert!(!Role::TeamLeader.can_manage_events());
        assert!(Role::SquadLeader.can_manage_events());
        assert!(Role::BattalionCommander.can_manage_events());
    }

    #[test]
    fn test_training_step_bounds() {
        assert!(TrainingStep::new(0).is_none());
        assert!(TrainingStep::new(9).is_none());
        assert_eq!(TrainingStep::new(7).unwrap().title(), "Conduct AAR");
        assert_eq!(TrainingStep::all().count(), 8);
        assert!(serde_json::from_str::<TrainingStep>("12").is_err());
        assert_eq!(
            serde_json::from_str::<TrainingStep>("3").unwrap(),
            TrainingStep::new(3).unwrap()
        );
    }

    #[test]
    fn test_user_from_backend_json() {
        let json = r#"{
            "id": 4,
            "username": "jsmith",
            "name": "Smith",
            "rank": "SGT",
            "role": "squad_leader",
            "unitId": 7
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.unit_id, 7);
        assert_eq!(user.role, Role::SquadLeader);
        assert!(user.bio.is_none());
        assert_eq!(user.display_name(), "SGT Smith");
    }

    #[test]
    fn test_event_from_backend_json() {
        let json = r#"{
            "id": 10,
            "title": "Squad live fire",
            "unitId": 3,
            "createdBy": 4,
            "step": 6,
            "startDate": "2026-03-01",
            "endDate": "2026-03-03",
            "location": "Range 12",
            "objectives": "Qualify",
            "participants": [4, 5, 6]
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.step.number(), 6);
        assert!(!event.is_deleted);
        assert_eq!(event.participants.len(), 3);
        assert_eq!(event.date_range(), "2026-03-01 – 2026-03-03");
        assert!(event.is_upcoming("2026-03-03".parse().unwrap()));
        assert!(!event.is_upcoming("2026-03-04".parse().unwrap()));
    }

    #[test]
    fn test_event_dates_accept_timestamps() {
        let json = r#"[{
            "id": 1,
            "title": "Land nav",
            "unitId": 3,
            "createdBy": 4,
            "step": 2,
            "startDate": "2026-03-01T00:00:00.000Z",
            "endDate": "2026-03-02T18:30:00-05:00"
        }]"#;
        let events: Vec<Event> = serde_json::from_str(json).unwrap();
        assert_eq!(events[0].start_date, "2026-03-01".parse::<NaiveDate>().unwrap());
        assert_eq!(events[0].end_date, Some("2026-03-02".parse().unwrap()));

        let null_end = r#"{"id":2,"title":"Ruck","unitId":3,"createdBy":4,"step":1,
            "startDate":"2026-04-10","endDate":null}"#;
        let event: Event = serde_json::from_str(null_end).unwrap();
        assert_eq!(event.end_date, None);
    }

    #[test]
    fn test_invalid_event_date_is_rejected() {
        assert_eq!(parse_event_date("next tuesday"), None);
        let json = r#"{"id":1,"title":"x","unitId":3,"createdBy":4,"step":1,"startDate":"03/01/2026"}"#;
        let err = serde_json::from_str::<Event>(json).unwrap_err();
        assert!(err.to_string().contains("invalid event date"));
    }

    #[test]
    fn test_visible_events_hides_deleted_and_sorts() {
        let events = vec![
            event(1, "2026-05-01", false),
            event(2, "2026-01-01", true),
            event(3, "2026-02-01", false),
        ];
        let visible = visible_events(events);
        let ids: Vec<EventId> = visible.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_new_user_serializes_camel_case() {
        let body = NewUser {
            username: "jdoe".into(),
            password: "secret1".into(),
            name: "Doe".into(),
            rank: "PFC".into(),
            role: Role::Soldier,
            unit_id: 7,
            bio: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["unitId"], 7);
        assert_eq!(value["role"], "soldier");
        assert!(value.get("bio").is_none());
    }
}
