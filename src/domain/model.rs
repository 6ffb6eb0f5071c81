use crate::utils::error::{ProfileError, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The form's fields as a closed set. Label, wire name and validation rule
/// lookups are exhaustive matches over this enum, so the string-keyed tables
/// of the page become total functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Name,
    Email,
    DateOfBirth,
    BirthTime,
    BirthPlace,
    SunSign,
    AscendantSign,
}

impl FieldId {
    pub const ALL: [FieldId; 7] = [
        FieldId::Name,
        FieldId::Email,
        FieldId::DateOfBirth,
        FieldId::BirthTime,
        FieldId::BirthPlace,
        FieldId::SunSign,
        FieldId::AscendantSign,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FieldId::Name => "Name",
            FieldId::Email => "Email",
            FieldId::DateOfBirth => "Date of Birth",
            FieldId::BirthTime => "Birth Time",
            FieldId::BirthPlace => "Birth Place",
            FieldId::SunSign => "Sun Sign",
            FieldId::AscendantSign => "Ascendant Sign",
        }
    }

    /// Field name as the profile-creation API spells it.
    pub fn wire_name(self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Email => "email",
            FieldId::DateOfBirth => "date_of_birth",
            FieldId::BirthTime => "birth_time",
            FieldId::BirthPlace => "birth_place",
            FieldId::SunSign => "zodiac_sign",
            FieldId::AscendantSign => "ascendant_sign",
        }
    }

    /// Field name as the form controls spell it.
    pub fn form_name(self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Email => "email",
            FieldId::DateOfBirth => "dateOfBirth",
            FieldId::BirthTime => "birthTime",
            FieldId::BirthPlace => "birthPlace",
            FieldId::SunSign => "sunSign",
            FieldId::AscendantSign => "ascendantSign",
        }
    }

    /// Maps a server-reported field name back onto a form field.
    pub fn from_wire(name: &str) -> Option<FieldId> {
        FieldId::ALL.iter().copied().find(|f| f.wire_name() == name)
    }
}

/// Startup check that the wire-name translation table is unambiguous.
pub fn verify_wire_names() -> Result<()> {
    for (i, field) in FieldId::ALL.iter().enumerate() {
        for other in &FieldId::ALL[i + 1..] {
            if field.wire_name() == other.wire_name() {
                return Err(ProfileError::InvalidConfigValueError {
                    field: "wire_names".to_string(),
                    value: field.wire_name().to_string(),
                    reason: format!("duplicate wire name for {:?} and {:?}", field, other),
                });
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "aries",
            ZodiacSign::Taurus => "taurus",
            ZodiacSign::Gemini => "gemini",
            ZodiacSign::Cancer => "cancer",
            ZodiacSign::Leo => "leo",
            ZodiacSign::Virgo => "virgo",
            ZodiacSign::Libra => "libra",
            ZodiacSign::Scorpio => "scorpio",
            ZodiacSign::Sagittarius => "sagittarius",
            ZodiacSign::Capricorn => "capricorn",
            ZodiacSign::Aquarius => "aquarius",
            ZodiacSign::Pisces => "pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZodiacSign {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self> {
        ZodiacSign::ALL
            .iter()
            .copied()
            .find(|sign| sign.as_str() == s)
            .ok_or_else(|| ProfileError::InvalidFieldValueError {
                field: "zodiac_sign".to_string(),
                reason: format!("unknown sign: {}", s),
            })
    }
}

/// An ascendant is either a sign or the "unknown" sentinel. The sentinel
/// means "intentionally not provided" and goes over the wire as-is; it is
/// not the same thing as an absent field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AscendantSign {
    Known(ZodiacSign),
    Unknown,
}

impl fmt::Display for AscendantSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AscendantSign::Known(sign) => sign.fmt(f),
            AscendantSign::Unknown => f.write_str("unknown"),
        }
    }
}

impl FromStr for AscendantSign {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "unknown" => Ok(AscendantSign::Unknown),
            other => Ok(AscendantSign::Known(other.parse()?)),
        }
    }
}

impl Serialize for AscendantSign {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            AscendantSign::Known(sign) => sign.serialize(serializer),
            AscendantSign::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for AscendantSign {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Raw mirror of the form controls. Values stay exactly as entered; typing
/// and trimming happen when the wire payload is built. Serialized with the
/// form-control key names, which is also the persisted draft format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDraft {
    pub name: String,
    pub date_of_birth: String,
    pub birth_time: String,
    pub unknown_time: bool,
    pub birth_place: String,
    pub sun_sign: String,
    pub ascendant_sign: String,
    pub email: String,
}

impl ProfileDraft {
    pub fn raw_value(&self, field: FieldId) -> &str {
        match field {
            FieldId::Name => &self.name,
            FieldId::Email => &self.email,
            FieldId::DateOfBirth => &self.date_of_birth,
            FieldId::BirthTime => &self.birth_time,
            FieldId::BirthPlace => &self.birth_place,
            FieldId::SunSign => &self.sun_sign,
            FieldId::AscendantSign => &self.ascendant_sign,
        }
    }

    pub fn set_raw_value(&mut self, field: FieldId, value: &str) {
        let slot = match field {
            FieldId::Name => &mut self.name,
            FieldId::Email => &mut self.email,
            FieldId::DateOfBirth => &mut self.date_of_birth,
            FieldId::BirthTime => &mut self.birth_time,
            FieldId::BirthPlace => &mut self.birth_place,
            FieldId::SunSign => &mut self.sun_sign,
            FieldId::AscendantSign => &mut self.ascendant_sign,
        };
        *slot = value.to_string();
    }
}

/// Payload for `POST {base}/users`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_time: Option<DateTime<Utc>>,
    pub birth_place: String,
    pub zodiac_sign: ZodiacSign,
    pub ascendant_sign: AscendantSign,
}

impl CreateUserRequest {
    /// Builds the typed wire payload from the raw draft. The unknown-time
    /// toggle maps to 00:00 on the birth date; a given time combines with
    /// the birth date into a UTC datetime; no time at all stays absent.
    /// An empty ascendant selection becomes the "unknown" sentinel.
    pub fn from_draft(draft: &ProfileDraft) -> Result<Self> {
        let date_of_birth = NaiveDate::parse_from_str(draft.date_of_birth.trim(), "%Y-%m-%d")
            .map_err(|e| ProfileError::InvalidFieldValueError {
                field: FieldId::DateOfBirth.wire_name().to_string(),
                reason: e.to_string(),
            })?;

        let raw_time = if draft.unknown_time {
            Some("00:00")
        } else {
            let trimmed = draft.birth_time.trim();
            (!trimmed.is_empty()).then_some(trimmed)
        };

        let birth_time = match raw_time {
            Some(raw) => {
                let time = NaiveTime::parse_from_str(raw, "%H:%M").map_err(|e| {
                    ProfileError::InvalidFieldValueError {
                        field: FieldId::BirthTime.wire_name().to_string(),
                        reason: e.to_string(),
                    }
                })?;
                Some(date_of_birth.and_time(time).and_utc())
            }
            None => None,
        };

        Ok(CreateUserRequest {
            name: draft.name.clone(),
            email: draft.email.clone(),
            date_of_birth,
            birth_time,
            birth_place: draft.birth_place.clone(),
            zodiac_sign: draft.sun_sign.trim().parse()?,
            ascendant_sign: draft.ascendant_sign.trim().parse()?,
        })
    }
}

/// What the profile-creation API sends back, decoded leniently: any subset
/// of these fields may be present on a failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub errors: Option<Vec<FieldError>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub field: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Accepted,
    Rejected { status: u16, body: ApiResponse },
}

/// One geocoding record from the search service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub address: PlaceAddress,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl Place {
    /// Best available locality: city, then town, village, state, and as a
    /// last resort the first segment of the full display name.
    fn locality(&self) -> Option<&str> {
        let a = &self.address;
        a.city
            .as_deref()
            .or(a.town.as_deref())
            .or(a.village.as_deref())
            .or(a.state.as_deref())
    }

    pub fn label(&self) -> String {
        match self.locality() {
            Some(name) => match self.address.country.as_deref() {
                Some(country) => format!("{}, {}", name, country),
                None => name.to_string(),
            },
            None => self
                .display_name
                .split(',')
                .next()
                .unwrap_or("")
                .trim()
                .to_string(),
        }
    }

    /// Secondary line: state + country, with the state dropped when it is
    /// already the primary locality.
    pub fn detail(&self) -> String {
        let primary = self.locality();
        let mut parts: Vec<&str> = Vec::new();
        if let Some(state) = self.address.state.as_deref() {
            if primary != Some(state) {
                parts.push(state);
            }
        }
        if let Some(country) = self.address.country.as_deref() {
            parts.push(country);
        }
        parts.join(", ")
    }
}

/// A rendered autocomplete row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub label: String,
    pub detail: String,
}

impl Suggestion {
    pub fn from_place(place: &Place) -> Self {
        Suggestion {
            label: place.label(),
            detail: place.detail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(
        city: Option<&str>,
        town: Option<&str>,
        village: Option<&str>,
        state: Option<&str>,
        country: Option<&str>,
        display_name: &str,
    ) -> Place {
        Place {
            display_name: display_name.to_string(),
            address: PlaceAddress {
                city: city.map(String::from),
                town: town.map(String::from),
                village: village.map(String::from),
                state: state.map(String::from),
                country: country.map(String::from),
            },
        }
    }

    #[test]
    fn test_wire_name_round_trip() {
        for field in FieldId::ALL {
            assert_eq!(FieldId::from_wire(field.wire_name()), Some(field));
        }
        assert_eq!(FieldId::from_wire("no_such_field"), None);
        assert!(verify_wire_names().is_ok());
    }

    #[test]
    fn test_zodiac_sign_parse_and_wire_format() {
        assert_eq!("leo".parse::<ZodiacSign>().unwrap(), ZodiacSign::Leo);
        assert!("ophiuchus".parse::<ZodiacSign>().is_err());
        assert_eq!(
            serde_json::to_string(&ZodiacSign::Sagittarius).unwrap(),
            "\"sagittarius\""
        );
    }

    #[test]
    fn test_ascendant_sentinel() {
        assert_eq!(
            "".parse::<AscendantSign>().unwrap(),
            AscendantSign::Unknown
        );
        assert_eq!(
            "unknown".parse::<AscendantSign>().unwrap(),
            AscendantSign::Unknown
        );
        assert_eq!(
            "virgo".parse::<AscendantSign>().unwrap(),
            AscendantSign::Known(ZodiacSign::Virgo)
        );
        assert_eq!(
            serde_json::to_string(&AscendantSign::Unknown).unwrap(),
            "\"unknown\""
        );
    }

    #[test]
    fn test_draft_serializes_with_form_control_keys() {
        let draft = ProfileDraft {
            name: "Ada".to_string(),
            date_of_birth: "1990-12-10".to_string(),
            unknown_time: true,
            ..Default::default()
        };
        let json: serde_json::Value = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["dateOfBirth"], "1990-12-10");
        assert_eq!(json["unknownTime"], true);
        assert!(json.get("date_of_birth").is_none());
    }

    #[test]
    fn test_payload_with_explicit_time() {
        let draft = ProfileDraft {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            date_of_birth: "2005-02-03".to_string(),
            birth_time: "14:30".to_string(),
            birth_place: "Paris, France".to_string(),
            sun_sign: "aquarius".to_string(),
            ascendant_sign: "leo".to_string(),
            ..Default::default()
        };

        let request = CreateUserRequest::from_draft(&draft).unwrap();
        let json: serde_json::Value = serde_json::to_value(&request).unwrap();

        assert_eq!(json["date_of_birth"], "2005-02-03");
        assert_eq!(json["birth_time"], "2005-02-03T14:30:00Z");
        assert_eq!(json["zodiac_sign"], "aquarius");
        assert_eq!(json["ascendant_sign"], "leo");
    }

    #[test]
    fn test_payload_unknown_time_maps_to_midnight() {
        let draft = ProfileDraft {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            date_of_birth: "2005-02-03".to_string(),
            unknown_time: true,
            birth_place: "Paris, France".to_string(),
            sun_sign: "aquarius".to_string(),
            ..Default::default()
        };

        let request = CreateUserRequest::from_draft(&draft).unwrap();
        let json: serde_json::Value = serde_json::to_value(&request).unwrap();
        assert_eq!(json["birth_time"], "2005-02-03T00:00:00Z");
    }

    #[test]
    fn test_payload_absent_time_is_omitted() {
        let draft = ProfileDraft {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            date_of_birth: "2005-02-03".to_string(),
            birth_place: "Paris, France".to_string(),
            sun_sign: "aquarius".to_string(),
            ..Default::default()
        };

        let request = CreateUserRequest::from_draft(&draft).unwrap();
        let json: serde_json::Value = serde_json::to_value(&request).unwrap();
        assert!(json.get("birth_time").is_none());
    }

    #[test]
    fn test_payload_empty_ascendant_becomes_sentinel() {
        let draft = ProfileDraft {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            date_of_birth: "2005-02-03".to_string(),
            birth_place: "Paris, France".to_string(),
            sun_sign: "aquarius".to_string(),
            ascendant_sign: String::new(),
            ..Default::default()
        };

        let request = CreateUserRequest::from_draft(&draft).unwrap();
        assert_eq!(request.ascendant_sign, AscendantSign::Unknown);
        let json: serde_json::Value = serde_json::to_value(&request).unwrap();
        assert_eq!(json["ascendant_sign"], "unknown");
    }

    #[test]
    fn test_payload_rejects_bad_date() {
        let draft = ProfileDraft {
            date_of_birth: "03/02/2005".to_string(),
            sun_sign: "aquarius".to_string(),
            ..Default::default()
        };
        assert!(CreateUserRequest::from_draft(&draft).is_err());
    }

    #[test]
    fn test_place_label_prefers_city() {
        let p = place(
            Some("Paris"),
            None,
            None,
            Some("Île-de-France"),
            Some("France"),
            "Paris, Île-de-France, Metropolitan France, France",
        );
        assert_eq!(p.label(), "Paris, France");
        assert_eq!(p.detail(), "Île-de-France, France");
    }

    #[test]
    fn test_place_label_falls_back_through_town_and_village() {
        let town = place(None, Some("Gisors"), None, None, Some("France"), "Gisors");
        assert_eq!(town.label(), "Gisors, France");

        let village = place(
            None,
            None,
            Some("Lourmarin"),
            Some("Provence"),
            Some("France"),
            "Lourmarin",
        );
        assert_eq!(village.label(), "Lourmarin, France");
        assert_eq!(village.detail(), "Provence, France");
    }

    #[test]
    fn test_place_label_state_is_deduplicated_in_detail() {
        let p = place(None, None, None, Some("Bavaria"), Some("Germany"), "Bavaria");
        assert_eq!(p.label(), "Bavaria, Germany");
        assert_eq!(p.detail(), "Germany");
    }

    #[test]
    fn test_place_label_uses_display_name_when_no_address() {
        let p = place(None, None, None, None, None, "Null Island, Atlantic Ocean");
        assert_eq!(p.label(), "Null Island");
        assert_eq!(p.detail(), "");
    }

    #[test]
    fn test_place_label_without_country() {
        let p = place(Some("Paris"), None, None, None, None, "Paris");
        assert_eq!(p.label(), "Paris");
    }
}
