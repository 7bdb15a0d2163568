//! The résumé record accepted by `POST /generate_cv`.
//!
//! Field names follow the wire format (camelCase, with a few snake_case keys
//! such as `desired_role`). Every leaf is an `Option`: the `"N/A"`
//! placeholder and missing keys are both `None` by the time a record exists.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::sentinel::{
    de_lines, de_record, de_seq, de_text, is_absent, lines_of, record_line, text_of,
};

/// Top-level keys the validation gate insists on.
pub const REQUIRED_FIELDS: &[&str] = &[
    "personalInformation",
    "contactDetails",
    "overview",
    "workExperience",
    "education",
    "skills",
];

/// Overview keys with a fixed meaning; everything else is a subsection.
pub const OVERVIEW_RESERVED: &[&str] = &["desired_role", "tagline"];
/// Position detail keys with a fixed meaning.
pub const DETAILS_RESERVED: &[&str] = &["plainText"];

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CvRecord {
    #[serde(deserialize_with = "de_record")]
    pub personal_information: PersonalInfo,
    #[serde(deserialize_with = "de_record")]
    pub contact_details: ContactDetails,
    #[serde(deserialize_with = "de_record")]
    pub overview: Overview,
    #[serde(deserialize_with = "de_seq")]
    pub work_experience: Vec<Engagement>,
    #[serde(deserialize_with = "de_seq")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "de_lines")]
    pub skills: Vec<String>,

    #[serde(deserialize_with = "de_list_section")]
    pub associations: Option<ListSection>,
    #[serde(deserialize_with = "de_list_section")]
    pub publications: Option<ListSection>,
    #[serde(deserialize_with = "de_list_section")]
    pub projects: Option<ListSection>,
    #[serde(deserialize_with = "de_list_section")]
    pub volunteer: Option<ListSection>,
    #[serde(deserialize_with = "de_list_section")]
    pub interests: Option<ListSection>,
    #[serde(deserialize_with = "de_list_section")]
    pub patents: Option<ListSection>,
    #[serde(deserialize_with = "de_list_section")]
    pub awards: Option<ListSection>,
    #[serde(deserialize_with = "de_list_section")]
    pub certificates: Option<ListSection>,
    #[serde(deserialize_with = "de_list_section")]
    pub languages: Option<ListSection>,

    #[serde(deserialize_with = "de_seq")]
    pub references: Vec<Reference>,
}

impl CvRecord {
    pub fn section(&self, kind: GenericSection) -> Option<&ListSection> {
        match kind {
            GenericSection::Associations => self.associations.as_ref(),
            GenericSection::Publications => self.publications.as_ref(),
            GenericSection::Projects => self.projects.as_ref(),
            GenericSection::Volunteer => self.volunteer.as_ref(),
            GenericSection::Interests => self.interests.as_ref(),
            GenericSection::Patents => self.patents.as_ref(),
            GenericSection::Awards => self.awards.as_ref(),
            GenericSection::Certificates => self.certificates.as_ref(),
            GenericSection::Languages => self.languages.as_ref(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "de_text")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContactDetails {
    #[serde(deserialize_with = "de_text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "de_text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "de_text")]
    pub website: Option<String>,
    #[serde(deserialize_with = "de_record")]
    pub location: Location,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "de_text")]
    pub city: Option<String>,
    #[serde(rename = "countryCode", deserialize_with = "de_text")]
    pub country_code: Option<String>,
}

impl Location {
    /// `"City, CC"`, or whichever half is known.
    pub fn display(&self) -> Option<String> {
        match (&self.city, &self.country_code) {
            (Some(city), Some(cc)) => Some(format!("{city}, {cc}")),
            (Some(one), None) | (None, Some(one)) => Some(one.clone()),
            (None, None) => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Overview and open-ended subsections
// ────────────────────────────────────────────────────────────────────────────

/// A caller-labelled block of lines, kept in the record's key order.
#[derive(Debug, Clone, PartialEq)]
pub struct Subsection {
    pub label: String,
    pub lines: Vec<String>,
}

/// Collects subsections from the leftover keys of an object, skipping
/// reserved keys and any subsection with nothing renderable in it.
fn collect_subsections(rest: Map<String, Value>, reserved: &[&str]) -> Vec<Subsection> {
    rest.into_iter()
        .filter(|(label, _)| !reserved.contains(&label.as_str()))
        .filter(|(_, value)| matches!(value, Value::Array(_) | Value::String(_)))
        .filter_map(|(label, value)| {
            let lines = lines_of(&value);
            (!lines.is_empty()).then_some(Subsection { label, lines })
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawOverview")]
pub struct Overview {
    pub desired_role: Option<String>,
    pub tagline: Option<String>,
    pub subsections: Vec<Subsection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawOverview {
    #[serde(deserialize_with = "de_text")]
    desired_role: Option<String>,
    #[serde(deserialize_with = "de_text")]
    tagline: Option<String>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl From<RawOverview> for Overview {
    fn from(raw: RawOverview) -> Self {
        Overview {
            desired_role: raw.desired_role,
            tagline: raw.tagline,
            subsections: collect_subsections(raw.rest, OVERVIEW_RESERVED),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Work experience
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Engagement {
    #[serde(deserialize_with = "de_text")]
    pub organisation: Option<String>,
    #[serde(deserialize_with = "de_text")]
    pub about_the_organisation: Option<String>,
    #[serde(deserialize_with = "de_text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "de_seq")]
    pub position: Vec<Position>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Position {
    #[serde(deserialize_with = "de_text")]
    pub job_title: Option<String>,
    #[serde(deserialize_with = "de_text")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "de_text")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "de_record")]
    pub details: PositionDetails,
}

/// The free-text part of a position: one paragraph or a list of bullets.
#[derive(Debug, Clone, PartialEq)]
pub enum Detail {
    Paragraph(String),
    Bullets(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawDetails")]
pub struct PositionDetails {
    pub plain_text: Option<Detail>,
    pub subsections: Vec<Subsection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDetails {
    #[serde(rename = "plainText")]
    plain_text: Value,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl From<RawDetails> for PositionDetails {
    fn from(raw: RawDetails) -> Self {
        let plain_text = match &raw.plain_text {
            Value::Array(_) => {
                let lines = lines_of(&raw.plain_text);
                (!lines.is_empty()).then_some(Detail::Bullets(lines))
            }
            other => text_of(other).map(Detail::Paragraph),
        };
        PositionDetails {
            plain_text,
            subsections: collect_subsections(raw.rest, DETAILS_RESERVED),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Education, references
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(deserialize_with = "de_text")]
    pub study_type: Option<String>,
    #[serde(deserialize_with = "de_text")]
    pub area: Option<String>,
    #[serde(deserialize_with = "de_text")]
    pub institution: Option<String>,
    #[serde(deserialize_with = "de_text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "de_text")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "de_text")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "de_text")]
    pub score: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Reference {
    #[serde(deserialize_with = "de_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "de_text")]
    pub reference: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Generic list sections
// ────────────────────────────────────────────────────────────────────────────

/// Optional trailing sections, in the order they are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericSection {
    Associations,
    Publications,
    Projects,
    Volunteer,
    Interests,
    Patents,
    Awards,
    Certificates,
    Languages,
}

impl GenericSection {
    pub const ALL: [GenericSection; 9] = [
        GenericSection::Associations,
        GenericSection::Publications,
        GenericSection::Projects,
        GenericSection::Volunteer,
        GenericSection::Interests,
        GenericSection::Patents,
        GenericSection::Awards,
        GenericSection::Certificates,
        GenericSection::Languages,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            GenericSection::Associations => "associations",
            GenericSection::Publications => "publications",
            GenericSection::Projects => "projects",
            GenericSection::Volunteer => "volunteer",
            GenericSection::Interests => "interests",
            GenericSection::Patents => "patents",
            GenericSection::Awards => "awards",
            GenericSection::Certificates => "certificates",
            GenericSection::Languages => "languages",
        }
    }

    /// Heading text: the key with its first letter capitalized.
    pub fn title(&self) -> String {
        let key = self.key().replace('_', " ");
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Content of a generic section once placeholders are gone.
#[derive(Debug, Clone, PartialEq)]
pub enum ListSection {
    Items(Vec<String>),
    Paragraph(String),
}

fn de_list_section<'de, D>(deserializer: D) -> Result<Option<ListSection>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if is_absent(&value) {
        return Ok(None);
    }
    Ok(match &value {
        Value::Array(_) => {
            let items = lines_of(&value);
            (!items.is_empty()).then_some(ListSection::Items(items))
        }
        Value::Object(record) => record_line(record).map(ListSection::Paragraph),
        scalar => text_of(scalar).map(ListSection::Paragraph),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> CvRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_leaf_sentinels_become_none() {
        let record = parse(json!({
            "personalInformation": {"name": "N/A"},
            "contactDetails": {
                "phone": "N/A", "email": "jo@example.com", "website": "N/A",
                "location": {"city": "N/A", "countryCode": "N/A"}
            }
        }));
        assert_eq!(record.personal_information.name, None);
        assert_eq!(record.contact_details.phone, None);
        assert_eq!(record.contact_details.email.as_deref(), Some("jo@example.com"));
        assert_eq!(record.contact_details.location.display(), None);
    }

    #[test]
    fn test_location_display_uses_known_parts() {
        let both = Location {
            city: Some("Cape Town".into()),
            country_code: Some("ZA".into()),
        };
        assert_eq!(both.display().as_deref(), Some("Cape Town, ZA"));
        let city_only = Location {
            city: Some("Cape Town".into()),
            country_code: None,
        };
        assert_eq!(city_only.display().as_deref(), Some("Cape Town"));
    }

    #[test]
    fn test_overview_subsections_keep_key_order() {
        let record = parse(json!({
            "overview": {
                "desired_role": "Engineer",
                "tagline": "N/A",
                "Zeta Notes": ["z"],
                "Career Highlights": ["N/A", "Led migration"],
                "Alpha Notes": ["N/A"],
                "Summary": "Builds things",
                "Nested": {"x": 1}
            }
        }));
        let overview = record.overview;
        assert_eq!(overview.desired_role.as_deref(), Some("Engineer"));
        assert_eq!(overview.tagline, None);
        let labels: Vec<&str> = overview.subsections.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Zeta Notes", "Career Highlights", "Summary"]);
        assert_eq!(overview.subsections[1].lines, vec!["Led migration"]);
    }

    #[test]
    fn test_position_details_plain_text_shapes() {
        let record = parse(json!({
            "workExperience": [{
                "organisation": "Acme",
                "position": [
                    {"jobTitle": "Dev", "details": {"plainText": "Did work", "Tools": ["Rust"]}},
                    {"jobTitle": "Lead", "details": {"plainText": ["N/A", "Ran team"]}},
                    {"jobTitle": "Intern", "details": {"plainText": "N/A"}},
                    {"jobTitle": "Temp", "details": "N/A"}
                ]
            }]
        }));
        let positions = &record.work_experience[0].position;
        assert_eq!(
            positions[0].details.plain_text,
            Some(Detail::Paragraph("Did work".into()))
        );
        assert_eq!(positions[0].details.subsections[0].label, "Tools");
        assert_eq!(
            positions[1].details.plain_text,
            Some(Detail::Bullets(vec!["Ran team".into()]))
        );
        assert_eq!(positions[2].details.plain_text, None);
        assert_eq!(positions[3].details, PositionDetails::default());
    }

    #[test]
    fn test_generic_sections_accept_all_shapes() {
        let record = parse(json!({
            "associations": ["N/A"],
            "publications": [{"name": "Paper", "summary": "Journal"}],
            "interests": "Chess",
            "languages": "N/A",
            "awards": []
        }));
        assert_eq!(record.associations, None);
        assert_eq!(
            record.publications,
            Some(ListSection::Items(vec!["Paper: Journal".into()]))
        );
        assert_eq!(record.interests, Some(ListSection::Paragraph("Chess".into())));
        assert_eq!(record.languages, None);
        assert_eq!(record.awards, None);
        assert_eq!(record.section(GenericSection::Interests), record.interests.as_ref());
    }

    #[test]
    fn test_skills_accept_records_and_strings() {
        let record = parse(json!({"skills": [{"name": "Rust"}, "Go", {"name": "N/A"}]}));
        assert_eq!(record.skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_numeric_score_is_text() {
        let record = parse(json!({"education": [{"score": 3.9, "endDate": "N/A"}]}));
        assert_eq!(record.education[0].score.as_deref(), Some("3.9"));
        assert_eq!(record.education[0].end_date, None);
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let err = serde_json::from_value::<CvRecord>(json!({"workExperience": 42})).unwrap_err();
        assert!(err.to_string().contains("expected a list"), "{err}");
        let err = serde_json::from_value::<CvRecord>(json!({"contactDetails": [1]})).unwrap_err();
        assert!(err.to_string().contains("expected an object"), "{err}");
    }

    #[test]
    fn test_generic_titles() {
        let titles: Vec<String> = GenericSection::ALL.iter().map(|s| s.title()).collect();
        assert_eq!(titles[0], "Associations");
        assert_eq!(titles[8], "Languages");
        assert_eq!(titles.len(), 9);
    }
}
