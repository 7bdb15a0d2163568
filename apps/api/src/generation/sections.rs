//! Per-section renderers.
//!
//! Each renderer decides whether its section has anything to show and emits
//! nothing at all (heading and rule included) when it does not.

use crate::generation::builder::Composer;
use crate::models::resume::{
    ContactDetails, CvRecord, Detail, EducationEntry, Engagement, GenericSection, ListSection,
    Overview, Position, Reference,
};

pub const EXPERIENCE_HEADING: &str = "Career Experience";
pub const EDUCATION_HEADING: &str = "Education";
pub const SKILLS_HEADING: &str = "Key Skills & Expertise";
pub const REFERENCES_HEADING: &str = "References";
pub const PRESENT: &str = "Present";

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

/// One piece of the contact line.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactToken {
    pub text: String,
    pub link: Option<String>,
}

/// Contact tokens in print order: phone, email, website, location.
pub fn contact_tokens(contact: &ContactDetails) -> Vec<ContactToken> {
    let mut tokens = Vec::new();
    if let Some(phone) = &contact.phone {
        tokens.push(ContactToken {
            text: phone.clone(),
            link: None,
        });
    }
    if let Some(email) = &contact.email {
        tokens.push(ContactToken {
            text: email.clone(),
            link: Some(format!("mailto:{email}")),
        });
    }
    if let Some(website) = &contact.website {
        tokens.push(ContactToken {
            text: website.clone(),
            link: Some(website_target(website)),
        });
    }
    if let Some(location) = contact.location.display() {
        tokens.push(ContactToken {
            text: location,
            link: None,
        });
    }
    tokens
}

/// Bare hosts such as `example.dev` get an `https://` scheme.
fn website_target(website: &str) -> String {
    if website.contains("://") || website.starts_with("mailto:") {
        website.to_string()
    } else {
        format!("https://{website}")
    }
}

pub fn render_header(c: &mut Composer<'_>, record: &CvRecord) {
    let style = c.style();
    if let Some(name) = &record.personal_information.name {
        c.line(name, &style.name);
    }

    let tokens = contact_tokens(&record.contact_details);
    if tokens.is_empty() {
        return;
    }
    let look = style.contact.text;
    let mut runs = Vec::with_capacity(tokens.len() * 2);
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            runs.push((c.run(&style.contact_separator, look), None));
        }
        match &token.link {
            Some(target) => runs.push((
                c.colored_run(&token.text, look, style.link_color),
                Some(target.clone()),
            )),
            None => runs.push((c.run(&token.text, look), None)),
        }
    }

    let paragraph = c.open_paragraph(&style.contact);
    for (run, target) in runs {
        match target {
            Some(target) => paragraph.add_hyperlink(run, target),
            None => paragraph.add_run(run),
        };
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Overview
// ────────────────────────────────────────────────────────────────────────────

pub fn render_overview(c: &mut Composer<'_>, overview: &Overview) {
    let style = c.style();
    if let Some(role) = &overview.desired_role {
        c.line(role, &style.desired_role);
    }
    if let Some(tagline) = &overview.tagline {
        c.line(tagline, &style.tagline);
    }

    for subsection in &overview.subsections {
        c.heading(&subsection.label);
        if style.is_highlight_label(&subsection.label) {
            c.bullets(&subsection.lines, style.bullet_indent);
        } else {
            for line in &subsection.lines {
                c.line(line, &style.body);
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Experience and education
// ────────────────────────────────────────────────────────────────────────────

/// `"(start – end)"`, with `Present` standing in for a missing end date.
/// Without a start date only an explicit end date is shown.
pub fn date_range(start: Option<&str>, end: Option<&str>) -> Option<String> {
    match (start, end) {
        (Some(start), end) => Some(format!("({start} – {})", end.unwrap_or(PRESENT))),
        (None, Some(end)) => Some(format!("({end})")),
        (None, None) => None,
    }
}

/// Appends `part` after `sep`, or starts the line with it.
fn push_part(line: &mut String, sep: &str, part: Option<&str>) {
    if let Some(part) = part {
        if !line.is_empty() {
            line.push_str(sep);
        }
        line.push_str(part);
    }
}

/// `"{jobTitle} - {organisation} | {about}, {location} ({start} – {end})"`.
/// Missing parts drop out together with the punctuation that introduces them.
pub fn position_line(engagement: &Engagement, position: &Position) -> String {
    let mut line = String::new();
    push_part(&mut line, "", position.job_title.as_deref());
    push_part(&mut line, " - ", engagement.organisation.as_deref());
    push_part(&mut line, " | ", engagement.about_the_organisation.as_deref());
    push_part(&mut line, ", ", engagement.location.as_deref());
    let dates = date_range(position.start_date.as_deref(), position.end_date.as_deref());
    push_part(&mut line, " ", dates.as_deref());
    line
}

/// `"{studyType} in {area} - {institution}, {location} ({start} – {end})"`.
pub fn education_line(entry: &EducationEntry) -> String {
    let mut line = String::new();
    push_part(&mut line, "", entry.study_type.as_deref());
    push_part(&mut line, " in ", entry.area.as_deref());
    push_part(&mut line, " - ", entry.institution.as_deref());
    push_part(&mut line, ", ", entry.location.as_deref());
    let dates = date_range(entry.start_date.as_deref(), entry.end_date.as_deref());
    push_part(&mut line, " ", dates.as_deref());
    line
}

pub fn render_experience(c: &mut Composer<'_>, engagements: &[Engagement]) {
    let positions: Vec<(&Position, String)> = engagements
        .iter()
        .flat_map(|e| e.position.iter().map(move |p| (p, position_line(e, p))))
        .filter(|(p, line)| {
            !line.is_empty() || p.details.plain_text.is_some() || !p.details.subsections.is_empty()
        })
        .collect();
    if positions.is_empty() {
        return;
    }

    let style = c.style();
    c.heading(EXPERIENCE_HEADING);
    for (position, line) in positions {
        if !line.is_empty() {
            c.line(&line, &style.position);
        }

        match &position.details.plain_text {
            Some(Detail::Bullets(items)) => c.bullets(items, style.bullet_indent),
            Some(Detail::Paragraph(text)) => c.line(text, &style.body),
            None => {}
        }

        for subsection in &position.details.subsections {
            c.line(&subsection.label, &style.detail_heading);
            c.bullets(&subsection.lines, style.nested_bullet_indent);
        }
    }
}

pub fn render_education(c: &mut Composer<'_>, entries: &[EducationEntry]) {
    let entries: Vec<(&EducationEntry, String)> = entries
        .iter()
        .map(|e| (e, education_line(e)))
        .filter(|(e, line)| !line.is_empty() || e.score.is_some())
        .collect();
    if entries.is_empty() {
        return;
    }
    let style = c.style();
    c.heading(EDUCATION_HEADING);
    for (entry, line) in entries {
        if !line.is_empty() {
            c.line(&line, &style.body);
        }
        if let Some(score) = &entry.score {
            c.line(&format!("Score: {score}"), &style.body);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// Splits `items` into three contiguous runs at ⌊n/3⌋ and ⌊2n/3⌋.
pub fn partition_thirds<T>(items: &[T]) -> [&[T]; 3] {
    let n = items.len();
    let (first, second) = (n / 3, 2 * n / 3);
    [&items[..first], &items[first..second], &items[second..]]
}

pub fn render_skills(c: &mut Composer<'_>, skills: &[String]) {
    if skills.is_empty() {
        return;
    }
    c.heading(SKILLS_HEADING);
    c.column_table(&partition_thirds(skills));
}

// ────────────────────────────────────────────────────────────────────────────
// Generic sections and references
// ────────────────────────────────────────────────────────────────────────────

pub fn render_generic_sections(c: &mut Composer<'_>, record: &CvRecord) {
    let style = c.style();
    for kind in GenericSection::ALL {
        let Some(section) = record.section(kind) else {
            continue;
        };
        c.heading(&kind.title());
        match section {
            ListSection::Items(items) => c.bullets(items, style.bullet_indent),
            ListSection::Paragraph(text) => c.line(text, &style.body),
        }
    }
}

pub fn render_references(c: &mut Composer<'_>, references: &[Reference]) {
    let complete: Vec<(&str, &str)> = references
        .iter()
        .filter_map(|r| Some((r.name.as_deref()?, r.reference.as_deref()?)))
        .collect();
    if complete.is_empty() {
        return;
    }
    let style = c.style();
    c.heading(REFERENCES_HEADING);
    for (name, text) in complete {
        c.line(name, &style.reference_name);
        c.line(text, &style.body);
    }
}
