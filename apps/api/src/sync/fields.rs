//! Field-level translation policy: which fields of each content type are
//! prose (translatable) and which are protected (ids, dates, URLs,
//! numbers, enums).
//!
//! The policy is enforced structurally, in both directions. `prose_of`
//! extracts only the prose subset, so protected data never reaches the
//! transform collaborator at all; `apply_prose` reads only the known
//! prose keys back, so a collaborator that echoes extra or altered keys
//! cannot touch anything else.

use serde_json::{json, Map, Value};

use crate::models::content::{ContentRecord, Profile};

fn string_of(fields: &Value, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn strings_of(fields: &Value, key: &str) -> Option<Vec<String>> {
    let items = fields.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    )
}

/// The localized Profile fields, as a flat JSON object.
pub fn profile_prose(profile: &Profile) -> Value {
    let mut fields = Map::new();
    fields.insert("name".into(), json!(profile.name));
    fields.insert("title".into(), json!(profile.title));
    if let Some(tagline) = &profile.tagline {
        fields.insert("tagline".into(), json!(tagline));
    }
    fields.insert("bio".into(), json!(profile.bio));
    fields.insert("location".into(), json!(profile.location));
    Value::Object(fields)
}

/// Merges a translated prose object back into a Profile. Missing or
/// non-string values leave the source text in place; global fields are
/// not represented here and cannot be affected.
pub fn apply_profile_prose(profile: &mut Profile, fields: &Value) {
    if let Some(name) = string_of(fields, "name") {
        profile.name = name;
    }
    if let Some(title) = string_of(fields, "title") {
        profile.title = title;
    }
    if profile.tagline.is_some() {
        if let Some(tagline) = string_of(fields, "tagline") {
            profile.tagline = Some(tagline);
        }
    }
    if let Some(bio) = string_of(fields, "bio") {
        profile.bio = bio;
    }
    if let Some(location) = string_of(fields, "location") {
        profile.location = location;
    }
}

/// The prose subset of a list-type record.
pub fn prose_of(record: &ContentRecord) -> Value {
    match record {
        ContentRecord::Experience(exp) => json!({
            "company": exp.company,
            "role": exp.role,
            "description": exp.description,
        }),
        ContentRecord::Education(edu) => {
            let mut fields = Map::new();
            fields.insert("school".into(), json!(edu.school));
            fields.insert("degree".into(), json!(edu.degree));
            fields.insert("field".into(), json!(edu.field));
            if let Some(description) = &edu.description {
                fields.insert("description".into(), json!(description));
            }
            Value::Object(fields)
        }
        ContentRecord::Project(proj) => json!({
            "title": proj.title,
            "description": proj.description,
            "tags": proj.tags,
        }),
        ContentRecord::Skill(skill) => json!({
            "name": skill.name,
        }),
        // Profile has its own pair above; Config is never translated.
        ContentRecord::Profile(_) | ContentRecord::Config(_) => Value::Object(Map::new()),
    }
}

/// Merges a translated prose object back into a list-type record.
pub fn apply_prose(record: &mut ContentRecord, fields: &Value) {
    match record {
        ContentRecord::Experience(exp) => {
            if let Some(company) = string_of(fields, "company") {
                exp.company = company;
            }
            if let Some(role) = string_of(fields, "role") {
                exp.role = role;
            }
            if let Some(description) = string_of(fields, "description") {
                exp.description = description;
            }
        }
        ContentRecord::Education(edu) => {
            if let Some(school) = string_of(fields, "school") {
                edu.school = school;
            }
            if let Some(degree) = string_of(fields, "degree") {
                edu.degree = degree;
            }
            if let Some(field) = string_of(fields, "field") {
                edu.field = field;
            }
            if edu.description.is_some() {
                if let Some(description) = string_of(fields, "description") {
                    edu.description = Some(description);
                }
            }
        }
        ContentRecord::Project(proj) => {
            if let Some(title) = string_of(fields, "title") {
                proj.title = title;
            }
            if let Some(description) = string_of(fields, "description") {
                proj.description = description;
            }
            if let Some(tags) = strings_of(fields, "tags") {
                if tags.len() == proj.tags.len() {
                    proj.tags = tags;
                }
            }
        }
        ContentRecord::Skill(skill) => {
            if let Some(name) = string_of(fields, "name") {
                skill.name = name;
            }
        }
        ContentRecord::Profile(_) | ContentRecord::Config(_) => {}
    }
}
