//! Shape checks applied by the editor before anything reaches the store.
//! Everything here is pure; failures map to `AppError::Validation`.

use crate::models::content::{ContentRecord, Profile, SiteConfig};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 32;

/// Public URL slug: 3–32 chars, lowercase ASCII alphanumerics and hyphens,
/// no leading or trailing hyphen.
pub fn validate_username(username: &str) -> Result<(), String> {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(format!(
            "username must be {USERNAME_MIN}-{USERNAME_MAX} characters"
        ));
    }
    if username.starts_with('-') || username.ends_with('-') {
        return Err("username cannot start or end with a hyphen".to_string());
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("username may only contain a-z, 0-9 and hyphens".to_string());
    }
    Ok(())
}

pub fn validate_profile(profile: &Profile) -> Result<(), String> {
    if profile.name.trim().is_empty() {
        return Err("name is required".to_string());
    }
    if !profile.email.contains('@') {
        return Err("email is not valid".to_string());
    }
    if let Some(username) = profile.username.as_deref() {
        validate_username(username)?;
    }
    Ok(())
}

pub fn validate_config(config: &SiteConfig) -> Result<(), String> {
    let color = &config.primary_color;
    let is_hex = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !is_hex {
        return Err("primary_color must be #rrggbb".to_string());
    }
    if config.display_order.is_empty() {
        return Err("display_order cannot be empty".to_string());
    }
    Ok(())
}

/// Validates a list-type record. Profile and Config have their own
/// endpoints and are rejected by the editor before reaching this.
pub fn validate_item(record: &ContentRecord) -> Result<(), String> {
    match record {
        ContentRecord::Experience(exp) => {
            if exp.company.trim().is_empty() || exp.role.trim().is_empty() {
                return Err("company and role are required".to_string());
            }
            if exp.current && exp.end_date.is_some() {
                return Err("a current position cannot have an end date".to_string());
            }
        }
        ContentRecord::Education(edu) => {
            if edu.school.trim().is_empty() {
                return Err("school is required".to_string());
            }
        }
        ContentRecord::Project(proj) => {
            if proj.title.trim().is_empty() {
                return Err("title is required".to_string());
            }
        }
        ContentRecord::Skill(skill) => {
            if skill.name.trim().is_empty() {
                return Err("name is required".to_string());
            }
            if skill.proficiency > 100 {
                return Err("proficiency must be 0-100".to_string());
            }
        }
        ContentRecord::Profile(_) | ContentRecord::Config(_) => {
            return Err("not a list-type record".to_string());
        }
    }
    Ok(())
}
