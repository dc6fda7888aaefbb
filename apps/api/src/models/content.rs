use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::language::Language;

/// One record per (account, language). `username` and the contact/link
/// fields are global: after any save they are propagated byte-identical
/// to every sibling-language row of the same account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub account_id: Uuid,
    pub language: Language,
    // Localized fields
    pub name: String,
    pub title: String,
    pub tagline: Option<String>,
    pub bio: String,
    pub location: String,
    // Global fields
    pub username: Option<String>,
    pub avatar_url: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
}

impl Profile {
    /// Overwrites this row's global fields with the ones from `src`,
    /// leaving the localized fields alone.
    pub fn copy_global_fields_from(&mut self, src: &Profile) {
        self.username = src.username.clone();
        self.avatar_url = src.avatar_url.clone();
        self.email = src.email.clone();
        self.phone = src.phone.clone();
        self.website = src.website.clone();
        self.github_url = src.github_url.clone();
        self.linkedin_url = src.linkedin_url.clone();
        self.twitter_url = src.twitter_url.clone();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    pub account_id: Uuid,
    pub language: Language,
    pub company: String,
    pub role: String,
    /// ISO `YYYY-MM-DD`; opaque to the core and never translated.
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: String,
    pub current: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    pub account_id: Uuid,
    pub language: Language,
    pub school: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub account_id: Uuid,
    pub language: Language,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub video_url: Option<String>,
    pub demo_url: Option<String>,
    pub repo_url: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkillCategory {
    Frontend,
    Backend,
    Design,
    Tools,
    Languages,
    SoftSkills,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: Uuid,
    pub account_id: Uuid,
    pub language: Language,
    pub name: String,
    pub category: SkillCategory,
    /// 0–100.
    pub proficiency: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Modern,
    Classic,
    Creative,
}

/// One per account, shared by every language view. Not language-partitioned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub id: Uuid,
    pub account_id: Uuid,
    pub theme: Theme,
    pub primary_color: String,
    pub display_order: Vec<String>,
}

impl SiteConfig {
    /// The config an account gets before it has saved one.
    pub fn default_for(account_id: Uuid) -> SiteConfig {
        SiteConfig {
            id: Uuid::new_v4(),
            account_id,
            theme: Theme::Modern,
            primary_color: "#10b981".to_string(),
            display_order: ["about", "projects", "experience", "skills", "education"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Closed set of content types the store knows about. All dispatch on
/// content type goes through this enum — there is no string branching
/// at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Profile,
    Experience,
    Education,
    Project,
    Skill,
    Config,
}

impl ContentKind {
    /// The four list-type kinds subject to replace-sync and enum-dispatched CRUD.
    pub const LIST_KINDS: [ContentKind; 4] = [
        ContentKind::Experience,
        ContentKind::Education,
        ContentKind::Project,
        ContentKind::Skill,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Profile => "profile",
            ContentKind::Experience => "experience",
            ContentKind::Education => "education",
            ContentKind::Project => "project",
            ContentKind::Skill => "skill",
            ContentKind::Config => "config",
        }
    }
}

/// A record of any content type, tagged by kind. This is the currency of
/// the `Store` trait; typed accessors below let callers get back to the
/// concrete shapes without re-matching everywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentRecord {
    Profile(Profile),
    Experience(Experience),
    Education(Education),
    Project(Project),
    Skill(Skill),
    Config(SiteConfig),
}

impl ContentRecord {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentRecord::Profile(_) => ContentKind::Profile,
            ContentRecord::Experience(_) => ContentKind::Experience,
            ContentRecord::Education(_) => ContentKind::Education,
            ContentRecord::Project(_) => ContentKind::Project,
            ContentRecord::Skill(_) => ContentKind::Skill,
            ContentRecord::Config(_) => ContentKind::Config,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            ContentRecord::Profile(r) => r.id,
            ContentRecord::Experience(r) => r.id,
            ContentRecord::Education(r) => r.id,
            ContentRecord::Project(r) => r.id,
            ContentRecord::Skill(r) => r.id,
            ContentRecord::Config(r) => r.id,
        }
    }

    pub fn account_id(&self) -> Uuid {
        match self {
            ContentRecord::Profile(r) => r.account_id,
            ContentRecord::Experience(r) => r.account_id,
            ContentRecord::Education(r) => r.account_id,
            ContentRecord::Project(r) => r.account_id,
            ContentRecord::Skill(r) => r.account_id,
            ContentRecord::Config(r) => r.account_id,
        }
    }

    /// `None` only for `Config`, which is shared across languages.
    pub fn language(&self) -> Option<Language> {
        match self {
            ContentRecord::Profile(r) => Some(r.language),
            ContentRecord::Experience(r) => Some(r.language),
            ContentRecord::Education(r) => Some(r.language),
            ContentRecord::Project(r) => Some(r.language),
            ContentRecord::Skill(r) => Some(r.language),
            ContentRecord::Config(_) => None,
        }
    }

    /// Set only on Profile rows; the store indexes it for username lookup.
    pub fn username(&self) -> Option<&str> {
        match self {
            ContentRecord::Profile(r) => r.username.as_deref(),
            _ => None,
        }
    }

    pub fn set_account_id(&mut self, account_id: Uuid) {
        match self {
            ContentRecord::Profile(r) => r.account_id = account_id,
            ContentRecord::Experience(r) => r.account_id = account_id,
            ContentRecord::Education(r) => r.account_id = account_id,
            ContentRecord::Project(r) => r.account_id = account_id,
            ContentRecord::Skill(r) => r.account_id = account_id,
            ContentRecord::Config(r) => r.account_id = account_id,
        }
    }

    /// Re-stamps identity fields after a transform round-trip so a
    /// misbehaving collaborator can never alter them.
    pub fn restamp(&mut self, id: Uuid, language: Language, account_id: Uuid) {
        self.set_account_id(account_id);
        match self {
            ContentRecord::Profile(r) => {
                r.id = id;
                r.language = language;
            }
            ContentRecord::Experience(r) => {
                r.id = id;
                r.language = language;
            }
            ContentRecord::Education(r) => {
                r.id = id;
                r.language = language;
            }
            ContentRecord::Project(r) => {
                r.id = id;
                r.language = language;
            }
            ContentRecord::Skill(r) => {
                r.id = id;
                r.language = language;
            }
            // Config is never synced; language does not apply.
            ContentRecord::Config(r) => r.id = id,
        }
    }

    pub fn into_profile(self) -> Option<Profile> {
        match self {
            ContentRecord::Profile(r) => Some(r),
            _ => None,
        }
    }

    pub fn into_experience(self) -> Option<Experience> {
        match self {
            ContentRecord::Experience(r) => Some(r),
            _ => None,
        }
    }

    pub fn into_education(self) -> Option<Education> {
        match self {
            ContentRecord::Education(r) => Some(r),
            _ => None,
        }
    }

    pub fn into_project(self) -> Option<Project> {
        match self {
            ContentRecord::Project(r) => Some(r),
            _ => None,
        }
    }

    pub fn into_skill(self) -> Option<Skill> {
        match self {
            ContentRecord::Skill(r) => Some(r),
            _ => None,
        }
    }

    pub fn into_config(self) -> Option<SiteConfig> {
        match self {
            ContentRecord::Config(r) => Some(r),
            _ => None,
        }
    }
}

impl From<Profile> for ContentRecord {
    fn from(r: Profile) -> Self {
        ContentRecord::Profile(r)
    }
}

impl From<Experience> for ContentRecord {
    fn from(r: Experience) -> Self {
        ContentRecord::Experience(r)
    }
}

impl From<Education> for ContentRecord {
    fn from(r: Education) -> Self {
        ContentRecord::Education(r)
    }
}

impl From<Project> for ContentRecord {
    fn from(r: Project) -> Self {
        ContentRecord::Project(r)
    }
}

impl From<Skill> for ContentRecord {
    fn from(r: Skill) -> Self {
        ContentRecord::Skill(r)
    }
}

impl From<SiteConfig> for ContentRecord {
    fn from(r: SiteConfig) -> Self {
        ContentRecord::Config(r)
    }
}

/// Newest-start-date-first ordering for timeline sections. Stable sort:
/// records sharing a start date keep their storage order.
pub fn sort_newest_first<T>(items: &mut [T], start_date: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| start_date(b).cmp(start_date(a)));
}
