//! Built-in demo portfolio served on the anonymous home route when no
//! default account exists yet (fresh install, or the in-memory store).
//! This fallback lives with the route handler on purpose: the resolver
//! itself never substitutes demo content.

use uuid::Uuid;

use crate::models::content::{
    Experience, Profile, Project, SiteConfig, Skill, SkillCategory,
};
use crate::models::language::Language;
use crate::resolver::ResolvedBundle;

const DEMO_AVATAR: &str =
    "https://images.unsplash.com/photo-1618005182384-a83a8bd57fbe?q=80&w=1200&auto=format&fit=crop";
const DEMO_REPO: &str = "https://github.com/folio/folio";

fn demo_profile(language: Language) -> Profile {
    let (title, tagline, bio, location) = match language {
        Language::Zh => (
            "多语言作品集构建器",
            "今天就展示你的未来。",
            "我是一个开源平台，帮助开发者、设计师和创意人士展示他们的作品。\
             结构化的简历数据、多主题渲染、内置 AI 润色与翻译同步。",
            "云端 / 全球",
        ),
        Language::ZhTw => (
            "多語言作品集建立工具",
            "今天就展現你的未來。",
            "我是一個開源平台，幫助開發者、設計師和創意人士展示他們的作品。\
             結構化的履歷資料、多主題渲染、內建 AI 潤色與翻譯同步。",
            "雲端 / 全球",
        ),
        Language::Ja => (
            "多言語ポートフォリオビルダー",
            "あなたの未来を、今日見せよう。",
            "開発者・デザイナー・クリエイターの作品紹介を支えるオープンソース\
             プラットフォームです。構造化された経歴データ、複数テーマでの表示、\
             AIによる文章の磨き上げと翻訳同期を備えています。",
            "クラウド / 世界中",
        ),
        Language::En => (
            "Multi-language Portfolio Builder",
            "Showcase your future, today.",
            "An open-source platform that helps developers, designers and \
             creatives present their work: structured resume data, multiple \
             render themes, and built-in AI polishing and translation sync.",
            "Cloud / Worldwide",
        ),
    };

    Profile {
        id: Uuid::new_v4(),
        account_id: Uuid::nil(),
        language,
        name: "Folio".to_string(),
        title: title.to_string(),
        tagline: Some(tagline.to_string()),
        bio: bio.to_string(),
        location: location.to_string(),
        username: None,
        avatar_url: DEMO_AVATAR.to_string(),
        email: "hello@folio.dev".to_string(),
        phone: None,
        website: Some(DEMO_REPO.to_string()),
        github_url: Some(DEMO_REPO.to_string()),
        linkedin_url: None,
        twitter_url: None,
    }
}

fn demo_experiences(language: Language) -> Vec<Experience> {
    let entries: Vec<(&str, &str, &str, Option<&str>, &str, bool)> = match language {
        Language::En => vec![
            (
                "Folio",
                "Platform Evolution",
                "2023-10-01",
                None,
                "Continuously shipping features such as AI text polishing, \
                 translation sync across four languages, and multi-theme rendering.",
                true,
            ),
            (
                "Open Source Community",
                "Backend Architecture",
                "2023-01-01",
                Some("2023-09-30"),
                "Designed the core service: a typed record store, a language \
                 resolution layer, and an explicit collaborator seam for AI calls.",
                false,
            ),
        ],
        Language::Zh => vec![
            (
                "Folio",
                "平台演进",
                "2023-10-01",
                None,
                "持续发布新功能：AI 文本润色、四种语言的翻译同步、多主题渲染。",
                true,
            ),
            (
                "开源社区",
                "后端架构设计",
                "2023-01-01",
                Some("2023-09-30"),
                "设计核心服务：类型化记录存储、语言解析层，以及显式的 AI 调用接口。",
                false,
            ),
        ],
        Language::ZhTw => vec![(
            "Folio",
            "平台演進",
            "2023-10-01",
            None,
            "持續發布新功能：AI 文字潤色、四種語言的翻譯同步、多主題渲染。",
            true,
        )],
        Language::Ja => vec![],
    };

    entries
        .into_iter()
        .map(|(company, role, start, end, description, current)| Experience {
            id: Uuid::new_v4(),
            account_id: Uuid::nil(),
            language,
            company: company.to_string(),
            role: role.to_string(),
            start_date: start.to_string(),
            end_date: end.map(str::to_string),
            description: description.to_string(),
            current,
        })
        .collect()
}

fn demo_projects(language: Language) -> Vec<Project> {
    let (title, description) = match language {
        Language::Zh => ("作品集引擎", "驱动此站点的多语言渲染与同步引擎。"),
        Language::ZhTw => ("作品集引擎", "驅動此站點的多語言渲染與同步引擎。"),
        Language::Ja => ("ポートフォリオエンジン", "このサイトを支える多言語レンダリングと同期エンジン。"),
        Language::En => (
            "Portfolio Engine",
            "The multi-language resolution and sync engine behind this very site.",
        ),
    };

    vec![Project {
        id: Uuid::new_v4(),
        account_id: Uuid::nil(),
        language,
        title: title.to_string(),
        description: description.to_string(),
        image_url: DEMO_AVATAR.to_string(),
        video_url: None,
        demo_url: None,
        repo_url: Some(DEMO_REPO.to_string()),
        tags: vec!["rust".to_string(), "axum".to_string(), "ai".to_string()],
    }]
}

fn demo_skills(language: Language) -> Vec<Skill> {
    [
        ("Rust", SkillCategory::Backend, 95),
        ("PostgreSQL", SkillCategory::Backend, 85),
        ("Generative AI", SkillCategory::Tools, 80),
    ]
    .iter()
    .map(|(name, category, proficiency)| Skill {
        id: Uuid::new_v4(),
        account_id: Uuid::nil(),
        language,
        name: name.to_string(),
        category: *category,
        proficiency: *proficiency,
    })
    .collect()
}

/// The complete demo bundle for one language.
pub fn demo_bundle(language: Language) -> ResolvedBundle {
    ResolvedBundle {
        profile: demo_profile(language),
        language_fallback: false,
        experiences: demo_experiences(language),
        education: Vec::new(),
        projects: demo_projects(language),
        skills: demo_skills(language),
        config: SiteConfig::default_for(Uuid::nil()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_gets_a_bundle() {
        for language in Language::ALL {
            let bundle = demo_bundle(language);
            assert_eq!(bundle.profile.language, language);
            assert!(!bundle.profile.bio.is_empty());
            assert!(!bundle.projects.is_empty());
        }
    }

    #[test]
    fn test_demo_lists_are_language_scoped() {
        let zh = demo_bundle(Language::Zh);
        assert!(zh.experiences.iter().all(|e| e.language == Language::Zh));
        // ja simply has no demo experience entries; empty is valid.
        assert!(demo_bundle(Language::Ja).experiences.is_empty());
    }
}
