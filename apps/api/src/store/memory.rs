//! In-process store used when `DATABASE_URL` is absent, and as the null
//! backend in tests. Single-process only; nothing survives a restart.

use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::content::{ContentKind, ContentRecord};
use crate::store::{Filter, Store, StoreError};

#[derive(Default)]
pub struct MemStore {
    // Vec rather than a map so find() preserves insertion order,
    // which the resolver's stable sort relies on for ties.
    records: RwLock<Vec<ContentRecord>>,
}

impl MemStore {
    pub fn new() -> MemStore {
        MemStore::default()
    }
}

#[async_trait]
impl Store for MemStore {
    async fn find(&self, kind: ContentKind, filter: &Filter) -> Result<Vec<ContentRecord>, StoreError> {
        let records = self.records.read().expect("store lock poisoned");
        Ok(records
            .iter()
            .filter(|r| r.kind() == kind && filter.matches(r))
            .cloned()
            .collect())
    }

    async fn find_one(
        &self,
        kind: ContentKind,
        filter: &Filter,
    ) -> Result<Option<ContentRecord>, StoreError> {
        let records = self.records.read().expect("store lock poisoned");
        Ok(records
            .iter()
            .find(|r| r.kind() == kind && filter.matches(r))
            .cloned())
    }

    async fn upsert(&self, record: &ContentRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().expect("store lock poisoned");
        match records
            .iter_mut()
            .find(|r| r.kind() == record.kind() && r.id() == record.id())
        {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        Ok(())
    }

    async fn delete(&self, kind: ContentKind, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.records.write().expect("store lock poisoned");
        records.retain(|r| !(r.kind() == kind && r.id() == id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::{Profile, Skill, SkillCategory};
    use crate::models::language::Language;

    fn profile(account_id: Uuid, language: Language, username: &str) -> ContentRecord {
        ContentRecord::Profile(Profile {
            id: Uuid::new_v4(),
            account_id,
            language,
            name: "Name".into(),
            title: "Title".into(),
            tagline: None,
            bio: "Bio".into(),
            location: "Here".into(),
            username: Some(username.into()),
            avatar_url: String::new(),
            email: "a@b.c".into(),
            phone: None,
            website: None,
            github_url: None,
            linkedin_url: None,
            twitter_url: None,
        })
    }

    fn skill(account_id: Uuid, language: Language, name: &str) -> ContentRecord {
        ContentRecord::Skill(Skill {
            id: Uuid::new_v4(),
            account_id,
            language,
            name: name.into(),
            category: SkillCategory::Backend,
            proficiency: 80,
        })
    }

    #[tokio::test]
    async fn test_filters_combine_with_and() {
        let store = MemStore::new();
        let account_a = Uuid::new_v4();
        let account_b = Uuid::new_v4();
        store.upsert(&profile(account_a, Language::En, "dave")).await.unwrap();
        store.upsert(&profile(account_a, Language::Zh, "dave")).await.unwrap();
        store.upsert(&profile(account_b, Language::En, "kim")).await.unwrap();

        let found = store
            .find(
                ContentKind::Profile,
                &Filter::by_account(account_a).language(Language::Zh),
            )
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].language(), Some(Language::Zh));

        let by_name = store
            .find_one(ContentKind::Profile, &Filter::by_username("kim"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_name.account_id(), account_b);
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_id() {
        let store = MemStore::new();
        let account = Uuid::new_v4();
        let record = skill(account, Language::En, "Rust");
        store.upsert(&record).await.unwrap();

        let mut updated = record.clone();
        if let ContentRecord::Skill(s) = &mut updated {
            s.name = "Rust (advanced)".into();
        }
        store.upsert(&updated).await.unwrap();

        let found = store
            .find(ContentKind::Skill, &Filter::by_account(account))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].clone().into_skill().unwrap().name, "Rust (advanced)");
    }

    #[tokio::test]
    async fn test_delete_is_scoped_to_kind_and_id() {
        let store = MemStore::new();
        let account = Uuid::new_v4();
        let keep = skill(account, Language::En, "Rust");
        let drop = skill(account, Language::En, "Go");
        store.upsert(&keep).await.unwrap();
        store.upsert(&drop).await.unwrap();

        store.delete(ContentKind::Skill, drop.id()).await.unwrap();
        let found = store
            .find(ContentKind::Skill, &Filter::by_account(account))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), keep.id());
    }

    #[tokio::test]
    async fn test_find_preserves_insertion_order() {
        let store = MemStore::new();
        let account = Uuid::new_v4();
        for name in ["first", "second", "third"] {
            store.upsert(&skill(account, Language::En, name)).await.unwrap();
        }
        let found = store
            .find(ContentKind::Skill, &Filter::by_account(account))
            .await
            .unwrap();
        let names: Vec<String> = found
            .into_iter()
            .map(|r| r.into_skill().unwrap().name)
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }
}
