// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::entity::{Attributes, Entity, EntityKey, EntityType};
use crate::domain::repositories::entity_repository::{EntityRepository, RepositoryError};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// 内存实体仓库
///
/// 基于DashMap的实体存储，按 (类型, 名称) 去重，可被多个发现任务并发共享。
#[derive(Debug, Default)]
pub struct InMemoryEntityRepository {
    entities: DashMap<EntityKey, Entity>,
}

impl InMemoryEntityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[async_trait]
impl EntityRepository for InMemoryEntityRepository {
    async fn create(
        &self,
        entity_type: EntityType,
        attributes: Attributes,
    ) -> Result<Entity, RepositoryError> {
        let entity = Entity::from_attributes(entity_type, attributes)?;

        match self.entities.entry(entity.key()) {
            Entry::Occupied(_) => Err(RepositoryError::AlreadyExists(entity.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(entity.clone());
                Ok(entity)
            }
        }
    }

    async fn exists(&self, entity_type: EntityType, name: &str) -> Result<bool, RepositoryError> {
        Ok(self.entities.contains_key(&EntityKey {
            entity_type,
            name: name.to_string(),
        }))
    }

    async fn find(
        &self,
        entity_type: EntityType,
        name: &str,
    ) -> Result<Option<Entity>, RepositoryError> {
        Ok(self
            .entities
            .get(&EntityKey {
                entity_type,
                name: name.to_string(),
            })
            .map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Entity>, RepositoryError> {
        let mut entities: Vec<Entity> = self
            .entities
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        entities.sort_by(|a, b| {
            a.entity_type
                .to_string()
                .cmp(&b.entity_type.to_string())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(entities)
    }
}
