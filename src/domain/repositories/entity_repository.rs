// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::entity::{Attributes, Entity, EntityError, EntityType};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RepositoryError {
    /// 实体已存在
    #[error("Entity already exists: {0}")]
    AlreadyExists(String),
    /// 无效参数
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<EntityError> for RepositoryError {
    fn from(e: EntityError) -> Self {
        RepositoryError::InvalidParameter(e.to_string())
    }
}

/// 实体仓库特质
///
/// 以 (类型, 名称) 为键的实体存储，插入语义为“不存在才插入”，
/// 必须能承受并发写入。
#[async_trait]
pub trait EntityRepository: Send + Sync {
    /// 创建实体，名称取自 `name` 属性；已存在时返回 `AlreadyExists`
    async fn create(
        &self,
        entity_type: EntityType,
        attributes: Attributes,
    ) -> Result<Entity, RepositoryError>;
    /// 检查实体是否存在
    async fn exists(&self, entity_type: EntityType, name: &str) -> Result<bool, RepositoryError>;
    /// 查找实体
    async fn find(
        &self,
        entity_type: EntityType,
        name: &str,
    ) -> Result<Option<Entity>, RepositoryError>;
    /// 列出所有实体
    async fn list(&self) -> Result<Vec<Entity>, RepositoryError>;
}

#[async_trait]
impl<T: EntityRepository + ?Sized> EntityRepository for Arc<T> {
    async fn create(
        &self,
        entity_type: EntityType,
        attributes: Attributes,
    ) -> Result<Entity, RepositoryError> {
        (**self).create(entity_type, attributes).await
    }

    async fn exists(&self, entity_type: EntityType, name: &str) -> Result<bool, RepositoryError> {
        (**self).exists(entity_type, name).await
    }

    async fn find(
        &self,
        entity_type: EntityType,
        name: &str,
    ) -> Result<Option<Entity>, RepositoryError> {
        (**self).find(entity_type, name).await
    }

    async fn list(&self) -> Result<Vec<Entity>, RepositoryError> {
        (**self).list().await
    }
}
