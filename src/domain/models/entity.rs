// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 实体属性集合
pub type Attributes = Map<String, Value>;

/// 实体类型
///
/// 决定实体是否可以触发后续的发现任务
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// DNS记录，可以触发子域名爆破
    DnsRecord,
    /// URI，可以触发目录爆破
    Uri,
    /// IP地址
    IpAddress,
    /// 主机
    Host,
}

impl EntityType {
    /// 所有已知的实体类型
    pub const ALL: [EntityType; 4] = [
        EntityType::DnsRecord,
        EntityType::Uri,
        EntityType::IpAddress,
        EntityType::Host,
    ];
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EntityType::DnsRecord => write!(f, "DnsRecord"),
            EntityType::Uri => write!(f, "Uri"),
            EntityType::IpAddress => write!(f, "IpAddress"),
            EntityType::Host => write!(f, "Host"),
        }
    }
}

impl FromStr for EntityType {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DnsRecord" => Ok(EntityType::DnsRecord),
            "Uri" => Ok(EntityType::Uri),
            "IpAddress" => Ok(EntityType::IpAddress),
            "Host" => Ok(EntityType::Host),
            other => Err(EntityError::UnknownType(other.to_string())),
        }
    }
}

/// 实体错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EntityError {
    /// 未知的实体类型
    #[error("Unknown entity type: {0}")]
    UnknownType(String),
    /// 属性中缺少名称
    #[error("Entity attributes carry no name")]
    MissingName,
}

/// 实体唯一标识 (类型, 名称)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityKey {
    pub entity_type: EntityType,
    pub name: String,
}

/// 实体
///
/// 表示一个已发现的资源，例如一个URI或一条DNS记录。
/// 实体由 (类型, 名称) 唯一标识，创建后不会被删除。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// 实体类型
    pub entity_type: EntityType,
    /// 实体名称
    pub name: String,
    /// 实体属性，始终包含 `name`
    pub attributes: Attributes,
}

impl Entity {
    /// 创建只带名称属性的实体
    pub fn new(entity_type: EntityType, name: impl Into<String>) -> Self {
        let name = name.into();
        let mut attributes = Attributes::new();
        attributes.insert("name".to_string(), Value::String(name.clone()));
        Self {
            entity_type,
            name,
            attributes,
        }
    }

    /// 从属性集合创建实体，名称取自 `name` 属性
    pub fn from_attributes(
        entity_type: EntityType,
        attributes: Attributes,
    ) -> Result<Self, EntityError> {
        let name = attributes
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .ok_or(EntityError::MissingName)?
            .to_string();

        Ok(Self {
            entity_type,
            name,
            attributes,
        })
    }

    /// 根据扫描目标推断种子实体
    ///
    /// 以 http:// 或 https:// 开头的目标视为URI，其余视为DNS记录
    pub fn from_target(target: &str) -> Self {
        let target = target.trim();
        if target.starts_with("http://") || target.starts_with("https://") {
            let mut entity = Entity::new(EntityType::Uri, target);
            entity.set_attribute("uri", target);
            entity
        } else {
            Entity::new(EntityType::DnsRecord, target.trim_end_matches('.'))
        }
    }

    pub fn key(&self) -> EntityKey {
        EntityKey {
            entity_type: self.entity_type,
            name: self.name.clone(),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// 设置属性（名称属性不可修改）
    pub fn set_attribute(&mut self, key: &str, value: impl Into<Value>) {
        if key == "name" {
            return;
        }
        self.attributes.insert(key.to_string(), value.into());
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}#{}", self.entity_type, self.name)
    }
}
