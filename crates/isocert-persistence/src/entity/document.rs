//! `SeaORM` Entity for documents table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub qms_type_id: Uuid,
    pub file_path: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::qms_type::Entity",
        from = "Column::QmsTypeId",
        to = "super::qms_type::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    QmsType,
}

impl Related<super::qms_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QmsType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
