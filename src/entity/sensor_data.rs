use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One ingested measurement. `timestamp` is assigned by the server in
/// seconds since the Unix epoch.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sensor_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sensor_id: i32,
    pub json_data: Json,
    pub timestamp: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sensor::Entity",
        from = "Column::SensorId",
        to = "super::sensor::Column::Id"
    )]
    Sensor,
}

impl Related<super::sensor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sensor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
