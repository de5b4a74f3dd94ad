use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub sender: String,
    pub text: String,
    pub sentiment: Option<String>,
    pub timestamp_us: i64,
}

impl ActiveModelBehavior for ActiveModel {}
