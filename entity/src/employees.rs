use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub national_id: String,
    #[sea_orm(indexed)]
    pub department: Department,
    pub enabled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Hash)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
pub enum Department {
    #[sea_orm(string_value = "IT")]
    It,
    #[sea_orm(string_value = "HR")]
    Hr,
    #[sea_orm(string_value = "FINANCE")]
    Finance,
    #[sea_orm(string_value = "SALES")]
    Sales,
    #[sea_orm(string_value = "MARKETING")]
    Marketing,
    #[sea_orm(string_value = "OPERATIONS")]
    Operations,
    #[sea_orm(string_value = "LEGAL")]
    Legal,
}

impl ActiveModelBehavior for ActiveModel {}
