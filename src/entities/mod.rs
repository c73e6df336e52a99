//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod applied_tip;
pub mod company;
pub mod consumption;
pub mod subscription;
pub mod tip;
pub mod user;

// Re-export specific types to avoid conflicts
pub use applied_tip::{
    Column as AppliedTipColumn, Entity as AppliedTip, Model as AppliedTipModel,
};
pub use company::{Column as CompanyColumn, Entity as Company, Model as CompanyModel};
pub use consumption::{
    Column as ConsumptionColumn, Entity as Consumption, Model as ConsumptionModel,
};
pub use subscription::{
    Column as SubscriptionColumn, Entity as Subscription, Model as SubscriptionModel,
};
pub use tip::{Column as TipColumn, Entity as Tip, Model as TipModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
