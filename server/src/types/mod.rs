mod db_faction;
mod db_hit_kind;
mod db_resource_amount;
mod db_spawner_status;
mod db_vec3;

pub use db_faction::DbFaction;
pub use db_hit_kind::DbHitKind;
pub use db_resource_amount::DbResourceAmount;
pub use db_spawner_status::DbSpawnerStatus;
pub use db_vec3::DbVec3;
