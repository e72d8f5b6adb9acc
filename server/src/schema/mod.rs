mod admin_table;
mod agent_table;
mod archetype_table;
mod destruction_event_table;
mod dropped_item_table;
mod ghost_settings_table;
mod inventory_item_table;
mod protected_zone_table;
mod spawn_point_table;
mod structure_table;
mod structure_var_table;

pub use admin_table::*;
pub use agent_table::*;
pub use archetype_table::*;
pub use destruction_event_table::*;
pub use dropped_item_table::*;
pub use ghost_settings_table::*;
pub use inventory_item_table::*;
pub use protected_zone_table::*;
pub use spawn_point_table::*;
pub use structure_table::*;
pub use structure_var_table::*;
