use spacetimedb::*;

/// Respawn point of an agent, bound to a bed structure.
#[table(name = spawn_point, public)]
pub struct SpawnPoint {
    #[primary_key]
    pub identity: Identity,

    #[index(btree)]
    pub structure_id: u64,
}
