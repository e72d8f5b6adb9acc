use spacetimedb::*;

/// Ghost policy shared by the module and every client.
///
/// Single-row table (`id = 1`) seeded by `init` and edited through `update_ghost_settings`.
/// Clients subscribe to it to pick up the ghost transparency.
///
/// Notes
/// - `excluded` is a comma-separated archetype name list. Whitespace around names is ignored.
/// - `lock_config` restricts edits to rows in the `admin` table.
#[derive(Debug, Clone, PartialEq)]
#[table(name = ghost_settings, public)]
pub struct GhostSettings {
    /// Unique id (primary key). Use a single row with `id = 1`.
    #[primary_key]
    pub id: u32,

    /// Master switch. Turning it off removes every ghost.
    pub enabled: bool,

    /// Rebuilding costs the build requirement and ghosting drops the resources.
    pub require_resources: bool,

    /// Ghosts keep supporting the structures resting on them.
    pub ghost_supports: bool,

    /// Only structures with a creator of record may become ghosts.
    pub require_creator: bool,

    /// Only structures inside an enabled player zone may become ghosts.
    pub require_ward: bool,

    /// Alpha of ghost materials, within [0, 1].
    pub transparency: f32,

    pub excluded: String,

    pub lock_config: bool,
}
