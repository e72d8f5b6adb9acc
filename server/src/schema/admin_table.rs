use spacetimedb::*;

/// Identities allowed to edit locked settings and grant items.
///
/// The publisher of the module is added by `init`.
#[table(name = admin)]
pub struct Admin {
    #[primary_key]
    pub identity: Identity,
}
