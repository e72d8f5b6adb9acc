//! Archetypes seeded into the `archetype` table by `init`.

use crate::{
    schema::{Archetype, archetype},
    types::DbResourceAmount,
};
use shared::{ArchetypeTraits, PrefabNameList, receives_ghost};
use spacetimedb::{ReducerContext, Table};

struct Entry {
    name: &'static str,
    is_structure: bool,
    has_wear: bool,
    is_vehicle: bool,
    max_health: f32,
    supports: bool,
    comfort: i32,
    cost: &'static [(&'static str, u32)],
    destroy_noise: f32,
    auto_fragments: bool,
    fuel_capacity: Option<f32>,
    is_bed: bool,
    is_portal: bool,
    is_spawner: bool,
}

const PIECE: Entry = Entry {
    name: "",
    is_structure: true,
    has_wear: true,
    is_vehicle: false,
    max_health: 400.0,
    supports: true,
    comfort: 0,
    cost: &[],
    destroy_noise: 40.0,
    auto_fragments: true,
    fuel_capacity: None,
    is_bed: false,
    is_portal: false,
    is_spawner: false,
};

const CATALOGUE: &[Entry] = &[
    Entry {
        name: "wood_wall",
        cost: &[("Wood", 2)],
        ..PIECE
    },
    Entry {
        name: "wood_floor",
        cost: &[("Wood", 2)],
        ..PIECE
    },
    Entry {
        name: "stone_wall",
        max_health: 1500.0,
        cost: &[("Stone", 6)],
        destroy_noise: 80.0,
        ..PIECE
    },
    Entry {
        name: "bed",
        supports: false,
        comfort: 1,
        cost: &[("Wood", 8)],
        is_bed: true,
        ..PIECE
    },
    Entry {
        name: "fireplace",
        supports: false,
        comfort: 1,
        cost: &[("Stone", 5), ("Wood", 2)],
        auto_fragments: false,
        fuel_capacity: Some(10.0),
        ..PIECE
    },
    Entry {
        name: "portal_wood",
        supports: false,
        cost: &[("FineWood", 20), ("GreydwarfEye", 10), ("SurtlingCore", 2)],
        is_portal: true,
        ..PIECE
    },
    Entry {
        name: "wisp_lantern",
        supports: false,
        cost: &[("Wood", 4), ("Wisp", 1)],
        is_spawner: true,
        ..PIECE
    },
    Entry {
        name: "banner",
        has_wear: false,
        supports: false,
        cost: &[("Wood", 1)],
        destroy_noise: 0.0,
        auto_fragments: false,
        ..PIECE
    },
    Entry {
        name: "raft",
        is_vehicle: true,
        supports: false,
        cost: &[("Wood", 20)],
        ..PIECE
    },
];

/// Replaces the catalogue rows. Ghostability is computed against `excluded`.
pub fn seed_archetypes(ctx: &ReducerContext, excluded: &PrefabNameList) {
    let stale: Vec<String> = ctx.db.archetype().iter().map(|row| row.name).collect();
    for name in stale {
        ctx.db.archetype().name().delete(&name);
    }
    for entry in CATALOGUE {
        let mut row = Archetype {
            name: entry.name.to_owned(),
            is_structure: entry.is_structure,
            has_wear: entry.has_wear,
            is_vehicle: entry.is_vehicle,
            max_health: entry.max_health,
            supports: entry.supports,
            comfort: entry.comfort,
            cost: entry
                .cost
                .iter()
                .map(|&(item, amount)| DbResourceAmount::new(item, amount))
                .collect(),
            destroy_noise: entry.destroy_noise,
            auto_fragments: entry.auto_fragments,
            fuel_capacity: entry.fuel_capacity,
            is_bed: entry.is_bed,
            is_portal: entry.is_portal,
            is_spawner: entry.is_spawner,
            ghostable: false,
        };
        row.ghostable = is_ghostable(&row, excluded);
        ctx.db.archetype().insert(row);
    }
}

/// Recomputes `ghostable` after the excluded-name list changed.
pub fn refresh_ghostable(ctx: &ReducerContext, excluded: &PrefabNameList) {
    let rows: Vec<Archetype> = ctx.db.archetype().iter().collect();
    for row in rows {
        let ghostable = is_ghostable(&row, excluded);
        if ghostable != row.ghostable {
            log::info!("archetype {} ghostable: {ghostable}", row.name);
            ctx.db.archetype().name().update(Archetype { ghostable, ..row });
        }
    }
}

fn is_ghostable(row: &Archetype, excluded: &PrefabNameList) -> bool {
    receives_ghost(
        excluded,
        &ArchetypeTraits {
            name: &row.name,
            is_structure: row.is_structure,
            has_wear: row.has_wear,
            is_vehicle: row.is_vehicle,
        },
    )
}
