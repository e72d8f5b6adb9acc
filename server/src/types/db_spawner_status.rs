use shared::SpawnerStatus;

#[derive(spacetimedb::SpacetimeType, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbSpawnerStatus {
    Ready,
    Waiting,
    Unavailable,
}

impl From<DbSpawnerStatus> for SpawnerStatus {
    fn from(value: DbSpawnerStatus) -> Self {
        match value {
            DbSpawnerStatus::Ready => SpawnerStatus::Ready,
            DbSpawnerStatus::Waiting => SpawnerStatus::Waiting,
            DbSpawnerStatus::Unavailable => SpawnerStatus::Unavailable,
        }
    }
}

impl From<SpawnerStatus> for DbSpawnerStatus {
    fn from(value: SpawnerStatus) -> Self {
        match value {
            SpawnerStatus::Ready => DbSpawnerStatus::Ready,
            SpawnerStatus::Waiting => DbSpawnerStatus::Waiting,
            SpawnerStatus::Unavailable => DbSpawnerStatus::Unavailable,
        }
    }
}
