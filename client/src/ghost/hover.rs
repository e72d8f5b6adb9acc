use super::{ReplicatedGhost, ReplicatedPolicy};
use bevy::{
    picking::{hover::HoverMap, pointer::PointerId},
    prelude::*,
};
use shared::{GhostSystem, HoverHint};

#[derive(Component)]
pub(super) struct GhostHint;

pub(super) fn spawn_hint(mut commands: Commands) {
    commands.spawn((
        GhostHint,
        Text::new(""),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(48.0),
            left: Val::Px(24.0),
            ..default()
        },
        Visibility::Hidden,
    ));
}

pub(super) fn update_hint(
    policy: Res<ReplicatedPolicy>,
    hover: Option<Res<HoverMap>>,
    parents: Query<&ChildOf>,
    flags: Query<&ReplicatedGhost>,
    hint: Single<(&mut Text, &mut Visibility), With<GhostHint>>,
) {
    let hovered = hover
        .as_deref()
        .and_then(|map| map.get(&PointerId::Mouse))
        .and_then(|hits| {
            hits.keys().find_map(|&entity| {
                std::iter::once(entity)
                    .chain(parents.iter_ancestors(entity))
                    .find_map(|e| flags.get(e).ok())
            })
        });

    let system = GhostSystem::<Entity>::new(policy.0.clone());
    let (mut text, mut visibility) = hint.into_inner();
    match system.hover_hint(hovered).map(hint_text) {
        Some(label) => {
            if text.0 != label {
                text.0 = label;
            }
            visibility.set_if_neq(Visibility::Inherited);
        }
        None => {
            visibility.set_if_neq(Visibility::Hidden);
        }
    }
}

fn hint_text(hint: HoverHint) -> String {
    if hint.show_cost {
        format!("{} (costs the build requirement)", HoverHint::LABEL)
    } else {
        HoverHint::LABEL.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{GhostPolicy, Toggle};

    #[test]
    fn hint_only_shows_on_ghosts_while_enabled() {
        let mut policy = GhostPolicy::default();
        let system = GhostSystem::<Entity>::new(policy.clone());

        let label = system.hover_hint(Some(&ReplicatedGhost(true))).map(hint_text);
        assert_eq!(
            label.as_deref(),
            Some("Use a hammer to rebuild (costs the build requirement)")
        );
        assert_eq!(system.hover_hint(Some(&ReplicatedGhost(false))), None);
        assert_eq!(system.hover_hint::<ReplicatedGhost>(None), None);

        policy.require_resources = Toggle::Off;
        let free = GhostSystem::<Entity>::new(policy.clone());
        let label = free.hover_hint(Some(&ReplicatedGhost(true))).map(hint_text);
        assert_eq!(label.as_deref(), Some(HoverHint::LABEL));

        policy.enabled = Toggle::Off;
        let off = GhostSystem::<Entity>::new(policy);
        assert_eq!(off.hover_hint(Some(&ReplicatedGhost(true))), None);
    }
}
