//! HUD: status banner and restart control.
//!
//! Pure display layer. The banner mirrors [`CurrentStatus`], the restart
//! button's visibility is owned by the reveal animator, and presses only
//! emit [`ReplayRequested`] — all decisions stay in the core.

use bevy::prelude::*;

use crate::ArUpdateSet;
use crate::reveal::{ReplayRequested, RevealAnimator};
use crate::session::{CurrentStatus, StatusSeverity};

#[derive(Component)]
pub struct StatusBanner;
#[derive(Component)]
pub struct StatusText;
#[derive(Component)]
pub struct RestartButton;

pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        position_type: PositionType::Absolute,
                        top: Val::Px(24.0),
                        left: Val::Percent(10.0),
                        right: Val::Percent(10.0),
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.55)),
                    StatusBanner,
                ))
                .with_children(|banner| {
                    banner.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        StatusText,
                    ));
                });

            parent
                .spawn((
                    Button,
                    Node {
                        position_type: PositionType::Absolute,
                        bottom: Val::Px(32.0),
                        right: Val::Px(32.0),
                        width: Val::Px(160.0),
                        height: Val::Px(44.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
                    Visibility::Hidden,
                    RestartButton,
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new("Replay"),
                        TextFont {
                            font_size: 18.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });
        });
}

pub fn update_status_banner(
    status: Res<CurrentStatus>,
    mut banners: Query<&mut Visibility, With<StatusBanner>>,
    mut texts: Query<(&mut Text, &mut TextColor), With<StatusText>>,
) {
    if !status.is_changed() {
        return;
    }
    let colour = match status.0.severity {
        StatusSeverity::Info => Color::WHITE,
        StatusSeverity::Warning => Color::srgb(1.0, 0.85, 0.3),
        StatusSeverity::Error => Color::srgb(1.0, 0.35, 0.3),
    };
    for (mut text, mut text_colour) in &mut texts {
        text.0 = status.0.message.clone();
        text_colour.0 = colour;
    }
    for mut visibility in &mut banners {
        *visibility = if status.0.is_clear() {
            Visibility::Hidden
        } else {
            Visibility::Visible
        };
    }
}

pub fn update_restart_button(
    animator: Res<RevealAnimator>,
    mut buttons: Query<&mut Visibility, With<RestartButton>>,
) {
    if !animator.is_changed() {
        return;
    }
    for mut visibility in &mut buttons {
        *visibility = if animator.restart_visible() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

pub fn restart_button_interaction(
    mut q: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<RestartButton>),
    >,
    mut requests: EventWriter<ReplayRequested>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                requests.write(ReplayRequested);
                *bg = BackgroundColor(Color::srgb(0.18, 0.20, 0.24));
            }
            Interaction::Hovered => *bg = BackgroundColor(Color::srgb(0.26, 0.28, 0.32)),
            Interaction::None => *bg = BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
        }
    }
}

pub struct HangarHudPlugin;

impl Plugin for HangarHudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud).add_systems(
            Update,
            (
                update_status_banner,
                update_restart_button,
                restart_button_interaction,
            )
                .in_set(ArUpdateSet::Output),
        );
    }
}
