//! The demo scene: one card in the middle of the window and a flip button below.

use bevy::{color::palettes::basic::RED, picking::Pickable, prelude::*};
use card_flip::{CardFlip, CardFlipSettings, FlipButtonOf};
use std::f32::consts::PI;

use crate::app::LOG_DEMO;

/// UI color constants for buttons
pub const NORMAL_BUTTON: Color = Color::srgb(0.15, 0.15, 0.15);
pub const HOVERED_BUTTON: Color = Color::srgb(0.25, 0.25, 0.25);
pub const PRESSED_BUTTON: Color = Color::srgb(0.35, 0.75, 0.35);

const CARD_SIZE: Vec2 = Vec2::new(180.0, 260.0);
const FRONT_COLOR: Color = Color::srgb(0.85, 0.8, 0.65);
const BACK_COLOR: Color = Color::srgb(0.25, 0.3, 0.6);
const LABEL_COLOR: Color = Color::srgb(0.1, 0.1, 0.1);

/// Settings the demo card is spawned with.
#[derive(Resource, Deref, Clone, Copy)]
pub struct DemoCardSettings(pub CardFlipSettings);

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_scene)
            .add_systems(Update, style_flip_button);
    }
}

fn spawn_scene(mut commands: Commands, settings: Res<DemoCardSettings>) {
    commands.spawn(Camera2d);

    let button = spawn_flip_button(&mut commands);

    let front = commands
        .spawn((
            Name::new("Card Front"),
            Sprite::from_color(FRONT_COLOR, CARD_SIZE),
            Transform::default(),
        ))
        .with_children(|face| {
            face.spawn(label("Front"));
        })
        .id();

    // Turned half a turn so it reads correctly once the card has flipped
    let back = commands
        .spawn((
            Name::new("Card Back"),
            Sprite::from_color(BACK_COLOR, CARD_SIZE),
            Transform::from_rotation(Quat::from_rotation_y(PI)),
        ))
        .with_children(|face| {
            face.spawn(label("Back"));
        })
        .id();

    let card = commands
        .spawn((
            Name::new("Card"),
            CardFlip::new(front, back, button),
            **settings,
            Transform::from_xyz(0.0, 40.0, 0.0),
        ))
        .add_children(&[front, back])
        .id();

    info!(target: LOG_DEMO, "spawned card {card:?} with {:?}", **settings);
}

fn label(text: &str) -> impl Bundle {
    (
        Text2d::new(text),
        TextFont {
            font_size: 32.0,
            ..default()
        },
        TextColor(LABEL_COLOR),
        Transform::from_xyz(0.0, 0.0, 0.1),
        Pickable::IGNORE,
    )
}

fn spawn_flip_button(commands: &mut Commands) -> Entity {
    let mut button = Entity::PLACEHOLDER;
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::End,
                justify_content: JustifyContent::Center,
                padding: UiRect::bottom(Val::Px(40.0)),
                ..default()
            },
            Pickable::IGNORE,
            Name::new("Flip Button Root"),
        ))
        .with_children(|parent| {
            button = parent
                .spawn((
                    Button,
                    Node {
                        width: Val::Px(200.0),
                        height: Val::Px(65.0),
                        border: UiRect::all(Val::Px(5.0)),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BorderColor::all(Color::BLACK),
                    BorderRadius::all(Val::Px(10.0)),
                    BackgroundColor(NORMAL_BUTTON),
                    Name::new("Flip Button"),
                ))
                .with_children(|content| {
                    content.spawn((
                        Text::new("Flip"),
                        TextFont {
                            font_size: 28.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.9, 0.9, 0.9)),
                    ));
                })
                .id();
        });
    button
}

fn style_flip_button(
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor, &mut BorderColor),
        (Changed<Interaction>, With<FlipButtonOf>),
    >,
) {
    for (interaction, mut color, mut border_color) in &mut buttons {
        match *interaction {
            Interaction::Pressed => {
                *color = PRESSED_BUTTON.into();
                *border_color = BorderColor::all(RED);
            }
            Interaction::Hovered => {
                *color = HOVERED_BUTTON.into();
                *border_color = BorderColor::all(Color::WHITE);
            }
            Interaction::None => {
                *color = NORMAL_BUTTON.into();
                *border_color = BorderColor::all(Color::BLACK);
            }
        }
    }
}
