mod app;
mod scene;

use crate::app::{AppContext, LOG_DEMO};
use crate::scene::{DemoCardSettings, ScenePlugin};

use bevy::{log::LogPlugin, prelude::*};
use card_flip::{CardFlipPlugin, ShakeRng};

fn main() -> anyhow::Result<()> {
    let context = AppContext::init()?;
    info!(
        target: LOG_DEMO,
        "settings from {}: {:?}",
        context.settings_file.display(),
        context.settings
    );

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .build()
            .disable::<LogPlugin>()
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Card Flip".to_string(),
                    ..default()
                }),
                ..default()
            }),
    );

    if let Some(seed) = context.settings.rng.seed {
        info!(target: LOG_DEMO, "shake offsets seeded with {seed}");
        app.insert_resource(ShakeRng::seeded(seed));
    }

    app.insert_resource(DemoCardSettings(context.settings.card))
        .add_plugins((CardFlipPlugin, ScenePlugin));

    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => anyhow::bail!("app exited with code {code}"),
    }
}
