use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;

use micro_royale_gen::add_generator;
use micro_royale_gen::core::Args;

fn main() -> AppExit {
    let args = Args::parse();
    let mut app = App::new();
    app.add_plugins(LogPlugin::default());
    add_generator(&mut app, args);
    app.run()
}
