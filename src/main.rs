mod clock;
mod config;
mod game;
mod input;
mod render;
mod store;

use log::{info, warn};
use macroquad::prelude::*;

use clock::Ticker;
use config::GameConfig;
use game::{Game, StepOutcome};
use render::{MacroquadSurface, FIELD_BG, PANEL_BG, SCORE_PANEL_HEIGHT};
use store::JsonFileStore;

fn window_conf() -> Conf {
    let field = config::FieldConfig::default();
    Conf {
        window_title: "Snake".to_owned(),
        window_width: field.width,
        window_height: field.height + SCORE_PANEL_HEIGHT as i32,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::load();
    let width = config.field.width as f32;
    let height = config.field.height as f32;
    request_new_screen_size(width, height + SCORE_PANEL_HEIGHT);

    let mut store = JsonFileStore::open(&config.storage.path).unwrap_or_else(|e| {
        warn!("{}: {e}; starting without a saved high score", config.storage.path);
        JsonFileStore::empty(&config.storage.path)
    });
    let high_score = store::load_high_score(&store, &config.storage.high_score_key);
    info!(
        "{}x{} field, {}px cells, high score {} from {}",
        config.field.width,
        config.field.height,
        config.field.cell_size,
        high_score,
        store.path().display()
    );

    macroquad::rand::srand(clock_seed());
    let mut game = Game::new(&config, high_score);
    let mut ticker = Ticker::new();
    let mut field = MacroquadSurface::new(vec2(0.0, 0.0), vec2(width, height), FIELD_BG);
    let mut panel = MacroquadSurface::new(vec2(0.0, height), vec2(width, SCORE_PANEL_HEIGHT), PANEL_BG);

    loop {
        for key in get_keys_pressed() {
            if game.handle_key(key) {
                info!("new round");
            }
        }

        // The ticker keeps running through game over, like the frame clock it models
        if ticker.ready(get_time() * 1000.0, game.snake.speed_ms) {
            if let StepOutcome::Crashed = game.step(&mut store) {
                info!("score {}, best {}", game.score, game.high_score);
            }
        }

        clear_background(FIELD_BG);
        render::draw_field(&game, &mut field);
        render::draw_scores(&game, &mut panel);

        next_frame().await;
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
