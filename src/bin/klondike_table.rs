use anyhow::{anyhow, Context, Error};
use argh::FromArgs;
use klondike_engine::{AutoplayConfig, DrawMode, Game, GameConfig};
use rand::SeedableRng;
use std::fs;

/// Deal a seeded Klondike game and print the table.
#[derive(FromArgs)]
struct Args {
    /// seed for the shuffle
    #[argh(option, default = "321")]
    seed: u64,

    /// turn three cards at a time
    #[argh(switch)]
    draw_three: bool,

    /// path to a JSON file of autoplay settings
    #[argh(option)]
    config: Option<String>,

    /// how many times to turn the stock, autoplaying the waste after each turn
    #[argh(option, default = "0")]
    turns: usize,
}

fn load_autoplay(path: &str) -> Result<AutoplayConfig, Error> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    serde_json::from_str(&text).map_err(|err| anyhow!("parsing {}: {}", path, err))
}

fn main() -> Result<(), Error> {
    let args: Args = argh::from_env();
    let autoplay = match &args.config {
        Some(path) => load_autoplay(path)?,
        None => AutoplayConfig::default(),
    };
    let config = GameConfig {
        draw: if args.draw_three {
            DrawMode::Three
        } else {
            DrawMode::One
        },
        autoplay,
    };

    let mut rng = rand_pcg::Pcg32::seed_from_u64(args.seed);
    let mut game = Game::create_and_deal(&mut rng, config).context("dealing game")?;
    println!("seed = {}", args.seed);

    for turn in 0..args.turns {
        if game.has_stock() {
            game.turn_stock()?;
        } else if game.has_waste() {
            game.return_waste_to_stock()?;
            continue;
        } else {
            break;
        }
        while let Some(destination) = game.autoplay_waste()? {
            println!("turn {}: waste -> {:?}", turn, destination);
        }
    }

    print!("{}", game);
    if game.is_won() {
        println!("won in {} moves", game.move_count());
    }
    Ok(())
}
