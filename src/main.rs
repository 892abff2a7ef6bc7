use pokeplay::build_info;
use pokeplay::minigames::MinigameKind;
use pokeplay::store::{catalogue, purchase, PurchaseResult};
use pokeplay::{FileStorage, ItemKey, PlayerStore, Storage};
use std::io;

fn print_help() {
    println!("Pokeplay - arithmetic mini-games progression\n");
    println!("Usage: pokeplay [command]\n");
    println!("Commands:");
    println!("  status        Show coins, level and items (default)");
    println!("  games         List the mini-games");
    println!("  shop          List items for sale");
    println!("  buy <item>    Buy one item from the shop");
    println!("  reset         Wipe all progress");
    println!("\nOptions:");
    println!("  -v, --version Show version information");
    println!("  -h, --help    Show this help message");
    println!("\nSet RUST_LOG=info for diagnostics.");
}

fn print_status<S: Storage>(store: &PlayerStore<S>) {
    let state = store.state();
    println!("Level:      {}", state.level());
    println!("Coins:      {}", state.coins());
    println!("High score: {}", state.high_score());
    println!("Items:");
    for key in ItemKey::ALL {
        println!("  {:<12} x{}", key.display_name(), state.item_count(key));
    }
}

fn print_shop() {
    for (key, price) in catalogue() {
        println!("  {:<12} {} coins  (buy {})", key.display_name(), price, key.name());
    }
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("status");

    match command {
        "--version" | "-v" => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        "--help" | "-h" => {
            print_help();
            return Ok(());
        }
        "games" => {
            for kind in MinigameKind::ALL {
                println!("  {:<11} {}", kind.name(), kind.title());
            }
            return Ok(());
        }
        "shop" => {
            print_shop();
            return Ok(());
        }
        _ => {}
    }

    let mut store = PlayerStore::with_entropy(FileStorage::new()?);

    match command {
        "status" => print_status(&store),
        "buy" => {
            let Some(key) = args.get(2).and_then(|name| ItemKey::from_name(name)) else {
                eprintln!("Usage: pokeplay buy <item>");
                print_shop();
                std::process::exit(2);
            };
            match purchase(&mut store, key) {
                PurchaseResult::Bought {
                    key,
                    remaining_coins,
                } => println!(
                    "Bought 1 {}. {} coins left.",
                    key.display_name(),
                    remaining_coins
                ),
                PurchaseResult::CannotAfford { price, coins } => {
                    println!("Not enough coins: {} costs {}, you have {}.", key.display_name(), price, coins);
                }
                PurchaseResult::NotForSale => {
                    println!("{} cannot be bought, only found.", key.display_name());
                }
            }
        }
        "reset" => {
            store.reset();
            println!("Progress reset.");
            print_status(&store);
        }
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Run 'pokeplay --help' for usage.");
            std::process::exit(2);
        }
    }

    Ok(())
}
